//! Raw-command escape hatch.

use crate::executor::DbError;
use crate::provider::Provider;
use crate::transaction::DbTransaction;
use std::fmt;
use std::sync::Arc;

/// Run-time context handed to raw-command callbacks
///
/// Statements issued through [`RawContext::transaction`] commit or roll back
/// together with the scripted commands of the step.
pub struct RawContext<'a> {
    transaction: &'a dyn DbTransaction,
    provider: &'static Provider,
}

impl<'a> RawContext<'a> {
    pub fn new(transaction: &'a dyn DbTransaction, provider: &'static Provider) -> Self {
        Self { transaction, provider }
    }

    /// The open transaction of the running step
    pub fn transaction(&self) -> &'a dyn DbTransaction {
        self.transaction
    }

    /// Metadata of the provider the step runs against
    pub fn provider(&self) -> &'static Provider {
        self.provider
    }
}

/// Callback invoked with the live context when a raw command executes
pub type RawCallback = Arc<dyn Fn(&RawContext<'_>) -> Result<(), DbError> + Send + Sync>;

/// A command passed through the scripter without translation
#[derive(Clone)]
pub enum RawCommand {
    /// Static SQL text, executed verbatim
    Sql(String),
    /// Deferred command resolved against the live context
    Callback(RawCallback),
}

impl fmt::Debug for RawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawCommand::Sql(sql) => f.debug_tuple("Sql").field(sql).finish(),
            RawCommand::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}
