//! Execution of a single migration step
//!
//! A step applies one migration in one direction inside one transaction:
//!
//! 1. open a connection and begin a transaction
//! 2. record the migration's operations into a fresh [`Database`]
//! 3. script them for the provider, aborting before any SQL runs if the model
//!    does not validate
//! 4. execute every command, then update the version store
//! 5. commit
//!
//! Any failure after the transaction began rolls it back, so a step either
//! lands completely (schema change plus version record) or not at all.

use super::{Direction, Migration, MigrationError, MigrationId, VersionStore};
use crate::connection::{ConnectionFactory, ConnectionInfo};
use crate::executor::DbExecutor;
use crate::model::{Database, RawContext};
use crate::provider::{Provider, ProviderRegistry};
use crate::scripter::{self, Command, ScriptOutput};
use crate::transaction::DbTransaction;
use chrono::Utc;
use std::time::{Duration, Instant};

#[cfg(feature = "metrics")]
use crate::metrics::METRICS;
#[cfg(feature = "tracing")]
use crate::metrics::tracing_helpers;

/// Where a step currently is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Idle,
    ConnectionOpen,
    TransactionOpen,
    ModelBuilt,
    Scripted,
    Executing,
    Committed,
    RolledBack,
}

/// Outcome of a committed step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub id: MigrationId,
    pub direction: Direction,
    /// Number of commands executed, deferred raw commands included
    pub commands: usize,
    pub elapsed: Duration,
}

/// One migration applied in one direction
pub struct MigrationStep<'m> {
    migration: &'m dyn Migration,
    direction: Direction,
    state: StepState,
}

impl<'m> MigrationStep<'m> {
    pub fn new(migration: &'m dyn Migration, direction: Direction) -> Self {
        Self {
            migration,
            direction,
            state: StepState::Idle,
        }
    }

    pub fn state(&self) -> StepState {
        self.state
    }

    /// Run the step
    ///
    /// With `version_store` set, the step appends (Up) or removes (Down) its
    /// version record inside the same transaction. Without one it runs as a
    /// bootstrap step and records nothing.
    ///
    /// # Errors
    ///
    /// Returns `MigrationError::Validation` when the model cannot be scripted,
    /// `MigrationError::Execution` when a command fails, and the connection,
    /// transaction or version-store variants for failures at those layers.
    /// Every error after the transaction began leaves the database untouched.
    pub fn execute(
        &mut self,
        factory: &dyn ConnectionFactory,
        info: &ConnectionInfo,
        version_store: Option<&VersionStore>,
    ) -> Result<StepReport, MigrationError> {
        let id = self.migration.id();
        #[cfg(feature = "tracing")]
        let _span =
            tracing_helpers::migration_step_span(id.timestamp, self.direction.as_str()).entered();

        let start = Instant::now();
        let result = self.run(factory, info, version_store);
        if result.is_err() && self.state != StepState::Idle {
            self.state = StepState::RolledBack;
        }

        match result {
            Ok(commands) => {
                let elapsed = start.elapsed();
                #[cfg(feature = "metrics")]
                METRICS.record_step(self.direction.as_str(), elapsed);
                log::info!(
                    "Migration {id} {} committed ({commands} command(s) in {elapsed:?})",
                    self.direction
                );
                Ok(StepReport {
                    id,
                    direction: self.direction,
                    commands,
                    elapsed,
                })
            }
            Err(e) => {
                #[cfg(feature = "metrics")]
                METRICS.record_step_failure(self.direction.as_str());
                log::error!("Migration {id} {} failed: {e}", self.direction);
                Err(e)
            }
        }
    }

    fn run(
        &mut self,
        factory: &dyn ConnectionFactory,
        info: &ConnectionInfo,
        version_store: Option<&VersionStore>,
    ) -> Result<usize, MigrationError> {
        let provider = ProviderRegistry::global()
            .get(&info.provider)
            .ok_or_else(|| MigrationError::UnknownProvider(info.provider.clone()))?;

        let mut connection = factory.open(info)?;
        self.state = StepState::ConnectionOpen;

        let transaction = connection.begin()?;
        self.state = StepState::TransactionOpen;

        let mut db = Database::new();
        match self.direction {
            Direction::Up => self.migration.up(&mut db),
            Direction::Down => self.migration.down(&mut db),
        }
        self.state = StepState::ModelBuilt;

        let output = scripter::script(&db, provider);
        if !output.is_valid() {
            rollback(transaction);
            return Err(MigrationError::Validation {
                migration: self.migration.id(),
                errors: output.errors,
            });
        }
        self.state = StepState::Scripted;
        for command in &output.commands {
            log::info!("{command}");
        }

        self.state = StepState::Executing;
        match self.apply(&*transaction, provider, &output, version_store) {
            Ok(count) => {
                transaction.commit()?;
                self.state = StepState::Committed;
                Ok(count)
            }
            Err(e) => {
                rollback(transaction);
                Err(e)
            }
        }
    }

    fn apply(
        &self,
        transaction: &dyn DbTransaction,
        provider: &'static Provider,
        output: &ScriptOutput,
        version_store: Option<&VersionStore>,
    ) -> Result<usize, MigrationError> {
        transaction
            .disable_statement_timeout()
            .map_err(|e| MigrationError::Transaction(e.into()))?;

        for command in &output.commands {
            match command {
                Command::Sql(sql) => {
                    log::debug!("Executing: {}", sql.text);
                    transaction
                        .execute(&sql.text, &[])
                        .map_err(|source| MigrationError::Execution {
                            command: sql.text.clone(),
                            table: sql.table.clone(),
                            column: sql.column.clone(),
                            source,
                        })?;
                }
                Command::Deferred(callback) => {
                    log::debug!("Executing deferred raw command");
                    let context = RawContext::new(transaction, provider);
                    callback(&context).map_err(|source| MigrationError::Execution {
                        command: command.to_string(),
                        table: None,
                        column: None,
                        source,
                    })?;
                }
            }
        }

        if let Some(store) = version_store {
            let id = self.migration.id();
            match self.direction {
                Direction::Up => store.append(transaction, &id, Utc::now()),
                Direction::Down => store.remove(transaction, &id),
            }
            .map_err(MigrationError::VersionStore)?;
        }

        Ok(output.commands.len())
    }
}

fn rollback(transaction: Box<dyn DbTransaction + '_>) {
    if let Err(e) = transaction.rollback() {
        log::warn!("Rollback failed: {e}");
    }
}
