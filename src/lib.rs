//! # Strata
//!
//! Versioned, transactional schema migrations across SQL dialects.
//!
//! Migrations record dialect-independent operations into a [`model::Database`].
//! The [`scripter`] turns them into SQL for one [`provider::Provider`], and the
//! [`migration::Migrator`] runs each migration as a single transaction that
//! also updates the version table.

pub mod backend;
pub mod config;
pub mod connection;
pub mod executor;
pub mod metrics;
pub mod migration;
pub mod model;
pub mod provider;
pub mod scripter;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
pub mod transaction;

pub use connection::{ConnectionError, ConnectionFactory, ConnectionInfo, DbConnection};
pub use executor::{DbError, DbExecutor, DbValue, Row};
pub use migration::{Migration, MigrationError, Migrator};
pub use model::{Database, LogicalType};
pub use provider::{Provider, ProviderRegistry};
pub use transaction::{DbTransaction, TransactionError};
