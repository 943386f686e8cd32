//! Versioned, transactional migrations
//!
//! This module provides:
//! - the [`Migration`] trait, whose `up()`/`down()` record operations into a
//!   [`crate::model::Database`]
//! - the [`VersionStore`] tracking applied migrations in a version table
//! - [`MigrationStep`], which scripts and executes one migration inside one
//!   transaction
//! - the [`Migrator`], which orders steps and reports [`MigrationStatus`]
//!
//! # Example
//!
//! ```rust,no_run
//! use strata::backend::SqliteConnectionFactory;
//! use strata::connection::ConnectionInfo;
//! use strata::migration::{Migration, Migrator};
//! use strata::model::{Database, LogicalType};
//!
//! pub struct CreateUsersTable;
//!
//! impl Migration for CreateUsersTable {
//!     fn version(&self) -> i64 {
//!         20240120120000
//!     }
//!
//!     fn up(&self, db: &mut Database) {
//!         db.create_table("Users")
//!             .with_primary_key_column("Id", LogicalType::Int32)
//!             .as_identity()
//!             .with_not_nullable_column("Email", LogicalType::String)
//!             .of_size(255)
//!             .unique();
//!     }
//!
//!     fn down(&self, db: &mut Database) {
//!         db.table("Users").drop();
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let migrator = Migrator::new(
//!     SqliteConnectionFactory,
//!     ConnectionInfo::new("SQLite", "app.db"),
//!     vec![Box::new(CreateUsersTable)],
//! )?;
//! migrator.up(None)?;
//! assert!(migrator.status()?.is_up_to_date());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod migration;
pub mod migrator;
pub mod record;
pub mod startup;
pub mod status;
pub mod step;
pub mod version_store;

pub use error::MigrationError;
pub use migration::{Direction, Migration, MigrationId};
pub use migrator::Migrator;
pub use record::VersionRecord;
pub use startup::{startup_migrations, startup_migrations_from_env};
pub use status::MigrationStatus;
pub use step::{MigrationStep, StepReport, StepState};
pub use version_store::{Bootstrap, VersionStore, DEFAULT_VERSION_TABLE};
