//! In-process migration execution helpers

use super::{Migration, MigrationError, Migrator, StepReport};
use crate::config::MigrationConfig;
use crate::connection::ConnectionFactory;

/// Run migrations on application startup
///
/// Creates the version table when needed and applies every pending migration.
/// The application should not start if this fails: the failing step was
/// rolled back, steps before it stay applied.
///
/// # Example
///
/// ```rust,no_run
/// use strata::backend::DefaultConnectionFactory;
/// use strata::config::MigrationConfig;
/// use strata::migration::{startup_migrations, Migration};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = MigrationConfig::load()?;
///     let migrations: Vec<Box<dyn Migration>> = Vec::new();
///
///     startup_migrations(&config, DefaultConnectionFactory, migrations)?;
///
///     // Continue with application startup...
///     Ok(())
/// }
/// ```
///
/// # Errors
///
/// Returns `MigrationError` if the migrator cannot be built or a step fails.
pub fn startup_migrations<F: ConnectionFactory>(
    config: &MigrationConfig,
    factory: F,
    migrations: Vec<Box<dyn Migration>>,
) -> Result<Vec<StepReport>, MigrationError> {
    let migrator = Migrator::new(factory, config.database.connection_info(), migrations)?
        .with_version_table(config.version_table.clone());

    let applied = migrator.up(None)?;

    if applied.is_empty() {
        log::debug!("No pending migrations to apply");
    } else {
        log::info!("Applied {} migration(s) on startup", applied.len());
    }

    Ok(applied)
}

/// [`startup_migrations`] with configuration from [`MigrationConfig::load`]
///
/// # Errors
///
/// Returns `MigrationError::Config` if configuration cannot be loaded, or any
/// error of [`startup_migrations`].
pub fn startup_migrations_from_env<F: ConnectionFactory>(
    factory: F,
    migrations: Vec<Box<dyn Migration>>,
) -> Result<Vec<StepReport>, MigrationError> {
    let config = MigrationConfig::load()?;
    startup_migrations(&config, factory, migrations)
}
