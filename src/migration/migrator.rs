//! Migrator - runs an ordered set of migrations against one database

use super::{
    Direction, Migration, MigrationError, MigrationId, MigrationStatus, MigrationStep,
    StepReport, VersionStore, DEFAULT_VERSION_TABLE,
};
use crate::connection::{ConnectionFactory, ConnectionInfo};
use crate::provider::ProviderRegistry;
use std::collections::HashSet;

/// Applies and reverts migrations, one transactional step each
///
/// Steps run sequentially. A failing step stops the run; steps committed
/// before it stay committed.
pub struct Migrator<F: ConnectionFactory> {
    factory: F,
    info: ConnectionInfo,
    migrations: Vec<Box<dyn Migration>>,
    store: VersionStore,
}

impl<F: ConnectionFactory> Migrator<F> {
    /// Create a migrator over `migrations`, ordered by version
    ///
    /// # Errors
    ///
    /// Returns `MigrationError::UnknownProvider` if the provider is not
    /// registered, `MigrationError::InvalidVersion` for a non-positive version
    /// and `MigrationError::DuplicateMigration` when two migrations share one.
    pub fn new(
        factory: F,
        info: ConnectionInfo,
        mut migrations: Vec<Box<dyn Migration>>,
    ) -> Result<Self, MigrationError> {
        let provider = ProviderRegistry::global()
            .get(&info.provider)
            .ok_or_else(|| MigrationError::UnknownProvider(info.provider.clone()))?;

        migrations.sort_by_key(|m| m.id());
        let mut seen = HashSet::new();
        for migration in &migrations {
            let version = migration.version();
            if version <= 0 {
                return Err(MigrationError::InvalidVersion(version));
            }
            if !seen.insert(version) {
                return Err(MigrationError::DuplicateMigration(version));
            }
        }

        Ok(Self {
            factory,
            info,
            migrations,
            store: VersionStore::new(DEFAULT_VERSION_TABLE, provider),
        })
    }

    /// Use `table` instead of the default version table
    #[must_use]
    pub fn with_version_table(mut self, table: impl Into<String>) -> Self {
        self.store = VersionStore::new(table, self.store.provider());
        self
    }

    pub fn version_store(&self) -> &VersionStore {
        &self.store
    }

    pub fn connection_info(&self) -> &ConnectionInfo {
        &self.info
    }

    /// Known migration ids, oldest first
    pub fn migrations(&self) -> impl Iterator<Item = MigrationId> + '_ {
        self.migrations.iter().map(|m| m.id())
    }

    /// Applied and pending migrations
    ///
    /// # Errors
    ///
    /// Returns `MigrationError::UnknownMigration` if the version table lists a
    /// version this migrator does not know, or a connection/version-store
    /// error if the table cannot be read.
    pub fn status(&self) -> Result<MigrationStatus, MigrationError> {
        let connection = self.factory.open(&self.info)?;
        let installed = self
            .store
            .is_installed(connection.as_ref())
            .map_err(MigrationError::VersionStore)?;
        let applied = if installed {
            self.store
                .applied(connection.as_ref())
                .map_err(MigrationError::VersionStore)?
        } else {
            Vec::new()
        };

        let applied_versions: HashSet<i64> = applied.iter().map(|r| r.timestamp()).collect();
        if let Some(unknown) = applied_versions
            .iter()
            .copied()
            .filter(|v| self.find(*v).is_none())
            .min()
        {
            return Err(MigrationError::UnknownMigration(unknown));
        }

        let pending = self
            .migrations
            .iter()
            .map(|m| m.id())
            .filter(|id| !applied_versions.contains(&id.timestamp))
            .collect();

        Ok(MigrationStatus::new(applied, pending, installed))
    }

    /// Create the version table if it does not exist yet
    ///
    /// Returns the bootstrap step's report, or `None` when the table was
    /// already installed.
    ///
    /// # Errors
    ///
    /// Returns `MigrationError` if the check or the bootstrap step fails.
    pub fn bootstrap(&self) -> Result<Option<StepReport>, MigrationError> {
        let installed = {
            let connection = self.factory.open(&self.info)?;
            self.store
                .is_installed(connection.as_ref())
                .map_err(MigrationError::VersionStore)?
        };
        if installed {
            return Ok(None);
        }

        log::info!("Creating version table {}", self.store.table());
        let bootstrap = self.store.bootstrap();
        let report = MigrationStep::new(&bootstrap, Direction::Up).execute(
            &self.factory,
            &self.info,
            None,
        )?;
        Ok(Some(report))
    }

    /// Apply pending migrations in ascending order
    ///
    /// # Arguments
    ///
    /// * `steps` - Number of migrations to apply (None = all pending)
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing step; earlier steps stay applied.
    pub fn up(&self, steps: Option<usize>) -> Result<Vec<StepReport>, MigrationError> {
        self.bootstrap()?;
        let status = self.status()?;
        let count = steps.unwrap_or(status.pending.len());

        let mut reports = Vec::new();
        for id in status.pending.iter().take(count) {
            reports.push(self.run(id.timestamp, Direction::Up)?);
        }
        Ok(reports)
    }

    /// Revert the most recently applied migrations, newest first
    ///
    /// # Arguments
    ///
    /// * `steps` - Number of migrations to revert (None = 1)
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing step; earlier steps stay reverted.
    pub fn down(&self, steps: Option<usize>) -> Result<Vec<StepReport>, MigrationError> {
        let mut applied = self.applied_versions()?;
        applied.truncate(steps.unwrap_or(1));
        self.revert(&applied)
    }

    /// Revert every applied migration newer than `timestamp`, newest first
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing step; earlier steps stay reverted.
    pub fn down_to(&self, timestamp: i64) -> Result<Vec<StepReport>, MigrationError> {
        let mut applied = self.applied_versions()?;
        applied.retain(|v| *v > timestamp);
        self.revert(&applied)
    }

    /// Applied versions, newest first
    fn applied_versions(&self) -> Result<Vec<i64>, MigrationError> {
        let status = self.status()?;
        let mut versions: Vec<i64> = status.applied.iter().map(|r| r.timestamp()).collect();
        versions.sort_by_key(|v| std::cmp::Reverse(*v));
        Ok(versions)
    }

    fn revert(&self, versions: &[i64]) -> Result<Vec<StepReport>, MigrationError> {
        let mut reports = Vec::new();
        for version in versions {
            reports.push(self.run(*version, Direction::Down)?);
        }
        Ok(reports)
    }

    fn run(&self, version: i64, direction: Direction) -> Result<StepReport, MigrationError> {
        let migration = self
            .find(version)
            .ok_or(MigrationError::UnknownMigration(version))?;
        MigrationStep::new(migration, direction).execute(
            &self.factory,
            &self.info,
            Some(&self.store),
        )
    }

    fn find(&self, version: i64) -> Option<&dyn Migration> {
        self.migrations
            .iter()
            .find(|m| m.version() == version)
            .map(|m| &**m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Database, LogicalType};
    use crate::test_helpers::RecordingConnectionFactory;

    struct Table(i64, &'static str);

    impl Migration for Table {
        fn version(&self) -> i64 {
            self.0
        }

        fn up(&self, db: &mut Database) {
            db.create_table(self.1)
                .with_primary_key_column("Id", LogicalType::Int32);
        }

        fn down(&self, db: &mut Database) {
            db.table(self.1).drop();
        }
    }

    fn info() -> ConnectionInfo {
        ConnectionInfo::new("SQLite", ":memory:")
    }

    #[test]
    fn test_new_sorts_migrations() {
        let migrator = Migrator::new(
            RecordingConnectionFactory::default(),
            info(),
            vec![Box::new(Table(3, "C")), Box::new(Table(1, "A")), Box::new(Table(2, "B"))],
        )
        .unwrap();
        let versions: Vec<_> = migrator.migrations().map(|id| id.timestamp).collect();
        assert_eq!(versions, vec![1, 2, 3]);
    }

    #[test]
    fn test_new_rejects_duplicate_versions() {
        let err = Migrator::new(
            RecordingConnectionFactory::default(),
            info(),
            vec![Box::new(Table(7, "A")), Box::new(Table(7, "B"))],
        )
        .err()
        .unwrap();
        assert!(matches!(err, MigrationError::DuplicateMigration(7)));
    }

    #[test]
    fn test_new_rejects_reserved_version() {
        let err = Migrator::new(
            RecordingConnectionFactory::default(),
            info(),
            vec![Box::new(Table(0, "A"))],
        )
        .err()
        .unwrap();
        assert!(matches!(err, MigrationError::InvalidVersion(0)));
    }

    #[test]
    fn test_new_rejects_unknown_provider() {
        let err = Migrator::new(
            RecordingConnectionFactory::default(),
            ConnectionInfo::new("DB2", "x"),
            Vec::new(),
        )
        .err()
        .unwrap();
        assert!(matches!(err, MigrationError::UnknownProvider(_)));
    }

    #[test]
    fn test_custom_version_table() {
        let migrator = Migrator::new(RecordingConnectionFactory::default(), info(), Vec::new())
            .unwrap()
            .with_version_table("schema_history");
        assert_eq!(migrator.version_store().table(), "schema_history");
        assert_eq!(migrator.version_store().provider().name(), "SQLite");
    }
}
