//! Version table management
//!
//! The version table records which migrations have been applied. It is created
//! by the [`Bootstrap`] migration, which declares the table through the same
//! model every other migration uses, so the table is scripted correctly for
//! whichever provider the migrator targets.

use super::{Migration, MigrationId, VersionRecord};
use crate::executor::{DbError, DbExecutor, DbValue};
use crate::model::{Database, IndexSpec, LogicalType};
use crate::provider::Provider;
use chrono::{DateTime, Utc};

/// Default name of the version table
pub const DEFAULT_VERSION_TABLE: &str = "strata_versions";

const TIMESTAMP_COLUMN: &str = "Timestamp";
const TAG_COLUMN: &str = "Tag";
const APPLIED_AT_COLUMN: &str = "AppliedAt";

/// Reads and writes the version table of one provider
///
/// Writes take the caller's executor so they join the step's transaction.
#[derive(Debug, Clone)]
pub struct VersionStore {
    table: String,
    provider: &'static Provider,
}

impl VersionStore {
    pub fn new(table: impl Into<String>, provider: &'static Provider) -> Self {
        Self {
            table: table.into(),
            provider,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn provider(&self) -> &'static Provider {
        self.provider
    }

    /// Whether the version table exists
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the catalog query fails.
    pub fn is_installed<E: DbExecutor + ?Sized>(&self, executor: &E) -> Result<bool, DbError> {
        let row = executor.query_one(
            self.provider.table_exists_query(),
            &[DbValue::Text(self.table.clone())],
        )?;
        Ok(row.get_i64(0)? > 0)
    }

    /// Whether the migration with `id`'s timestamp is recorded as applied
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the query fails.
    pub fn exists<E: DbExecutor + ?Sized>(
        &self,
        executor: &E,
        id: &MigrationId,
    ) -> Result<bool, DbError> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE {} = {}",
            self.quoted_table(),
            self.provider.quote_identifier(TIMESTAMP_COLUMN),
            self.provider.parameter_marker(1)
        );
        let row = executor.query_one(&sql, &[DbValue::Int64(id.timestamp)])?;
        Ok(row.get_i64(0)? > 0)
    }

    /// Record `id` as applied
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the insert fails.
    pub fn append<E: DbExecutor + ?Sized>(
        &self,
        executor: &E,
        id: &MigrationId,
        applied_at: DateTime<Utc>,
    ) -> Result<(), DbError> {
        let sql = format!(
            "INSERT INTO {} ({}, {}, {}) VALUES ({}, {}, {})",
            self.quoted_table(),
            self.provider.quote_identifier(TIMESTAMP_COLUMN),
            self.provider.quote_identifier(TAG_COLUMN),
            self.provider.quote_identifier(APPLIED_AT_COLUMN),
            self.provider.parameter_marker(1),
            self.provider.parameter_marker(2),
            self.provider.parameter_marker(3)
        );
        let params = [
            DbValue::Int64(id.timestamp),
            DbValue::from(id.tag.clone()),
            DbValue::Timestamp(applied_at.naive_utc()),
        ];
        log::debug!("Recording migration {id} in {}", self.table);
        executor.execute(&sql, &params)?;
        Ok(())
    }

    /// Delete the record of `id`
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the delete fails or no record matched.
    pub fn remove<E: DbExecutor + ?Sized>(
        &self,
        executor: &E,
        id: &MigrationId,
    ) -> Result<(), DbError> {
        let sql = format!(
            "DELETE FROM {} WHERE {} = {}",
            self.quoted_table(),
            self.provider.quote_identifier(TIMESTAMP_COLUMN),
            self.provider.parameter_marker(1)
        );
        log::debug!("Removing migration {id} from {}", self.table);
        let affected = executor.execute(&sql, &[DbValue::Int64(id.timestamp)])?;
        if affected == 0 {
            return Err(DbError::Query(format!(
                "Migration {id} is not recorded in {}",
                self.table
            )));
        }
        Ok(())
    }

    /// All applied migrations, oldest first
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the query fails or a row cannot be decoded.
    pub fn applied<E: DbExecutor + ?Sized>(
        &self,
        executor: &E,
    ) -> Result<Vec<VersionRecord>, DbError> {
        let timestamp = self.provider.quote_identifier(TIMESTAMP_COLUMN);
        let sql = format!(
            "SELECT {}, {}, {} FROM {} ORDER BY {}",
            timestamp,
            self.provider.quote_identifier(TAG_COLUMN),
            self.provider.quote_identifier(APPLIED_AT_COLUMN),
            self.quoted_table(),
            timestamp
        );
        executor
            .query_all(&sql, &[])?
            .iter()
            .map(VersionRecord::from_row)
            .collect()
    }

    /// The migration that creates (Up) or drops (Down) the version table
    pub fn bootstrap(&self) -> Bootstrap {
        Bootstrap {
            table: self.table.clone(),
        }
    }

    fn quoted_table(&self) -> String {
        self.provider.quote_identifier(&self.table)
    }
}

/// Creates the version table
///
/// Runs as an ordinary step without a version store, so it never records
/// itself.
#[derive(Debug, Clone)]
pub struct Bootstrap {
    table: String,
}

impl Migration for Bootstrap {
    fn version(&self) -> i64 {
        0
    }

    fn up(&self, db: &mut Database) {
        db.create_table(self.table.as_str())
            .with_primary_key_column(TIMESTAMP_COLUMN, LogicalType::Int64)
            .with_nullable_column(TAG_COLUMN, LogicalType::String)
            .of_size(255)
            .with_not_nullable_column(APPLIED_AT_COLUMN, LogicalType::DateTime2)
            .with_index(IndexSpec::on(&[APPLIED_AT_COLUMN]));
    }

    fn down(&self, db: &mut Database) {
        db.table(self.table.as_str()).drop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{POSTGRESQL, SQLITE, SQL_SERVER};
    use crate::scripter::script;

    #[test]
    fn test_bootstrap_scripts_for_sqlite() {
        let store = VersionStore::new(DEFAULT_VERSION_TABLE, &SQLITE);
        let mut db = Database::new();
        store.bootstrap().up(&mut db);
        let output = script(&db, &SQLITE);
        assert!(output.is_valid(), "{:?}", output.errors);
        assert_eq!(
            output.sql(),
            vec![
                "CREATE TABLE \"strata_versions\" (\n    \
                 \"Timestamp\" INTEGER PRIMARY KEY,\n    \
                 \"Tag\" VARCHAR(255),\n    \
                 \"AppliedAt\" DATETIME NOT NULL\n)",
                "CREATE INDEX \"IX_strata_versions_AppliedAt\" ON \"strata_versions\" (\"AppliedAt\")",
            ]
        );
    }

    #[test]
    fn test_bootstrap_down_drops_table() {
        let store = VersionStore::new("schema_versions", &POSTGRESQL);
        let mut db = Database::new();
        store.bootstrap().down(&mut db);
        assert_eq!(script(&db, &POSTGRESQL).sql(), vec!["DROP TABLE \"schema_versions\""]);
    }

    #[test]
    fn test_bootstrap_scripts_for_every_provider() {
        for provider in crate::provider::ProviderRegistry::global().iter() {
            let store = VersionStore::new(DEFAULT_VERSION_TABLE, provider);
            let mut db = Database::new();
            store.bootstrap().up(&mut db);
            let output = script(&db, provider);
            assert!(output.is_valid(), "{}: {:?}", provider.name(), output.errors);
        }
    }

    #[test]
    fn test_bootstrap_has_no_version() {
        assert_eq!(VersionStore::new("v", &SQLITE).bootstrap().version(), 0);
    }

    #[test]
    fn test_dialect_markers_in_statements() {
        let store = VersionStore::new(DEFAULT_VERSION_TABLE, &SQL_SERVER);
        assert_eq!(store.quoted_table(), "[strata_versions]");
        assert_eq!(store.provider().parameter_marker(1), "@p1");
    }
}
