//! Migration-specific error types

use super::MigrationId;
use crate::connection::ConnectionError;
use crate::executor::DbError;
use crate::scripter::ValidationError;
use crate::transaction::TransactionError;

/// Errors raised while running migrations
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// The recorded model cannot be scripted for the provider; nothing ran
    #[error("Migration {migration} failed validation:\n{}", list(.errors))]
    Validation {
        migration: MigrationId,
        errors: Vec<ValidationError>,
    },
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),
    #[error("Transaction error: {0}")]
    Transaction(#[from] TransactionError),
    /// A scripted command failed; the step was rolled back
    #[error("Command failed{}: {source}\n{command}", origin(.table.as_deref(), .column.as_deref()))]
    Execution {
        command: String,
        table: Option<String>,
        column: Option<String>,
        source: DbError,
    },
    #[error("Version store error: {0}")]
    VersionStore(#[source] DbError),
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),
    #[error("Invalid migration version: {0}")]
    InvalidVersion(i64),
    #[error("Migration version {0} is declared more than once")]
    DuplicateMigration(i64),
    /// The version store lists a migration this migrator does not know
    #[error("Migration version {0} is applied but not part of the migration set")]
    UnknownMigration(i64),
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

fn list(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn origin(table: Option<&str>, column: Option<&str>) -> String {
    match (table, column) {
        (Some(table), Some(column)) => format!(" on {table}.{column}"),
        (Some(table), None) => format!(" on {table}"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LogicalType;
    use crate::scripter::ValidationErrorKind;

    #[test]
    fn test_validation_lists_every_error() {
        let err = MigrationError::Validation {
            migration: MigrationId::new(20240101000000),
            errors: vec![
                ValidationError {
                    table: "Widgets".to_string(),
                    column: Some("Doc".to_string()),
                    kind: ValidationErrorKind::UnsupportedType(LogicalType::Xml),
                },
                ValidationError {
                    table: "Widgets".to_string(),
                    column: None,
                    kind: ValidationErrorKind::MultipleIdentity,
                },
            ],
        };
        let text = err.to_string();
        assert!(text.starts_with("Migration 20240101000000 failed validation"));
        assert!(text.contains("  - Widgets.Doc: logical type Xml"));
        assert!(text.contains("  - Widgets: table already has an identity column"));
    }

    #[test]
    fn test_execution_names_origin() {
        let err = MigrationError::Execution {
            command: "DROP TABLE \"Widgets\"".to_string(),
            table: Some("Widgets".to_string()),
            column: None,
            source: DbError::Query("no such table".to_string()),
        };
        let text = err.to_string();
        assert!(text.starts_with("Command failed on Widgets: Query error: no such table"));
        assert!(text.ends_with("DROP TABLE \"Widgets\""));
    }

    #[test]
    fn test_execution_without_origin() {
        let err = MigrationError::Execution {
            command: "SELECT 1".to_string(),
            table: None,
            column: None,
            source: DbError::Other("boom".to_string()),
        };
        assert!(err.to_string().starts_with("Command failed: "));
    }

    #[test]
    fn test_connection_error_converts() {
        let err: MigrationError =
            ConnectionError::InvalidConnectionString("blank".to_string()).into();
        assert!(matches!(err, MigrationError::Connection(_)));
    }
}
