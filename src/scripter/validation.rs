//! Problems found while scripting a model.

use crate::model::LogicalType;
use std::fmt;

/// A model problem that prevents scripting, attributed to a table and,
/// where it applies, a column
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}: {kind}", location(.table, .column.as_deref()))]
pub struct ValidationError {
    pub table: String,
    pub column: Option<String>,
    pub kind: ValidationErrorKind,
}

fn location(table: &str, column: Option<&str>) -> String {
    match column {
        Some(column) => format!("{table}.{column}"),
        None => table.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationErrorKind {
    #[error("column is declared more than once")]
    DuplicateColumn,
    #[error("table has no columns")]
    NoColumns,
    #[error("column has no logical type")]
    MissingType,
    #[error("logical type {0} is not supported by the provider")]
    UnsupportedType(LogicalType),
    #[error("logical type {0} requires a size")]
    SizeRequired(LogicalType),
    #[error("logical type {0} does not take a size")]
    SizeNotAllowed(LogicalType),
    #[error("logical type {0} does not take a scale")]
    ScaleNotAllowed(LogicalType),
    #[error("size {size} is outside the supported range {min}..={max}")]
    SizeOutOfRange { size: u32, min: u32, max: u32 },
    #[error("scale {scale} is outside the supported range {min}..={max}")]
    ScaleOutOfRange { scale: u32, min: u32, max: u32 },
    #[error("table already has an identity column")]
    MultipleIdentity,
    #[error("logical type {0} cannot back an identity column on this provider")]
    IdentityNotSupported(LogicalType),
    #[error("identity is only supported on the table's single primary-key column")]
    IdentityPlacement,
    #[error("logical type {0} cannot be part of a primary key on this provider")]
    PrimaryKeyNotSupported(LogicalType),
    #[error("row-version columns are not supported by the provider")]
    RowVersionUnsupported,
    #[error("row-version columns cannot be identity, unique or have a default")]
    RowVersionConflict,
    #[error("identifier '{identifier}' exceeds the maximum length of {max}")]
    IdentifierTooLong { identifier: String, max: usize },
    #[error("unique index spanning several columns must be named")]
    UniqueNameRequired,
    #[error("invalid index: {0}")]
    InvalidIndex(String),
    #[error("invalid foreign key: {0}")]
    InvalidForeignKey(String),
    #[error("operation not supported by the provider: {0}")]
    UnsupportedOperation(String),
}

/// A non-fatal caveat about the scripted model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptWarning {
    pub table: String,
    pub column: Option<String>,
    pub message: String,
}

impl fmt::Display for ScriptWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", location(&self.table, self.column.as_deref()), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_table_and_column() {
        let err = ValidationError {
            table: "Widgets".to_string(),
            column: Some("Blob".to_string()),
            kind: ValidationErrorKind::UnsupportedType(LogicalType::Xml),
        };
        assert_eq!(
            err.to_string(),
            "Widgets.Blob: logical type Xml is not supported by the provider"
        );
    }

    #[test]
    fn test_display_table_only() {
        let err = ValidationError {
            table: "Widgets".to_string(),
            column: None,
            kind: ValidationErrorKind::UniqueNameRequired,
        };
        assert!(err.to_string().starts_with("Widgets: "));
    }
}
