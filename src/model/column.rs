//! Column specifications recorded by the mutation model.

use super::types::LogicalType;

/// How a column participates in its table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Part of the primary key (implicitly not nullable)
    PrimaryKey,
    /// Server-maintained row version; carries no logical type of its own
    RowVersion,
    Nullable,
    NotNullable,
}

/// Unique constraint membership of a column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UniqueConstraint {
    /// Single-column constraint; the name is derived when scripting
    Anonymous,
    /// Named constraint, shared by every column that uses the same name
    Named(String),
}

/// Default value of a column
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    Integer(i64),
    Boolean(bool),
    /// Text literal, quoted and escaped by the scripter
    Text(String),
    /// The provider's current date-time expression
    CurrentDateTime,
    /// Raw SQL expression emitted verbatim
    Expression(String),
}

impl From<i64> for DefaultValue {
    fn from(value: i64) -> Self {
        DefaultValue::Integer(value)
    }
}

impl From<i32> for DefaultValue {
    fn from(value: i32) -> Self {
        DefaultValue::Integer(i64::from(value))
    }
}

impl From<bool> for DefaultValue {
    fn from(value: bool) -> Self {
        DefaultValue::Boolean(value)
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        DefaultValue::Text(value.to_string())
    }
}

impl From<String> for DefaultValue {
    fn from(value: String) -> Self {
        DefaultValue::Text(value)
    }
}

/// A column as declared by a migration
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub name: String,
    /// `None` only for row-version columns
    pub logical_type: Option<LogicalType>,
    pub kind: ColumnKind,
    pub size: Option<u32>,
    pub scale: Option<u32>,
    pub identity: bool,
    pub unique: Option<UniqueConstraint>,
    pub default: Option<DefaultValue>,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, logical_type: LogicalType, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            logical_type: Some(logical_type),
            kind,
            size: None,
            scale: None,
            identity: false,
            unique: None,
            default: None,
        }
    }

    pub fn row_version(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            logical_type: None,
            kind: ColumnKind::RowVersion,
            size: None,
            scale: None,
            identity: false,
            unique: None,
            default: None,
        }
    }

    pub fn is_primary_key(&self) -> bool {
        self.kind == ColumnKind::PrimaryKey
    }

    pub fn is_nullable(&self) -> bool {
        self.kind == ColumnKind::Nullable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_version_has_no_type() {
        let col = ColumnSpec::row_version("Version");
        assert_eq!(col.logical_type, None);
        assert_eq!(col.kind, ColumnKind::RowVersion);
        assert!(!col.identity);
    }

    #[test]
    fn test_default_value_conversions() {
        assert_eq!(DefaultValue::from(5), DefaultValue::Integer(5));
        assert_eq!(DefaultValue::from(true), DefaultValue::Boolean(true));
        assert_eq!(DefaultValue::from("x"), DefaultValue::Text("x".to_string()));
    }
}
