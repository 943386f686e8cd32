//! `DbExecutor` Module
//!
//! Provides the `DbExecutor` trait that abstracts statement execution over the
//! supported backends (`may_postgres`, `rusqlite`).
//!
//! Connections, transactions and raw-command callbacks all execute through this
//! trait, so the scripter output and the version store never depend on a
//! concrete driver.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// `DbExecutor` error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// `PostgreSQL` error from `may_postgres`
    #[cfg(feature = "postgres")]
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] may_postgres::Error),
    /// SQLite error from `rusqlite`
    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Query execution error
    #[error("Query error: {0}")]
    Query(String),
    /// Row parsing/conversion error
    #[error("Parse error: {0}")]
    Parse(String),
    /// Other execution errors
    #[error("Execution error: {0}")]
    Other(String),
}

/// A value bound to a statement parameter or read back from a row
#[derive(Debug, Clone, PartialEq)]
pub enum DbValue {
    Null,
    Bool(bool),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float64(f64),
    Decimal(Decimal),
    Text(String),
    Bytes(Vec<u8>),
    Uuid(Uuid),
    /// Timestamp without time zone
    Timestamp(NaiveDateTime),
    /// Timestamp with time zone, normalized to UTC
    TimestampTz(DateTime<Utc>),
}

impl DbValue {
    pub fn is_null(&self) -> bool {
        matches!(self, DbValue::Null)
    }

    /// Widen any integer variant to `i64`
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            DbValue::Int16(v) => Some(i64::from(*v)),
            DbValue::Int32(v) => Some(i64::from(*v)),
            DbValue::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DbValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for DbValue {
    fn from(v: bool) -> Self {
        DbValue::Bool(v)
    }
}

impl From<i16> for DbValue {
    fn from(v: i16) -> Self {
        DbValue::Int16(v)
    }
}

impl From<i32> for DbValue {
    fn from(v: i32) -> Self {
        DbValue::Int32(v)
    }
}

impl From<i64> for DbValue {
    fn from(v: i64) -> Self {
        DbValue::Int64(v)
    }
}

impl From<f64> for DbValue {
    fn from(v: f64) -> Self {
        DbValue::Float64(v)
    }
}

impl From<Decimal> for DbValue {
    fn from(v: Decimal) -> Self {
        DbValue::Decimal(v)
    }
}

impl From<&str> for DbValue {
    fn from(v: &str) -> Self {
        DbValue::Text(v.to_string())
    }
}

impl From<String> for DbValue {
    fn from(v: String) -> Self {
        DbValue::Text(v)
    }
}

impl From<Vec<u8>> for DbValue {
    fn from(v: Vec<u8>) -> Self {
        DbValue::Bytes(v)
    }
}

impl From<Uuid> for DbValue {
    fn from(v: Uuid) -> Self {
        DbValue::Uuid(v)
    }
}

impl From<NaiveDateTime> for DbValue {
    fn from(v: NaiveDateTime) -> Self {
        DbValue::Timestamp(v)
    }
}

impl From<DateTime<Utc>> for DbValue {
    fn from(v: DateTime<Utc>) -> Self {
        DbValue::TimestampTz(v)
    }
}

impl<T: Into<DbValue>> From<Option<T>> for DbValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(DbValue::Null, Into::into)
    }
}

/// A result row, decoded into backend-neutral values
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<DbValue>,
}

impl Row {
    pub fn new(columns: Vec<String>, values: Vec<DbValue>) -> Self {
        Self { columns, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at a zero-based column index
    pub fn get(&self, index: usize) -> Option<&DbValue> {
        self.values.get(index)
    }

    /// Value of a column by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Option<&DbValue> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
            .and_then(|i| self.values.get(i))
    }

    /// Integer value at `index`
    ///
    /// # Errors
    ///
    /// Returns `DbError::Parse` if the column is missing or not an integer.
    pub fn get_i64(&self, index: usize) -> Result<i64, DbError> {
        self.get(index)
            .and_then(DbValue::as_i64)
            .ok_or_else(|| DbError::Parse(format!("column {index} is not an integer")))
    }
}

/// Trait for executing database operations
///
/// This trait abstracts database execution, allowing different implementations
/// (plain connection, transaction, fault-injecting wrapper) to be used
/// interchangeably. Parameters use the provider's marker syntax
/// (see [`crate::provider::Provider::parameter_marker`]).
pub trait DbExecutor {
    /// Execute a SQL statement and return the number of rows affected
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the statement fails at the backend.
    fn execute(&self, sql: &str, params: &[DbValue]) -> Result<u64, DbError>;

    /// Execute a query and return all rows
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the query fails or a value cannot be decoded.
    fn query_all(&self, sql: &str, params: &[DbValue]) -> Result<Vec<Row>, DbError>;

    /// Execute a query and return exactly one row
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the query fails or does not return exactly one row.
    fn query_one(&self, sql: &str, params: &[DbValue]) -> Result<Row, DbError> {
        let mut rows = self.query_all(sql, params)?;
        match rows.len() {
            1 => Ok(rows.remove(0)),
            n => Err(DbError::Query(format!("expected exactly one row, got {n}"))),
        }
    }
}
