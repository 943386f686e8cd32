//! SQLite backend over `rusqlite`.
//!
//! The connection string is the database path (or `:memory:`). Every step
//! opens its own connection, so in-memory databases only live for one step;
//! use a file for anything that must outlive it.

use crate::connection::{ConnectionError, ConnectionFactory, ConnectionInfo, DbConnection};
use crate::executor::{DbError, DbExecutor, DbValue, Row};
use crate::transaction::{DbTransaction, TransactionError};
use rusqlite::types::{ToSqlOutput, Value, ValueRef};
use rusqlite::{params_from_iter, Connection};
use std::time::Instant;

#[cfg(feature = "metrics")]
use crate::metrics::METRICS;
#[cfg(feature = "tracing")]
use crate::metrics::tracing_helpers;

/// Opens `rusqlite` connections
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteConnectionFactory;

impl ConnectionFactory for SqliteConnectionFactory {
    fn open(&self, info: &ConnectionInfo) -> Result<Box<dyn DbConnection>, ConnectionError> {
        info.validate()?;

        #[cfg(feature = "tracing")]
        let _span = tracing_helpers::open_connection_span("SQLite").entered();

        let conn = Connection::open(&info.connection_string).map_err(DbError::from)?;
        Ok(Box::new(SqliteConnection { conn }))
    }
}

pub struct SqliteConnection {
    conn: Connection,
}

impl SqliteConnection {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl DbExecutor for SqliteConnection {
    fn execute(&self, sql: &str, params: &[DbValue]) -> Result<u64, DbError> {
        execute(&self.conn, sql, params)
    }

    fn query_all(&self, sql: &str, params: &[DbValue]) -> Result<Vec<Row>, DbError> {
        query_all(&self.conn, sql, params)
    }
}

impl DbConnection for SqliteConnection {
    fn begin(&mut self) -> Result<Box<dyn DbTransaction + '_>, TransactionError> {
        #[cfg(feature = "tracing")]
        let _span = tracing_helpers::begin_transaction_span().entered();

        let tx = self.conn.transaction().map_err(DbError::from)?;
        Ok(Box::new(SqliteTransaction { tx }))
    }
}

/// Wraps `rusqlite::Transaction`, which rolls back on drop
pub struct SqliteTransaction<'a> {
    tx: rusqlite::Transaction<'a>,
}

impl DbExecutor for SqliteTransaction<'_> {
    fn execute(&self, sql: &str, params: &[DbValue]) -> Result<u64, DbError> {
        execute(&self.tx, sql, params)
    }

    fn query_all(&self, sql: &str, params: &[DbValue]) -> Result<Vec<Row>, DbError> {
        query_all(&self.tx, sql, params)
    }
}

impl DbTransaction for SqliteTransaction<'_> {
    fn commit(self: Box<Self>) -> Result<(), TransactionError> {
        #[cfg(feature = "tracing")]
        let _span = tracing_helpers::commit_transaction_span().entered();
        self.tx.commit().map_err(DbError::from)?;
        Ok(())
    }

    fn rollback(self: Box<Self>) -> Result<(), TransactionError> {
        #[cfg(feature = "tracing")]
        let _span = tracing_helpers::rollback_transaction_span().entered();
        self.tx.rollback().map_err(DbError::from)?;
        Ok(())
    }
}

impl rusqlite::ToSql for DbValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let value = match self {
            DbValue::Null => Value::Null,
            DbValue::Bool(v) => Value::Integer(i64::from(*v)),
            DbValue::Int16(v) => Value::Integer(i64::from(*v)),
            DbValue::Int32(v) => Value::Integer(i64::from(*v)),
            DbValue::Int64(v) => Value::Integer(*v),
            DbValue::Float64(v) => Value::Real(*v),
            DbValue::Decimal(v) => Value::Text(v.to_string()),
            DbValue::Text(v) => return Ok(ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes()))),
            DbValue::Bytes(v) => return Ok(ToSqlOutput::Borrowed(ValueRef::Blob(v))),
            DbValue::Uuid(v) => Value::Text(v.to_string()),
            DbValue::Timestamp(v) => Value::Text(v.format("%Y-%m-%d %H:%M:%S%.f").to_string()),
            DbValue::TimestampTz(v) => Value::Text(v.to_rfc3339()),
        };
        Ok(ToSqlOutput::Owned(value))
    }
}

fn execute(conn: &Connection, sql: &str, params: &[DbValue]) -> Result<u64, DbError> {
    #[cfg(feature = "tracing")]
    let _span = tracing_helpers::execute_statement_span(sql).entered();

    let start = Instant::now();
    let result = conn
        .execute(sql, params_from_iter(params.iter()))
        .map(|n| n as u64)
        .map_err(|e| {
            #[cfg(feature = "metrics")]
            METRICS.record_statement_error();
            DbError::from(e)
        });

    #[cfg(feature = "metrics")]
    METRICS.record_statement(start.elapsed());
    log::trace!("statement finished in {:?}", start.elapsed());

    result
}

fn query_all(conn: &Connection, sql: &str, params: &[DbValue]) -> Result<Vec<Row>, DbError> {
    #[cfg(feature = "tracing")]
    let _span = tracing_helpers::execute_statement_span(sql).entered();

    let start = Instant::now();
    let mut stmt = conn.prepare(sql)?;
    let columns: Vec<String> = stmt.column_names().iter().map(|c| (*c).to_string()).collect();
    let width = columns.len();

    let rows = stmt
        .query_map(params_from_iter(params.iter()), |row| {
            (0..width)
                .map(|i| row.get_ref(i).map(decode_value))
                .collect::<rusqlite::Result<Vec<_>>>()
        })?
        .map(|values| values.map(|v| Row::new(columns.clone(), v)))
        .collect::<rusqlite::Result<Vec<_>>>()?;

    #[cfg(feature = "metrics")]
    METRICS.record_statement(start.elapsed());
    log::trace!("query returned {} row(s) in {:?}", rows.len(), start.elapsed());

    Ok(rows)
}

fn decode_value(value: ValueRef<'_>) -> DbValue {
    match value {
        ValueRef::Null => DbValue::Null,
        ValueRef::Integer(v) => DbValue::Int64(v),
        ValueRef::Real(v) => DbValue::Float64(v),
        ValueRef::Text(v) => DbValue::Text(String::from_utf8_lossy(v).into_owned()),
        ValueRef::Blob(v) => DbValue::Bytes(v.to_vec()),
    }
}
