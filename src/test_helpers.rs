//! Connection factories for exercising migrations in tests.
//!
//! - [`RecordingConnectionFactory`] executes nothing and records every
//!   statement issued inside a transaction. It can be told to fail opening,
//!   beginning or committing.
//! - [`FaultyConnectionFactory`] wraps a real factory and fails the Nth
//!   statement executed inside its transactions.

use crate::connection::{ConnectionError, ConnectionFactory, ConnectionInfo, DbConnection};
use crate::executor::{DbError, DbExecutor, DbValue, Row};
use crate::transaction::{DbTransaction, TransactionError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Lifecycle call a [`RecordingConnectionFactory`] can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePoint {
    Open,
    Begin,
    Commit,
}

#[derive(Debug, Default)]
struct Journal {
    statements: Vec<String>,
    opened: usize,
    commits: usize,
    rollbacks: usize,
    fail_on: Option<FailurePoint>,
}

impl Journal {
    fn fails_on(&self, point: FailurePoint) -> bool {
        self.fail_on == Some(point)
    }
}

/// Records statements instead of running them
///
/// Every statement succeeds and reports one affected row; queries return no
/// rows.
#[derive(Debug, Clone, Default)]
pub struct RecordingConnectionFactory {
    journal: Arc<Mutex<Journal>>,
}

impl RecordingConnectionFactory {
    fn journal(&self) -> MutexGuard<'_, Journal> {
        lock(&self.journal)
    }

    /// A factory whose every `point` call fails
    pub fn failing_on(point: FailurePoint) -> Self {
        let factory = Self::default();
        factory.journal().fail_on = Some(point);
        factory
    }

    /// Statements executed inside transactions, in order
    pub fn statements(&self) -> Vec<String> {
        self.journal().statements.clone()
    }

    pub fn opened(&self) -> usize {
        self.journal().opened
    }

    pub fn commits(&self) -> usize {
        self.journal().commits
    }

    pub fn rollbacks(&self) -> usize {
        self.journal().rollbacks
    }
}

fn lock(journal: &Mutex<Journal>) -> MutexGuard<'_, Journal> {
    journal.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ConnectionFactory for RecordingConnectionFactory {
    fn open(&self, info: &ConnectionInfo) -> Result<Box<dyn DbConnection>, ConnectionError> {
        info.validate()?;
        let mut journal = self.journal();
        if journal.fails_on(FailurePoint::Open) {
            return Err(ConnectionError::Other("injected failure on open".to_string()));
        }
        journal.opened += 1;
        drop(journal);
        Ok(Box::new(RecordingConnection {
            journal: Arc::clone(&self.journal),
        }))
    }
}

struct RecordingConnection {
    journal: Arc<Mutex<Journal>>,
}

impl DbExecutor for RecordingConnection {
    fn execute(&self, _sql: &str, _params: &[DbValue]) -> Result<u64, DbError> {
        Ok(1)
    }

    fn query_all(&self, _sql: &str, _params: &[DbValue]) -> Result<Vec<Row>, DbError> {
        Ok(Vec::new())
    }
}

impl DbConnection for RecordingConnection {
    fn begin(&mut self) -> Result<Box<dyn DbTransaction + '_>, TransactionError> {
        if lock(&self.journal).fails_on(FailurePoint::Begin) {
            return Err(TransactionError::Other("injected failure on begin".to_string()));
        }
        Ok(Box::new(RecordingTransaction {
            journal: Arc::clone(&self.journal),
        }))
    }
}

struct RecordingTransaction {
    journal: Arc<Mutex<Journal>>,
}

impl DbExecutor for RecordingTransaction {
    fn execute(&self, sql: &str, _params: &[DbValue]) -> Result<u64, DbError> {
        lock(&self.journal).statements.push(sql.to_string());
        Ok(1)
    }

    fn query_all(&self, sql: &str, _params: &[DbValue]) -> Result<Vec<Row>, DbError> {
        lock(&self.journal).statements.push(sql.to_string());
        Ok(Vec::new())
    }
}

impl DbTransaction for RecordingTransaction {
    fn commit(self: Box<Self>) -> Result<(), TransactionError> {
        let mut journal = lock(&self.journal);
        if journal.fails_on(FailurePoint::Commit) {
            return Err(TransactionError::Other("injected failure on commit".to_string()));
        }
        journal.commits += 1;
        Ok(())
    }

    fn rollback(self: Box<Self>) -> Result<(), TransactionError> {
        lock(&self.journal).rollbacks += 1;
        Ok(())
    }
}

/// Fails the Nth statement executed inside any of its transactions
///
/// The count is shared across every connection the factory opens and starts
/// at 1. Queries and statements outside transactions are never counted.
#[derive(Debug, Clone)]
pub struct FaultyConnectionFactory<F> {
    inner: F,
    fail_at: usize,
    executed: Arc<AtomicUsize>,
}

impl<F: ConnectionFactory> FaultyConnectionFactory<F> {
    pub fn new(inner: F, fail_at: usize) -> Self {
        Self {
            inner,
            fail_at,
            executed: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Statements attempted inside transactions so far, the failed one included
    pub fn executed(&self) -> usize {
        self.executed.load(Ordering::SeqCst)
    }
}

#[cfg(feature = "sqlite")]
impl FaultyConnectionFactory<crate::backend::SqliteConnectionFactory> {
    /// Wrap the SQLite backend
    pub fn failing_at(fail_at: usize) -> Self {
        Self::new(crate::backend::SqliteConnectionFactory, fail_at)
    }
}

impl<F: ConnectionFactory> ConnectionFactory for FaultyConnectionFactory<F> {
    fn open(&self, info: &ConnectionInfo) -> Result<Box<dyn DbConnection>, ConnectionError> {
        let inner = self.inner.open(info)?;
        Ok(Box::new(FaultyConnection {
            inner,
            fail_at: self.fail_at,
            executed: Arc::clone(&self.executed),
        }))
    }
}

struct FaultyConnection {
    inner: Box<dyn DbConnection>,
    fail_at: usize,
    executed: Arc<AtomicUsize>,
}

impl DbExecutor for FaultyConnection {
    fn execute(&self, sql: &str, params: &[DbValue]) -> Result<u64, DbError> {
        self.inner.execute(sql, params)
    }

    fn query_all(&self, sql: &str, params: &[DbValue]) -> Result<Vec<Row>, DbError> {
        self.inner.query_all(sql, params)
    }
}

impl DbConnection for FaultyConnection {
    fn begin(&mut self) -> Result<Box<dyn DbTransaction + '_>, TransactionError> {
        let inner = self.inner.begin()?;
        Ok(Box::new(FaultyTransaction {
            inner,
            fail_at: self.fail_at,
            executed: Arc::clone(&self.executed),
        }))
    }
}

struct FaultyTransaction<'a> {
    inner: Box<dyn DbTransaction + 'a>,
    fail_at: usize,
    executed: Arc<AtomicUsize>,
}

impl DbExecutor for FaultyTransaction<'_> {
    fn execute(&self, sql: &str, params: &[DbValue]) -> Result<u64, DbError> {
        let n = self.executed.fetch_add(1, Ordering::SeqCst) + 1;
        if n == self.fail_at {
            return Err(DbError::Other(format!("injected failure at statement {n}")));
        }
        self.inner.execute(sql, params)
    }

    fn query_all(&self, sql: &str, params: &[DbValue]) -> Result<Vec<Row>, DbError> {
        self.inner.query_all(sql, params)
    }
}

impl DbTransaction for FaultyTransaction<'_> {
    fn disable_statement_timeout(&self) -> Result<(), DbError> {
        self.inner.disable_statement_timeout()
    }

    fn commit(self: Box<Self>) -> Result<(), TransactionError> {
        self.inner.commit()
    }

    fn rollback(self: Box<Self>) -> Result<(), TransactionError> {
        self.inner.rollback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_factory_journals_transactions() {
        let factory = RecordingConnectionFactory::default();
        let mut connection = factory.open(&ConnectionInfo::new("SQLite", "x")).unwrap();
        let tx = connection.begin().unwrap();
        tx.execute("CREATE TABLE \"T\" (\"Id\" INTEGER)", &[]).unwrap();
        tx.commit().unwrap();

        assert_eq!(factory.opened(), 1);
        assert_eq!(factory.statements(), vec!["CREATE TABLE \"T\" (\"Id\" INTEGER)"]);
        assert_eq!(factory.commits(), 1);
        assert_eq!(factory.rollbacks(), 0);
    }

    #[test]
    fn test_recording_factory_fails_on_request() {
        let info = ConnectionInfo::new("SQLite", "x");
        let closed = RecordingConnectionFactory::failing_on(FailurePoint::Open);
        assert!(closed.open(&info).is_err());
        assert_eq!(closed.opened(), 0);

        let factory = RecordingConnectionFactory::failing_on(FailurePoint::Commit);
        let mut connection = factory.open(&info).unwrap();
        let tx = connection.begin().unwrap();
        tx.execute("SELECT 1", &[]).unwrap();
        let err = tx.commit().unwrap_err();
        assert!(err.to_string().contains("injected failure on commit"));
        assert_eq!(factory.commits(), 0);
    }

    #[test]
    fn test_faulty_factory_fails_nth_statement() {
        let factory = FaultyConnectionFactory::new(RecordingConnectionFactory::default(), 2);
        let mut connection = factory.open(&ConnectionInfo::new("SQLite", "x")).unwrap();
        let tx = connection.begin().unwrap();
        assert!(tx.execute("SELECT 1", &[]).is_ok());
        let err = tx.execute("SELECT 2", &[]).unwrap_err();
        assert!(err.to_string().contains("injected failure at statement 2"));
        assert!(tx.execute("SELECT 3", &[]).is_ok());
        assert_eq!(factory.executed(), 3);
    }
}
