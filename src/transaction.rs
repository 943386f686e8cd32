//! Transaction Module
//!
//! Provides the transaction abstraction the step executor runs every migration
//! in. A transaction is an executor plus commit/rollback; backends roll back
//! any transaction that is dropped while still open, so every early return of
//! a step releases it.

use crate::executor::{DbError, DbExecutor};

/// Transaction error type
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Backend error while beginning, committing or rolling back
    #[error("Transaction backend error: {0}")]
    Backend(#[from] DbError),
    /// Transaction already committed or rolled back
    #[error("Transaction has already been committed or rolled back")]
    TransactionClosed,
    /// Other transaction errors
    #[error("Transaction error: {0}")]
    Other(String),
}

impl From<TransactionError> for DbError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::Backend(e) => e,
            TransactionError::TransactionClosed => DbError::Other("Transaction closed".to_string()),
            TransactionError::Other(s) => DbError::Other(s),
        }
    }
}

/// A database transaction
///
/// All statements executed through the transaction are either committed
/// together or rolled back together.
///
/// # Examples
///
/// ```no_run
/// use strata::connection::{ConnectionFactory, ConnectionInfo};
/// use strata::backend::SqliteConnectionFactory;
/// use strata::transaction::DbTransaction;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let info = ConnectionInfo::new("SQLite", "app.db");
/// let mut connection = SqliteConnectionFactory.open(&info)?;
///
/// let transaction = connection.begin()?;
/// transaction.execute("CREATE TABLE \"Notes\" (\"Id\" INTEGER PRIMARY KEY)", &[])?;
/// transaction.commit()?;
/// # Ok(())
/// # }
/// ```
pub trait DbTransaction: DbExecutor {
    /// Lift client-side statement time limits for the rest of the transaction
    ///
    /// Long-running DDL must not be killed by a client timer; callers that need
    /// a bound hold it outside the engine.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the backend rejects the setting.
    fn disable_statement_timeout(&self) -> Result<(), DbError> {
        Ok(())
    }

    /// Commit the transaction
    ///
    /// # Errors
    ///
    /// Returns `TransactionError` if the backend fails to commit.
    fn commit(self: Box<Self>) -> Result<(), TransactionError>;

    /// Roll back the transaction
    ///
    /// # Errors
    ///
    /// Returns `TransactionError` if the backend fails to roll back.
    fn rollback(self: Box<Self>) -> Result<(), TransactionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_error_display() {
        let err = TransactionError::TransactionClosed;
        assert!(err
            .to_string()
            .contains("Transaction has already been committed"));

        let err = TransactionError::Other("test error".to_string());
        assert!(err.to_string().contains("Transaction error"));

        let err = TransactionError::Backend(DbError::Query("no".to_string()));
        assert!(err.to_string().contains("Query error: no"));
    }

    #[test]
    fn test_transaction_error_conversion() {
        let db_err: DbError = TransactionError::TransactionClosed.into();
        assert!(db_err.to_string().contains("Transaction closed"));

        let db_err: DbError = TransactionError::Other("nested".to_string()).into();
        assert!(db_err.to_string().contains("nested"));
    }
}
