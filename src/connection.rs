//! Connection Module
//!
//! Connections are opened through a [`ConnectionFactory`] from a
//! [`ConnectionInfo`], which carries the provider's invariant name and an
//! opaque connection string. The engine never parses the string itself; each
//! backend validates only what it needs before connecting.

use crate::executor::{DbError, DbExecutor};
use crate::transaction::{DbTransaction, TransactionError};
use serde::Deserialize;

/// Connection error type
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// Invalid connection string format
    #[error("Invalid connection string: {0}")]
    InvalidConnectionString(String),
    /// No backend is available for the requested provider
    #[error("No connection backend for provider '{0}'")]
    UnsupportedProvider(String),
    /// Network/authentication error from the backend driver
    #[error("Connection backend error: {0}")]
    Backend(#[from] DbError),
    /// Other connection errors
    #[error("Connection error: {0}")]
    Other(String),
}

/// What a factory needs to open a connection
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConnectionInfo {
    /// Invariant provider name, e.g. `PostgreSQL` or `SQLite`
    pub provider: String,
    pub connection_string: String,
}

impl ConnectionInfo {
    pub fn new(provider: impl Into<String>, connection_string: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            connection_string: connection_string.into(),
        }
    }

    /// Reject obviously unusable connection info before touching a backend
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError::InvalidConnectionString` when either field is blank.
    pub fn validate(&self) -> Result<(), ConnectionError> {
        if self.provider.trim().is_empty() {
            return Err(ConnectionError::InvalidConnectionString(
                "Provider name cannot be empty".to_string(),
            ));
        }
        if self.connection_string.trim().is_empty() {
            return Err(ConnectionError::InvalidConnectionString(
                "Connection string cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// A live connection
///
/// Statements issued directly on the connection run in autocommit mode; the
/// step executor only uses that for read-only version queries.
pub trait DbConnection: DbExecutor {
    /// Begin a transaction on this connection
    ///
    /// # Errors
    ///
    /// Returns `TransactionError` if the backend refuses to start a transaction.
    fn begin(&mut self) -> Result<Box<dyn DbTransaction + '_>, TransactionError>;
}

/// Opens connections for a provider
pub trait ConnectionFactory {
    /// Open a new connection
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError` if the info is invalid or the backend cannot connect.
    fn open(&self, info: &ConnectionInfo) -> Result<Box<dyn DbConnection>, ConnectionError>;
}

impl<F: ConnectionFactory + ?Sized> ConnectionFactory for &F {
    fn open(&self, info: &ConnectionInfo) -> Result<Box<dyn DbConnection>, ConnectionError> {
        (**self).open(info)
    }
}

impl<F: ConnectionFactory + ?Sized> ConnectionFactory for Box<F> {
    fn open(&self, info: &ConnectionInfo) -> Result<Box<dyn DbConnection>, ConnectionError> {
        (**self).open(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_blank_fields() {
        assert!(ConnectionInfo::new("", "db").validate().is_err());
        assert!(ConnectionInfo::new("SQLite", "  ").validate().is_err());
        assert!(ConnectionInfo::new("SQLite", "app.db").validate().is_ok());
    }

    #[test]
    fn test_connection_error_display() {
        let err = ConnectionError::InvalidConnectionString("test".to_string());
        assert!(err.to_string().contains("Invalid connection string"));

        let err = ConnectionError::UnsupportedProvider("Informix".to_string());
        assert!(err.to_string().contains("Informix"));

        let err = ConnectionError::Other("test".to_string());
        assert!(err.to_string().contains("Connection error"));
    }
}
