//! Concrete connection backends.
//!
//! Each backend sits behind its own cargo feature. [`DefaultConnectionFactory`]
//! picks one by the provider name in [`ConnectionInfo`].

#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "postgres")]
pub use postgres::PostgresConnectionFactory;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteConnectionFactory;

use crate::connection::{ConnectionError, ConnectionFactory, ConnectionInfo, DbConnection};

/// Dispatches to the backend compiled in for the requested provider
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultConnectionFactory;

impl ConnectionFactory for DefaultConnectionFactory {
    fn open(&self, info: &ConnectionInfo) -> Result<Box<dyn DbConnection>, ConnectionError> {
        info.validate()?;
        match info.provider.to_ascii_lowercase().as_str() {
            #[cfg(feature = "postgres")]
            "postgresql" => PostgresConnectionFactory.open(info),
            #[cfg(feature = "sqlite")]
            "sqlite" => SqliteConnectionFactory.open(info),
            _ => Err(ConnectionError::UnsupportedProvider(info.provider.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_provider_is_rejected() {
        let info = ConnectionInfo::new("Informix", "whatever");
        assert!(matches!(
            DefaultConnectionFactory.open(&info),
            Err(ConnectionError::UnsupportedProvider(p)) if p == "Informix"
        ));
    }

    #[cfg(feature = "sqlite")]
    #[test]
    fn test_sqlite_dispatch_is_case_insensitive() {
        let info = ConnectionInfo::new("sqlite", ":memory:");
        assert!(DefaultConnectionFactory.open(&info).is_ok());
    }
}
