//! Factory producing connections from settings

use std::path::Path;

use tracing::debug;

use crate::blocking;
use crate::config::ConnectionSettings;
use crate::connection::Connection;
use crate::error::Result;

/// Creates [`Connection`]s from a default set of [`ConnectionSettings`].
///
/// # Example
///
/// ```ignore
/// use sqlconn::ConnectionFactory;
///
/// // sqlconn.toml plus SQLCONN_* environment variables
/// let factory = ConnectionFactory::load()?;
/// let mut conn = factory.create()?;
/// let count: i64 = conn.execute_scalar("SELECT COUNT(*) FROM Customer", &[]).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ConnectionFactory {
    settings: ConnectionSettings,
}

impl ConnectionFactory {
    /// Use the given settings after validating them.
    pub fn new(settings: ConnectionSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    /// Load settings from the default locations.
    pub fn load() -> Result<Self> {
        Self::new(ConnectionSettings::load(None)?)
    }

    /// Load settings from a specific file (environment still overrides).
    pub fn from_path(path: &Path) -> Result<Self> {
        Self::new(ConnectionSettings::load(Some(path))?)
    }

    pub fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }

    /// Connection for the configured connection string.
    pub fn create(&self) -> Result<Connection> {
        debug!(timeout = self.settings.command_timeout, "creating connection from settings");
        let conn = Connection::with_timeout(
            &self.settings.connection_string,
            self.settings.command_timeout,
        )?;
        Ok(match self.settings.isolation_level {
            Some(level) => conn.isolation_level(level),
            None => conn,
        })
    }

    /// Connection for another connection string, with the configured timeout.
    pub fn create_with(&self, connection_string: &str) -> Result<Connection> {
        Self::create_with_timeout(connection_string, self.settings.command_timeout)
    }

    /// Connection for a connection string and timeout, no settings needed.
    pub fn create_with_timeout(connection_string: &str, seconds: u32) -> Result<Connection> {
        Connection::with_timeout(connection_string, seconds)
    }

    /// Blocking counterpart of [`create`](Self::create).
    pub fn create_blocking(&self) -> Result<blocking::Connection> {
        blocking::Connection::from_async(self.create()?)
    }

    /// Blocking counterpart of [`create_with_timeout`](Self::create_with_timeout).
    pub fn create_blocking_with_timeout(
        connection_string: &str,
        seconds: u32,
    ) -> Result<blocking::Connection> {
        blocking::Connection::from_async(Self::create_with_timeout(connection_string, seconds)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::traits::IsolationLevel;

    fn settings() -> ConnectionSettings {
        ConnectionSettings {
            command_timeout: 15,
            isolation_level: Some(IsolationLevel::Serializable),
            ..ConnectionSettings::with_connection_string("mysql://u:p@localhost/shop")
        }
    }

    #[test]
    fn test_create_applies_settings() {
        let factory = ConnectionFactory::new(settings()).unwrap();
        let conn = factory.create().unwrap();
        assert_eq!(conn.connection_string(), "mysql://u:p@localhost/shop");
        assert_eq!(conn.timeout(), 15);
        assert!(!conn.is_open());
    }

    #[test]
    fn test_create_with_other_url_keeps_timeout() {
        let factory = ConnectionFactory::new(settings()).unwrap();
        let conn = factory.create_with("mysql://u:p@otherhost/crm").unwrap();
        assert_eq!(conn.connection_string(), "mysql://u:p@otherhost/crm");
        assert_eq!(conn.timeout(), 15);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let err = ConnectionFactory::new(ConnectionSettings::default()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_create_blocking() {
        let conn =
            ConnectionFactory::create_blocking_with_timeout("mysql://u:p@localhost/shop", 0).unwrap();
        assert_eq!(conn.timeout(), 0);
    }
}
