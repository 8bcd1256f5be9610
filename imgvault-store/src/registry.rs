//! Driver registry
//!
//! Maps a driver-kind identifier to its connect function. The registry is
//! populated at process startup ([`DriverRegistry::builtin`]) and looked
//! up by configuration, so backend selection is an explicit table rather
//! than anything scanned off module attributes.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use futures::future::BoxFuture;

use imgvault_core::{Result, StoreConfig, StoreError};

use crate::driver::ImageDriver;
use crate::postgres::PostgresDriver;

/// Identifier for a registered storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverKind {
    Postgres,
}

impl DriverKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
        }
    }
}

impl fmt::Display for DriverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DriverKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" => Ok(Self::Postgres),
            _ => Err(StoreError::unknown_driver(s)),
        }
    }
}

/// Connect function stored per driver kind.
pub type ConnectFn = fn(StoreConfig) -> BoxFuture<'static, Result<Box<dyn ImageDriver>>>;

/// Registry of storage backends.
pub struct DriverRegistry {
    connectors: HashMap<DriverKind, ConnectFn>,
}

impl DriverRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self {
            connectors: HashMap::new(),
        }
    }

    /// Registry with every built-in driver registered.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(DriverKind::Postgres, connect_postgres);
        registry
    }

    /// Register (or replace) the connect function for a kind.
    pub fn register(&mut self, kind: DriverKind, connect: ConnectFn) {
        self.connectors.insert(kind, connect);
    }

    pub fn contains(&self, kind: DriverKind) -> bool {
        self.connectors.contains_key(&kind)
    }

    /// Connect the driver registered for `kind`.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnknownDriver`] when nothing is registered for the
    /// kind; otherwise whatever the driver's own connect surfaces.
    pub async fn connect(
        &self,
        kind: DriverKind,
        config: StoreConfig,
    ) -> Result<Box<dyn ImageDriver>> {
        let connect = self
            .connectors
            .get(&kind)
            .ok_or_else(|| StoreError::unknown_driver(kind.as_str()))?;

        tracing::debug!(driver = %kind, "connecting storage driver");
        connect(config).await
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn connect_postgres(config: StoreConfig) -> BoxFuture<'static, Result<Box<dyn ImageDriver>>> {
    Box::pin(async move {
        let driver = PostgresDriver::connect(config).await?;
        Ok(Box::new(driver) as Box<dyn ImageDriver>)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> StoreConfig {
        StoreConfig::new("postgres://localhost/imgvault_test", 1, 2, "images").unwrap()
    }

    #[test]
    fn parses_kind_case_insensitively() {
        assert_eq!("postgres".parse::<DriverKind>().unwrap(), DriverKind::Postgres);
        assert_eq!("POSTGRES".parse::<DriverKind>().unwrap(), DriverKind::Postgres);
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = "mongo".parse::<DriverKind>().unwrap_err();
        assert!(matches!(err, StoreError::UnknownDriver { .. }));
        assert!(err.to_string().contains("mongo"));
    }

    #[test]
    fn builtin_registers_postgres() {
        let registry = DriverRegistry::builtin();
        assert!(registry.contains(DriverKind::Postgres));
    }

    #[tokio::test]
    async fn empty_registry_reports_unknown_driver() {
        let registry = DriverRegistry::new();
        let err = registry
            .connect(DriverKind::Postgres, test_config())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, StoreError::UnknownDriver { .. }));
    }
}
