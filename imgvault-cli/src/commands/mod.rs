//! CLI subcommand implementations

pub mod images;
pub mod serve;

use anyhow::{Context, Result};
use clap::Args;

use imgvault_core::{ImgvaultConfig, StoreConfig};
use imgvault_store::{DriverKind, DriverRegistry, ImageDriver};

/// Store connection flags shared by every subcommand that touches the backend
#[derive(Args, Debug)]
pub struct StoreArgs {
    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Table name (overrides config)
    #[arg(long)]
    pub table: Option<String>,
}

/// Resolve the validated store configuration from flags, environment, and
/// config files (in that priority order).
pub fn resolve_store_config(config: &ImgvaultConfig, args: &StoreArgs) -> Result<StoreConfig> {
    let uri = args
        .database_url
        .clone()
        .or_else(|| config.storage.connection_uri.clone())
        .context(
            "DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or imgvault.toml",
        )?;

    let table = args
        .table
        .as_deref()
        .unwrap_or(&config.storage.table_name);

    let store_config = StoreConfig::new(uri, config.storage.min_size, config.storage.max_size, table)?;
    Ok(store_config)
}

/// Connect the configured driver through the registry.
pub async fn connect_driver(
    config: &ImgvaultConfig,
    store_config: StoreConfig,
) -> Result<Box<dyn ImageDriver>> {
    let kind: DriverKind = config.storage.driver.parse()?;

    DriverRegistry::builtin()
        .connect(kind, store_config)
        .await
        .context("Failed to connect storage driver")
}
