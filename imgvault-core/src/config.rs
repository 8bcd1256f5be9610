use std::path::PathBuf;

use anyhow::Result as AnyResult;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Result, StoreError};
use crate::ident::TableName;

/// Validated connection settings for a store driver.
///
/// This is the explicit counterpart of the loose keyword bag the adapter
/// used to take: every field is required and checked up front, so a
/// misconfigured store fails at construction with a clear reason instead
/// of at first use.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Backend address/credentials string, e.g. `postgres://localhost/imgvault`
    pub connection_uri: String,

    /// Minimum number of pooled connections held open
    pub min_size: u32,

    /// Maximum number of pooled connections
    pub max_size: u32,

    /// Table holding the image rows
    pub table_name: TableName,
}

impl StoreConfig {
    /// Build a validated store configuration.
    ///
    /// # Errors
    ///
    /// Fails when the URI is empty, `min_size` is zero, `max_size` is
    /// below `min_size`, or the table name is not a valid identifier.
    pub fn new(
        connection_uri: impl Into<String>,
        min_size: u32,
        max_size: u32,
        table_name: &str,
    ) -> Result<Self> {
        let connection_uri = connection_uri.into();

        if connection_uri.trim().is_empty() {
            return Err(StoreError::config("connection_uri cannot be empty"));
        }
        if min_size == 0 {
            return Err(StoreError::config("min_size must be at least 1"));
        }
        if max_size < min_size {
            return Err(StoreError::config(format!(
                "max_size ({}) must be >= min_size ({})",
                max_size, min_size
            )));
        }

        Ok(Self {
            connection_uri,
            min_size,
            max_size,
            table_name: TableName::new(table_name)?,
        })
    }
}

/// Load environment variables from .env files in multiple locations
///
/// Priority order (highest to lowest):
/// 1. Current directory .env
/// 2. ~/.imgvault/.env
/// 3. Environment variables already set
pub fn load_dotenv() -> AnyResult<()> {
    let mut loaded_from = Vec::new();

    // Check current directory first (highest priority)
    if let Ok(path) = dotenvy::dotenv() {
        loaded_from.push(format!("current directory ({})", path.display()));
        debug!("Loaded .env from current directory: {}", path.display());
    }

    // Check ~/.imgvault/.env
    if let Some(dir) = config_dir() {
        let env_file = dir.join(".env");

        if env_file.exists() {
            // dotenvy doesn't overwrite existing vars, so this is safe
            match dotenvy::from_path(&env_file) {
                Ok(_) => {
                    loaded_from.push(format!("~/.imgvault/.env ({})", env_file.display()));
                }
                Err(e) => {
                    debug!("Failed to load ~/.imgvault/.env: {}", e);
                }
            }
        }
    }

    if loaded_from.is_empty() {
        debug!("No .env files found (current dir or ~/.imgvault)");
    } else {
        info!("Loaded configuration from: {}", loaded_from.join(", "));
    }

    Ok(())
}

/// Get the imgvault config directory path (~/.imgvault)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".imgvault"))
}

// ============================================================================
// TOML Configuration
// ============================================================================

/// Imgvault TOML configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ImgvaultConfig {
    #[serde(default)]
    pub storage: StorageSection,

    #[serde(default)]
    pub server: ServerSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSection {
    /// Backend connection string; `DATABASE_URL` overrides this
    #[serde(default)]
    pub connection_uri: Option<String>,

    #[serde(default = "default_min_size")]
    pub min_size: u32,

    #[serde(default = "default_max_size")]
    pub max_size: u32,

    #[serde(default = "default_table_name")]
    pub table_name: String,

    /// Driver kind looked up in the registry at startup
    #[serde(default = "default_driver")]
    pub driver: String,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            connection_uri: None,
            min_size: default_min_size(),
            max_size: default_max_size(),
            table_name: default_table_name(),
            driver: default_driver(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default)]
    pub cors_permissive: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            cors_permissive: false,
        }
    }
}

// Default value functions for serde
fn default_min_size() -> u32 {
    1
}

fn default_max_size() -> u32 {
    10
}

fn default_table_name() -> String {
    "images".to_string()
}

fn default_driver() -> String {
    "postgres".to_string()
}

fn default_bind() -> String {
    "127.0.0.1:3030".to_string()
}

impl ImgvaultConfig {
    /// Load config from TOML files
    ///
    /// Priority order (highest to lowest):
    /// 1. ./imgvault.toml (project-specific)
    /// 2. ~/.imgvault/config.toml (user defaults)
    /// 3. Built-in defaults
    pub fn load() -> Self {
        let mut config = ImgvaultConfig::default();

        // Try global config first (~/.imgvault/config.toml)
        if let Some(global_config_path) = config_dir().map(|d| d.join("config.toml")) {
            if global_config_path.exists() {
                if let Some(global_config) = Self::read(&global_config_path) {
                    config = global_config;
                }
            }
        }

        // Try local config (./imgvault.toml) - overrides global
        let local_config_path = PathBuf::from("imgvault.toml");
        if local_config_path.exists() {
            if let Some(local_config) = Self::read(&local_config_path) {
                config = local_config;
            }
        }

        config
    }

    fn read(path: &std::path::Path) -> Option<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<ImgvaultConfig>(&contents) {
                Ok(parsed) => {
                    debug!("Loaded config from {}", path.display());
                    Some(parsed)
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}", path.display(), e);
                    None
                }
            },
            Err(e) => {
                debug!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_config_valid() {
        let cfg = StoreConfig::new("postgres://localhost/imgvault", 1, 10, "images").unwrap();
        assert_eq!(cfg.min_size, 1);
        assert_eq!(cfg.max_size, 10);
        assert_eq!(cfg.table_name.as_str(), "images");
    }

    #[test]
    fn test_store_config_rejects_zero_min() {
        let err = StoreConfig::new("postgres://localhost/x", 0, 10, "images").unwrap_err();
        assert!(matches!(err, StoreError::Config { .. }));
    }

    #[test]
    fn test_store_config_rejects_max_below_min() {
        let err = StoreConfig::new("postgres://localhost/x", 5, 2, "images").unwrap_err();
        assert!(err.to_string().contains("max_size"));
    }

    #[test]
    fn test_store_config_rejects_empty_uri() {
        let err = StoreConfig::new("  ", 1, 10, "images").unwrap_err();
        assert!(matches!(err, StoreError::Config { .. }));
    }

    #[test]
    fn test_store_config_rejects_bad_table_name() {
        let err = StoreConfig::new("postgres://localhost/x", 1, 10, "Images; --").unwrap_err();
        assert!(matches!(err, StoreError::Identifier(_)));
    }

    #[test]
    fn test_config_dir_returns_path() {
        let dir = config_dir();
        assert!(dir.is_some());

        if let Some(path) = dir {
            assert!(path.ends_with(".imgvault"));
        }
    }

    #[test]
    fn test_imgvault_config_defaults() {
        let config = ImgvaultConfig::default();
        assert_eq!(config.storage.min_size, 1);
        assert_eq!(config.storage.max_size, 10);
        assert_eq!(config.storage.table_name, "images");
        assert_eq!(config.storage.driver, "postgres");
        assert_eq!(config.server.bind, "127.0.0.1:3030");
        assert!(!config.server.cors_permissive);
    }

    #[test]
    fn test_section_parse() {
        let parsed: ImgvaultConfig = toml::from_str(
            r#"
            [storage]
            connection_uri = "postgres://localhost/imgvault"
            max_size = 20

            [server]
            bind = "0.0.0.0:8000"
            "#,
        )
        .unwrap();

        assert_eq!(
            parsed.storage.connection_uri.as_deref(),
            Some("postgres://localhost/imgvault")
        );
        assert_eq!(parsed.storage.max_size, 20);
        // Unset fields keep their defaults
        assert_eq!(parsed.storage.min_size, 1);
        assert_eq!(parsed.server.bind, "0.0.0.0:8000");
    }

    #[test]
    fn test_load_dotenv_doesnt_panic() {
        let result = load_dotenv();
        assert!(result.is_ok());
    }
}
