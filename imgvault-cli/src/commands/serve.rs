//! HTTP server command
//!
//! Connects the configured driver and runs the imgvault HTTP server.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use imgvault_core::ImgvaultConfig;
use imgvault_server::{run_server, AppState, ServerConfig};

use super::StoreArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default from config, falling back to 127.0.0.1:3030)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = ImgvaultConfig::load();

    let store_config = super::resolve_store_config(&config, &args.store)?;
    let driver = super::connect_driver(&config, store_config).await?;

    let bind_addr = match args.bind {
        Some(addr) => addr,
        None => config
            .server
            .bind
            .parse()
            .context("Invalid server.bind address in config")?,
    };

    tracing::info!("Starting imgvault server on {}", bind_addr);

    let server_config = ServerConfig {
        bind_addr,
        cors_permissive: args.cors_permissive || config.server.cors_permissive,
    };

    // Run server (blocks until shutdown)
    run_server(AppState::new(driver), server_config)
        .await
        .context("Server error")?;

    Ok(())
}
