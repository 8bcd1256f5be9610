//! imgvault CLI - image blob store over a pooled relational backend
//!
//! This is the main entry point for the imgvault command-line tool, which provides:
//! - The HTTP server (`serve` subcommand)
//! - Direct store operations (`put`, `get`, `rm`, `ls`)

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use commands::images::{GetArgs, LsArgs, PutArgs, RmArgs};
use commands::serve::ServeArgs;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "imgvault",
    author,
    version,
    about = "Store, fetch, and serve compressed image blobs from a relational backend"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),

    /// Store one image file
    Put(PutArgs),

    /// Fetch an image and write it to a file or stdout
    Get(GetArgs),

    /// Delete an image (every row with that name)
    Rm(RmArgs),

    /// List stored images
    Ls(LsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig { debug: cli.debug })?;
    imgvault_core::config::load_dotenv()?;

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await,
        Commands::Put(args) => commands::images::run_put(args).await,
        Commands::Get(args) => commands::images::run_get(args).await,
        Commands::Rm(args) => commands::images::run_rm(args).await,
        Commands::Ls(args) => commands::images::run_ls(args).await,
    }
}
