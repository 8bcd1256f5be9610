//! Direct store commands: put, get, rm, ls
//!
//! Each command connects the configured driver, performs one operation,
//! and closes the pool.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::AsyncWriteExt;

use imgvault_core::ImgvaultConfig;
use imgvault_store::DeleteOutcome;

use super::StoreArgs;

/// Fallback MIME label when nothing better is known
const DEFAULT_MIME: &str = "application/octet-stream";

/// Arguments for the put command
#[derive(Parser, Debug)]
pub struct PutArgs {
    /// Image file to store
    pub file: PathBuf,

    /// Name to store the image under (default: file stem)
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// MIME type label (default: guessed from the file extension)
    #[arg(long, short = 'm')]
    pub mime: Option<String>,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Arguments for the get command
#[derive(Parser, Debug)]
pub struct GetArgs {
    /// Name of the stored image
    pub name: String,

    /// Write the image here instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Arguments for the rm command
#[derive(Parser, Debug)]
pub struct RmArgs {
    /// Name of the stored image
    pub name: String,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Arguments for the ls command
#[derive(Parser, Debug)]
pub struct LsArgs {
    #[command(flatten)]
    pub store: StoreArgs,
}

/// Guess a MIME label from the file extension.
fn mime_from_extension(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        Some("ico") => "image/x-icon",
        _ => DEFAULT_MIME,
    }
}

/// Store one image file
pub async fn run_put(args: PutArgs) -> Result<()> {
    let config = ImgvaultConfig::load();
    let store_config = super::resolve_store_config(&config, &args.store)?;

    let bytes = tokio::fs::read(&args.file)
        .await
        .context(format!("Failed to read {}", args.file.display()))?;

    let name = match args.name {
        Some(name) => name,
        None => args
            .file
            .file_stem()
            .and_then(|stem| stem.to_str())
            .context("Cannot derive a name from the file path; pass --name")?
            .to_owned(),
    };
    let mime = args
        .mime
        .unwrap_or_else(|| mime_from_extension(&args.file).to_owned());

    let driver = super::connect_driver(&config, store_config).await?;
    let stored = driver.compress(&bytes)?;
    driver
        .insert(&stored, &name, &mime)
        .await
        .context("Insert failed")?;
    driver.close().await;

    println!(
        "stored '{}' ({}, {} bytes, {} compressed)",
        name,
        mime,
        bytes.len(),
        stored.len()
    );
    Ok(())
}

/// Fetch one image
pub async fn run_get(args: GetArgs) -> Result<()> {
    let config = ImgvaultConfig::load();
    let store_config = super::resolve_store_config(&config, &args.store)?;

    let driver = super::connect_driver(&config, store_config).await?;
    let result = driver.fetch(&args.name).await;
    driver.close().await;

    let image = result.context(format!("Failed to fetch '{}'", args.name))?;

    match args.output {
        Some(path) => {
            tokio::fs::write(&path, &image.bytes)
                .await
                .context(format!("Failed to write {}", path.display()))?;
            println!(
                "wrote '{}' ({}, {} bytes) to {}",
                args.name,
                image.mime,
                image.bytes.len(),
                path.display()
            );
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(&image.bytes).await?;
            stdout.flush().await?;
        }
    }

    Ok(())
}

/// Delete one image name (every matching row)
pub async fn run_rm(args: RmArgs) -> Result<()> {
    let config = ImgvaultConfig::load();
    let store_config = super::resolve_store_config(&config, &args.store)?;

    let driver = super::connect_driver(&config, store_config).await?;
    let result = driver.delete(&args.name).await;
    driver.close().await;

    match result.context("Delete failed")? {
        DeleteOutcome::Removed(n) => println!("removed {} row(s) for '{}'", n, args.name),
        DeleteOutcome::NoMatch => println!("no rows matched '{}'", args.name),
    }

    Ok(())
}

/// List stored images
pub async fn run_ls(args: LsArgs) -> Result<()> {
    let config = ImgvaultConfig::load();
    let store_config = super::resolve_store_config(&config, &args.store)?;

    let driver = super::connect_driver(&config, store_config).await?;
    let result = driver.fetch_all().await;
    driver.close().await;

    let rows = result.context("Listing failed")?;
    if rows.is_empty() {
        println!("no images stored");
        return Ok(());
    }

    for row in rows {
        println!("{}\t{}\t{} bytes", row.name, row.mime, row.image.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_guessing_covers_common_extensions() {
        assert_eq!(mime_from_extension(Path::new("logo.png")), "image/png");
        assert_eq!(mime_from_extension(Path::new("photo.JPG")), "image/jpeg");
        assert_eq!(mime_from_extension(Path::new("anim.gif")), "image/gif");
        assert_eq!(mime_from_extension(Path::new("unknown.bin")), DEFAULT_MIME);
        assert_eq!(mime_from_extension(Path::new("no_extension")), DEFAULT_MIME);
    }
}
