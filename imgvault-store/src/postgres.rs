//! Postgres driver
//!
//! Maps the image-store contract onto a single three-column table reached
//! through a bounded sqlx pool. The table is created on connect if absent;
//! there is no further schema migration.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use imgvault_core::{Result, StoreConfig, StoreError, TableName};

use crate::driver::{DeleteOutcome, FetchedImage, ImageDriver, ImageRecord};

/// Postgres-backed image store.
pub struct PostgresDriver {
    pool: PgPool,
    table_name: TableName,
}

impl PostgresDriver {
    /// Connect the pool and ensure the backing table exists.
    ///
    /// Reconnecting against an existing table is harmless: the DDL is
    /// `CREATE TABLE IF NOT EXISTS` and never drops rows.
    ///
    /// # Errors
    ///
    /// Propagates pool establishment and DDL failures.
    pub async fn connect(config: StoreConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .min_connections(config.min_size)
            .max_connections(config.max_size)
            .connect(&config.connection_uri)
            .await?;

        // The table name is a validated identifier; data values below all
        // go through bind parameters.
        let ddl = format!(
            "CREATE TABLE IF NOT EXISTS {} (name TEXT, image BYTEA, mime TEXT)",
            config.table_name.as_str()
        );
        sqlx::query(&ddl).execute(&pool).await?;

        tracing::debug!(table = %config.table_name, "image table ensured");

        Ok(Self {
            pool,
            table_name: config.table_name,
        })
    }
}

#[async_trait]
impl ImageDriver for PostgresDriver {
    async fn insert(&self, image: &[u8], name: &str, mime: &str) -> Result<()> {
        let query = format!(
            "INSERT INTO {} (name, image, mime) VALUES ($1, $2, $3)",
            self.table_name.as_str()
        );
        sqlx::query(&query)
            .bind(name)
            .bind(image)
            .bind(mime)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn fetch(&self, name: &str) -> Result<FetchedImage> {
        let query = format!(
            "SELECT image, mime FROM {} WHERE name = $1 LIMIT 1",
            self.table_name.as_str()
        );
        let row = sqlx::query(&query)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::not_found(name))?;

        let stored: Vec<u8> = row.get("image");
        let mime: String = row.get("mime");

        Ok(FetchedImage {
            bytes: self.decompress(&stored)?,
            mime,
        })
    }

    async fn delete(&self, name: &str) -> Result<DeleteOutcome> {
        let query = format!("DELETE FROM {} WHERE name = $1", self.table_name.as_str());
        let result = sqlx::query(&query).bind(name).execute(&self.pool).await?;

        match result.rows_affected() {
            0 => Ok(DeleteOutcome::NoMatch),
            n => Ok(DeleteOutcome::Removed(n)),
        }
    }

    async fn fetch_all(&self) -> Result<Vec<ImageRecord>> {
        let query = format!("SELECT name, image, mime FROM {}", self.table_name.as_str());
        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        Ok(rows
            .into_iter()
            .map(|row| ImageRecord {
                name: row.get("name"),
                image: row.get("image"),
                mime: row.get("mime"),
            })
            .collect())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
