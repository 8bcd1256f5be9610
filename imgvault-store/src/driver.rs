//! Storage driver contract
//!
//! A driver maps the narrow image-store contract onto one backend. Each
//! operation acquires a pooled connection for its own duration; there is
//! no cross-operation transaction and no driver-level retry.

use async_trait::async_trait;

use imgvault_core::{codec, Result};

/// One persisted row, payload in its stored (compressed) form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub name: String,
    pub image: Vec<u8>,
    pub mime: String,
}

/// A fetched image with the payload decompressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    pub mime: String,
}

/// Outcome of a delete that executed successfully.
///
/// Backend failure is an `Err`, never folded into this type, so callers
/// can tell "nothing matched" apart from "the statement failed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// At least one row matched and was removed
    Removed(u64),

    /// The statement executed but no row matched
    NoMatch,
}

impl DeleteOutcome {
    /// Number of rows removed (zero for a no-match).
    pub fn removed(&self) -> u64 {
        match self {
            Self::Removed(n) => *n,
            Self::NoMatch => 0,
        }
    }
}

/// Backend-specific implementation of the image-store contract.
///
/// Duplicate names are permitted: `insert` never checks uniqueness,
/// `fetch` returns at most one arbitrarily chosen matching row, and
/// `delete` removes every matching row.
#[async_trait]
pub trait ImageDriver: Send + Sync {
    /// Insert one row. `image` is stored verbatim; callers compress
    /// first via [`ImageDriver::compress`].
    async fn insert(&self, image: &[u8], name: &str, mime: &str) -> Result<()>;

    /// Fetch one matching row, decompressed.
    ///
    /// A miss is [`StoreError::NotFound`](imgvault_core::StoreError::NotFound),
    /// distinct from backend failure.
    async fn fetch(&self, name: &str) -> Result<FetchedImage>;

    /// Remove every row matching `name`.
    async fn delete(&self, name: &str) -> Result<DeleteOutcome>;

    /// All rows, payloads left in their stored compressed form.
    async fn fetch_all(&self) -> Result<Vec<ImageRecord>>;

    /// Tear down the pool. Idempotent; every operation after this fails
    /// until a new driver is connected.
    async fn close(&self);

    /// Compress a payload into the stored format.
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        codec::compress(data)
    }

    /// Decompress a stored payload.
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        codec::decompress(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_outcome_removed_count() {
        assert_eq!(DeleteOutcome::Removed(3).removed(), 3);
        assert_eq!(DeleteOutcome::NoMatch.removed(), 0);
    }
}
