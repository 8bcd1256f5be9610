/// Structured error types for the imgvault storage stack.
///
/// Uses `thiserror` for better API surface and error composition.
/// The binary crate (imgvault-cli) can still use `anyhow` for convenience,
/// but library consumers get structured, composable errors.

use thiserror::Error;

use crate::ident::IdentifierError;

/// Main error type for imgvault operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Configuration is missing or invalid
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    /// Table name failed identifier validation
    #[error("Invalid table name: {0}")]
    Identifier(#[from] IdentifierError),

    /// No driver registered for the requested kind
    #[error("Unknown driver kind '{kind}'")]
    UnknownDriver { kind: String },

    /// Pool or statement failure from the backend
    #[error("Database error: {source}")]
    Database {
        #[from]
        source: sqlx::Error,
    },

    /// No row matched the requested name
    #[error("Image '{name}' not found")]
    NotFound { name: String },

    /// Payload could not be compressed or decompressed
    #[error("Compression error: {reason}")]
    Compression { reason: String },
}

/// Result type alias for imgvault operations
pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Create an unknown-driver error
    pub fn unknown_driver(kind: impl Into<String>) -> Self {
        Self::UnknownDriver { kind: kind.into() }
    }

    /// Create a not-found error
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Create a compression error
    pub fn compression(reason: impl Into<String>) -> Self {
        Self::Compression {
            reason: reason.into(),
        }
    }

    /// True when the error means "no matching row", as opposed to a
    /// backend failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::not_found("logo");
        assert_eq!(err.to_string(), "Image 'logo' not found");

        let err = StoreError::unknown_driver("MONGO");
        assert_eq!(err.to_string(), "Unknown driver kind 'MONGO'");

        let err = StoreError::config("min_size must be at least 1");
        assert!(err.to_string().contains("min_size"));
    }

    #[test]
    fn test_not_found_predicate() {
        assert!(StoreError::not_found("x").is_not_found());
        assert!(!StoreError::config("x").is_not_found());
    }
}
