//! Table name validation
//!
//! Identifier format: lowercase alphanumeric with underscores, matching
//! what Postgres accepts unquoted. The table name is the one identifier
//! interpolated into SQL text, so it never leaves this type unvalidated.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum length for table names (Postgres identifier limit)
const MAX_TABLE_NAME_LEN: usize = 63;

/// Identifier pattern: starts with a lowercase letter or underscore,
/// continues with lowercase alphanumerics/underscores.
static IDENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z_][a-z0-9_]{0,62}$").expect("invalid identifier regex"));

/// Validation error for identifiers
#[derive(Debug, Clone)]
pub enum IdentifierError {
    /// Identifier is empty
    Empty,

    /// Identifier exceeds the backend's length limit
    TooLong { max: usize },

    /// Identifier contains characters outside the allow-list
    InvalidFormat { reason: &'static str },
}

impl fmt::Display for IdentifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "table name cannot be empty"),
            Self::TooLong { max } => {
                write!(f, "table name exceeds maximum length of {} characters", max)
            }
            Self::InvalidFormat { reason } => write!(f, "table name {}", reason),
        }
    }
}

impl std::error::Error for IdentifierError {}

/// Validated table name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName(String);

impl TableName {
    /// Create a new table name, validating the identifier format.
    ///
    /// # Rules
    /// - Max 63 characters
    /// - Lowercase alphanumeric and underscores
    /// - Must start with a letter or underscore
    ///
    /// # Example
    /// ```
    /// use imgvault_core::ident::TableName;
    ///
    /// assert!(TableName::new("images").is_ok());
    /// assert!(TableName::new("Images").is_err());  // uppercase
    /// assert!(TableName::new("1images").is_err()); // starts with digit
    /// ```
    pub fn new(s: &str) -> Result<Self, IdentifierError> {
        if s.is_empty() {
            return Err(IdentifierError::Empty);
        }

        if s.len() > MAX_TABLE_NAME_LEN {
            return Err(IdentifierError::TooLong {
                max: MAX_TABLE_NAME_LEN,
            });
        }

        if !IDENT_RE.is_match(s) {
            return Err(IdentifierError::InvalidFormat {
                reason: "must be lowercase alphanumeric with underscores, starting with a letter or underscore",
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Get the table name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TableName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_identifiers() {
        assert!(TableName::new("images").is_ok());
        assert!(TableName::new("image_store").is_ok());
        assert!(TableName::new("_private").is_ok());
        assert!(TableName::new("t2").is_ok());
    }

    #[test]
    fn rejects_uppercase() {
        let err = TableName::new("Images").unwrap_err();
        assert!(matches!(err, IdentifierError::InvalidFormat { .. }));
    }

    #[test]
    fn rejects_digit_start() {
        let err = TableName::new("1images").unwrap_err();
        assert!(matches!(err, IdentifierError::InvalidFormat { .. }));
    }

    #[test]
    fn rejects_hyphen() {
        let err = TableName::new("image-store").unwrap_err();
        assert!(matches!(err, IdentifierError::InvalidFormat { .. }));
    }

    #[test]
    fn rejects_quote_injection() {
        assert!(TableName::new("images\"; drop table users; --").is_err());
        assert!(TableName::new("images; DROP TABLE images").is_err());
    }

    #[test]
    fn rejects_empty() {
        let err = TableName::new("").unwrap_err();
        assert!(matches!(err, IdentifierError::Empty));
    }

    #[test]
    fn max_length() {
        let name_63 = "a".repeat(63);
        assert!(TableName::new(&name_63).is_ok());

        let name_64 = "a".repeat(64);
        let err = TableName::new(&name_64).unwrap_err();
        assert!(matches!(err, IdentifierError::TooLong { max: 63 }));
    }
}
