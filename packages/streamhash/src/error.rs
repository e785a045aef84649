//! Error handling for the streaming hash engine
//!
//! Every failure is a caller-contract violation surfaced synchronously at the
//! offending call. There is no I/O in the engine, so nothing here is transient.

use thiserror::Error;

/// Hashing-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    /// Malformed or missing options, unsupported formats or variants,
    /// HMAC on a variant without HMAC, `numRounds` combined with a MAC.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Operations invoked in an order the engine state forbids.
    #[error("Sequence error: {0}")]
    Sequence(String),
}

impl HashError {
    /// Create a configuration error
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a sequence error
    #[must_use]
    pub fn sequence(msg: impl Into<String>) -> Self {
        Self::Sequence(msg.into())
    }

    /// Whether this is a [`HashError::Config`]
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Whether this is a [`HashError::Sequence`]
    #[must_use]
    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }
}

impl From<serde_json::Error> for HashError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("invalid options: {err}"))
    }
}

/// Result type for hashing operations
pub type Result<T> = std::result::Result<T, HashError>;
