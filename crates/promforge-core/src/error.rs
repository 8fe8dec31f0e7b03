//! Error types shared across the Promforge crates.

use thiserror::Error;

/// Errors that can occur while building or serializing configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// A duration string did not match the Prometheus duration grammar.
    #[error("malformed duration {input:?}: {reason}")]
    MalformedDuration {
        /// The input that failed to parse.
        input: String,
        /// Why the input was rejected.
        reason: String,
    },

    /// A label matcher string contained no recognized operator.
    #[error("malformed matcher {input:?}: no operator found")]
    MalformedMatcher {
        /// The input that failed to parse.
        input: String,
    },

    /// The YAML/JSON encoder rejected an entity.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The filesystem rejected a write.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A metric or label name violated the Prometheus naming grammar.
    #[error("invalid {kind} name: {name:?}")]
    InvalidName {
        /// What was being named ("metric" or "label").
        kind: &'static str,
        /// The rejected name.
        name: String,
    },
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type for Promforge operations.
pub type Result<T> = std::result::Result<T, Error>;
