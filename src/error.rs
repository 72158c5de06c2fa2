//! Error types module.
//!
//! This module defines the error types used throughout probestat.
//! It uses `thiserror` for structured error handling and provides
//! a custom `Result` type alias for convenience.
//!
//! Individual probe failures never show up here: a failed lookup is an
//! absent hostname and a failed ping is `false`. These variants cover
//! setup and reporting problems only.

use thiserror::Error;

/// A specialized `Result` type for probestat operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for probestat.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (terminal, stdout, system resolver config)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error (JSON report output)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// DNS resolver construction error
    #[error("DNS resolver error: {0}")]
    Resolver(#[from] trust_dns_resolver::error::ResolveError),

    /// Network-related error (ICMP socket setup)
    #[error("Network error: {0}")]
    Network(String),

    /// Configuration error (inconsistent probe settings)
    #[error("Config error: {0}")]
    Config(String),

    /// More distinct words requested than the dictionary holds
    #[error("cannot pick {requested} distinct words from a dictionary of {available}")]
    InvalidCount {
        /// Number of words asked for
        requested: usize,
        /// Number of words in the dictionary
        available: usize,
    },

    /// A probe task panicked or was aborted
    #[error("probe task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl Error {
    /// Create a new network error with a message.
    #[must_use]
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a new configuration error with a message.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
