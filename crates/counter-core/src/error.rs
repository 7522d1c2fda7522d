//! Error types for the counter store
//!
//! Synchronous actions cannot fail. Every variant here comes from an
//! asynchronous flow, the configuration layer, or a lookup implementation.

use thiserror::Error;

/// Result type alias for counter store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the counter store
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure (connection, DNS, timeout, body read)
    #[error("Network error: {0}")]
    Network(String),

    /// Response body was not the expected JSON document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Lookup-specific error
    #[error("IP lookup error ({lookup}): {message}")]
    Lookup {
        /// Lookup implementation name
        lookup: String,
        /// Error message
        message: String,
    },

    /// A spawned flow task panicked or was cancelled
    #[error("Flow task error: {0}")]
    Task(String),
}

impl Error {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a lookup-specific error
    pub fn lookup(lookup: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Lookup {
            lookup: lookup.into(),
            message: message.into(),
        }
    }

    /// Create a flow task error
    pub fn task(msg: impl Into<String>) -> Self {
        Self::Task(msg.into())
    }

    /// Whether this error came from the network step (as opposed to parsing)
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Whether this error came from decoding the response body
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Json(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(Error::network("connection refused").is_network());
        assert!(!Error::network("connection refused").is_parse());

        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = Error::from(json_err);
        assert!(err.is_parse());
        assert!(err.to_string().starts_with("JSON error"));
    }

    #[test]
    fn test_flow_errors_are_neither_network_nor_parse() {
        for err in [Error::task("cancelled"), Error::config("bad endpoint")] {
            assert!(!err.is_network());
            assert!(!err.is_parse());
        }
        assert_eq!(Error::task("cancelled").to_string(), "Flow task error: cancelled");
    }

    #[test]
    fn test_lookup_error_display() {
        let err = Error::lookup("http", "bad gateway");
        assert_eq!(err.to_string(), "IP lookup error (http): bad gateway");
    }
}
