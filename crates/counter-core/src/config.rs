//! Configuration types for the counter store
//!
//! The library itself never reads the environment; callers build a
//! [`CounterConfig`] (directly, from serde, or from env in `counterd`).

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Endpoint queried by `async_request` unless configured otherwise
pub const DEFAULT_IP_ENDPOINT: &str = "http://ip.jsontest.com/";

/// Main counter store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterConfig {
    /// URL returning JSON `{ "ip": string }`
    #[serde(default = "default_ip_endpoint")]
    pub ip_endpoint: String,

    /// Delay before `increment_async` dispatches (in milliseconds)
    #[serde(default = "default_increment_delay_ms")]
    pub increment_delay_ms: u64,

    /// Optional request timeout for the IP lookup (in seconds)
    ///
    /// Unset means the request may wait indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl CounterConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self {
            ip_endpoint: default_ip_endpoint(),
            increment_delay_ms: default_increment_delay_ms(),
            request_timeout_secs: None,
        }
    }

    /// Set the IP endpoint
    pub fn with_ip_endpoint(mut self, url: impl Into<String>) -> Self {
        self.ip_endpoint = url.into();
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = Some(secs);
        self
    }

    /// Delay as a `Duration`
    pub fn increment_delay(&self) -> Duration {
        Duration::from_millis(self.increment_delay_ms)
    }

    /// Request timeout as a `Duration`, if configured
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.ip_endpoint.is_empty() {
            return Err(crate::Error::config("IP endpoint cannot be empty"));
        }

        if !self.ip_endpoint.starts_with("http://") && !self.ip_endpoint.starts_with("https://") {
            return Err(crate::Error::config(format!(
                "IP endpoint must use HTTP or HTTPS scheme. Got: {}",
                self.ip_endpoint
            )));
        }

        if self.increment_delay_ms == 0 {
            return Err(crate::Error::config("Increment delay must be > 0"));
        }

        if let Some(timeout) = self.request_timeout_secs
            && !(1..=300).contains(&timeout)
        {
            return Err(crate::Error::config(format!(
                "Request timeout must be between 1 and 300 seconds. Got: {}",
                timeout
            )));
        }

        Ok(())
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn default_ip_endpoint() -> String {
    DEFAULT_IP_ENDPOINT.to_string()
}

fn default_increment_delay_ms() -> u64 {
    1000
}
