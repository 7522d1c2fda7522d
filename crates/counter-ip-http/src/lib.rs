// # HTTP IP Lookup
//
// This crate provides the HTTP/JSON implementation of `IpLookup`.
//
// ## Protocol
//
// One `GET` to the configured endpoint (default `http://ip.jsontest.com/`).
// The body must be a JSON object with a string field `ip`:
//
// ```text
// {"ip": "1.2.3.4"}
// ```
//
// The body is decoded whatever the HTTP status is; a non-2xx response only
// fails if its body does not decode. No retries, no failover endpoints.

use counter_core::config::CounterConfig;
use counter_core::traits::{IpLookup, IpLookupFactory};
use counter_core::{Error, Result};

use serde::Deserialize;
use std::time::Duration;

/// Lookup name used in logs and errors
const LOOKUP_NAME: &str = "http";

/// Response body returned by the IP endpoint
#[derive(Debug, Deserialize)]
struct IpResponse {
    ip: String,
}

/// HTTP-based IP lookup
pub struct HttpIpLookup {
    /// URL to fetch the IP from
    url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpIpLookup {
    /// Create a new HTTP IP lookup without a request timeout
    ///
    /// # Parameters
    ///
    /// - `url`: URL returning `{ "ip": string }` (e.g., "http://ip.jsontest.com/")
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Create with a request timeout
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::lookup(LOOKUP_NAME, format!("Failed to build client: {}", e)))?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    /// Create from configuration
    pub fn from_config(config: &CounterConfig) -> Result<Self> {
        config.validate()?;

        match config.request_timeout() {
            Some(timeout) => Self::with_timeout(config.ip_endpoint.clone(), timeout),
            None => Ok(Self::new(config.ip_endpoint.clone())),
        }
    }

    /// The endpoint this lookup queries
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl IpLookup for HttpIpLookup {
    async fn lookup(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::network(format!("Request to {} failed: {}", self.url, e)))?;

        tracing::debug!("GET {} -> {}", self.url, response.status());

        let body = response
            .text()
            .await
            .map_err(|e| Error::network(format!("Failed to read response: {}", e)))?;

        let parsed: IpResponse = serde_json::from_str(&body)?;
        Ok(parsed.ip)
    }

    fn name(&self) -> &'static str {
        LOOKUP_NAME
    }
}

/// Factory for creating HTTP IP lookups
pub struct HttpFactory;

impl IpLookupFactory for HttpFactory {
    fn create(&self, config: &CounterConfig) -> Result<Box<dyn IpLookup>> {
        Ok(Box::new(HttpIpLookup::from_config(config)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use counter_core::{CounterStore, async_request};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn server_returning(template: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(template)
            .expect(1)
            .mount(&server)
            .await;
        server
    }

    #[test]
    fn test_factory_creation() {
        let factory = HttpFactory;

        let config = CounterConfig::new().with_request_timeout_secs(10);
        assert!(factory.create(&config).is_ok());

        let config = CounterConfig::new().with_ip_endpoint("not a url");
        assert!(factory.create(&config).is_err());
    }

    #[test]
    fn test_from_config_uses_endpoint() {
        let config = CounterConfig::default();
        let lookup = HttpIpLookup::from_config(&config).unwrap();
        assert_eq!(lookup.url(), "http://ip.jsontest.com/");
        assert_eq!(lookup.name(), "http");
    }

    #[tokio::test]
    async fn test_lookup_parses_ip_field() {
        let server = server_returning(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ip": "1.2.3.4" })),
        )
        .await;

        let lookup = HttpIpLookup::new(format!("{}/", server.uri()));
        assert_eq!(lookup.lookup().await.unwrap(), "1.2.3.4");
    }

    #[tokio::test]
    async fn test_lookup_reports_missing_field_as_parse_error() {
        let server = server_returning(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "addr": "1.2.3.4" })),
        )
        .await;

        let lookup = HttpIpLookup::new(format!("{}/", server.uri()));
        let err = lookup.lookup().await.unwrap_err();
        assert!(err.is_parse(), "unexpected error: {}", err);
    }

    #[tokio::test]
    async fn test_lookup_reports_non_json_as_parse_error() {
        let server =
            server_returning(ResponseTemplate::new(502).set_body_string("Bad Gateway")).await;

        let lookup = HttpIpLookup::new(format!("{}/", server.uri()));
        assert!(lookup.lookup().await.unwrap_err().is_parse());
    }

    #[tokio::test]
    async fn test_lookup_decodes_body_regardless_of_status() {
        let server = server_returning(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({ "ip": "5.6.7.8" })),
        )
        .await;

        let lookup = HttpIpLookup::new(format!("{}/", server.uri()));
        assert_eq!(lookup.lookup().await.unwrap(), "5.6.7.8");
    }

    #[tokio::test]
    async fn test_lookup_reports_unreachable_endpoint_as_network_error() {
        // Grab a free port, then release it so nothing listens there
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());
        drop(listener);

        let lookup = HttpIpLookup::new(url);
        assert!(lookup.lookup().await.unwrap_err().is_network());
    }

    #[tokio::test]
    async fn test_async_request_over_http() {
        let server = server_returning(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ip": "1.2.3.4" })),
        )
        .await;

        let store = CounterStore::new();
        let lookup = HttpIpLookup::new(format!("{}/", server.uri()));

        let state = async_request(&store, &lookup, 0).await.unwrap();
        assert_eq!(state.ip_address, "1.2.3.4");
        assert_eq!(store.select_ip(), "1.2.3.4");
    }
}
