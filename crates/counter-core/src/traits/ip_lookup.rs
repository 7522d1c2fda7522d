// # IP Lookup Trait
//
// Defines the network step behind `async_request`.
//
// ## Implementations
//
// - HTTP/JSON: `counter-ip-http` crate
//
// ## Usage
//
// ```rust,ignore
// use counter_core::{CounterStore, IpLookup, async_request};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let store = CounterStore::new();
//     let lookup = /* IpLookup implementation */;
//
//     let state = async_request(&store, &lookup, 0).await?;
//     println!("IP: {}", state.ip_address);
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

/// Trait for IP lookup implementations
///
/// A lookup performs exactly one request per call and reports the IP
/// string exactly as the remote end returned it.
///
/// # Error Policy
///
/// - Transport failures map to [`crate::Error::Network`]
/// - Undecodable responses map to [`crate::Error::Json`]
/// - No retries and no fallback values; the caller decides what to do
///
/// Implementations must be thread-safe and usable across async tasks.
#[async_trait]
pub trait IpLookup: Send + Sync {
    /// Fetch the current IP address
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The `ip` field of the response, unvalidated
    /// - `Err(Error)`: Network or parse failure
    async fn lookup(&self) -> Result<String, crate::Error>;

    /// Short name used in logs and errors
    fn name(&self) -> &'static str;
}

#[async_trait]
impl<T: IpLookup + ?Sized> IpLookup for Box<T> {
    async fn lookup(&self) -> Result<String, crate::Error> {
        (**self).lookup().await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Helper trait for constructing lookups from configuration
pub trait IpLookupFactory: Send + Sync {
    /// Create an IpLookup instance from configuration
    fn create(&self, config: &crate::config::CounterConfig)
    -> Result<Box<dyn IpLookup>, crate::Error>;
}
