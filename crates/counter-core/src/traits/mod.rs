//! Core traits for the counter store
//!
//! - [`IpLookup`]: Fetch the caller's public IP address

pub mod ip_lookup;

pub use ip_lookup::{IpLookup, IpLookupFactory};
