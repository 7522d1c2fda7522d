// # counter-core
//
// Core library for the counter store.
//
// ## Architecture Overview
//
// - **CounterState**: The state slice (`value` and `ip_address`)
// - **Action**: Named state changes, applied by the pure `reduce` function
// - **CounterStore**: Cloneable handle that serializes dispatches and publishes snapshots
// - **IpLookup**: Trait for the network step behind `async_request`
// - **flows**: The two asynchronous flows (`increment_async`, `async_request`)
//
// ## Design Principles
//
// 1. **Pure Reducer**: Every action maps the old state to a new one, no hidden mutation
// 2. **Explicit State**: The store is passed around as a value, never a global
// 3. **Library-First**: The binary is a thin runner over this crate

pub mod action;
pub mod config;
pub mod error;
pub mod flows;
pub mod state;
pub mod store;
pub mod traits;

// Re-export core types for convenience
pub use action::{Action, reduce};
pub use config::CounterConfig;
pub use error::{Error, Result};
pub use flows::{DelayedDispatch, INCREMENT_DELAY, async_request, increment_after, increment_async};
pub use state::{CounterState, select_count, select_ip};
pub use store::CounterStore;
pub use traits::IpLookup;
