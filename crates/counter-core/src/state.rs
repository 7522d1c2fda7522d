// # Counter State
//
// The state slice held by `CounterStore`, and the selectors that project
// fields out of it.
//
// State values are plain data. They are never mutated in place by the
// store: every dispatch produces a fresh `CounterState` via `reduce`.

use serde::{Deserialize, Serialize};

/// The counter state slice
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterState {
    /// Counter value, starts at 0
    pub value: i64,
    /// Last IP address stored by `UpdateIpAddress`, starts empty
    pub ip_address: String,
}

impl CounterState {
    /// Create the initial state (`value = 0`, empty IP address)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state with the given counter value and an empty IP address
    pub fn with_value(value: i64) -> Self {
        Self {
            value,
            ip_address: String::new(),
        }
    }
}

/// Select the counter value
pub fn select_count(state: &CounterState) -> i64 {
    state.value
}

/// Select the stored IP address
pub fn select_ip(state: &CounterState) -> &str {
    &state.ip_address
}
