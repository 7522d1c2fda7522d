//! Actions and the reducer
//!
//! An [`Action`] names a state change. [`reduce`] applies it to a state and
//! returns the next state; it never fails and never touches its input.

use crate::state::CounterState;

/// A named state change with its payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// `value + 1`
    Increment,
    /// `value - 1`
    Decrement,
    /// `value + amount`; negative amounts decrement
    IncrementByAmount(i64),
    /// Replace the stored IP address (no format validation)
    UpdateIpAddress(String),
}

impl Action {
    pub fn increment() -> Self {
        Self::Increment
    }

    pub fn decrement() -> Self {
        Self::Decrement
    }

    pub fn increment_by_amount(amount: i64) -> Self {
        Self::IncrementByAmount(amount)
    }

    pub fn update_ip_address(ip: impl Into<String>) -> Self {
        Self::UpdateIpAddress(ip.into())
    }

    /// Action type name, used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Action::Increment => "counter/increment",
            Action::Decrement => "counter/decrement",
            Action::IncrementByAmount(_) => "counter/incrementByAmount",
            Action::UpdateIpAddress(_) => "counter/updateIpAddress",
        }
    }
}

/// Apply an action to a state, producing the next state
///
/// Counter arithmetic wraps on overflow.
pub fn reduce(state: &CounterState, action: &Action) -> CounterState {
    match action {
        Action::Increment => CounterState {
            value: state.value.wrapping_add(1),
            ..state.clone()
        },
        Action::Decrement => CounterState {
            value: state.value.wrapping_sub(1),
            ..state.clone()
        },
        Action::IncrementByAmount(amount) => CounterState {
            value: state.value.wrapping_add(*amount),
            ..state.clone()
        },
        Action::UpdateIpAddress(ip) => CounterState {
            ip_address: ip.clone(),
            ..state.clone()
        },
    }
}
