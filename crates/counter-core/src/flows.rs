//! Asynchronous flows
//!
//! Each flow performs one non-instantaneous step and then dispatches a
//! single synchronous action on the store:
//!
//! ```text
//! increment_async(amount) ── sleep(1000ms) ──▶ IncrementByAmount(amount)
//! async_request(amount)   ── IpLookup      ──▶ UpdateIpAddress(ip)
//! ```
//!
//! Flows started independently may complete in any order. Neither flow
//! retries or applies a timeout of its own.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::action::Action;
use crate::error::{Error, Result};
use crate::state::CounterState;
use crate::store::CounterStore;
use crate::traits::IpLookup;

/// Delay applied by [`increment_async`]
pub const INCREMENT_DELAY: Duration = Duration::from_millis(1000);

/// Handle to a scheduled `IncrementByAmount` dispatch
///
/// Dropping the handle does not cancel anything: the dispatch still fires
/// once the delay elapses (as long as the runtime is alive).
#[derive(Debug)]
pub struct DelayedDispatch {
    handle: JoinHandle<CounterState>,
    amount: i64,
    deadline: Instant,
}

impl DelayedDispatch {
    /// Amount that will be added when the dispatch fires
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Instant at which the dispatch fires
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Whether the dispatch has fired (or was cancelled)
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Cancel the dispatch if it has not fired yet
    ///
    /// Has no effect once the action has been dispatched.
    pub fn cancel(&self) {
        debug!("Cancelling delayed increment of {}", self.amount);
        self.handle.abort();
    }

    /// Wait for the dispatch and return the state it committed
    ///
    /// # Returns
    ///
    /// - `Ok(CounterState)`: The state committed by the delayed dispatch
    /// - `Err(Error::Task)`: The dispatch was cancelled or its task panicked
    pub async fn wait(self) -> Result<CounterState> {
        self.handle.await.map_err(|e| {
            if e.is_cancelled() {
                Error::task(format!("delayed increment of {} was cancelled", self.amount))
            } else {
                Error::task(e.to_string())
            }
        })
    }
}

/// Dispatch `IncrementByAmount(amount)` after [`INCREMENT_DELAY`]
///
/// Returns immediately. Must be called from within a tokio runtime.
pub fn increment_async(store: &CounterStore, amount: i64) -> DelayedDispatch {
    increment_after(store, amount, INCREMENT_DELAY)
}

/// Dispatch `IncrementByAmount(amount)` after `delay`
///
/// The delay is measured from the moment this function is called.
pub fn increment_after(store: &CounterStore, amount: i64, delay: Duration) -> DelayedDispatch {
    let store = store.clone();
    let deadline = Instant::now() + delay;

    debug!("Scheduling increment of {} in {:?}", amount, delay);

    let handle = tokio::spawn(async move {
        tokio::time::sleep_until(deadline).await;
        store.dispatch(Action::increment_by_amount(amount))
    });

    DelayedDispatch {
        handle,
        amount,
        deadline,
    }
}

/// Look up the current IP and store it
///
/// `_amount` is accepted for call-site compatibility and ignored.
///
/// # Returns
///
/// - `Ok(CounterState)`: The state committed by `UpdateIpAddress`
/// - `Err(Error)`: The lookup failed; the store is left untouched
pub async fn async_request<L>(store: &CounterStore, lookup: &L, _amount: i64) -> Result<CounterState>
where
    L: IpLookup + ?Sized,
{
    let ip = match lookup.lookup().await {
        Ok(ip) => ip,
        Err(e) => {
            warn!("IP lookup via {} failed: {}", lookup.name(), e);
            return Err(e);
        }
    };

    info!("IP lookup via {} returned {}", lookup.name(), ip);
    Ok(store.dispatch(Action::update_ip_address(ip)))
}
