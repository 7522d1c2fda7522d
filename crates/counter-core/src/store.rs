// # Counter Store
//
// In-memory container for `CounterState`.
//
// ## Dispatch
//
// All writes go through `dispatch`, which applies `reduce` to the current
// snapshot and replaces it wholesale. The read-reduce-replace step runs
// under the watch channel's lock, so concurrent dispatches never lose an
// update and each action is atomic with respect to the others.
//
// ## Lifetime
//
// The store is a cheap cloneable handle. State lives as long as any handle
// does; there is no global instance and no teardown step.

use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::watch;
use tokio_stream::Stream;
use tokio_stream::wrappers::WatchStream;
use tracing::debug;

use crate::action::{Action, reduce};
use crate::state::{self, CounterState};

/// In-memory counter store
///
/// # Example
///
/// ```rust
/// use counter_core::{Action, CounterStore};
///
/// let store = CounterStore::new();
/// store.dispatch(Action::increment());
/// store.dispatch(Action::increment_by_amount(4));
///
/// assert_eq!(store.select_count(), 5);
/// assert_eq!(store.select_ip(), "");
/// ```
#[derive(Debug, Clone)]
pub struct CounterStore {
    inner: Arc<watch::Sender<CounterState>>,
}

impl CounterStore {
    /// Create a store holding the initial state
    pub fn new() -> Self {
        Self::with_state(CounterState::new())
    }

    /// Create a store seeded with a given state
    pub fn with_state(initial: CounterState) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            inner: Arc::new(tx),
        }
    }

    /// Apply an action and return the committed state
    pub fn dispatch(&self, action: Action) -> CounterState {
        let mut committed = CounterState::default();
        self.inner.send_modify(|current| {
            let next = reduce(current, &action);
            committed = next.clone();
            *current = next;
        });

        debug!(
            "Dispatched {} -> value={}, ip_address={:?}",
            action.name(),
            committed.value,
            committed.ip_address
        );

        committed
    }

    /// Snapshot of the latest committed state
    pub fn state(&self) -> CounterState {
        self.inner.borrow().clone()
    }

    /// Counter value of the latest committed state
    pub fn select_count(&self) -> i64 {
        state::select_count(&self.inner.borrow())
    }

    /// IP address of the latest committed state
    pub fn select_ip(&self) -> String {
        state::select_ip(&self.inner.borrow()).to_string()
    }

    /// Watch committed snapshots
    ///
    /// The stream yields the current snapshot first, then each newly
    /// committed one. A slow consumer only sees the latest snapshot, so
    /// intermediate states may be skipped.
    pub fn watch(&self) -> Pin<Box<dyn Stream<Item = CounterState> + Send + 'static>> {
        Box::pin(WatchStream::new(self.inner.subscribe()))
    }
}

impl Default for CounterStore {
    fn default() -> Self {
        Self::new()
    }
}
