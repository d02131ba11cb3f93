//! Global ordering of room mutations.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

/// Serializes "mutate state, then enqueue fan-out" steps.
///
/// Every mutating use case holds the guard across both steps, so all
/// connections observe events in one global order. Enqueueing never waits
/// on a peer, so the guard is never held across network I/O.
#[derive(Clone, Default)]
pub struct RelaySequencer {
    inner: Arc<Mutex<()>>,
}

impl RelaySequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.inner.lock().await
    }
}
