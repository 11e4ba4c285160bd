//! Per-name async locks.
//!
//! Serializes the read-check-write sequence for one member within this
//! process. Entries are removed once nobody holds or waits on them.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::OwnedMutexGuard;

struct Entry {
    lock: Arc<tokio::sync::Mutex<()>>,
    /// Holder plus waiters, including waiters whose future is still pending.
    users: usize,
}

#[derive(Default)]
pub(crate) struct NameLocks {
    inner: Mutex<HashMap<String, Entry>>,
}

impl NameLocks {
    fn map(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) async fn acquire(&self, name: &str) -> NameGuard<'_> {
        let lock = {
            let mut map = self.map();
            let entry = map.entry(name.to_owned()).or_insert_with(|| Entry {
                lock: Arc::default(),
                users: 0,
            });
            entry.users += 1;
            Arc::clone(&entry.lock)
        };
        // Registered before the first await so a cancelled waiter still
        // releases its slot.
        let lease = Lease { locks: self, name: name.to_owned() };
        let guard = lock.lock_owned().await;
        NameGuard { _guard: guard, _lease: lease }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.map().len()
    }
}

struct Lease<'a> {
    locks: &'a NameLocks,
    name: String,
}

impl Drop for Lease<'_> {
    fn drop(&mut self) {
        let mut map = self.locks.map();
        let idle = map.get_mut(&self.name).is_some_and(|entry| {
            entry.users = entry.users.saturating_sub(1);
            entry.users == 0
        });
        if idle {
            map.remove(&self.name);
        }
    }
}

/// Held for the duration of one claim. Fields drop in order, so the mutex is
/// released before the lease.
pub(crate) struct NameGuard<'a> {
    _guard: OwnedMutexGuard<()>,
    _lease: Lease<'a>,
}
