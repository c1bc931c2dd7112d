//! Per-key async gate.
//!
//! Callers holding the same key run one at a time; different keys never wait
//! on each other. Entries are dropped from the map once nobody holds or waits
//! on them, so the map stays bounded by the number of keys currently in flight.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// The key's lock plus the number of callers holding or waiting on it.
struct Slot {
    lock: Arc<AsyncMutex<()>>,
    interested: usize,
}

#[derive(Default)]
pub struct SingleFlight {
    inflight: Mutex<HashMap<i64, Slot>>,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, key: i64) -> SingleFlightGuard<'_> {
        let lock = {
            let mut map = self.inflight.lock().unwrap_or_else(|e| e.into_inner());
            let slot = map.entry(key).or_insert_with(|| Slot {
                lock: Arc::default(),
                interested: 0,
            });
            slot.interested += 1;
            slot.lock.clone()
        };

        // Registered before waiting so a cancelled waiter still deregisters.
        let interest = Interest { owner: self, key };
        let guard = lock.lock_owned().await;

        SingleFlightGuard {
            _guard: guard,
            _interest: interest,
        }
    }

    /// Number of keys currently held or awaited.
    pub fn in_flight(&self) -> usize {
        self.inflight.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

struct Interest<'a> {
    owner: &'a SingleFlight,
    key: i64,
}

impl Drop for Interest<'_> {
    fn drop(&mut self) {
        let mut map = self.owner.inflight.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(slot) = map.get_mut(&self.key) {
            slot.interested -= 1;
            if slot.interested == 0 {
                map.remove(&self.key);
            }
        }
    }
}

/// Fields drop in order: the lock is released before interest is withdrawn.
pub struct SingleFlightGuard<'a> {
    _guard: OwnedMutexGuard<()>,
    _interest: Interest<'a>,
}
