//! # Per-Vessel Recompute Serialization
//!
//! Two landings for the same vessel submitted concurrently would trigger
//! two overlapping recomputes, each reading a slightly different landing
//! set and upserting windows under the same keys — last writer wins,
//! non-deterministically. `VesselLocks` closes that race: the calculator
//! holds the vessel's lock across its whole read-compute-write section.
//!
//! Locks are created on first use and kept for the life of the registry.
//! The registry map itself is only locked long enough to clone out the
//! per-vessel handle, so recomputes for different vessels never contend.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use tem_core::VesselId;

/// Registry of one mutex per vessel.
#[derive(Default)]
pub struct VesselLocks {
    inner: Mutex<HashMap<VesselId, Arc<Mutex<()>>>>,
}

impl VesselLocks {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The lock handle for `vessel_id`, creating it on first use.
    pub fn lock_for(&self, vessel_id: &VesselId) -> Arc<Mutex<()>> {
        let mut map = self.inner.lock();
        Arc::clone(
            map.entry(vessel_id.clone())
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_same_vessel_same_lock() {
        let locks = VesselLocks::new();
        let id = VesselId::new();
        let a = locks.lock_for(&id);
        let b = locks.lock_for(&id);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_different_vessels_different_locks() {
        let locks = VesselLocks::new();
        let a = locks.lock_for(&VesselId::new());
        let b = locks.lock_for(&VesselId::new());
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_lock_serializes_critical_sections() {
        let locks = Arc::new(VesselLocks::new());
        let id = VesselId::new();
        let counter = Arc::new(Mutex::new(0u32));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let locks = Arc::clone(&locks);
                let id = id.clone();
                let counter = Arc::clone(&counter);
                thread::spawn(move || {
                    let lock = locks.lock_for(&id);
                    let _guard = lock.lock();
                    // Non-atomic read-modify-write; only safe under the lock.
                    let current = *counter.lock();
                    thread::yield_now();
                    *counter.lock() = current + 1;
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(*counter.lock(), 8);
    }
}
