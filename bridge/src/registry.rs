//! Handle registry for native codec instances.
//!
//! Replaces the raw-pointer-as-integer convention with an arena: callers
//! hold opaque integer handles, the registry owns the instances, and every
//! operation goes through a validated lookup. Handles are allocated from a
//! monotonic counter, so zero is never issued and a retired value is never
//! re-issued for a different instance — a stale handle can only miss.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};

/// Opaque reference to a registered instance.
pub type Handle = u64;

/// The null sentinel. Never refers to a live instance.
pub const NULL_HANDLE: Handle = 0;

pub(crate) struct Registry<T> {
    next: AtomicU64,
    entries: RwLock<HashMap<Handle, Arc<Mutex<T>>>>,
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Registers an instance and returns its handle.
    pub fn insert(&self, value: T) -> Handle {
        let handle = self.next.fetch_add(1, Ordering::Relaxed);
        self.entries.write().insert(handle, Arc::new(Mutex::new(value)));
        handle
    }

    /// Looks up a live instance. The returned clone keeps the instance
    /// alive for the duration of the call even if it is removed
    /// concurrently.
    pub fn get(&self, handle: Handle) -> Option<Arc<Mutex<T>>> {
        self.entries.read().get(&handle).cloned()
    }

    /// Retires a handle. The instance is dropped once the last outstanding
    /// reference goes away.
    pub fn remove(&self, handle: Handle) -> Option<Arc<Mutex<T>>> {
        self.entries.write().remove(&handle)
    }

    /// Number of live instances.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_insert_returns_nonzero_distinct_handles() {
        let registry = Registry::new();
        let a = registry.insert(1u32);
        let b = registry.insert(2u32);
        assert_ne!(a, NULL_HANDLE);
        assert_ne!(b, NULL_HANDLE);
        assert_ne!(a, b);
    }

    #[test]
    fn test_get_null_handle_misses() {
        let registry = Registry::<u32>::new();
        assert!(registry.get(NULL_HANDLE).is_none());
    }

    #[test]
    fn test_get_unknown_handle_misses() {
        let registry = Registry::<u32>::new();
        assert!(registry.get(42).is_none());
    }

    #[test]
    fn test_get_returns_inserted_value() {
        let registry = Registry::new();
        let handle = registry.insert(7u32);
        let entry = registry.get(handle).unwrap();
        assert_eq!(*entry.lock(), 7);
    }

    #[test]
    fn test_remove_retires_exactly_once() {
        let registry = Registry::new();
        let handle = registry.insert(7u32);
        assert!(registry.remove(handle).is_some());
        assert!(registry.remove(handle).is_none());
        assert!(registry.get(handle).is_none());
    }

    #[test]
    fn test_handle_values_never_reused() {
        let registry = Registry::new();
        let a = registry.insert(1u32);
        registry.remove(a);
        let b = registry.insert(2u32);
        assert_ne!(a, b);
    }

    #[test]
    fn test_len_tracks_live_instances() {
        let registry = Registry::new();
        assert_eq!(registry.len(), 0);
        let a = registry.insert(1u32);
        let b = registry.insert(2u32);
        assert_eq!(registry.len(), 2);
        registry.remove(a);
        assert_eq!(registry.len(), 1);
        registry.remove(b);
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_entry_outlives_concurrent_remove() {
        let registry = Registry::new();
        let handle = registry.insert(7u32);
        let entry = registry.get(handle).unwrap();
        registry.remove(handle);
        // The cloned Arc still reaches the value after retirement.
        assert_eq!(*entry.lock(), 7);
    }

    #[test]
    fn test_concurrent_inserts_stay_distinct() {
        let registry = Arc::new(Registry::new());
        let mut joins = Vec::new();
        for t in 0..4 {
            let registry = Arc::clone(&registry);
            joins.push(thread::spawn(move || {
                (0..100).map(|i| registry.insert(t * 100 + i)).collect::<Vec<_>>()
            }));
        }
        let mut all: Vec<Handle> = joins
            .into_iter()
            .flat_map(|j| j.join().unwrap())
            .collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 400);
        assert_eq!(registry.len(), 400);
    }
}
