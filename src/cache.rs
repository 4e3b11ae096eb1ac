//! Session-wide snapshot of the most recently fetched merged options
//!
//! The cache is an explicitly owned handle shared between the regeneration
//! coordinator (the only writer) and the declaration template (the only
//! reader). Renders always read the latest stored snapshot.

use crate::infer::MergedOptions;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
struct CacheState {
    snapshot: Option<Arc<MergedOptions>>,
    revision: u64,
}

/// Cloneable handle to the cached merged options snapshot
#[derive(Debug, Clone, Default)]
pub struct SnapshotCache {
    inner: Arc<RwLock<CacheState>>,
}

impl SnapshotCache {
    /// Creates an unset cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the cached snapshot and returns the new revision
    pub fn store(&self, options: MergedOptions) -> u64 {
        let mut state = self.write();
        state.snapshot = Some(Arc::new(options));
        state.revision += 1;
        state.revision
    }

    /// Most recently stored snapshot, if any
    pub fn latest(&self) -> Option<Arc<MergedOptions>> {
        self.read().snapshot.clone()
    }

    /// Number of successful stores so far (0 while unset)
    pub fn revision(&self) -> u64 {
        self.read().revision
    }

    pub fn is_empty(&self) -> bool {
        self.read().snapshot.is_none()
    }

    // A panicking writer cannot leave a half-written snapshot behind, so the
    // poisoned state is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, CacheState> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, CacheState> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infer::MessageTree;

    #[test]
    fn test_starts_unset() {
        let cache = SnapshotCache::new();
        assert!(cache.is_empty());
        assert!(cache.latest().is_none());
        assert_eq!(cache.revision(), 0);
    }

    #[test]
    fn test_store_replaces_wholesale() {
        let cache = SnapshotCache::new();
        let first = MergedOptions::with_messages(MessageTree::object([("a", MessageTree::string("1"))]));
        let second = MergedOptions::with_messages(MessageTree::object([("b", MessageTree::string("2"))]));

        assert_eq!(cache.store(first), 1);
        assert_eq!(cache.store(second.clone()), 2);
        assert_eq!(cache.latest().as_deref(), Some(&second));
    }

    #[test]
    fn test_clones_share_state() {
        let cache = SnapshotCache::new();
        let reader = cache.clone();
        cache.store(MergedOptions::default());
        assert!(!reader.is_empty());
        assert_eq!(reader.revision(), 1);
    }
}
