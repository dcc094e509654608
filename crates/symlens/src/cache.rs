//! The type identity cache.
//!
//! Maps interned host type descriptors to small stable integer IDs that
//! can travel over a wire protocol, and back. The cache is the only
//! mutable state in the snapshot layer; its lifecycle is tied to the
//! host's type universe and it must be `reset` whenever that universe is
//! invalidated (e.g. after a recompilation), since stale IDs would
//! otherwise resolve to wrong or missing descriptors.

use std::sync::Mutex;

use rustc_hash::FxHashMap;
use symlens_host::TypeRef;
use tracing::debug;

/// The ID carried by every sentinel ("NA") type snapshot.
pub const NIL_TYPE_ID: i32 = -1;

#[derive(Debug, Default)]
struct CacheInner {
    by_type: FxHashMap<TypeRef, i32>,
    by_id: FxHashMap<i32, TypeRef>,
    next_id: i32,
}

/// Bidirectional map between type descriptors and snapshot IDs.
///
/// IDs start at 1, grow monotonically, and are never reused within one
/// cache generation. The forward and reverse maps are exact inverses:
/// no ID is ever assigned to two descriptors and no descriptor ever
/// receives two IDs. A single mutex guards check-then-allocate so the
/// invariant holds under concurrent queries.
#[derive(Debug)]
pub struct TypeIdCache {
    inner: Mutex<CacheInner>,
}

impl TypeIdCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                by_type: FxHashMap::default(),
                by_id: FxHashMap::default(),
                next_id: 1,
            }),
        }
    }

    /// The ID for a descriptor, allocating the next one on first sight.
    ///
    /// The "no type" sentinel gets [`NIL_TYPE_ID`] without touching the
    /// maps.
    pub fn id_for(&self, t: TypeRef) -> i32 {
        if t.is_none() {
            return NIL_TYPE_ID;
        }
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(&id) = inner.by_type.get(&t) {
            return id;
        }
        let id = inner.next_id;
        inner.next_id += 1;
        inner.by_type.insert(t, id);
        inner.by_id.insert(id, t);
        id
    }

    /// The descriptor previously assigned this ID, if any.
    pub fn lookup(&self, id: i32) -> Option<TypeRef> {
        let inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        inner.by_id.get(&id).copied()
    }

    /// Drop all assignments and start a new generation.
    ///
    /// Descriptors seen before may receive different IDs afterwards.
    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        debug!(entries = inner.by_type.len(), "resetting type id cache");
        inner.by_type.clear();
        inner.by_id.clear();
        inner.next_id = 1;
    }

    /// Number of descriptors currently cached.
    pub fn len(&self) -> usize {
        let inner = self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        inner.by_type.len()
    }

    /// Whether the cache holds no assignments.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TypeIdCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../tests/cache_tests.rs"]
mod cache_tests;
