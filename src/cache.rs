use ahash::AHashMap;
use parking_lot::RwLock;

use crate::model::LineageDirection;

/// Cache of direct neighbor ids, keyed by dataset id and lookup direction.
/// Cleared wholesale whenever an edge or dataset mutation commits.
#[derive(Default)]
pub struct NeighborCache {
    inner: RwLock<AHashMap<(LineageDirection, i64), Vec<i64>>>,
}

impl NeighborCache {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(AHashMap::new()),
        }
    }

    pub fn get(&self, direction: LineageDirection, id: i64) -> Option<Vec<i64>> {
        self.inner.read().get(&(direction, id)).cloned()
    }

    pub fn insert(&self, direction: LineageDirection, id: i64, neighbors: Vec<i64>) {
        self.inner.write().insert((direction, id), neighbors);
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }
}
