//! Title size cache.
//!
//! Text measurement is the expensive part of title-cell sizing, so computed
//! sizes are memoized. Entries are keyed by stable [`ChildId`] identity, not
//! by position: removing an earlier child shifts later positions but leaves
//! their cached sizes valid.

use std::collections::HashMap;

use crate::child::ChildId;

/// A measured title-cell size in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSize {
    pub width: u16,
    pub height: u16,
}

impl CellSize {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Memoized title-cell sizes, one entry per child.
#[derive(Debug, Default)]
pub struct TitleSizeCache {
    sizes: HashMap<ChildId, CellSize>,
}

impl TitleSizeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached size for a child, if any.
    pub fn get(&self, id: ChildId) -> Option<CellSize> {
        self.sizes.get(&id).copied()
    }

    /// Store a measured size.
    pub fn insert(&mut self, id: ChildId, size: CellSize) {
        self.sizes.insert(id, size);
    }

    /// Drop a single entry (title refresh or child removal).
    pub fn invalidate(&mut self, id: ChildId) {
        self.sizes.remove(&id);
    }

    /// Drop everything (options replacement, full reload).
    pub fn clear(&mut self) {
        self.sizes.clear();
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}
