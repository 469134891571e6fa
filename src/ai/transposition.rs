//! Transposition table for caching search results within one game session.
//!
//! Entries are keyed by the full board contents. Whose turn it is follows from
//! the disk count, so the board alone identifies a position.

use std::collections::HashMap;

use crate::game::BoardKey;

/// How a stored value relates to the true value of the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// The search completed inside its window with a nonzero result.
    Exact,
    /// A beta cutoff happened; the true value is at least the stored one.
    LowerBound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtEntry {
    /// Absolute move-count horizon of the search that produced the entry.
    pub depth: usize,
    pub kind: EntryKind,
    pub value: i32,
}

#[derive(Debug, Clone, Default)]
pub struct TranspositionTable {
    entries: HashMap<BoardKey, TtEntry>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn probe(&self, key: BoardKey) -> Option<TtEntry> {
        self.entries.get(&key).copied()
    }

    /// Store an entry, replacing whatever the position held before.
    pub fn store(&mut self, key: BoardKey, depth: usize, kind: EntryKind, value: i32) {
        self.entries.insert(key, TtEntry { depth, kind, value });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
