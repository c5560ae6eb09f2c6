//! Recursion guard for on-demand type resolution.
//!
//! Resolving a type first resolves its declaring type, base types and the
//! types of implemented interface members. The host type system makes that
//! dependency graph acyclic; the guard turns a violation (a malformed graph)
//! into a reported denial instead of unbounded recursion.

use rustc_hash::FxHashSet;
use std::hash::Hash;

/// Result of attempting to enter a guarded computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionResult {
    Entered,
    /// The key is already being visited.
    Cycle,
    DepthExceeded,
}

impl RecursionResult {
    #[inline]
    pub fn is_entered(self) -> bool {
        matches!(self, Self::Entered)
    }

    #[cfg(test)]
    pub(crate) fn is_denied(self) -> bool {
        !self.is_entered()
    }
}

/// Tracks the keys currently being resolved and the nesting depth.
///
/// Every successful [`enter`](Self::enter) must be paired with one
/// [`leave`](Self::leave) for the same key.
#[derive(Debug)]
pub struct RecursionGuard<K: Hash + Eq + Copy> {
    visiting: FxHashSet<K>,
    depth: u32,
    max_depth: u32,
}

impl<K: Hash + Eq + Copy> RecursionGuard<K> {
    pub fn new(max_depth: u32) -> Self {
        Self {
            visiting: FxHashSet::default(),
            depth: 0,
            max_depth,
        }
    }

    pub fn enter(&mut self, key: K) -> RecursionResult {
        if self.depth >= self.max_depth {
            return RecursionResult::DepthExceeded;
        }
        if !self.visiting.insert(key) {
            return RecursionResult::Cycle;
        }
        self.depth += 1;
        RecursionResult::Entered
    }

    pub fn leave(&mut self, key: K) {
        let was_present = self.visiting.remove(&key);
        debug_assert!(
            was_present,
            "RecursionGuard::leave() called with a key that is not in the visiting set"
        );
        self.depth = self.depth.saturating_sub(1);
    }

    #[cfg(test)]
    pub(crate) fn is_visiting(&self, key: &K) -> bool {
        self.visiting.contains(key)
    }

    #[cfg(test)]
    pub(crate) fn depth(&self) -> u32 {
        self.depth
    }
}
