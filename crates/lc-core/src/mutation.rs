//! Reentrancy guard for user-initiated writes.

use std::collections::HashSet;
use std::hash::Hash;

/// Set of logical actions currently awaiting the backend.
///
/// A key stays busy from `try_begin` until `finish`; a second `try_begin`
/// for the same key is refused so no second request is built. Other keys are
/// unaffected, which lets one table row be busy while the rest stay usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InFlight<K: Eq + Hash> {
    busy: HashSet<K>,
}

impl<K: Eq + Hash> Default for InFlight<K> {
    fn default() -> Self {
        Self {
            busy: HashSet::new(),
        }
    }
}

impl<K: Eq + Hash> InFlight<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `key` busy. Returns `false` if it already was.
    pub fn try_begin(&mut self, key: K) -> bool {
        self.busy.insert(key)
    }

    pub fn finish(&mut self, key: &K) {
        self.busy.remove(key);
    }

    pub fn is_busy(&self, key: &K) -> bool {
        self.busy.contains(key)
    }

    pub fn any(&self) -> bool {
        !self.busy.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_begin_is_refused_until_finish() {
        let mut guard = InFlight::new();
        assert!(guard.try_begin(5));
        assert!(!guard.try_begin(5));
        assert!(guard.is_busy(&5));
        guard.finish(&5);
        assert!(!guard.is_busy(&5));
        assert!(guard.try_begin(5));
    }

    #[test]
    fn keys_are_independent() {
        let mut guard = InFlight::new();
        assert!(guard.try_begin(1));
        assert!(guard.try_begin(2));
        guard.finish(&1);
        assert!(guard.is_busy(&2));
        assert!(guard.any());
    }
}
