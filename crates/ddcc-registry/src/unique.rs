//! Set-backed first-seen predicate.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::hash::Hash;

/// Reports whether a value is being seen for the first time.
///
/// One tracker per domain (IDs, names, addresses); trackers never share
/// state and live for a single validation pass.
#[derive(Debug, Clone)]
pub struct UniqueTracker<T> {
    seen: HashSet<T>,
}

impl<T: Eq + Hash> UniqueTracker<T> {
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
        }
    }

    /// Record `value`, returning `true` only on its first observation.
    pub fn observe<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = T> + ?Sized,
    {
        if self.seen.contains(value) {
            return false;
        }
        self.seen.insert(value.to_owned());
        true
    }

}

impl<T: Eq + Hash> Default for UniqueTracker<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The three independent trackers used by one pass over a registry.
#[derive(Debug, Default)]
pub struct RegistryTrackers {
    pub ids: UniqueTracker<String>,
    pub names: UniqueTracker<String>,
    pub addresses: UniqueTracker<String>,
}
