//! Finite distributions over chain states.

use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::state::State;

/// A finite mapping from state to probability.
///
/// Keys are unique and iterate in ascending order. The type does not enforce
/// any probabilistic invariant; validation lives in the checking crate so that
/// malformed candidates can still be represented and reported on.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution<S: State> {
    probs: BTreeMap<S, f64>,
}

impl<S: State> Distribution<S> {
    /// Creates an empty distribution.
    pub fn new() -> Self {
        Self {
            probs: BTreeMap::new(),
        }
    }

    /// Sets the probability of `state`, returning the previous value if any.
    pub fn insert(&mut self, state: S, prob: f64) -> Option<f64> {
        self.probs.insert(state, prob)
    }

    /// Returns the probability of `state`, or `None` outside the support.
    pub fn get(&self, state: &S) -> Option<f64> {
        self.probs.get(state).copied()
    }

    /// Returns `true` if `state` is a key of this distribution.
    ///
    /// A key mapped to `0.0` is still contained.
    pub fn contains(&self, state: &S) -> bool {
        self.probs.contains_key(state)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.probs.len()
    }

    /// Returns `true` if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    /// Iterates over `(state, probability)` pairs in state order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, f64)> {
        self.probs.iter().map(|(s, &p)| (s, p))
    }

    /// Iterates over the keys in state order.
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.probs.keys()
    }

    /// Sum of all values.
    pub fn total(&self) -> f64 {
        self.probs.values().sum()
    }
}

impl<S: State> Default for Distribution<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> FromIterator<(S, f64)> for Distribution<S> {
    /// Later entries for the same state overwrite earlier ones.
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            probs: iter.into_iter().collect(),
        }
    }
}

impl<S: State> IntoIterator for Distribution<S> {
    type Item = (S, f64);
    type IntoIter = btree_map::IntoIter<S, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.probs.into_iter()
    }
}
