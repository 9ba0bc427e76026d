//! Separating-set registry: the evidence trail justifying edge removals.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Conditioning sets under which ordered variable pairs tested independent.
///
/// Skeleton inference records every successful set under both orders of the
/// pair; orientation consults the entries of unshielded-triple outer pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SepSetRegistry {
    sets: BTreeMap<usize, BTreeMap<usize, Vec<BTreeSet<usize>>>>,
}

impl SepSetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a separating set for the ordered pair `(x, y)`.
    pub fn record(&mut self, x: usize, y: usize, set: BTreeSet<usize>) {
        self.sets.entry(x).or_default().entry(y).or_default().push(set);
    }

    /// All separating sets recorded for the ordered pair `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> &[BTreeSet<usize>] {
        self.sets
            .get(&x)
            .and_then(|m| m.get(&y))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether any set is recorded for the ordered pair.
    pub fn has_entry(&self, x: usize, y: usize) -> bool {
        !self.get(x, y).is_empty()
    }

    /// Insert the singleton empty set for every ordered pair over
    /// `var_count` variables that has no recorded entry. Pairs that were
    /// never linked thereby count as separated by the empty set, which is
    /// what collider scoring expects.
    pub fn fill_defaults(&mut self, var_count: usize) {
        for x in 0..var_count {
            for y in 0..var_count {
                if x != y && !self.has_entry(x, y) {
                    self.record(x, y, BTreeSet::new());
                }
            }
        }
    }

    /// Ordered pairs with at least one recorded set.
    pub fn pairs(&self) -> Vec<(usize, usize)> {
        self.sets
            .iter()
            .flat_map(|(&x, m)| m.keys().map(move |&y| (x, y)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.values().all(|m| m.values().all(Vec::is_empty))
    }
}
