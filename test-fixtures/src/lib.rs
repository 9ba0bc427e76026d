//! Shared fixtures for tangle integration tests: scripted and synthetic
//! independence oracles plus small naming helpers.

use std::collections::{BTreeMap, BTreeSet};

use tangle_core::graph::PagGraph;
use tangle_inference::IndependenceOracle;

/// Variable names `A`, `B`, `C`, ... for small test graphs.
pub fn alpha_names(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            char::from_u32('A' as u32 + i as u32)
                .expect("fixture graphs stay within the alphabet")
                .to_string()
        })
        .collect()
}

/// A fully connected graph over `n` alphabet-named variables.
pub fn complete_graph(n: usize) -> PagGraph {
    PagGraph::new(alpha_names(n), true).expect("alphabet names are valid")
}

/// An oracle scripted with explicit independence facts. Everything not
/// declared independent tests dependent with `default_statistic`.
#[derive(Debug, Clone)]
pub struct ScriptedOracle {
    default_statistic: f64,
    facts: BTreeMap<(usize, usize), Vec<(BTreeSet<usize>, f64)>>,
    depth_limits: BTreeMap<(usize, usize), usize>,
    /// Every `register_sep_sets` call received, for assertions.
    pub registered: Vec<(usize, usize, Vec<BTreeSet<usize>>)>,
}

impl ScriptedOracle {
    pub fn new(default_statistic: f64) -> Self {
        Self {
            default_statistic,
            facts: BTreeMap::new(),
            depth_limits: BTreeMap::new(),
            registered: Vec::new(),
        }
    }

    /// Declare `x ⟂ y | z` with the given statistic (recorded under both
    /// pair orders).
    pub fn declare_independent(
        &mut self,
        x: usize,
        y: usize,
        z: impl IntoIterator<Item = usize>,
        statistic: f64,
    ) {
        let set: BTreeSet<usize> = z.into_iter().collect();
        self.facts
            .entry((x, y))
            .or_default()
            .push((set.clone(), statistic));
        self.facts.entry((y, x)).or_default().push((set, statistic));
    }

    /// Declare that conditioning sets larger than `depth` are meaningless
    /// for the pair (early-stop hint consumed by the star search).
    pub fn limit_cond_set_size(&mut self, x: usize, y: usize, depth: usize) {
        self.depth_limits.insert((x, y), depth);
        self.depth_limits.insert((y, x), depth);
    }

    fn fact(&self, x: usize, y: usize, z: &BTreeSet<usize>) -> Option<f64> {
        self.facts
            .get(&(x, y))
            .and_then(|sets| sets.iter().find(|(set, _)| set == z))
            .map(|&(_, statistic)| statistic)
    }
}

impl IndependenceOracle for ScriptedOracle {
    fn statistic(&self, x: usize, y: usize, z: &BTreeSet<usize>) -> f64 {
        self.fact(x, y, z).unwrap_or(self.default_statistic)
    }

    fn independent(&self, _statistic: f64, x: usize, y: usize, z: &BTreeSet<usize>) -> bool {
        self.fact(x, y, z).is_some()
    }

    fn register_sep_sets(&mut self, x: usize, y: usize, sets: &[BTreeSet<usize>]) {
        self.registered.push((x, y, sets.to_vec()));
    }

    fn max_cond_set_size_reached(&self, x: usize, y: usize, depth: usize) -> bool {
        self.depth_limits
            .get(&(x, y))
            .is_some_and(|&limit| depth >= limit)
    }
}

/// A deterministic pseudo-random oracle: the statistic is a hash of the
/// query in `[0, 1)`, independence is `statistic < alpha`. Useful for
/// property tests that need varied but reproducible decisions.
#[derive(Debug, Clone, Copy)]
pub struct SyntheticOracle {
    pub seed: u64,
    pub alpha: f64,
}

impl SyntheticOracle {
    pub fn new(seed: u64, alpha: f64) -> Self {
        Self { seed, alpha }
    }

    fn mix(mut state: u64) -> u64 {
        state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        state = (state ^ (state >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        state = (state ^ (state >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        state ^ (state >> 31)
    }
}

impl IndependenceOracle for SyntheticOracle {
    fn statistic(&self, x: usize, y: usize, z: &BTreeSet<usize>) -> f64 {
        // Symmetric in the pair, order-insensitive in the conditioning set.
        let (lo, hi) = (x.min(y) as u64, x.max(y) as u64);
        let mut state = Self::mix(self.seed ^ (lo << 32) ^ hi);
        for &var in z {
            state = Self::mix(state ^ (var as u64).wrapping_mul(0xA24B_AED4_963E_E407));
        }
        (state >> 11) as f64 / (1u64 << 53) as f64
    }

    fn independent(&self, statistic: f64, _x: usize, _y: usize, _z: &BTreeSet<usize>) -> bool {
        statistic < self.alpha
    }
}
