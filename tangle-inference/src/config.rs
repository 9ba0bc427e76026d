//! Inference configuration: every behavioral switch is an explicit value
//! handed to the engine, never process-wide state.

use serde::{Deserialize, Serialize};

/// How unshielded triples are scored into colliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColliderMode {
    /// Orient only when no recorded separating set contains the middle node.
    #[default]
    Conservative,
    /// Orient when at most half of the recorded separating sets contain the
    /// middle node (ties orient).
    Majority,
    /// Consult only the first recorded separating set.
    FirstSepSet,
}

/// Link-processing order options for the star search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StarOptions {
    /// Shuffle links uniformly instead of ranking by remaining strength.
    pub random_link_order: bool,
    /// Seed for the shuffle. When absent the seed is drawn from system time,
    /// making the ordering non-reproducible.
    pub shuffle_seed: Option<u64>,
}

/// Skeleton search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchStrategy {
    /// Depth-sized subsets of each endpoint's other neighbors, both sides.
    #[default]
    Exhaustive,
    /// Candidates restricted to nodes on short connecting paths between the
    /// endpoints, links processed weakest first.
    Star(StarOptions),
}

/// Configuration for a discovery run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PcConfig {
    /// Largest conditioning-set size tried by skeleton inference.
    pub max_cond_set_size: usize,
    /// Defer removals decided within a depth to the end of that depth, so
    /// decisions never observe a partially pruned neighborhood.
    pub stable: bool,
    /// Collider scoring mode.
    pub collider_mode: ColliderMode,
    /// Permit the transitivity rules R2/R3, which are only sound when the
    /// underlying structure is assumed acyclic.
    pub acyclicity: bool,
    /// At depths above 2, first test each pair against the union of both
    /// endpoints' neighbors and mark survivors undeletable. A heuristic
    /// cutoff, not a soundness guarantee; disable to search exhaustively.
    pub upper_bound_shortcut: bool,
    /// Skeleton search strategy.
    pub search: SearchStrategy,
}

impl Default for PcConfig {
    fn default() -> Self {
        Self {
            max_cond_set_size: 8,
            stable: true,
            collider_mode: ColliderMode::Conservative,
            acyclicity: true,
            upper_bound_shortcut: true,
            search: SearchStrategy::Exhaustive,
        }
    }
}
