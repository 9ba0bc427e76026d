//! Skeleton inference: depth-increasing conditioning-set search that prunes
//! the graph and records separating sets.

pub(crate) mod exhaustive;
pub(crate) mod star;
mod subsets;

pub(crate) use subsets::subsets_of_size;

use std::collections::BTreeSet;

use tangle_core::graph::PagGraph;
use tangle_core::sepsets::SepSetRegistry;
use tracing::{debug, warn};

use crate::oracle::IndependenceOracle;

/// Result of testing all candidate conditioning sets for one pair at one
/// depth.
pub(crate) struct PairOutcome {
    pub found_sep_set: bool,
    pub min_statistic: f64,
}

/// Test every candidate set for the pair `(x, y)`, tracking the minimum
/// statistic and recording separating sets (under both pair orders) on each
/// successful independence decision. Preset links are only minimized, never
/// separated.
pub(crate) fn test_candidates<O: IndependenceOracle>(
    graph: &PagGraph,
    oracle: &O,
    sep_sets: &mut SepSetRegistry,
    x: usize,
    y: usize,
    preset: bool,
    candidates: &[BTreeSet<usize>],
    mut min_statistic: f64,
) -> PairOutcome {
    let mut found_sep_set = false;
    for candidate in candidates {
        let statistic = oracle.statistic(x, y, candidate);
        if !statistic.is_finite() {
            warn!(
                x = graph.var_name(x),
                y = graph.var_name(y),
                statistic,
                "oracle returned a non-finite statistic, keeping the edge"
            );
            continue;
        }
        if statistic < min_statistic {
            min_statistic = statistic;
        }
        if !preset && oracle.independent(statistic, x, y, candidate) {
            debug!(
                x = graph.var_name(x),
                y = graph.var_name(y),
                conditioning_set = ?candidate,
                statistic,
                "successful independence test, link can be removed"
            );
            sep_sets.record(x, y, candidate.clone());
            sep_sets.record(y, x, candidate.clone());
            found_sep_set = true;
        }
    }
    PairOutcome {
        found_sep_set,
        min_statistic,
    }
}
