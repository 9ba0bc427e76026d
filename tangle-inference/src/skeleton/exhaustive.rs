//! Exhaustive-neighbor skeleton search (the classic PC schedule).

use std::collections::BTreeSet;

use tangle_core::errors::GraphError;
use tangle_core::graph::PagGraph;
use tangle_core::sepsets::SepSetRegistry;
use tracing::{debug, info, warn};

use super::{subsets_of_size, test_candidates};
use crate::config::PcConfig;
use crate::oracle::IndependenceOracle;

pub(crate) fn run_skeleton<O: IndependenceOracle>(
    graph: &mut PagGraph,
    oracle: &mut O,
    config: &PcConfig,
) -> Result<SepSetRegistry, GraphError> {
    let mut sep_sets = SepSetRegistry::new();

    for depth in 0..=config.max_cond_set_size {
        let mut links = graph.list_all_deletable_links();
        info!(depth, links = links.len(), "proceeding to next separating set size");
        if links.is_empty() {
            info!("skeleton inference is finished");
            break;
        }

        if depth > 2 && config.upper_bound_shortcut {
            upper_bound_pass(graph, oracle, &links)?;
            links = graph.list_all_deletable_links();
        }

        // Removals decided within this depth (deferred in stable mode).
        let mut links_to_remove = Vec::new();

        for &(x, y) in &links {
            let preset = graph.has_preset_link(x, y);
            let mut min_statistic = if depth > 0 {
                graph.remaining_link_strength(x, y)
            } else {
                1.0
            };
            let mut found = false;

            for side in [x, y] {
                let other = if side == x { y } else { x };
                let pool: Vec<usize> = graph
                    .neighbors(side)
                    .into_iter()
                    .filter(|&n| n != other)
                    .collect();
                let candidates = subsets_of_size(&pool, depth);
                debug!(
                    x = graph.var_name(x),
                    y = graph.var_name(y),
                    side = graph.var_name(side),
                    pool = pool.len(),
                    candidates = candidates.len(),
                    preset,
                    "separating set candidates"
                );
                let outcome = test_candidates(
                    graph,
                    oracle,
                    &mut sep_sets,
                    x,
                    y,
                    preset,
                    &candidates,
                    min_statistic,
                );
                min_statistic = outcome.min_statistic;
                found |= outcome.found_sep_set;
            }

            if found {
                oracle.register_sep_sets(x, y, sep_sets.get(x, y));
                if config.stable {
                    links_to_remove.push((x, y));
                } else {
                    graph.remove_link(x, y)?;
                }
            } else {
                let strength = if preset { 1.0 } else { min_statistic };
                graph.set_remaining_link_strength(x, y, strength)?;
            }
        }

        for (x, y) in links_to_remove {
            graph.remove_link(x, y)?;
        }
    }

    oracle.display_diagnostics();
    Ok(sep_sets)
}

/// Upper-bound shortcut: a pair that stays dependent even when conditioning
/// on the union of both neighborhoods is assumed inseparable and taken out
/// of the iteration. A heuristic cutoff, not a proof.
fn upper_bound_pass<O: IndependenceOracle>(
    graph: &mut PagGraph,
    oracle: &O,
    links: &[(usize, usize)],
) -> Result<(), GraphError> {
    for &(x, y) in links {
        let mut conditioning: BTreeSet<usize> = graph
            .neighbors(x)
            .into_iter()
            .chain(graph.neighbors(y))
            .collect();
        conditioning.remove(&x);
        conditioning.remove(&y);

        let statistic = oracle.statistic(x, y, &conditioning);
        if !statistic.is_finite() {
            warn!(
                x = graph.var_name(x),
                y = graph.var_name(y),
                statistic,
                "oracle returned a non-finite statistic in upper-bound check, keeping the edge"
            );
            if graph.has_preset_link(x, y) {
                graph.set_undeletable_link(x, y, true)?;
            }
            continue;
        }

        if graph.has_preset_link(x, y) {
            graph.set_undeletable_link(x, y, true)?;
            graph.set_remaining_link_strength(x, y, statistic.max(0.2))?;
            continue;
        }

        if oracle.independent(statistic, x, y, &conditioning) {
            debug!(
                x = graph.var_name(x),
                y = graph.var_name(y),
                statistic,
                "pair separable when conditioning on all connecting neighbors, stays in iteration"
            );
        } else {
            info!(
                x = graph.var_name(x),
                y = graph.var_name(y),
                statistic,
                "found undeletable link"
            );
            graph.set_undeletable_link(x, y, true)?;
            graph.set_remaining_link_strength(x, y, statistic)?;
        }
    }
    Ok(())
}
