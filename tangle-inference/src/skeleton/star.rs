//! Path-restricted, strength-ranked skeleton search (the star variant).
//!
//! Conditioning-set candidates are drawn only from nodes on short connecting
//! paths between the tested pair, and links are processed weakest first so
//! the least supported edges disappear before they can feed candidate pools
//! of stronger ones.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::time::{SystemTime, UNIX_EPOCH};

use tangle_core::errors::GraphError;
use tangle_core::graph::PagGraph;
use tangle_core::sepsets::SepSetRegistry;
use tracing::{debug, info, warn};

use super::{subsets_of_size, test_candidates};
use crate::config::{PcConfig, StarOptions};
use crate::oracle::IndependenceOracle;

/// Connecting-path window for candidate pools.
const CANDIDATE_PATH_DEPTH: usize = 2;

pub(crate) fn run_skeleton<O: IndependenceOracle>(
    graph: &mut PagGraph,
    oracle: &mut O,
    config: &PcConfig,
    options: StarOptions,
) -> Result<SepSetRegistry, GraphError> {
    let mut sep_sets = SepSetRegistry::new();

    for depth in 0..=config.max_cond_set_size {
        let links = graph.list_all_deletable_links();
        info!(depth, links = links.len(), "proceeding to next separating set size");
        if links.is_empty() {
            info!("skeleton inference is finished");
            break;
        }

        // Rank links by remaining strength with up to 5% tie-break noise.
        // The noise generator is seeded by the link count, so the ranking is
        // reproducible on the same data.
        let mut noise = SplitMix64::new(links.len() as u64);
        let mut ranking: Vec<((usize, usize), f64)> = links
            .iter()
            .map(|&(x, y)| {
                let mut strength = if depth > 0 {
                    graph.remaining_link_strength(x, y)
                } else {
                    oracle.statistic(x, y, &BTreeSet::new())
                };
                if !strength.is_finite() {
                    warn!(
                        x = graph.var_name(x),
                        y = graph.var_name(y),
                        strength,
                        "oracle returned a non-finite statistic while ranking, treating as maximal"
                    );
                    strength = 1.0;
                }
                strength += noise.next_f64() * strength / 20.0;
                ((x, y), strength)
            })
            .collect();

        if options.random_link_order {
            let seed = options.shuffle_seed.unwrap_or_else(seed_from_time);
            shuffle(&mut ranking, &mut SplitMix64::new(seed));
        } else {
            ranking.sort_by(|a, b| {
                a.1.partial_cmp(&b.1)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| b.0.cmp(&a.0))
            });
        }

        for ((x, y), ranked_strength) in ranking {
            let preset = graph.has_preset_link(x, y);
            let pool: Vec<usize> = graph
                .neighbors_on_acyclic_paths_between(x, y, CANDIDATE_PATH_DEPTH)
                .into_iter()
                .collect();
            let candidates = subsets_of_size(&pool, depth);
            debug!(
                x = graph.var_name(x),
                y = graph.var_name(y),
                pool = pool.len(),
                candidates = candidates.len(),
                strength = ranked_strength,
                preset,
                "separating set candidates from connecting paths"
            );

            let outcome = test_candidates(
                graph,
                oracle,
                &mut sep_sets,
                x,
                y,
                preset,
                &candidates,
                ranked_strength,
            );
            if outcome.found_sep_set {
                oracle.register_sep_sets(x, y, sep_sets.get(x, y));
                graph.remove_link(x, y)?;
            } else {
                let strength = if preset { 1.0 } else { outcome.min_statistic };
                graph.set_remaining_link_strength(x, y, strength)?;
            }
        }

        // Stop testing pairs whose maximum meaningful conditioning-set size
        // has been reached (oracle-supplied hint).
        for (x, y) in graph.list_all_deletable_links() {
            if oracle.max_cond_set_size_reached(x, y, depth) {
                debug!(
                    x = graph.var_name(x),
                    y = graph.var_name(y),
                    depth,
                    "maximal conditioning set size reached, marked unremovable"
                );
                graph.set_undeletable_link(x, y, true)?;
            }
        }
    }

    oracle.display_diagnostics();
    Ok(sep_sets)
}

/// Deterministic 64-bit generator (splitmix64). A full RNG dependency would
/// be overkill for tie-break noise.
struct SplitMix64(u64);

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn shuffle<T>(items: &mut [T], rng: &mut SplitMix64) {
    for i in (1..items.len()).rev() {
        let j = (rng.next_u64() % (i as u64 + 1)) as usize;
        items.swap(i, j);
    }
}

fn seed_from_time() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5EED)
}
