//! The arrow-finder plugin seam and its default rule-based implementation.

use std::collections::BTreeSet;

use tangle_core::errors::GraphError;
use tangle_core::graph::PagGraph;
use tangle_core::sepsets::SepSetRegistry;
use tracing::debug;

use crate::config::ColliderMode;
use crate::orientation::{apply_rule1, apply_rule2, apply_rule3, colliders};

/// An external strategy for placing arrowheads. The engine feeds it every
/// recorded separating set, then asks once for a final list of directed
/// arrows as `(from, to)` name pairs.
pub trait ArrowFinder {
    /// Receive the separating sets recorded for the ordered pair `(x, y)`.
    fn register_sep_sets(&mut self, x: usize, y: usize, sets: &[BTreeSet<usize>]);

    /// Produce the arrows to insert. Implementations may orient the graph
    /// directly; the returned list is re-inserted by the engine, which is
    /// harmless for marks already set.
    fn find_arrows(
        &mut self,
        graph: &mut PagGraph,
        verbose: bool,
    ) -> Result<Vec<(String, String)>, GraphError>;
}

/// Default arrow finder: the same collider scoring and R1–R3 fixpoint the
/// built-in orientation uses, behind the plugin seam.
#[derive(Debug, Clone, Default)]
pub struct PcArrowFinder {
    collider_mode: ColliderMode,
    sep_sets: SepSetRegistry,
}

impl PcArrowFinder {
    pub fn new(collider_mode: ColliderMode) -> Self {
        Self {
            collider_mode,
            sep_sets: SepSetRegistry::new(),
        }
    }
}

impl ArrowFinder for PcArrowFinder {
    fn register_sep_sets(&mut self, x: usize, y: usize, sets: &[BTreeSet<usize>]) {
        for set in sets {
            self.sep_sets.record(x, y, set.clone());
        }
    }

    fn find_arrows(
        &mut self,
        graph: &mut PagGraph,
        verbose: bool,
    ) -> Result<Vec<(String, String)>, GraphError> {
        colliders::orient_colliders(graph, &self.sep_sets, self.collider_mode)?;

        loop {
            let mut changed = apply_rule1(graph)?;
            changed |= apply_rule2(graph)?;
            changed |= apply_rule3(graph)?;
            if !changed {
                break;
            }
        }

        // Extract the arrows from the graph we operated on; the caller may
        // insert them once more, which does no harm.
        let mut arrows = Vec::new();
        for (x, y) in graph.list_all_links_in_both_directions() {
            if graph.has_arrow(x, y) {
                if verbose {
                    debug!(
                        from = graph.var_name(x),
                        to = graph.var_name(y),
                        "arrow found"
                    );
                }
                arrows.push((
                    graph.var_name(x).to_string(),
                    graph.var_name(y).to_string(),
                ));
            }
        }
        Ok(arrows)
    }
}
