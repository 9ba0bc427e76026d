//! Collider (v-structure) detection over unshielded triples.

use tangle_core::errors::GraphError;
use tangle_core::graph::PagGraph;
use tangle_core::sepsets::SepSetRegistry;
use tracing::{debug, info};

use crate::config::ColliderMode;

/// Score every unshielded triple against the recorded separating sets of its
/// outer pair and orient the qualifying colliders. An arrowhead whose target
/// endpoint mark is preset is skipped.
pub(crate) fn orient_colliders(
    graph: &mut PagGraph,
    sep_sets: &SepSetRegistry,
    mode: ColliderMode,
) -> Result<(), GraphError> {
    for triple in graph.list_unshielded_triples() {
        let relevant = sep_sets.get(triple.left, triple.right);
        let containing_mid = relevant
            .iter()
            .filter(|set| set.contains(&triple.mid))
            .count();
        let orient = match mode {
            ColliderMode::Conservative => containing_mid == 0,
            ColliderMode::Majority => containing_mid <= relevant.len() / 2,
            ColliderMode::FirstSepSet => {
                relevant.first().map_or(true, |set| !set.contains(&triple.mid))
            }
        };
        if orient {
            info!(
                left = graph.var_name(triple.left),
                mid = graph.var_name(triple.mid),
                right = graph.var_name(triple.right),
                containing_mid,
                recorded = relevant.len(),
                "found v-structure"
            );
            if !graph.has_preset_end(triple.left, triple.mid) {
                graph.put_arrow(triple.left, triple.mid, true)?;
            }
            if !graph.has_preset_end(triple.right, triple.mid) {
                graph.put_arrow(triple.right, triple.mid, true)?;
            }
        } else {
            debug!(
                left = graph.var_name(triple.left),
                mid = graph.var_name(triple.mid),
                right = graph.var_name(triple.right),
                containing_mid,
                recorded = relevant.len(),
                "not a v-structure"
            );
        }
    }
    Ok(())
}
