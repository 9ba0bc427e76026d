//! Zhang's propagation rules R1–R3. Each application pass returns whether it
//! changed anything; the engine loops the passes to a fixpoint. A rule whose
//! target endpoint mark is preset does not fire.

use tangle_core::errors::GraphError;
use tangle_core::graph::{Mark, PagGraph};
use tracing::debug;

/// R1: unshielded `a *→ b o–* c` forces `a *→ b → c`.
pub fn apply_rule1(graph: &mut PagGraph) -> Result<bool, GraphError> {
    let mut changed = false;
    for triple in graph.list_unshielded_triples() {
        for (a, c) in [
            (triple.left, triple.right),
            (triple.right, triple.left),
        ] {
            if graph.end_symbol(a, triple.mid) == Mark::Arrow
                && graph.end_symbol(c, triple.mid) == Mark::Circle
                && !graph.has_preset_end(c, triple.mid)
                && !graph.has_preset_end(triple.mid, c)
            {
                debug!(
                    a = graph.var_name(a),
                    b = graph.var_name(triple.mid),
                    c = graph.var_name(c),
                    "R1 orients {} --> {}",
                    graph.var_name(triple.mid),
                    graph.var_name(c)
                );
                graph.set_end_symbol(c, triple.mid, Mark::Line)?;
                graph.set_end_symbol(triple.mid, c, Mark::Arrow)?;
                changed = true;
            }
        }
    }
    Ok(changed)
}

/// R2: `a → b *→ c` or `a *→ b → c` with an undetermined mark at `c` on
/// `a–c` forces `a *→ c`. Only sound under the acyclicity assumption.
pub fn apply_rule2(graph: &mut PagGraph) -> Result<bool, GraphError> {
    let mut changed = false;
    for (a, c) in graph.list_all_links_in_both_directions() {
        if graph.end_symbol(a, c) != Mark::Circle || graph.has_preset_end(a, c) {
            continue;
        }
        for b in graph.neighbors_on_acyclic_paths_between(a, c, 1) {
            if graph.end_symbol(a, b) == Mark::Arrow
                && graph.end_symbol(b, c) == Mark::Arrow
                && (graph.end_symbol(b, a) == Mark::Line
                    || graph.end_symbol(c, b) == Mark::Line)
            {
                debug!(
                    a = graph.var_name(a),
                    b = graph.var_name(b),
                    c = graph.var_name(c),
                    "R2 orients {} *-> {}",
                    graph.var_name(a),
                    graph.var_name(c)
                );
                graph.set_end_symbol(a, c, Mark::Arrow)?;
                changed = true;
                break;
            }
        }
    }
    Ok(changed)
}

/// R3: collider `a *→ b ←* c` with a common neighbor `d` whose edges to `a`
/// and `c` carry circles at `d`, and `d *–o b`, forces `d *→ b`. Only sound
/// under the acyclicity assumption.
pub fn apply_rule3(graph: &mut PagGraph) -> Result<bool, GraphError> {
    let mut changed = false;
    for triple in graph.list_unshielded_triples() {
        if graph.end_symbol(triple.left, triple.mid) != Mark::Arrow
            || graph.end_symbol(triple.right, triple.mid) != Mark::Arrow
        {
            continue;
        }
        for d in graph.neighbors_on_acyclic_paths_between(triple.left, triple.right, 1) {
            if graph.has_link(d, triple.mid)
                && graph.end_symbol(d, triple.mid) == Mark::Circle
                && graph.end_symbol(triple.left, d) == Mark::Circle
                && graph.end_symbol(triple.right, d) == Mark::Circle
                && !graph.has_preset_end(d, triple.mid)
            {
                debug!(
                    a = graph.var_name(triple.left),
                    b = graph.var_name(triple.mid),
                    c = graph.var_name(triple.right),
                    d = graph.var_name(d),
                    "R3 orients {} *-> {}",
                    graph.var_name(d),
                    graph.var_name(triple.mid)
                );
                graph.set_end_symbol(d, triple.mid, Mark::Arrow)?;
                changed = true;
            }
        }
    }
    Ok(changed)
}
