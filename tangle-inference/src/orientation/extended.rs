//! Extended orientation rules R4–R10: discriminating paths, uncovered
//! circle paths, tail propagation and diverging-path orientation.
//!
//! These are not part of the baseline fixpoint; callers needing full FCI
//! completeness compose them into their own loop, either individually or via
//! [`apply_extended_rules`]. As everywhere in the orientation engine, a rule
//! whose target endpoint mark is preset does not fire.

use tangle_core::errors::GraphError;
use tangle_core::graph::{Mark, PagGraph};
use tangle_core::io::path_to_string;
use tangle_core::sepsets::SepSetRegistry;
use tracing::debug;

/// Run R4–R10 once each, in rule order. Returns whether any pass changed
/// the graph.
pub fn apply_extended_rules(
    graph: &mut PagGraph,
    sep_sets: &SepSetRegistry,
) -> Result<bool, GraphError> {
    let mut changed = apply_rule4(graph, sep_sets)?;
    changed |= apply_rule5(graph)?;
    changed |= apply_rule6(graph)?;
    changed |= apply_rule7(graph)?;
    changed |= apply_rule8(graph)?;
    changed |= apply_rule9(graph)?;
    changed |= apply_rule10(graph)?;
    Ok(changed)
}

/// R4: for a discriminating path `<i, ..., l, j, k>` with an undetermined
/// mark at `j` on `j–k`: if some recorded separating set of `(i, k)`
/// contains `j`, orient `j → k`; otherwise `j` is a collider on the path,
/// giving `l ↔ j ↔ k`.
pub fn apply_rule4(
    graph: &mut PagGraph,
    sep_sets: &SepSetRegistry,
) -> Result<bool, GraphError> {
    let mut changed = false;
    for k in 0..graph.var_count() {
        for j in graph.neighbors(k) {
            if graph.end_symbol(k, j) != Mark::Circle {
                continue;
            }
            for l in graph.parents(k) {
                if l == j || !graph.has_link(l, j) {
                    continue;
                }
                let paths = graph.shortest_discriminating_paths(l, j, k);
                let Some(path) = paths.first() else {
                    continue;
                };
                let origin = path[0];
                debug!(
                    path = %path_to_string(graph, path),
                    "R4 found discriminating path"
                );
                let separated_by_j = sep_sets
                    .get(origin, k)
                    .iter()
                    .any(|set| set.contains(&j));
                let mut fired = false;
                if separated_by_j {
                    if !graph.has_preset_end(k, j) && !graph.has_preset_end(j, k) {
                        graph.set_end_symbol(k, j, Mark::Line)?;
                        graph.set_end_symbol(j, k, Mark::Arrow)?;
                        fired = true;
                    }
                } else {
                    for (from, to) in [(l, j), (j, l), (j, k), (k, j)] {
                        if graph.end_symbol(from, to) != Mark::Arrow
                            && !graph.has_preset_end(from, to)
                        {
                            graph.set_end_symbol(from, to, Mark::Arrow)?;
                            fired = true;
                        }
                    }
                }
                if fired {
                    changed = true;
                    // The mark at j is decided; later paths for the same
                    // triple cannot re-litigate it.
                    break;
                }
            }
        }
    }
    Ok(changed)
}

/// R5: `a o–o b` joined by an uncovered circle path whose first node is not
/// adjacent to `b` and whose last node is not adjacent to `a` makes the
/// whole cycle (including `a–b`) undirected: every mark on it becomes a
/// tail.
pub fn apply_rule5(graph: &mut PagGraph) -> Result<bool, GraphError> {
    let mut changed = false;
    let max_depth = graph.var_count();
    for (a, b) in graph.list_all_links_in_both_directions() {
        if graph.end_symbol(a, b) != Mark::Circle || graph.end_symbol(b, a) != Mark::Circle {
            continue;
        }
        let mut circle_paths = graph.uncovered_circle_paths_between(a, b, max_depth);
        loop {
            let mut fired = false;
            for path in &circle_paths {
                // A shorter path would force its ends to be adjacent to a/b.
                if path.len() < 2 {
                    continue;
                }
                let first = path[0];
                let last = *path.last().expect("path has at least two nodes");
                if graph.has_link(a, last) || graph.has_link(b, first) {
                    continue;
                }
                let mut cycle = Vec::with_capacity(path.len() + 2);
                cycle.push(a);
                cycle.extend_from_slice(path);
                cycle.push(b);
                cycle.push(a);
                if cycle_has_preset_end(graph, &cycle) {
                    continue;
                }
                debug!(
                    cycle = %path_to_string(graph, &cycle),
                    "R5 undirects uncovered circle cycle"
                );
                for window in cycle.windows(2) {
                    graph.set_end_symbol(window[0], window[1], Mark::Line)?;
                    graph.set_end_symbol(window[1], window[0], Mark::Line)?;
                }
                changed = true;
                fired = true;
                break;
            }
            if !fired {
                break;
            }
            circle_paths = graph.uncovered_circle_paths_between(a, b, max_depth);
        }
    }
    Ok(changed)
}

fn cycle_has_preset_end(graph: &PagGraph, cycle: &[usize]) -> bool {
    cycle.windows(2).any(|window| {
        graph.has_preset_end(window[0], window[1]) || graph.has_preset_end(window[1], window[0])
    })
}

/// R6: `a — b o–* c` forces `b —* c` (the circle at `b` becomes a tail).
pub fn apply_rule6(graph: &mut PagGraph) -> Result<bool, GraphError> {
    let mut changed = false;
    for (a, b) in graph.list_all_links_in_both_directions() {
        if graph.end_symbol(a, b) != Mark::Line || graph.end_symbol(b, a) != Mark::Line {
            continue;
        }
        for c in graph.neighbors(b) {
            if graph.end_symbol(c, b) == Mark::Circle && !graph.has_preset_end(c, b) {
                debug!(
                    a = graph.var_name(a),
                    b = graph.var_name(b),
                    c = graph.var_name(c),
                    "R6 puts a tail at {}",
                    graph.var_name(b)
                );
                graph.set_end_symbol(c, b, Mark::Line)?;
                changed = true;
            }
        }
    }
    Ok(changed)
}

/// R7: unshielded `a —o b o–* c` forces `b —* c`.
pub fn apply_rule7(graph: &mut PagGraph) -> Result<bool, GraphError> {
    let mut changed = false;
    for triple in graph.list_unshielded_triples() {
        for (a, c) in [
            (triple.left, triple.right),
            (triple.right, triple.left),
        ] {
            if graph.end_symbol(a, triple.mid) == Mark::Circle
                && graph.end_symbol(triple.mid, a) == Mark::Line
                && graph.end_symbol(c, triple.mid) == Mark::Circle
                && !graph.has_preset_end(c, triple.mid)
            {
                debug!(
                    a = graph.var_name(a),
                    b = graph.var_name(triple.mid),
                    c = graph.var_name(c),
                    "R7 puts a tail at {}",
                    graph.var_name(triple.mid)
                );
                graph.set_end_symbol(c, triple.mid, Mark::Line)?;
                changed = true;
            }
        }
    }
    Ok(changed)
}

/// R8: `a o→ c` with `a → b → c` or `a —o b → c` forces `a → c`.
pub fn apply_rule8(graph: &mut PagGraph) -> Result<bool, GraphError> {
    let mut changed = false;
    for (a, c) in graph.list_all_links_in_both_directions() {
        if graph.end_symbol(a, c) != Mark::Arrow
            || graph.end_symbol(c, a) != Mark::Circle
            || graph.has_preset_end(c, a)
        {
            continue;
        }
        for b in graph.neighbors_on_acyclic_paths_between(a, c, 1) {
            if (graph.end_symbol(a, b) == Mark::Arrow || graph.end_symbol(a, b) == Mark::Circle)
                && graph.end_symbol(b, a) == Mark::Line
                && graph.end_symbol(b, c) == Mark::Arrow
                && graph.end_symbol(c, b) == Mark::Line
            {
                debug!(
                    a = graph.var_name(a),
                    b = graph.var_name(b),
                    c = graph.var_name(c),
                    "R8 orients {} --> {}",
                    graph.var_name(a),
                    graph.var_name(c)
                );
                graph.set_end_symbol(c, a, Mark::Line)?;
                changed = true;
                break;
            }
        }
    }
    Ok(changed)
}

/// R9: `a o→ c` with a non-trivial uncovered potentially directed path from
/// `a` to `c` whose first node is not adjacent to `c` forces `a → c`.
pub fn apply_rule9(graph: &mut PagGraph) -> Result<bool, GraphError> {
    let mut changed = false;
    let max_depth = graph.var_count();
    for (a, c) in graph.list_all_links_in_both_directions() {
        if graph.end_symbol(a, c) != Mark::Arrow
            || graph.end_symbol(c, a) != Mark::Circle
            || graph.has_preset_end(c, a)
        {
            continue;
        }
        for path in graph.uncovered_potentially_directed_paths_between(a, c, max_depth) {
            if path.is_empty() || graph.has_link(path[0], c) {
                continue;
            }
            debug!(
                path = %path_to_string(graph, &path),
                "R9 orients {} --> {}",
                graph.var_name(a),
                graph.var_name(c)
            );
            graph.set_end_symbol(c, a, Mark::Line)?;
            changed = true;
            break;
        }
    }
    Ok(changed)
}

/// R10: `a o→ c` with two arrows `b → c ← d` reached from `a` by uncovered
/// potentially directed paths diverging at non-adjacent first nodes forces
/// `a → c`. Orients at most once per call, as one firing invalidates the
/// enumerated state.
pub fn apply_rule10(graph: &mut PagGraph) -> Result<bool, GraphError> {
    let max_depth = graph.var_count();
    for (a, c) in graph.list_all_links_in_both_directions() {
        if graph.end_symbol(a, c) != Mark::Arrow
            || graph.end_symbol(c, a) != Mark::Circle
            || graph.has_preset_end(c, a)
        {
            continue;
        }
        let into_c: Vec<usize> = graph
            .neighbors(c)
            .into_iter()
            .filter(|&b| {
                graph.end_symbol(b, c) == Mark::Arrow && graph.end_symbol(c, b) == Mark::Line
            })
            .collect();
        for (b_pos, &b) in into_c.iter().enumerate() {
            for ab_path in graph.uncovered_potentially_directed_paths_between(a, b, max_depth) {
                let Some(&m) = ab_path.first() else {
                    continue;
                };
                for &d in &into_c[b_pos + 1..] {
                    for ad_path in
                        graph.uncovered_potentially_directed_paths_between(a, d, max_depth)
                    {
                        let Some(&n) = ad_path.first() else {
                            continue;
                        };
                        if n == m || graph.has_link(n, m) {
                            continue;
                        }
                        debug!(
                            a = graph.var_name(a),
                            b = graph.var_name(b),
                            c = graph.var_name(c),
                            d = graph.var_name(d),
                            "R10 orients {} --> {}",
                            graph.var_name(a),
                            graph.var_name(c)
                        );
                        graph.set_end_symbol(c, a, Mark::Line)?;
                        return Ok(true);
                    }
                }
            }
        }
    }
    Ok(false)
}
