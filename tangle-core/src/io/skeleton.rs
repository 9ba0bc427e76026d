//! The "skeleton + separating sets" format.
//!
//! One row per variable pair: linked pairs as `name1<TAB>o-o<TAB>name2`,
//! non-adjacent pairs as `name1<TAB>ooo<TAB>name2<TAB>sets` where `sets` is a
//! double-space-separated list of bracketed conditioning sets (`[]` for the
//! empty set). The variable table is implied by order of first appearance.

use std::collections::BTreeSet;
use std::io::Write;

use crate::errors::FormatError;
use crate::graph::PagGraph;
use crate::sepsets::SepSetRegistry;

/// Write the skeleton plus separating sets. Pairs with no recorded sets are
/// written as `[]` and read back as the singleton empty set, matching the
/// default the orientation stage assumes.
pub fn write_skeleton_format(
    graph: &PagGraph,
    sep_sets: &SepSetRegistry,
    out: &mut impl Write,
) -> Result<(), FormatError> {
    let n = graph.var_count();
    for x in 0..n {
        for y in (x + 1)..n {
            if graph.has_link(x, y) {
                writeln!(
                    out,
                    "{}\to-o\t{}",
                    graph.var_name(x),
                    graph.var_name(y)
                )?;
            } else {
                let rendered: Vec<String> = sep_sets
                    .get(x, y)
                    .iter()
                    .map(|set| render_set(graph, set))
                    .collect();
                let sets = if rendered.is_empty() {
                    "[]".to_string()
                } else {
                    rendered.join("  ")
                };
                writeln!(
                    out,
                    "{}\tooo\t{}\t{}",
                    graph.var_name(x),
                    graph.var_name(y),
                    sets
                )?;
            }
        }
    }
    Ok(())
}

/// Parse a skeleton file back into a graph and its separating sets.
pub fn read_skeleton_format(input: &str) -> Result<(PagGraph, SepSetRegistry), FormatError> {
    let rows: Vec<(usize, Vec<&str>)> = input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .map(|(line_no, line)| (line_no, line.split('\t').collect()))
        .collect();

    // First pass: build the symbol table in order of first appearance.
    let mut names: Vec<String> = Vec::new();
    for (line_no, fields) in &rows {
        let (Some(&name1), Some(&name2)) = (fields.first(), fields.get(2)) else {
            return Err(FormatError::MalformedLine {
                line: line_no + 1,
                reason: "expected name<TAB>token<TAB>name".to_string(),
            });
        };
        for name in [name1, name2] {
            if !names.iter().any(|known| known == name) {
                names.push(name.to_string());
            }
        }
    }
    let mut graph = PagGraph::new(names, false)?;
    let mut sep_sets = SepSetRegistry::new();

    for (line_no, fields) in &rows {
        let x = graph.var_index(fields[0]).expect("name seen in first pass");
        let y = graph.var_index(fields[2]).expect("name seen in first pass");
        match fields[1] {
            "o-o" => graph.add_link(x, y),
            "ooo" => {
                let sets_field = fields.get(3).ok_or_else(|| FormatError::MalformedLine {
                    line: line_no + 1,
                    reason: "non-adjacent pair without separating sets".to_string(),
                })?;
                for rendered in sets_field.split("  ") {
                    let set = parse_set(&graph, rendered, line_no + 1)?;
                    sep_sets.record(x, y, set.clone());
                    sep_sets.record(y, x, set);
                }
            }
            other => {
                tracing::warn!(line = line_no + 1, token = other, "ignoring uninterpretable skeleton row");
            }
        }
    }

    Ok((graph, sep_sets))
}

fn render_set(graph: &PagGraph, set: &BTreeSet<usize>) -> String {
    let names: Vec<&str> = set.iter().map(|&var| graph.var_name(var)).collect();
    format!("[{}]", names.join(","))
}

fn parse_set(
    graph: &PagGraph,
    rendered: &str,
    line: usize,
) -> Result<BTreeSet<usize>, FormatError> {
    let inner = rendered
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| FormatError::MalformedLine {
            line,
            reason: format!("expected bracketed conditioning set, found {rendered:?}"),
        })?;
    let mut set = BTreeSet::new();
    for name in inner.split(',') {
        if name.is_empty() {
            continue;
        }
        let var = graph
            .var_index(name)
            .ok_or_else(|| FormatError::UnknownVariable {
                name: name.to_string(),
            })?;
        set.insert(var);
    }
    Ok(set)
}
