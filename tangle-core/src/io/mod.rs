//! Canonical text serialization of graphs and skeletons.
//!
//! The `#names` / `#links` format is a fixed interoperability contract:
//! one `index<TAB>name` line per variable, then one
//! `name1<TAB>token<TAB>name2` line per link in canonical `i < j` order,
//! where the token renders the endpoint marks as in
//! [`PagGraph::link_representation`](crate::graph::PagGraph::link_representation).

mod dot;
mod skeleton;
mod text;

pub use dot::write_dot_format;
pub use skeleton::{read_skeleton_format, write_skeleton_format};
pub use text::{read_text_format, write_text_format};

use crate::graph::PagGraph;

/// Render a node path with link tokens between consecutive variables,
/// e.g. `"A o-> B <-> C"`.
pub fn path_to_string(graph: &PagGraph, path: &[usize]) -> String {
    let Some(&first) = path.first() else {
        return String::new();
    };
    let mut out = graph.var_name(first).to_string();
    for window in path.windows(2) {
        out.push(' ');
        out.push_str(&graph.link_representation(window[0], window[1]));
        out.push(' ');
        out.push_str(graph.var_name(window[1]));
    }
    out
}
