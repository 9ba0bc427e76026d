//! Minimal GraphViz export: links classified into undirected, directed and
//! bidirected subgraphs. Layout and styling stay with external tooling.

use std::io::Write;

use crate::errors::FormatError;
use crate::graph::PagGraph;

/// Write the graph as a `digraph` with one subgraph per link class.
pub fn write_dot_format(graph: &PagGraph, out: &mut impl Write) -> Result<(), FormatError> {
    writeln!(out, "digraph CausalGraph")?;
    writeln!(out, "{{")?;
    writeln!(out, "  splines=true;")?;
    writeln!(out, "  node [ fontname=Arial, fontsize=20];")?;

    for var in 0..graph.var_count() {
        writeln!(out, "  {};", graph.var_name(var))?;
    }

    let mut undirected = Vec::new();
    let mut directed = Vec::new();
    let mut bidirected = Vec::new();
    for (x, y) in graph.list_all_links() {
        let name_x = graph.var_name(x);
        let name_y = graph.var_name(y);
        match (graph.has_arrow(x, y), graph.has_arrow(y, x)) {
            (true, true) => bidirected.push(format!("{name_x} -> {name_y};")),
            (true, false) => directed.push(format!("{name_x} -> {name_y};")),
            (false, true) => directed.push(format!("{name_y} -> {name_x};")),
            (false, false) => undirected.push(format!("{name_x} -> {name_y};")),
        }
    }

    for (title, attrs, links) in [
        ("undirected", "edge [dir=none];", &undirected),
        ("bidirected", "edge [dir=none];", &bidirected),
        ("directed", "edge [arrowsize=2];", &directed),
    ] {
        writeln!(out, "subgraph {title}")?;
        writeln!(out, "{{")?;
        writeln!(out, "  {attrs}")?;
        for link in links {
            writeln!(out, "  {link}")?;
        }
        writeln!(out, "}}")?;
    }

    writeln!(out, "}}")?;
    Ok(())
}
