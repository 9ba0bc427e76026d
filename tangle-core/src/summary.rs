//! Aggregation of multiple PAGs over a shared variable set into per-pair
//! link frequencies and endpoint-mark combination counts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::GraphError;
use crate::graph::{Mark, PagGraph};

/// The combination of the two endpoint marks on a link, named in
/// (at-first, at-second) order for the canonical `i < j` pair.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum LinkCombo {
    CircleCircle,
    CircleLine,
    CircleArrow,
    LineCircle,
    ArrowCircle,
    LineArrow,
    ArrowLine,
    ArrowArrow,
    LineLine,
}

impl LinkCombo {
    /// Classify a link from the marks at its two endpoints.
    pub fn from_marks(at_first: Mark, at_second: Mark) -> LinkCombo {
        match (at_first, at_second) {
            (Mark::Circle, Mark::Circle) => LinkCombo::CircleCircle,
            (Mark::Circle, Mark::Line) => LinkCombo::CircleLine,
            (Mark::Circle, Mark::Arrow) => LinkCombo::CircleArrow,
            (Mark::Line, Mark::Circle) => LinkCombo::LineCircle,
            (Mark::Arrow, Mark::Circle) => LinkCombo::ArrowCircle,
            (Mark::Line, Mark::Arrow) => LinkCombo::LineArrow,
            (Mark::Arrow, Mark::Line) => LinkCombo::ArrowLine,
            (Mark::Arrow, Mark::Arrow) => LinkCombo::ArrowArrow,
            (Mark::Line, Mark::Line) => LinkCombo::LineLine,
        }
    }

    /// The 3-character token for this combination.
    pub fn token(self) -> &'static str {
        match self {
            LinkCombo::CircleCircle => "o-o",
            LinkCombo::CircleLine => "o--",
            LinkCombo::CircleArrow => "o->",
            LinkCombo::LineCircle => "--o",
            LinkCombo::ArrowCircle => "<-o",
            LinkCombo::LineArrow => "-->",
            LinkCombo::ArrowLine => "<--",
            LinkCombo::ArrowArrow => "<->",
            LinkCombo::LineLine => "---",
        }
    }
}

/// Summary statistics over a collection of PAGs sharing one variable set:
/// how often each pair was linked and with which mark combinations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PagSummary {
    num_graphs: usize,
    names: Vec<String>,
    link_counts: BTreeMap<usize, BTreeMap<usize, usize>>,
    combo_counts: BTreeMap<usize, BTreeMap<usize, BTreeMap<LinkCombo, usize>>>,
}

impl PagSummary {
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            num_graphs: 0,
            names: names.into_iter().map(Into::into).collect(),
            link_counts: BTreeMap::new(),
            combo_counts: BTreeMap::new(),
        }
    }

    /// Fold one graph into the summary. The graph must carry exactly the
    /// summary's variable set, in the same order.
    pub fn add_graph(&mut self, graph: &PagGraph) -> Result<(), GraphError> {
        if graph.var_names() != self.names.iter().map(String::as_str).collect::<Vec<_>>() {
            return Err(GraphError::VariableSetMismatch {
                reason: "graph variables differ from summary variables".to_string(),
            });
        }
        for (x, y) in graph.list_all_links() {
            *self
                .link_counts
                .entry(x)
                .or_default()
                .entry(y)
                .or_default() += 1;
            let combo = LinkCombo::from_marks(graph.end_symbol(y, x), graph.end_symbol(x, y));
            *self
                .combo_counts
                .entry(x)
                .or_default()
                .entry(y)
                .or_default()
                .entry(combo)
                .or_default() += 1;
        }
        self.num_graphs += 1;
        Ok(())
    }

    pub fn num_graphs(&self) -> usize {
        self.num_graphs
    }

    /// How many of the summarized graphs linked the pair.
    pub fn link_count(&self, x: usize, y: usize) -> usize {
        let (lo, hi) = (x.min(y), x.max(y));
        self.link_counts
            .get(&lo)
            .and_then(|m| m.get(&hi))
            .copied()
            .unwrap_or(0)
    }

    /// Fraction of the summarized graphs linking the pair.
    pub fn link_frequency(&self, x: usize, y: usize) -> f64 {
        if self.num_graphs == 0 {
            return 0.0;
        }
        self.link_count(x, y) as f64 / self.num_graphs as f64
    }

    /// How many of the summarized graphs carried the given mark combination
    /// on the canonical `(min, max)` orientation of the pair.
    pub fn combo_count(&self, x: usize, y: usize, combo: LinkCombo) -> usize {
        let (lo, hi) = (x.min(y), x.max(y));
        self.combo_counts
            .get(&lo)
            .and_then(|m| m.get(&hi))
            .and_then(|m| m.get(&combo))
            .copied()
            .unwrap_or(0)
    }

    /// All pairs linked in at least one summarized graph, canonical order.
    pub fn list_all_links(&self) -> Vec<(usize, usize)> {
        self.link_counts
            .iter()
            .flat_map(|(&x, m)| m.keys().map(move |&y| (x, y)))
            .collect()
    }
}
