//! PAG graph store: adjacency, per-endpoint marks, preset constraints, and
//! the cached remaining link strength used to rank removal order.

mod enumerate;
pub mod marks;

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableUnGraph};
use serde::{Deserialize, Serialize};

use crate::errors::GraphError;

pub use enumerate::UnshieldedTriple;
pub use marks::{LinkWeight, Mark};

use marks::end_slot;

/// A variable (graph node), identified by a dense index and a stable name.
/// Indices are the only identity used by the algorithms; names exist for
/// serialization and diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
}

/// A partial ancestral graph over a fixed variable set.
///
/// Wraps an undirected `petgraph` stable graph; links carry two independently
/// settable endpoint marks plus the preset/undeletable flags and the strength
/// cache. Nodes are created once at construction and never removed, so a
/// `NodeIndex` is interchangeable with the dense variable index.
///
/// The endpoint convention matches the canonical text format: for a link
/// `x–y`, [`PagGraph::end_symbol`]`(x, y)` is the mark *at `y`*.
#[derive(Debug, Clone)]
pub struct PagGraph {
    pub(crate) graph: StableUnGraph<Variable, LinkWeight>,
    pub(crate) nodes: Vec<NodeIndex>,
    name_to_var: BTreeMap<String, usize>,
}

impl PagGraph {
    /// Create a graph over `names`, fully connected when `complete` is true
    /// (the usual starting point for skeleton inference) and edgeless
    /// otherwise (for building preset skeletons).
    pub fn new<S: Into<String>>(
        names: impl IntoIterator<Item = S>,
        complete: bool,
    ) -> Result<Self, GraphError> {
        let mut graph = StableUnGraph::default();
        let mut nodes = Vec::new();
        let mut name_to_var = BTreeMap::new();
        for name in names {
            let name = name.into();
            if name.is_empty() {
                return Err(GraphError::InvalidVariableName {
                    name,
                    reason: "empty".to_string(),
                });
            }
            if name.contains(['\t', '\n']) {
                return Err(GraphError::InvalidVariableName {
                    name,
                    reason: "contains tab or newline".to_string(),
                });
            }
            let index = nodes.len();
            if name_to_var.insert(name.clone(), index).is_some() {
                return Err(GraphError::DuplicateVariableName { name });
            }
            nodes.push(graph.add_node(Variable { name }));
        }
        let mut pag = Self {
            graph,
            nodes,
            name_to_var,
        };
        if complete {
            for x in 0..pag.var_count() {
                for y in (x + 1)..pag.var_count() {
                    pag.add_link(x, y);
                }
            }
        }
        Ok(pag)
    }

    /// Number of variables.
    pub fn var_count(&self) -> usize {
        self.nodes.len()
    }

    /// Name of a variable.
    pub fn var_name(&self, var: usize) -> &str {
        &self.graph[self.nodes[var]].name
    }

    /// Index of a variable by name.
    pub fn var_index(&self, name: &str) -> Option<usize> {
        self.name_to_var.get(name).copied()
    }

    /// All variable names in index order.
    pub fn var_names(&self) -> Vec<&str> {
        (0..self.var_count()).map(|v| self.var_name(v)).collect()
    }

    fn find_link(&self, x: usize, y: usize) -> Option<EdgeIndex> {
        self.graph.find_edge(self.nodes[x], self.nodes[y])
    }

    pub(crate) fn weight(&self, x: usize, y: usize) -> Option<&LinkWeight> {
        self.find_link(x, y).and_then(|e| self.graph.edge_weight(e))
    }

    fn weight_mut(&mut self, x: usize, y: usize) -> Result<&mut LinkWeight, GraphError> {
        let edge = self.find_link(x, y).ok_or(GraphError::NoSuchLink { x, y })?;
        Ok(self
            .graph
            .edge_weight_mut(edge)
            .expect("edge index from find_edge is valid"))
    }

    /// Whether `x` and `y` are adjacent.
    pub fn has_link(&self, x: usize, y: usize) -> bool {
        x != y && self.find_link(x, y).is_some()
    }

    /// Add the link `x–y` with default (circle/circle) marks. Re-adding an
    /// existing link and self links are no-ops.
    pub fn add_link(&mut self, x: usize, y: usize) {
        if x == y || self.has_link(x, y) {
            return;
        }
        self.graph
            .add_edge(self.nodes[x], self.nodes[y], LinkWeight::default());
    }

    /// Remove the link `x–y`. Removing a preset link is a constraint
    /// violation; removing a missing link is a no-op.
    pub fn remove_link(&mut self, x: usize, y: usize) -> Result<(), GraphError> {
        if self.has_preset_link(x, y) {
            return Err(GraphError::PresetLinkRemoval {
                x: x.min(y),
                y: x.max(y),
            });
        }
        if let Some(edge) = self.find_link(x, y) {
            self.graph.remove_edge(edge);
        }
        Ok(())
    }

    /// The mark at `y` on the link `x–y` (circle when no link exists).
    pub fn end_symbol(&self, x: usize, y: usize) -> Mark {
        self.weight(x, y)
            .map(|w| w.marks[end_slot(x, y)])
            .unwrap_or_default()
    }

    /// Set the mark at `y` on the link `x–y`.
    pub fn set_end_symbol(&mut self, x: usize, y: usize, mark: Mark) -> Result<(), GraphError> {
        let slot = end_slot(x, y);
        let weight = self.weight_mut(x, y)?;
        if weight.preset_end[slot] {
            return Err(GraphError::PresetEndpointOverwrite { x, y, at: y });
        }
        weight.marks[slot] = mark;
        Ok(())
    }

    /// Whether the link `x–y` carries an arrowhead at `y`.
    pub fn has_arrow(&self, x: usize, y: usize) -> bool {
        self.end_symbol(x, y) == Mark::Arrow
    }

    /// Orient the link as `x → y` (`arrow == true`): the mark at `y` becomes
    /// an arrowhead, and a circle at `x` is upgraded to a tail (an existing
    /// tail or arrowhead at `x` is never downgraded, and a preset mark at `x`
    /// is left untouched). With `arrow == false` the mark at `y` is reset to
    /// a circle. Writing to a preset mark at `y` is a constraint violation.
    pub fn put_arrow(&mut self, x: usize, y: usize, arrow: bool) -> Result<(), GraphError> {
        let head = end_slot(x, y);
        let tail = end_slot(y, x);
        let weight = self.weight_mut(x, y)?;
        if weight.preset_end[head] {
            return Err(GraphError::PresetEndpointOverwrite { x, y, at: y });
        }
        if arrow {
            weight.marks[head] = Mark::Arrow;
            if weight.marks[tail] == Mark::Circle && !weight.preset_end[tail] {
                weight.marks[tail] = Mark::Line;
            }
        } else {
            weight.marks[head] = Mark::Circle;
        }
        Ok(())
    }

    /// Whether the existence of the link `x–y` is externally fixed.
    pub fn has_preset_link(&self, x: usize, y: usize) -> bool {
        self.weight(x, y).is_some_and(|w| w.preset_link)
    }

    /// Fix (or release) the existence of the link `x–y`.
    pub fn put_preset_link(&mut self, x: usize, y: usize, preset: bool) -> Result<(), GraphError> {
        self.weight_mut(x, y)?.preset_link = preset;
        Ok(())
    }

    /// Whether search has flagged the link `x–y` as no longer testable.
    pub fn has_undeletable_link(&self, x: usize, y: usize) -> bool {
        self.weight(x, y).is_some_and(|w| w.undeletable)
    }

    /// Flag the link `x–y` as (not) subject to further independence tests.
    pub fn set_undeletable_link(
        &mut self,
        x: usize,
        y: usize,
        undeletable: bool,
    ) -> Result<(), GraphError> {
        self.weight_mut(x, y)?.undeletable = undeletable;
        Ok(())
    }

    /// Whether the mark at `y` on the link `x–y` is externally fixed.
    pub fn has_preset_end(&self, x: usize, y: usize) -> bool {
        self.weight(x, y)
            .is_some_and(|w| w.preset_end[end_slot(x, y)])
    }

    /// Fix (or release) the mark at `y` on the link `x–y`.
    pub fn mark_end_as_preset(
        &mut self,
        x: usize,
        y: usize,
        preset: bool,
    ) -> Result<(), GraphError> {
        let slot = end_slot(x, y);
        self.weight_mut(x, y)?.preset_end[slot] = preset;
        Ok(())
    }

    /// Whether the link `x–y` carries a preset arrowhead at `y`.
    pub fn has_preset_arrow(&self, x: usize, y: usize) -> bool {
        self.has_preset_end(x, y) && self.has_arrow(x, y)
    }

    /// The minimum association statistic observed so far for the pair
    /// (1.0 before any test ran).
    pub fn remaining_link_strength(&self, x: usize, y: usize) -> f64 {
        self.weight(x, y).map_or(1.0, |w| w.strength)
    }

    /// Cache the remaining link strength for the pair.
    pub fn set_remaining_link_strength(
        &mut self,
        x: usize,
        y: usize,
        strength: f64,
    ) -> Result<(), GraphError> {
        self.weight_mut(x, y)?.strength = strength;
        Ok(())
    }

    /// Neighbors of `var` in ascending index order.
    pub fn neighbors(&self, var: usize) -> Vec<usize> {
        let mut out: Vec<usize> = self
            .graph
            .neighbors(self.nodes[var])
            .map(|n| n.index())
            .collect();
        out.sort_unstable();
        out
    }

    /// Parents of `var`: neighbors `p` with `p → var` (tail at `p`,
    /// arrowhead at `var`).
    pub fn parents(&self, var: usize) -> Vec<usize> {
        self.neighbors(var)
            .into_iter()
            .filter(|&p| {
                self.end_symbol(var, p) == Mark::Line && self.end_symbol(p, var) == Mark::Arrow
            })
            .collect()
    }

    /// Ancestors of `var`: transitive closure over links pointing into the
    /// current node or carrying tails at both ends.
    pub fn ancestors(&self, var: usize) -> BTreeSet<usize> {
        let mut ancestors = BTreeSet::new();
        let mut agenda = VecDeque::from([var]);
        while let Some(k) = agenda.pop_front() {
            for n in self.neighbors(k) {
                if self.end_symbol(n, k) == Mark::Arrow
                    || (self.end_symbol(k, n) == Mark::Line && self.end_symbol(n, k) == Mark::Line)
                {
                    if ancestors.insert(n) {
                        agenda.push_back(n);
                    }
                }
            }
        }
        ancestors
    }

    /// The 3-character token for the link `x–y` (endpoint at `x` on the
    /// left), or `"ooo"` when no link exists.
    pub fn link_representation(&self, x: usize, y: usize) -> String {
        if !self.has_link(x, y) {
            return "ooo".to_string();
        }
        let at_x = self.end_symbol(y, x);
        let at_y = self.end_symbol(x, y);
        format!("{}-{}", at_x.left_char(), at_y.right_char())
    }
}
