//! Explicit-stack DFS enumerations filtered by edge-pattern predicates.

use crate::graph::{Mark, PagGraph};

/// Which edge patterns a path step may traverse.
#[derive(Debug, Clone, Copy)]
enum EdgeFilter {
    /// Any link.
    Any,
    /// Potentially directed away from the current node: no arrowhead back
    /// into the current node, no tail at the next node.
    PotentiallyDirected,
    /// Circle marks at both ends.
    Circle,
}

impl PagGraph {
    /// All acyclic paths from `x` to `y` with fewer than `max_depth`
    /// interior expansion steps. Returned paths contain the intermediate
    /// nodes only (both endpoints omitted).
    pub fn acyclic_paths_between(&self, x: usize, y: usize, max_depth: usize) -> Vec<Vec<usize>> {
        self.filtered_paths(x, y, max_depth, EdgeFilter::Any, false)
    }

    /// All uncovered potentially directed paths from `x` to `y`: every
    /// consecutive triple on the path is unshielded, and every step could be
    /// oriented away from `x`. Intermediate nodes only.
    pub fn uncovered_potentially_directed_paths_between(
        &self,
        x: usize,
        y: usize,
        max_depth: usize,
    ) -> Vec<Vec<usize>> {
        self.filtered_paths(x, y, max_depth, EdgeFilter::PotentiallyDirected, true)
    }

    /// All uncovered paths from `x` to `y` consisting solely of
    /// circle–circle links. Intermediate nodes only.
    pub fn uncovered_circle_paths_between(
        &self,
        x: usize,
        y: usize,
        max_depth: usize,
    ) -> Vec<Vec<usize>> {
        self.filtered_paths(x, y, max_depth, EdgeFilter::Circle, true)
    }

    fn step_allowed(&self, filter: EdgeFilter, from: usize, to: usize) -> bool {
        match filter {
            EdgeFilter::Any => true,
            EdgeFilter::PotentiallyDirected => {
                self.end_symbol(to, from) != Mark::Arrow && self.end_symbol(from, to) != Mark::Line
            }
            EdgeFilter::Circle => {
                self.end_symbol(to, from) == Mark::Circle
                    && self.end_symbol(from, to) == Mark::Circle
            }
        }
    }

    fn filtered_paths(
        &self,
        start: usize,
        goal: usize,
        max_depth: usize,
        filter: EdgeFilter,
        uncovered: bool,
    ) -> Vec<Vec<usize>> {
        let mut paths = Vec::new();
        let mut path = vec![start];
        let mut frontier = vec![self.neighbors(start).into_iter()];
        while let Some(iter) = frontier.last_mut() {
            let Some(next) = iter.next() else {
                frontier.pop();
                path.pop();
                continue;
            };
            if path.contains(&next) {
                continue;
            }
            // Each consecutive triple on an uncovered path must be unshielded.
            if uncovered && path.len() > 1 && self.has_link(path[path.len() - 2], next) {
                continue;
            }
            let last = *path.last().expect("path never empties while frontier is live");
            if !self.step_allowed(filter, last, next) {
                continue;
            }
            if next == goal {
                paths.push(path[1..].to_vec());
            } else if path.len() < max_depth {
                path.push(next);
                frontier.push(self.neighbors(next).into_iter());
            }
        }
        paths
    }
}
