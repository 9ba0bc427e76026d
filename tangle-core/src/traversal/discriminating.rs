//! Level-synchronous BFS for shortest discriminating paths.

use std::collections::BTreeSet;

use crate::graph::{Mark, PagGraph};

impl PagGraph {
    /// All shortest discriminating paths `<i, ..., l, j, k>` for the triple
    /// `<l, j, k>`, as full node paths. Every interior node before `j` is a
    /// collider on the path and a parent of `k`; the initial node `i` is not
    /// adjacent to `k`. Empty when `l` is not itself a parent of `k`.
    pub fn shortest_discriminating_paths(
        &self,
        l: usize,
        j: usize,
        k: usize,
    ) -> Vec<Vec<usize>> {
        let mut candidates: BTreeSet<usize> = self.parents(k).into_iter().collect();
        if !candidates.remove(&l) {
            return Vec::new();
        }

        let mut frontier = vec![vec![l, j, k]];
        loop {
            let mut complete = Vec::new();
            let mut extended = Vec::new();
            for path in &frontier {
                let head = path[0];
                for neighbor in self.neighbors(head) {
                    if path.contains(&neighbor) {
                        continue;
                    }
                    if self.end_symbol(neighbor, head) != Mark::Arrow {
                        continue;
                    }
                    if !candidates.contains(&neighbor) && !self.has_link(neighbor, k) {
                        // Found a starting point not connected to k.
                        let mut found = Vec::with_capacity(path.len() + 1);
                        found.push(neighbor);
                        found.extend_from_slice(path);
                        complete.push(found);
                    } else if candidates.contains(&neighbor)
                        && self.end_symbol(head, neighbor) == Mark::Arrow
                    {
                        let mut longer = Vec::with_capacity(path.len() + 1);
                        longer.push(neighbor);
                        longer.extend_from_slice(path);
                        extended.push(longer);
                    }
                }
            }
            if !complete.is_empty() {
                return complete;
            }
            if extended.is_empty() {
                return extended;
            }
            frontier = extended;
        }
    }
}
