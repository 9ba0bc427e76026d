//! Fixed-size subset enumeration over candidate conditioning pools.

use std::collections::BTreeSet;

/// All `size`-element subsets of `pool`, in lexicographic position order.
/// Size zero yields the single empty set.
pub(crate) fn subsets_of_size(pool: &[usize], size: usize) -> Vec<BTreeSet<usize>> {
    if size == 0 {
        return vec![BTreeSet::new()];
    }
    if size > pool.len() {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut indices: Vec<usize> = (0..size).collect();
    loop {
        out.push(indices.iter().map(|&i| pool[i]).collect());
        // Advance the rightmost index that has room to move.
        let mut i = size;
        loop {
            if i == 0 {
                return out;
            }
            i -= 1;
            if indices[i] != i + pool.len() - size {
                break;
            }
        }
        indices[i] += 1;
        for j in (i + 1)..size {
            indices[j] = indices[j - 1] + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_size_yields_single_empty_set() {
        let subsets = subsets_of_size(&[1, 2, 3], 0);
        assert_eq!(subsets, vec![BTreeSet::new()]);
    }

    #[test]
    fn enumerates_all_pairs() {
        let subsets = subsets_of_size(&[1, 2, 3, 4], 2);
        assert_eq!(subsets.len(), 6);
        assert!(subsets.contains(&BTreeSet::from([1, 4])));
        assert!(subsets.contains(&BTreeSet::from([2, 3])));
    }

    #[test]
    fn oversized_request_is_empty() {
        assert!(subsets_of_size(&[1, 2], 3).is_empty());
    }
}
