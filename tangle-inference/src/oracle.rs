//! The pluggable independence oracle consumed by skeleton inference.

use std::collections::BTreeSet;

/// Supplies the association statistic and the independence decisions that
/// drive edge removal. Implementations wrap whatever test fits the data
/// (partial correlation, conditional mutual information, ...); the engine
/// only assumes that larger statistics mean stronger association.
///
/// A non-finite statistic is a contract violation by the oracle; the engine
/// logs it and fails safe by keeping the edge.
pub trait IndependenceOracle {
    /// Association statistic for the pair `(x, y)` given the conditioning
    /// set `z`.
    fn statistic(&self, x: usize, y: usize, z: &BTreeSet<usize>) -> f64;

    /// Independence decision for a statistic previously computed by
    /// [`IndependenceOracle::statistic`] on the same arguments.
    fn independent(&self, statistic: f64, x: usize, y: usize, z: &BTreeSet<usize>) -> bool;

    /// Hook: receives all separating sets recorded for `(x, y)` when that
    /// link is flagged for removal.
    fn register_sep_sets(&mut self, x: usize, y: usize, sets: &[BTreeSet<usize>]) {
        let _ = (x, y, sets);
    }

    /// Hook: early-stop hint for the star search — whether conditioning
    /// sets larger than `depth` are meaningful for the pair.
    fn max_cond_set_size_reached(&self, x: usize, y: usize, depth: usize) -> bool {
        let _ = (x, y, depth);
        false
    }

    /// Hook: report accumulated diagnostics at the end of skeleton
    /// inference.
    fn display_diagnostics(&self) {}
}
