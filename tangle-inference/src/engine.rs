//! The discovery engine: skeleton inference followed by orientation, over a
//! caller-owned graph and oracle.

use tangle_core::errors::GraphError;
use tangle_core::graph::PagGraph;
use tangle_core::sepsets::SepSetRegistry;
use tracing::info;

use crate::config::{PcConfig, SearchStrategy};
use crate::finder::ArrowFinder;
use crate::oracle::IndependenceOracle;
use crate::orientation;
use crate::skeleton;

/// Runs the configured PC-family algorithm against a [`PagGraph`].
///
/// The graph may carry preset links and endpoint marks (background
/// knowledge); inference never overrides them. After a run the graph holds
/// the oriented PAG and the returned registry holds the separating-set
/// evidence for every removed link.
#[derive(Debug, Clone, Default)]
pub struct PcEngine {
    config: PcConfig,
}

impl PcEngine {
    pub fn new(config: PcConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PcConfig {
        &self.config
    }

    /// Full run with the built-in orientation.
    pub fn run<O: IndependenceOracle>(
        &self,
        graph: &mut PagGraph,
        oracle: &mut O,
    ) -> Result<SepSetRegistry, GraphError> {
        let mut sep_sets = self.run_skeleton(graph, oracle)?;
        self.orient(graph, &mut sep_sets)?;
        Ok(sep_sets)
    }

    /// Full run with a pluggable arrow finder in place of the built-in
    /// orientation.
    pub fn run_with_finder<O: IndependenceOracle>(
        &self,
        graph: &mut PagGraph,
        oracle: &mut O,
        finder: &mut dyn ArrowFinder,
        verbose: bool,
    ) -> Result<SepSetRegistry, GraphError> {
        let mut sep_sets = self.run_skeleton(graph, oracle)?;
        self.orient_with_finder(graph, finder, &mut sep_sets, verbose)?;
        Ok(sep_sets)
    }

    /// Prune the graph down to its skeleton, recording separating sets.
    pub fn run_skeleton<O: IndependenceOracle>(
        &self,
        graph: &mut PagGraph,
        oracle: &mut O,
    ) -> Result<SepSetRegistry, GraphError> {
        match self.config.search {
            SearchStrategy::Exhaustive => {
                skeleton::exhaustive::run_skeleton(graph, oracle, &self.config)
            }
            SearchStrategy::Star(options) => {
                skeleton::star::run_skeleton(graph, oracle, &self.config, options)
            }
        }
    }

    /// Built-in orientation: collider scoring plus the R1–R3 fixpoint.
    /// Pairs without recorded separating sets are defaulted to the singleton
    /// empty set first.
    pub fn orient(
        &self,
        graph: &mut PagGraph,
        sep_sets: &mut SepSetRegistry,
    ) -> Result<(), GraphError> {
        sep_sets.fill_defaults(graph.var_count());
        orientation::orient_builtin(graph, sep_sets, &self.config)
    }

    /// Plugin orientation: hand every pair's separating sets to `finder`,
    /// then insert the arrows it reports. An arrow is skipped when either
    /// direction of the pair already carries a preset arrowhead.
    pub fn orient_with_finder(
        &self,
        graph: &mut PagGraph,
        finder: &mut dyn ArrowFinder,
        sep_sets: &mut SepSetRegistry,
        verbose: bool,
    ) -> Result<(), GraphError> {
        let n = graph.var_count();
        sep_sets.fill_defaults(n);
        for x in 0..n {
            for y in 0..n {
                if x != y {
                    finder.register_sep_sets(x, y, sep_sets.get(x, y));
                }
            }
        }
        for (from, to) in finder.find_arrows(graph, verbose)? {
            let (Some(start), Some(end)) = (graph.var_index(&from), graph.var_index(&to)) else {
                return Err(GraphError::VariableSetMismatch {
                    reason: format!("arrow finder returned unknown variables {from:?} -> {to:?}"),
                });
            };
            if !graph.has_preset_arrow(start, end) && !graph.has_preset_arrow(end, start) {
                info!(from = %from, to = %to, "arrow finder adds arrow");
                graph.put_arrow(start, end, true)?;
            }
        }
        Ok(())
    }
}
