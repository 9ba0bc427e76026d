//! Orientation engine: collider detection plus the fixpoint propagation
//! loop over Zhang's rules.

pub(crate) mod colliders;
pub mod extended;
pub mod rules;

pub use extended::{
    apply_extended_rules, apply_rule10, apply_rule4, apply_rule5, apply_rule6, apply_rule7,
    apply_rule8, apply_rule9,
};
pub use rules::{apply_rule1, apply_rule2, apply_rule3};

use tangle_core::errors::GraphError;
use tangle_core::graph::PagGraph;
use tangle_core::sepsets::SepSetRegistry;

use crate::config::PcConfig;

/// Built-in orientation: collider scoring, then R1 (plus R2/R3 when
/// acyclicity is assumed) applied repeatedly until a full pass changes
/// nothing.
pub(crate) fn orient_builtin(
    graph: &mut PagGraph,
    sep_sets: &SepSetRegistry,
    config: &PcConfig,
) -> Result<(), GraphError> {
    colliders::orient_colliders(graph, sep_sets, config.collider_mode)?;
    loop {
        let mut changed = apply_rule1(graph)?;
        if config.acyclicity {
            changed |= apply_rule2(graph)?;
            changed |= apply_rule3(graph)?;
        }
        if !changed {
            break;
        }
    }
    Ok(())
}
