//! # tangle-inference
//!
//! Constraint-based causal discovery over `tangle-core` PAGs: iteratively
//! test conditional independence to prune a fully-connected skeleton, then
//! orient edge endpoints by collider detection and rule propagation until a
//! fixpoint.
//!
//! The independence test itself is pluggable (the [`IndependenceOracle`]
//! trait), as is the orientation strategy (the [`ArrowFinder`] trait, with
//! [`PcArrowFinder`] as the rule-based default).

pub mod config;
pub mod engine;
pub mod finder;
pub mod oracle;
pub mod orientation;
mod skeleton;

pub use config::{ColliderMode, PcConfig, SearchStrategy, StarOptions};
pub use engine::PcEngine;
pub use finder::{ArrowFinder, PcArrowFinder};
pub use oracle::IndependenceOracle;
