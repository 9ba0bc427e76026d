//! Error handling for tangle.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod format_error;
pub mod graph_error;

pub use format_error::FormatError;
pub use graph_error::GraphError;
