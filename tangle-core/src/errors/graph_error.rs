//! Graph store errors.

/// Errors raised by mutations of a [`crate::graph::PagGraph`].
///
/// Constraint violations (touching preset links or endpoint marks) are hard
/// errors: background knowledge is fixed before inference starts, and an
/// algorithm that tries to override it has gone wrong.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("cannot remove preset link {x}-{y}")]
    PresetLinkRemoval { x: usize, y: usize },

    #[error("cannot overwrite preset endpoint mark at {at} on link {x}-{y}")]
    PresetEndpointOverwrite { x: usize, y: usize, at: usize },

    #[error("no link between {x} and {y}")]
    NoSuchLink { x: usize, y: usize },

    #[error("variable index {index} out of range (graph has {count} variables)")]
    VariableOutOfRange { index: usize, count: usize },

    #[error("invalid variable name {name:?}: {reason}")]
    InvalidVariableName { name: String, reason: String },

    #[error("duplicate variable name {name:?}")]
    DuplicateVariableName { name: String },

    #[error("variable set mismatch: {reason}")]
    VariableSetMismatch { reason: String },
}
