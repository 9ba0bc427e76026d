//! Serialization format errors.

/// Errors raised while reading or writing the canonical text formats.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("expected {expected:?} header, found {found:?}")]
    MissingHeader { expected: String, found: String },

    #[error("malformed line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("unknown variable name {name:?}")]
    UnknownVariable { name: String },

    #[error("unknown link token {token:?}")]
    UnknownLinkToken { token: String },

    #[error(transparent)]
    Graph(#[from] crate::errors::GraphError),
}
