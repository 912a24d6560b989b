use thiserror::Error;

/// Errors produced while converting nodes to and from serialized form.
#[derive(Debug, Error)]
pub enum NodeError {
    /// A hydrated object was still present where only generic nodes are allowed.
    #[error("hydrated object tagged {tag:?} must be encoded before serialization")]
    UnencodedObject { tag: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for node conversions.
pub type NodeResult<T> = Result<T, NodeError>;

/// Errors a constructor or a [`Describe`](crate::Describe) implementation
/// reports about a payload.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("payload must be a mapping, found {found}")]
    NotAMapping { found: &'static str },

    #[error("payload must be a sequence, found {found}")]
    NotASequence { found: &'static str },

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("field {field:?}: expected {expected}, found {found}")]
    WrongType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid payload: {0}")]
    Invalid(String),
}

impl PayloadError {
    /// Shorthand for [`PayloadError::Invalid`].
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid(reason.into())
    }
}
