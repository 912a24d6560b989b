use hydrate_node::{NodeError, PayloadError};
use thiserror::Error;

/// Errors produced while decoding or encoding a node tree.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The tag key is present but does not hold a string.
    #[error("tag key {key:?} must hold a string, found {found}")]
    MalformedTag { key: String, found: &'static str },

    /// Strict mode met a tag with no registered constructor.
    #[error("unknown tag: {0}")]
    UnknownTag(String),

    /// A registered constructor rejected its payload.
    #[error("failed to construct {tag}: {source}")]
    Construction {
        tag: String,
        #[source]
        source: PayloadError,
    },

    /// The tree nests deeper than the configured limit.
    #[error("document nests deeper than the limit of {limit}")]
    DepthExceeded { limit: usize },

    /// A domain value could not produce its payload.
    #[error("failed to describe {tag}: {source}")]
    Describe {
        tag: String,
        #[source]
        source: PayloadError,
    },

    #[error("invalid codec configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Node(#[from] NodeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
