use serde::{Deserialize, Serialize};

use crate::error::{CodecError, CodecResult};

/// Mapping key that names a node's tag unless configured otherwise.
pub const DEFAULT_TAG_KEY: &str = "json_class";
/// Mapping key that holds a tagged node's payload unless configured otherwise.
pub const DEFAULT_DATA_KEY: &str = "data";
/// Default nesting limit for decoding and encoding.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// What the decoder does with a tag that has no constructor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownTagPolicy {
    /// Fail the whole decode with [`CodecError::UnknownTag`].
    #[default]
    Strict,
    /// Decode the mapping as if it carried no tag.
    Lenient,
}

/// Configuration shared by the decoder and encoder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Mapping key whose string value names the tag.
    pub tag_key: String,
    /// Mapping key holding the constructor payload.
    pub data_key: String,
    /// Handling of tags with no registered constructor.
    pub unknown_tags: UnknownTagPolicy,
    /// Maximum nesting of sequences and mappings walked in one call.
    pub max_depth: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            tag_key: DEFAULT_TAG_KEY.into(),
            data_key: DEFAULT_DATA_KEY.into(),
            unknown_tags: UnknownTagPolicy::Strict,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CodecConfig {
    /// Default keys; unknown tags fail the decode.
    pub fn strict() -> Self {
        Self::default()
    }

    /// Default keys; unknown tags decode as plain mappings.
    pub fn lenient() -> Self {
        Self {
            unknown_tags: UnknownTagPolicy::Lenient,
            ..Default::default()
        }
    }

    pub fn with_tag_key(mut self, key: impl Into<String>) -> Self {
        self.tag_key = key.into();
        self
    }

    pub fn with_data_key(mut self, key: impl Into<String>) -> Self {
        self.data_key = key.into();
        self
    }

    pub fn with_unknown_tags(mut self, policy: UnknownTagPolicy) -> Self {
        self.unknown_tags = policy;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.unknown_tags == UnknownTagPolicy::Strict
    }

    /// Check that the keys are usable and the depth limit is positive.
    pub fn validate(&self) -> CodecResult<()> {
        if self.tag_key.is_empty() {
            return Err(CodecError::InvalidConfig("tag key must not be empty".into()));
        }
        if self.data_key.is_empty() {
            return Err(CodecError::InvalidConfig("data key must not be empty".into()));
        }
        if self.tag_key == self.data_key {
            return Err(CodecError::InvalidConfig(format!(
                "tag key and data key must differ (both {:?})",
                self.tag_key
            )));
        }
        if self.max_depth == 0 {
            return Err(CodecError::InvalidConfig("max depth must be at least 1".into()));
        }
        Ok(())
    }
}
