use hydrate_node::{Describe, Node, PayloadError};

/// A tagged value whose domain type is unknown.
///
/// Keeps the tag and decoded payload exactly as read, and describes itself
/// with the same tag and payload. Nested tagged values inside the payload
/// stay hydrated, so they are re-encoded too.
#[derive(Clone, Debug, PartialEq)]
pub struct OpaqueValue {
    tag: String,
    payload: Node,
}

impl OpaqueValue {
    pub fn new(tag: impl Into<String>, payload: Node) -> Self {
        Self {
            tag: tag.into(),
            payload,
        }
    }

    pub fn payload_ref(&self) -> &Node {
        &self.payload
    }

    pub fn into_parts(self) -> (String, Node) {
        (self.tag, self.payload)
    }
}

impl Describe for OpaqueValue {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn payload(&self) -> Result<Node, PayloadError> {
        Ok(self.payload.clone())
    }
}
