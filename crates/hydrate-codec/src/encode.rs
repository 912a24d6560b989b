use hydrate_node::{DomainValue, Mapping, Node};

use crate::config::CodecConfig;
use crate::error::{CodecError, CodecResult};
use crate::walk::{self, Opened, Rewrite};

/// Writes hydrated objects back out as tagged mappings.
///
/// The inverse of [`Decoder`](crate::Decoder): every [`Node::Object`] becomes
/// `{tag_key: tag, data_key: payload}`, with the payload encoded in turn.
/// Generic nodes are rebuilt unchanged.
pub struct Encoder<'a> {
    config: &'a CodecConfig,
}

impl<'a> Encoder<'a> {
    pub fn new(config: &'a CodecConfig) -> Self {
        Self { config }
    }

    /// Encode `node`, consuming it. The result holds no objects.
    pub fn encode(&self, node: Node) -> CodecResult<Node> {
        walk::rewrite(self, node)
    }

    pub fn encode_value(&self, value: &DomainValue) -> CodecResult<Node> {
        self.encode(Node::Object(value.clone()))
    }
}

impl Rewrite for Encoder<'_> {
    type Wrapper = String;

    fn max_depth(&self) -> usize {
        self.config.max_depth
    }

    /// An object takes a nesting level: it becomes a mapping.
    fn opens(&self, node: &Node) -> bool {
        node.is_container() || matches!(node, Node::Object(_))
    }

    fn open(&self, node: Node) -> CodecResult<Opened<String>> {
        match node {
            Node::Object(value) => {
                let tag = value.tag().to_owned();
                match value.payload() {
                    Ok(payload) => Ok(Opened::Wrap {
                        wrapper: tag,
                        payload: Some(payload),
                    }),
                    Err(source) => Err(CodecError::Describe { tag, source }),
                }
            }
            other => Ok(Opened::Keep(other)),
        }
    }

    fn close(&self, tag: String, payload: Node) -> CodecResult<Node> {
        let mut map = Mapping::with_capacity(2);
        map.insert(self.config.tag_key.as_str(), Node::String(tag));
        map.insert(self.config.data_key.as_str(), payload);
        Ok(Node::Mapping(map))
    }
}
