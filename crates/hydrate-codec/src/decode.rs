use hydrate_node::{Node, PayloadError};
use hydrate_registry::{Constructor, FallbackConstructor, TypeRegistry};
use tracing::{debug, trace};

use crate::config::{CodecConfig, UnknownTagPolicy};
use crate::error::{CodecError, CodecResult};
use crate::walk::{self, Opened, Rewrite};

/// Hydrates tagged mappings into domain values.
///
/// Walks a node tree and replaces every mapping that carries the configured
/// tag key with the value its registered constructor builds. Payloads are
/// decoded before their constructor runs, so nested tagged values arrive
/// already hydrated. Everything else is rebuilt unchanged, keeping key and
/// element order.
///
/// Keys of a tagged mapping other than the tag key and data key are
/// discarded. A missing data key hands the constructor an empty mapping.
pub struct Decoder<'a> {
    registry: &'a TypeRegistry,
    config: &'a CodecConfig,
}

/// A tagged mapping waiting for its payload.
pub(crate) struct Pending {
    tag: String,
    build: Build,
}

enum Build {
    Registered(Constructor),
    Fallback(FallbackConstructor),
}

impl<'a> Decoder<'a> {
    pub fn new(registry: &'a TypeRegistry, config: &'a CodecConfig) -> Self {
        Self { registry, config }
    }

    pub fn config(&self) -> &CodecConfig {
        self.config
    }

    /// Decode `node`, consuming it.
    pub fn decode(&self, node: Node) -> CodecResult<Node> {
        walk::rewrite(self, node)
    }

    /// Find the constructor for `tag`, applying the unknown-tag policy.
    ///
    /// `Ok(None)` means the mapping is decoded as untagged.
    fn lookup(&self, tag: &str) -> CodecResult<Option<Build>> {
        if let Some(constructor) = self.registry.resolve(tag) {
            return Ok(Some(Build::Registered(constructor)));
        }
        if let Some(fallback) = self.registry.fallback() {
            return Ok(Some(Build::Fallback(fallback)));
        }
        match self.config.unknown_tags {
            UnknownTagPolicy::Strict => Err(CodecError::UnknownTag(tag.to_owned())),
            UnknownTagPolicy::Lenient => {
                debug!(tag, "no constructor for tag; decoding as plain mapping");
                Ok(None)
            }
        }
    }
}

impl Rewrite for Decoder<'_> {
    type Wrapper = Pending;

    fn max_depth(&self) -> usize {
        self.config.max_depth
    }

    fn open(&self, node: Node) -> CodecResult<Opened<Pending>> {
        let mut map = match node {
            Node::Mapping(map) => map,
            other => return Ok(Opened::Keep(other)),
        };
        let tag = match map.get(&self.config.tag_key) {
            None => return Ok(Opened::Keep(Node::Mapping(map))),
            Some(Node::String(tag)) => tag.clone(),
            Some(other) => {
                let found = other.kind();
                Node::Mapping(map).dismantle();
                return Err(CodecError::MalformedTag {
                    key: self.config.tag_key.clone(),
                    found,
                });
            }
        };
        let build = match self.lookup(&tag) {
            Ok(Some(build)) => build,
            Ok(None) => return Ok(Opened::Keep(Node::Mapping(map))),
            Err(e) => {
                Node::Mapping(map).dismantle();
                return Err(e);
            }
        };
        let payload = map.remove(&self.config.data_key);
        Node::Mapping(map).dismantle();
        Ok(Opened::Wrap {
            wrapper: Pending { tag, build },
            payload,
        })
    }

    fn close(&self, pending: Pending, payload: Node) -> CodecResult<Node> {
        let Pending { tag, build } = pending;
        let built: Result<_, PayloadError> = match build {
            Build::Registered(constructor) => constructor(payload),
            Build::Fallback(fallback) => fallback(&tag, payload),
        };
        match built {
            Ok(value) => {
                trace!(tag = %tag, "hydrated tagged mapping");
                Ok(Node::Object(value))
            }
            Err(source) => Err(CodecError::Construction { tag, source }),
        }
    }
}
