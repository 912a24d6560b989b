use hydrate_node::{DomainValue, Node};
use hydrate_registry::TypeRegistry;
use serde_json::Value;

use crate::config::CodecConfig;
use crate::decode::Decoder;
use crate::encode::Encoder;
use crate::error::CodecResult;

/// A registry and a validated configuration, used together.
///
/// Holds the registry by reference: one registry can back any number of
/// codecs, on any number of threads.
#[derive(Clone, Debug)]
pub struct Codec<'r> {
    registry: &'r TypeRegistry,
    config: CodecConfig,
}

impl<'r> Codec<'r> {
    /// Create a codec, rejecting an invalid configuration.
    pub fn new(registry: &'r TypeRegistry, config: CodecConfig) -> CodecResult<Self> {
        config.validate()?;
        Ok(Self { registry, config })
    }

    /// A codec with the default keys and strict unknown-tag handling.
    pub fn with_defaults(registry: &'r TypeRegistry) -> Self {
        Self {
            registry,
            config: CodecConfig::default(),
        }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn registry(&self) -> &TypeRegistry {
        self.registry
    }

    pub fn decoder(&self) -> Decoder<'_> {
        Decoder::new(self.registry, &self.config)
    }

    pub fn encoder(&self) -> Encoder<'_> {
        Encoder::new(&self.config)
    }

    pub fn decode(&self, node: Node) -> CodecResult<Node> {
        self.decoder().decode(node)
    }

    pub fn encode(&self, node: Node) -> CodecResult<Node> {
        self.encoder().encode(node)
    }

    pub fn encode_value(&self, value: &DomainValue) -> CodecResult<Node> {
        self.encoder().encode_value(value)
    }

    /// Decode a parsed JSON value.
    pub fn decode_json(&self, value: Value) -> CodecResult<Node> {
        self.decode(Node::from_json(value))
    }

    /// Parse JSON text and decode it.
    pub fn decode_str(&self, text: &str) -> CodecResult<Node> {
        self.decode(Node::from_json_str(text)?)
    }

    /// Encode `node` into a JSON value.
    pub fn to_json(&self, node: Node) -> CodecResult<Value> {
        Ok(self.encode(node)?.into_json()?)
    }

    /// Encode `node` into compact JSON text.
    pub fn to_json_string(&self, node: Node) -> CodecResult<String> {
        Ok(serde_json::to_string(&self.encode(node)?)?)
    }

    /// Encode `node` into indented JSON text.
    pub fn to_json_string_pretty(&self, node: Node) -> CodecResult<String> {
        Ok(serde_json::to_string_pretty(&self.encode(node)?)?)
    }
}

/// Decode `node` against `registry` under `config`.
pub fn decode(node: Node, registry: &TypeRegistry, config: &CodecConfig) -> CodecResult<Node> {
    config.validate()?;
    Decoder::new(registry, config).decode(node)
}

/// Encode `node` under `config`.
pub fn encode(node: Node, config: &CodecConfig) -> CodecResult<Node> {
    config.validate()?;
    Encoder::new(config).encode(node)
}
