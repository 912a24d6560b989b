//! Bridge between [`Node`] and `serde_json`.
//!
//! Parsing is delegated to `serde_json`, whose recursion limit bounds the
//! depth of any parsed document. Hydrated objects have no serialized form of
//! their own; they must be encoded into tagged mappings first.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Error as _, Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::error::{NodeError, NodeResult};
use crate::mapping::Mapping;
use crate::node::Node;

impl Node {
    /// Convert a parsed JSON value. Object key order is preserved.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from_json).collect()),
            Value::Object(object) => {
                let mut map = Mapping::with_capacity(object.len());
                for (key, value) in object {
                    map.push_unique(key, Self::from_json(value));
                }
                Self::Mapping(map)
            }
        }
    }

    /// Convert into a JSON value.
    ///
    /// Fails with [`NodeError::UnencodedObject`] if a hydrated object is
    /// still present anywhere in the tree.
    pub fn into_json(self) -> NodeResult<Value> {
        Ok(match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(b),
            Self::Number(n) => Value::Number(n),
            Self::String(s) => Value::String(s),
            Self::Sequence(items) => Value::Array(
                items
                    .into_iter()
                    .map(Self::into_json)
                    .collect::<NodeResult<_>>()?,
            ),
            Self::Mapping(map) => {
                let mut object = serde_json::Map::with_capacity(map.len());
                for (key, value) in map {
                    object.insert(key, value.into_json()?);
                }
                Value::Object(object)
            }
            Self::Object(value) => {
                return Err(NodeError::UnencodedObject {
                    tag: value.tag().to_owned(),
                })
            }
        })
    }

    /// Parse JSON text into a node tree.
    pub fn from_json_str(text: &str) -> NodeResult<Self> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_json(value))
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Self::from_json(value)
    }
}

impl TryFrom<Node> for Value {
    type Error = NodeError;

    fn try_from(node: Node) -> NodeResult<Self> {
        node.into_json()
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::Sequence(items) => serializer.collect_seq(items),
            Self::Mapping(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map.iter() {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
            Self::Object(value) => Err(S::Error::custom(format!(
                "hydrated object tagged {:?} must be encoded before serialization",
                value.tag()
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_json)
    }
}
