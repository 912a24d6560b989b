//! Field accessors for constructor payloads.
//!
//! Constructors receive their payload as an already-decoded [`Node`]. These
//! helpers pull typed fields out of it and report which field was wrong.
//! `require_*` fails when the field is absent; `optional_*` treats an absent
//! field or an explicit null as `None` but still rejects the wrong type.

use std::any::type_name;

use crate::error::PayloadError;
use crate::mapping::Mapping;
use crate::node::Node;
use crate::object::Describe;

impl Node {
    /// Borrow this payload as a mapping.
    pub fn expect_mapping(&self) -> Result<&Mapping, PayloadError> {
        self.as_mapping()
            .ok_or(PayloadError::NotAMapping { found: self.kind() })
    }

    /// Take this payload as a mapping.
    pub fn into_mapping(self) -> Result<Mapping, PayloadError> {
        match self {
            Self::Mapping(map) => Ok(map),
            other => Err(PayloadError::NotAMapping { found: other.kind() }),
        }
    }

    /// Take this payload as a sequence.
    pub fn into_sequence(self) -> Result<Vec<Node>, PayloadError> {
        match self {
            Self::Sequence(items) => Ok(items),
            other => Err(PayloadError::NotASequence { found: other.kind() }),
        }
    }

    /// Borrow the hydrated `T` held by this node.
    pub fn object_ref<T: Describe>(&self) -> Option<&T> {
        self.as_object().and_then(|value| value.downcast_ref::<T>())
    }
}

impl Mapping {
    pub fn require(&self, field: &str) -> Result<&Node, PayloadError> {
        self.get(field)
            .ok_or_else(|| PayloadError::MissingField(field.to_owned()))
    }

    pub fn require_str(&self, field: &str) -> Result<&str, PayloadError> {
        typed(self.require(field)?, field, "string", Node::as_str)
    }

    pub fn require_i64(&self, field: &str) -> Result<i64, PayloadError> {
        typed(self.require(field)?, field, "integer", Node::as_i64)
    }

    pub fn require_u64(&self, field: &str) -> Result<u64, PayloadError> {
        typed(self.require(field)?, field, "unsigned integer", Node::as_u64)
    }

    pub fn require_f64(&self, field: &str) -> Result<f64, PayloadError> {
        typed(self.require(field)?, field, "number", Node::as_f64)
    }

    pub fn require_bool(&self, field: &str) -> Result<bool, PayloadError> {
        typed(self.require(field)?, field, "bool", Node::as_bool)
    }

    pub fn require_sequence(&self, field: &str) -> Result<&[Node], PayloadError> {
        typed(self.require(field)?, field, "sequence", Node::as_sequence)
    }

    pub fn require_mapping(&self, field: &str) -> Result<&Mapping, PayloadError> {
        typed(self.require(field)?, field, "mapping", Node::as_mapping)
    }

    /// Borrow a nested hydrated value of type `T`.
    pub fn require_object<T: Describe>(&self, field: &str) -> Result<&T, PayloadError> {
        typed(self.require(field)?, field, type_name::<T>(), Node::object_ref::<T>)
    }

    pub fn optional_str(&self, field: &str) -> Result<Option<&str>, PayloadError> {
        self.optional(field, "string", Node::as_str)
    }

    pub fn optional_i64(&self, field: &str) -> Result<Option<i64>, PayloadError> {
        self.optional(field, "integer", Node::as_i64)
    }

    pub fn optional_u64(&self, field: &str) -> Result<Option<u64>, PayloadError> {
        self.optional(field, "unsigned integer", Node::as_u64)
    }

    pub fn optional_f64(&self, field: &str) -> Result<Option<f64>, PayloadError> {
        self.optional(field, "number", Node::as_f64)
    }

    pub fn optional_bool(&self, field: &str) -> Result<Option<bool>, PayloadError> {
        self.optional(field, "bool", Node::as_bool)
    }

    pub fn optional_object<T: Describe>(&self, field: &str) -> Result<Option<&T>, PayloadError> {
        self.optional(field, type_name::<T>(), Node::object_ref::<T>)
    }

    fn optional<'a, T>(
        &'a self,
        field: &str,
        expected: &'static str,
        get: impl FnOnce(&'a Node) -> Option<T>,
    ) -> Result<Option<T>, PayloadError> {
        match self.get(field) {
            None | Some(Node::Null) => Ok(None),
            Some(node) => typed(node, field, expected, get).map(Some),
        }
    }
}

fn typed<'a, T>(
    node: &'a Node,
    field: &str,
    expected: &'static str,
    get: impl FnOnce(&'a Node) -> Option<T>,
) -> Result<T, PayloadError> {
    get(node).ok_or_else(|| PayloadError::WrongType {
        field: field.to_owned(),
        expected,
        found: node.kind(),
    })
}
