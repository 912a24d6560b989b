use serde_json::Number;

use crate::mapping::Mapping;
use crate::object::DomainValue;

/// A single value in a document tree.
///
/// The first six variants are the untyped shapes a serialization parser
/// produces. [`Node::Object`] holds a hydrated domain value and only appears
/// after decoding, in place of the tagged mapping it was built from.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Node {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<Node>),
    Mapping(Mapping),
    Object(DomainValue),
}

impl Node {
    /// Short name of this node's variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
            Self::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for sequences and mappings.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Sequence(_) | Self::Mapping(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    /// Numeric value as `f64`. Integers are converted.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&DomainValue> {
        match self {
            Self::Object(value) => Some(value),
            _ => None,
        }
    }

    /// Nesting depth of sequences and mappings below and including this node.
    ///
    /// Scalars and hydrated objects have depth 0, `[]` has depth 1, and
    /// `[[1]]` has depth 2. Computed with an explicit stack, so it is safe
    /// on trees of any depth.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 0usize)];
        while let Some((node, above)) = stack.pop() {
            match node {
                Self::Sequence(items) => {
                    deepest = deepest.max(above + 1);
                    stack.extend(items.iter().map(|child| (child, above + 1)));
                }
                Self::Mapping(map) => {
                    deepest = deepest.max(above + 1);
                    stack.extend(map.values().map(|child| (child, above + 1)));
                }
                _ => {}
            }
        }
        deepest
    }

    /// Release this tree without recursion.
    ///
    /// The derived drop glue recurses once per nesting level, which can
    /// exhaust the stack on adversarially deep input. Containers are emptied
    /// onto a heap stack before they are dropped.
    pub fn dismantle(self) {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                Self::Sequence(items) => stack.extend(items),
                Self::Mapping(map) => stack.extend(map.into_values()),
                _ => {}
            }
        }
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for Node {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u32> for Node {
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

/// Non-finite floats have no serialized form and become [`Node::Null`].
impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Self::Sequence(items)
    }
}

impl From<Mapping> for Node {
    fn from(map: Mapping) -> Self {
        Self::Mapping(map)
    }
}

impl From<DomainValue> for Node {
    fn from(value: DomainValue) -> Self {
        Self::Object(value)
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
