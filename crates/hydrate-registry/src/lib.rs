//! Tag to constructor registry for hydrate.
//!
//! A [`TypeRegistry`] maps each tag string to the function that builds a
//! typed value from that tag's payload. Registries are ordinary owned values:
//! build one, then hand it to the decoder by reference. There is no global
//! registry.
//!
//! ```rust
//! use hydrate_node::{Describe, Mapping, Node, PayloadError};
//! use hydrate_registry::{Hydrate, TypeRegistry};
//!
//! #[derive(Debug, PartialEq)]
//! struct Range { start: i64, end: i64 }
//!
//! impl Describe for Range {
//!     fn tag(&self) -> &str { "Range" }
//!     fn payload(&self) -> Result<Node, PayloadError> {
//!         Ok(Node::Sequence(vec![self.start.into(), self.end.into()]))
//!     }
//! }
//!
//! impl Hydrate for Range {
//!     fn hydrate(payload: Node) -> Result<Self, PayloadError> {
//!         let bounds = payload.into_sequence()?;
//!         match bounds.as_slice() {
//!             [start, end] => Ok(Range {
//!                 start: start.as_i64().ok_or_else(|| PayloadError::invalid("start"))?,
//!                 end: end.as_i64().ok_or_else(|| PayloadError::invalid("end"))?,
//!             }),
//!             _ => Err(PayloadError::invalid("range needs two bounds")),
//!         }
//!     }
//! }
//!
//! let mut registry = TypeRegistry::new();
//! registry.register_type::<Range>("Range");
//! let build = registry.resolve("Range").unwrap();
//! let value = build(Node::Sequence(vec![1.into(), 5.into()])).unwrap();
//! assert_eq!(value.downcast_ref::<Range>(), Some(&Range { start: 1, end: 5 }));
//! ```

pub mod opaque;
pub mod registry;

pub use opaque::OpaqueValue;
pub use registry::{Constructor, FallbackConstructor, Hydrate, TypeRegistry};
