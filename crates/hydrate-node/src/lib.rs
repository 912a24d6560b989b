//! Generic document tree for hydrate.
//!
//! A parsed document is a tree of untyped [`Node`]s: scalars, sequences, and
//! ordered [`Mapping`]s. Decoding replaces tagged mappings with hydrated
//! [`DomainValue`]s, which live in the same tree as [`Node::Object`].
//!
//! # Key Types
//!
//! - [`Node`]: One value of the tree, either untyped or hydrated
//! - [`Mapping`]: Ordered key/value entries with unique keys
//! - [`Describe`]: Capability a domain type implements to be encodable
//! - [`DomainValue`]: Shared, type-erased handle to a hydrated value
//! - [`PayloadError`]: Failure reported by a constructor reading its payload

pub mod error;
pub mod json;
pub mod mapping;
pub mod node;
pub mod object;
pub mod payload;

pub use error::{NodeError, NodeResult, PayloadError};
pub use mapping::Mapping;
pub use node::Node;
pub use object::{Describe, DomainValue};

/// Re-exported so constructors can build numeric nodes without a direct
/// `serde_json` dependency.
pub use serde_json::Number;
