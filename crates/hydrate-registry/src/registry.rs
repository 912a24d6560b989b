use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use hydrate_node::{Describe, DomainValue, Node, PayloadError};
use tracing::debug;

use crate::opaque::OpaqueValue;

/// Builds a domain value from a decoded payload.
pub type Constructor = Arc<dyn Fn(Node) -> Result<DomainValue, PayloadError> + Send + Sync>;

/// Builds a domain value for a tag that has no registered constructor.
///
/// Receives the tag alongside the decoded payload.
pub type FallbackConstructor =
    Arc<dyn Fn(&str, Node) -> Result<DomainValue, PayloadError> + Send + Sync>;

/// Typed construction from a payload.
///
/// Implemented by domain types next to [`Describe`]; the pair defines the
/// type's tagged form in both directions. Types that share payload fields
/// share a helper function, not a base type.
pub trait Hydrate: Describe + PartialEq + Sized {
    fn hydrate(payload: Node) -> Result<Self, PayloadError>;
}

/// Mapping from tag to constructor.
///
/// Tags are unique: registering a tag again replaces the earlier
/// constructor. Lookups for unknown tags return `None`; what that means for
/// a decode is the caller's policy.
///
/// The registry is `Send + Sync`. Once built, one instance can serve any
/// number of concurrent decodes by shared reference.
#[derive(Clone, Default)]
pub struct TypeRegistry {
    constructors: HashMap<String, Constructor>,
    fallback: Option<FallbackConstructor>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry that hydrates every tag into an [`OpaqueValue`].
    ///
    /// Useful for moving documents between tag conventions without knowing
    /// their domain types.
    pub fn opaque() -> Self {
        let mut registry = Self::new();
        registry.set_fallback(|tag, payload| Ok(DomainValue::new(OpaqueValue::new(tag, payload))));
        registry
    }

    /// Register `constructor` under `tag`.
    ///
    /// Returns `true` if an earlier constructor for `tag` was replaced.
    pub fn register<F>(&mut self, tag: impl Into<String>, constructor: F) -> bool
    where
        F: Fn(Node) -> Result<DomainValue, PayloadError> + Send + Sync + 'static,
    {
        let tag = tag.into();
        let replaced = self
            .constructors
            .insert(tag.clone(), Arc::new(constructor))
            .is_some();
        debug!(tag = %tag, replaced, "registered constructor");
        replaced
    }

    /// Register `T::hydrate` under `tag`.
    pub fn register_type<T: Hydrate>(&mut self, tag: impl Into<String>) -> bool {
        self.register(tag, |payload| T::hydrate(payload).map(DomainValue::new))
    }

    /// Look up the constructor for `tag`.
    pub fn resolve(&self, tag: &str) -> Option<Constructor> {
        self.constructors.get(tag).cloned()
    }

    /// Remove the constructor for `tag`. Returns `true` if one existed.
    pub fn unregister(&mut self, tag: &str) -> bool {
        self.constructors.remove(tag).is_some()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.constructors.contains_key(tag)
    }

    /// Number of registered tags. The fallback is not counted.
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    /// Registered tags in sorted order.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Install a constructor for tags with no registered entry.
    ///
    /// Consulted only after [`resolve`](Self::resolve) finds nothing.
    pub fn set_fallback<F>(&mut self, constructor: F)
    where
        F: Fn(&str, Node) -> Result<DomainValue, PayloadError> + Send + Sync + 'static,
    {
        self.fallback = Some(Arc::new(constructor));
    }

    pub fn clear_fallback(&mut self) {
        self.fallback = None;
    }

    pub fn fallback(&self) -> Option<FallbackConstructor> {
        self.fallback.clone()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("tags", &self.tags())
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}
