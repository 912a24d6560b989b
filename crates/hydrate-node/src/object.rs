use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::PayloadError;
use crate::node::Node;

/// Capability a domain type implements to be encoded as a tagged node.
///
/// Every encodable type names its own tag and produces its own payload.
/// Nothing is discovered by inspecting the value at runtime.
pub trait Describe: fmt::Debug + Send + Sync + 'static {
    /// The tag this value is written under.
    fn tag(&self) -> &str;

    /// The constructor payload for this value.
    ///
    /// The payload may contain further [`Node::Object`]s; the encoder wraps
    /// them in turn.
    fn payload(&self) -> Result<Node, PayloadError>;
}

/// Object-safe extension of [`Describe`] used behind [`DomainValue`].
trait DomainObject: Describe {
    fn as_any(&self) -> &dyn Any;
    fn eq_object(&self, other: &dyn DomainObject) -> bool;
}

impl<T: Describe + PartialEq> DomainObject for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_object(&self, other: &dyn DomainObject) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }
}

/// A hydrated domain value.
///
/// A shared handle to any [`Describe`] type. Cloning is cheap. Two handles
/// are equal when they hold values of the same concrete type that compare
/// equal under that type's `PartialEq`.
#[derive(Clone)]
pub struct DomainValue(Arc<dyn DomainObject>);

impl DomainValue {
    pub fn new<T: Describe + PartialEq>(value: T) -> Self {
        Self(Arc::new(value))
    }

    pub fn tag(&self) -> &str {
        self.0.tag()
    }

    pub fn payload(&self) -> Result<Node, PayloadError> {
        self.0.payload()
    }

    /// Borrow the concrete value if it is a `T`.
    pub fn downcast_ref<T: Describe>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    pub fn is<T: Describe>(&self) -> bool {
        self.0.as_any().is::<T>()
    }

    /// Returns `true` if both handles point at the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for DomainValue {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0.eq_object(&*other.0)
    }
}

impl fmt::Debug for DomainValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}
