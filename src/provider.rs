//! Type identity and type-erased values
//!
//! Bindings are keyed by [`TypeKey`] and hold their values as [`Instance`]s,
//! so the registry can store any injectable type behind a single shape.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Marker trait for types that can be bound in a registry.
///
/// This is automatically implemented for all types that are `Send + Sync + 'static`.
/// You never need to implement this manually.
pub trait Injectable: Send + Sync + 'static {}

// Blanket implementation - everything that's Send + Sync + 'static is Injectable
impl<T: Send + Sync + 'static> Injectable for T {}

/// Runtime identifier of a bound type.
///
/// Two keys are equal exactly when their `TypeId`s are; the name only
/// serves error messages and logs.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Key for type `T`
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether a value of type `self` may be stored under `target`.
    ///
    /// Matching is nominal: no subtyping or coercion is attempted.
    #[inline]
    pub fn is_convertible_to(&self, target: &TypeKey) -> bool {
        self.id == target.id
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A type-erased value tagged with its concrete type.
///
/// Cloning shares the underlying allocation.
#[derive(Clone)]
pub struct Instance {
    key: TypeKey,
    value: Arc<dyn Any + Send + Sync>,
}

impl Instance {
    /// Wrap an owned value
    #[inline]
    pub fn new<T: Injectable>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Wrap an existing `Arc` without copying the value
    #[inline]
    pub fn from_arc<T: Injectable>(value: Arc<T>) -> Self {
        Self {
            key: TypeKey::of::<T>(),
            value: value as Arc<dyn Any + Send + Sync>,
        }
    }

    /// The concrete type of the wrapped value
    #[inline]
    pub fn type_key(&self) -> TypeKey {
        self.key
    }

    /// Downcast to `Arc<T>`, returning `None` on a type mismatch
    #[inline]
    pub fn downcast<T: Injectable>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.value).downcast::<T>().ok()
    }

    /// Whether both instances point at the same allocation
    #[inline]
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance").field("type", &self.key).finish()
    }
}
