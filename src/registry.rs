//! The autowiring registry
//!
//! A `Registry` holds the bindings of one autowiring scope together with the
//! property map it shares with the built-in [`Properties`] binding.

use crate::storage::BindingStorage;
use crate::{Binding, DiError, Injectable, Instance, IntoConstructor, Properties, Provided, Result, TypeKey};
use std::sync::Arc;

#[cfg(feature = "logging")]
use tracing::{debug, trace};

/// Registry of type bindings with lazy, recursive constructor injection.
///
/// Registration and resolution take `&mut self`; a registry is meant to be
/// driven from one place at a time. See [`crate::global`] for the
/// process-wide default registry.
///
/// # Examples
///
/// ```rust
/// use autowire::Registry;
///
/// #[derive(Clone)]
/// struct Work { description: String }
///
/// struct Employee { work: Work }
///
/// let mut registry = Registry::new();
/// registry.bind(Work { description: "typing".into() }).unwrap();
/// registry
///     .bind_constructor::<Employee, _>(|work: Work| Employee { work }, false)
///     .unwrap();
///
/// let employee = registry.resolve::<Employee>(false).unwrap();
/// assert_eq!(employee.work.description, "typing");
/// ```
pub struct Registry {
    storage: BindingStorage,
    properties: Properties,
}

impl Registry {
    /// Create a registry holding only the built-in `Properties` binding.
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a registry with room for `capacity` bindings besides the
    /// built-in one.
    pub fn with_capacity(capacity: usize) -> Self {
        let properties = Properties::new();
        let mut storage = BindingStorage::with_capacity(capacity + 1);
        storage.insert(Binding::new(
            TypeKey::of::<Properties>(),
            Instance::new(properties.clone()),
            false,
            false,
        ));

        #[cfg(feature = "logging")]
        debug!(target: "autowire", "Creating new registry");

        Self {
            storage,
            properties,
        }
    }

    // =========================================================================
    // Registration Methods
    // =========================================================================

    /// Bind a plain value under its own type.
    ///
    /// Re-binding a type replaces the previous binding in place.
    #[inline]
    pub fn bind<T: Injectable>(&mut self, value: T) -> Result<()> {
        self.register(TypeKey::of::<T>(), Instance::new(value), false, false)
    }

    /// Bind a value already behind an `Arc`, keeping the allocation.
    #[inline]
    pub fn bind_arc<T: Injectable>(&mut self, value: Arc<T>) -> Result<()> {
        self.register(TypeKey::of::<T>(), Instance::from_arc(value), false, false)
    }

    /// Bind a constructor producing `T`.
    ///
    /// Each constructor parameter is resolved from the registry by its exact
    /// type when `T` is resolved. With `prototype` set, every resolution
    /// invokes the constructor again; otherwise the first result is cached.
    ///
    /// Fails without touching the registry when the constructor produces
    /// nothing or produces a type other than `T`.
    ///
    /// ```rust
    /// use autowire::Registry;
    ///
    /// struct Report(String);
    ///
    /// let mut registry = Registry::new();
    /// let err = registry
    ///     .bind_constructor::<Report, _>(|| String::from("oops"), false)
    ///     .unwrap_err();
    /// assert!(err.is_validation());
    /// assert!(!registry.contains::<Report>());
    /// ```
    #[inline]
    pub fn bind_constructor<T: Injectable, Args>(
        &mut self,
        ctor: impl IntoConstructor<Args>,
        prototype: bool,
    ) -> Result<()> {
        self.register(TypeKey::of::<T>(), ctor.into_constructor(), true, prototype)
    }

    /// Type-erased registration underlying `bind` and `bind_constructor`.
    ///
    /// The binding is validated first; a rejected binding leaves the
    /// registry unchanged.
    pub fn register(
        &mut self,
        target: TypeKey,
        provided: impl Into<Provided>,
        is_constructor: bool,
        prototype: bool,
    ) -> Result<()> {
        let binding = Binding::new(target, provided, is_constructor, prototype);

        if let Err(err) = binding.validate(is_constructor) {
            #[cfg(feature = "logging")]
            debug!(
                target: "autowire",
                service = target.name(),
                error = %err,
                "Rejected binding"
            );
            return Err(err);
        }

        let _replaced = self.storage.insert(binding);

        #[cfg(feature = "logging")]
        debug!(
            target: "autowire",
            service = target.name(),
            constructor = is_constructor,
            prototype = prototype,
            replaced = _replaced,
            binding_count = self.storage.len(),
            "Registered binding"
        );

        Ok(())
    }

    /// Insert or overwrite a property.
    ///
    /// The map is shared with every injected [`Properties`] handle.
    #[inline]
    pub fn set_property<V: Injectable>(&self, key: impl Into<String>, value: V) {
        self.properties.set(key, value);
    }

    /// Handle to this registry's property map
    #[inline]
    pub fn properties(&self) -> Properties {
        self.properties.clone()
    }

    // =========================================================================
    // Resolution Methods
    // =========================================================================

    /// Resolve `T` with all its dependencies.
    ///
    /// With `force_rebind`, cached values along the whole dependency chain
    /// are ignored and recomputed.
    pub fn resolve<T: Injectable>(&mut self, force_rebind: bool) -> Result<Arc<T>> {
        #[cfg(feature = "logging")]
        trace!(
            target: "autowire",
            service = std::any::type_name::<T>(),
            force_rebind = force_rebind,
            "Resolving binding"
        );

        let instance = self.resolve_key(&TypeKey::of::<T>(), force_rebind)?;
        downcast::<T>(&instance)
    }

    /// Type-erased form of [`resolve`](Self::resolve).
    #[inline]
    pub fn resolve_key(&mut self, key: &TypeKey, force_rebind: bool) -> Result<Instance> {
        self.storage.resolve_key(key, force_rebind)
    }

    /// Resolve `T`, returning `None` on any failure.
    #[inline]
    pub fn try_resolve<T: Injectable>(&mut self, force_rebind: bool) -> Option<Arc<T>> {
        self.resolve::<T>(force_rebind).ok()
    }

    /// Resolve a one-off constructor against this registry.
    ///
    /// The constructor is validated like a registered one, but it is never
    /// stored. Its dependencies are resolved against a scratch copy of the
    /// bindings, so neither the result nor anything built on the way is
    /// cached for later lookups.
    pub fn resolve_with_constructor<T: Injectable, Args>(
        &self,
        ctor: impl IntoConstructor<Args>,
        force_rebind: bool,
    ) -> Result<Arc<T>> {
        let mut binding = Binding::new(TypeKey::of::<T>(), ctor.into_constructor(), true, false);
        binding.validate(true)?;

        #[cfg(feature = "logging")]
        trace!(
            target: "autowire",
            service = std::any::type_name::<T>(),
            force_rebind = force_rebind,
            "Resolving ad hoc constructor"
        );

        let mut scope = self.storage.clone();
        let instance = binding.resolve(&mut scope, force_rebind)?;
        downcast::<T>(&instance)
    }

    // =========================================================================
    // Query Methods
    // =========================================================================

    /// Check if a binding for `T` is registered.
    #[inline]
    pub fn contains<T: Injectable>(&self) -> bool {
        self.storage.contains(&TypeKey::of::<T>())
    }

    /// The binding registered for `key`
    #[inline]
    pub fn binding(&self, key: &TypeKey) -> Option<&Binding> {
        self.storage.get(key)
    }

    /// Number of bindings, including the built-in `Properties` binding.
    #[inline]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Always `false`: the built-in `Properties` binding is never removed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Bound types in registration order.
    pub fn registered_types(&self) -> Vec<TypeKey> {
        self.storage.type_keys()
    }
}

fn downcast<T: Injectable>(instance: &Instance) -> Result<Arc<T>> {
    instance
        .downcast::<T>()
        .ok_or_else(|| DiError::not_convertible(instance.type_key(), TypeKey::of::<T>()))
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("bindings", &self.storage)
            .field("properties", &self.properties)
            .finish()
    }
}
