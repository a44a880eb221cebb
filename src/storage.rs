//! Ordered binding storage and the resolution walk
//!
//! Bindings are kept in registration order and are unique by target type.
//! Resolution is a depth-first walk over this storage: each constructor
//! parameter is looked up by exact type and resolved recursively before the
//! constructor runs.

use crate::binding::{Binding, Step};
use crate::{Constructor, DiError, Instance, Result, TypeKey};

#[cfg(feature = "logging")]
use tracing::debug;

/// Insertion-ordered bindings, unique by target type.
#[derive(Clone, Default)]
pub struct BindingStorage {
    bindings: Vec<Binding>,
}

impl BindingStorage {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with pre-allocated capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bindings: Vec::with_capacity(capacity),
        }
    }

    /// Position of the binding for `key`, if any
    #[inline]
    pub fn position(&self, key: &TypeKey) -> Option<usize> {
        self.bindings.iter().position(|b| b.matches(key))
    }

    #[inline]
    pub fn get(&self, key: &TypeKey) -> Option<&Binding> {
        self.position(key).map(|index| &self.bindings[index])
    }

    #[inline]
    pub fn contains(&self, key: &TypeKey) -> bool {
        self.position(key).is_some()
    }

    /// Insert a binding, replacing any binding for the same type in place.
    ///
    /// Returns `true` when an existing binding was replaced.
    pub fn insert(&mut self, binding: Binding) -> bool {
        match self.position(&binding.target()) {
            Some(index) => {
                self.bindings[index] = binding;
                true
            }
            None => {
                self.bindings.push(binding);
                false
            }
        }
    }

    /// Resolve the binding for `key`.
    pub fn resolve_key(&mut self, key: &TypeKey, force_rebind: bool) -> Result<Instance> {
        let index = self.position(key).ok_or_else(|| {
            #[cfg(feature = "logging")]
            debug!(
                target: "autowire",
                service = key.name(),
                "No binding registered for type"
            );
            DiError::not_found_key(*key)
        })?;

        self.resolve_at(index, force_rebind)
    }

    /// Resolve the binding stored at `index`, caching per its policy.
    pub(crate) fn resolve_at(&mut self, index: usize, force_rebind: bool) -> Result<Instance> {
        match self.bindings[index].begin(force_rebind)? {
            Step::Ready(value) => Ok(value),
            Step::Construct(ctor) => {
                let value = self.construct(&ctor, force_rebind)?;
                self.bindings[index].finish(&value);
                Ok(value)
            }
        }
    }

    /// Resolve every parameter of `ctor` in declaration order, then invoke it.
    ///
    /// A missing or failing dependency aborts before `ctor` runs. There is
    /// no cycle guard: a binding that (transitively) depends on itself
    /// recurses until the stack is exhausted.
    pub(crate) fn construct(&mut self, ctor: &Constructor, force_rebind: bool) -> Result<Instance> {
        let mut args = Vec::with_capacity(ctor.params().len());
        for param in ctor.params() {
            args.push(self.resolve_key(param, force_rebind)?);
        }
        ctor.invoke(&args)
    }

    /// Target types in registration order
    pub fn type_keys(&self) -> Vec<TypeKey> {
        self.bindings.iter().map(Binding::target).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl std::fmt::Debug for BindingStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingStorage")
            .field("types", &self.type_keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IntoConstructor;
    use std::sync::Mutex;

    #[derive(Clone, Debug, PartialEq)]
    struct Work(&'static str);

    #[derive(Clone, Debug, PartialEq)]
    struct Desk(u32);

    #[derive(Debug, PartialEq)]
    struct Office {
        work: Work,
        desk: Desk,
    }

    fn plain<T: crate::Injectable>(value: T) -> Binding {
        Binding::new(TypeKey::of::<T>(), Instance::new(value), false, false)
    }

    #[test]
    fn test_insert_and_position() {
        let mut storage = BindingStorage::new();
        assert!(!storage.insert(plain(Work("a"))));
        assert!(!storage.insert(plain(Desk(1))));

        assert_eq!(storage.position(&TypeKey::of::<Work>()), Some(0));
        assert_eq!(storage.position(&TypeKey::of::<Desk>()), Some(1));
        assert_eq!(storage.position(&TypeKey::of::<Office>()), None);
        assert!(storage.contains(&TypeKey::of::<Desk>()));
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut storage = BindingStorage::new();
        storage.insert(plain(Work("a")));
        storage.insert(plain(Desk(1)));
        assert!(storage.insert(plain(Work("b"))));

        assert_eq!(storage.len(), 2);
        assert_eq!(
            storage.type_keys(),
            vec![TypeKey::of::<Work>(), TypeKey::of::<Desk>()]
        );

        let work = storage.resolve_key(&TypeKey::of::<Work>(), false).unwrap();
        assert_eq!(*work.downcast::<Work>().unwrap(), Work("b"));
    }

    #[test]
    fn test_dependencies_resolve_in_declaration_order() {
        let order = std::sync::Arc::new(Mutex::new(Vec::new()));

        let mut storage = BindingStorage::new();
        let log = order.clone();
        storage.insert(Binding::new(
            TypeKey::of::<Desk>(),
            (move || {
                log.lock().unwrap().push("desk");
                Desk(7)
            })
            .into_constructor(),
            true,
            false,
        ));
        let log = order.clone();
        storage.insert(Binding::new(
            TypeKey::of::<Work>(),
            (move || {
                log.lock().unwrap().push("work");
                Work("typing")
            })
            .into_constructor(),
            true,
            false,
        ));
        storage.insert(Binding::new(
            TypeKey::of::<Office>(),
            (|work: Work, desk: Desk| Office { work, desk }).into_constructor(),
            true,
            false,
        ));

        let office = storage.resolve_key(&TypeKey::of::<Office>(), false).unwrap();
        assert_eq!(
            *office.downcast::<Office>().unwrap(),
            Office {
                work: Work("typing"),
                desk: Desk(7)
            }
        );
        assert_eq!(*order.lock().unwrap(), vec!["work", "desk"]);
    }

    #[test]
    fn test_missing_dependency_aborts_before_invocation() {
        let invoked = std::sync::Arc::new(Mutex::new(false));
        let flag = invoked.clone();

        let mut storage = BindingStorage::new();
        storage.insert(plain(Work("typing")));
        storage.insert(Binding::new(
            TypeKey::of::<Office>(),
            (move |work: Work, desk: Desk| {
                *flag.lock().unwrap() = true;
                Office { work, desk }
            })
            .into_constructor(),
            true,
            false,
        ));

        let err = storage
            .resolve_key(&TypeKey::of::<Office>(), false)
            .unwrap_err();
        assert_eq!(err, DiError::not_found::<Desk>());
        assert!(!*invoked.lock().unwrap());
        assert!(!storage.get(&TypeKey::of::<Office>()).unwrap().is_cached());
    }

    #[test]
    fn test_resolve_unknown_key() {
        let mut storage = BindingStorage::new();
        assert_eq!(
            storage.resolve_key(&TypeKey::of::<Work>(), false).unwrap_err(),
            DiError::not_found::<Work>()
        );
    }
}
