//! Shared property store
//!
//! Every registry owns one property map and exposes it to constructors as the
//! built-in [`Properties`] binding. All handles point at the same map, so a
//! property set after resolution is visible to any constructor that re-reads
//! it, e.g. on a forced rebind.

use crate::{Injectable, Instance};
use ahash::RandomState;
use dashmap::DashMap;
use std::sync::Arc;

#[cfg(feature = "logging")]
use tracing::trace;

/// Typed read access to a registry's property map.
///
/// Cloning yields another handle to the same map.
#[derive(Clone, Default)]
pub struct Properties {
    data: Arc<DashMap<String, Instance, RandomState>>,
}

impl Properties {
    /// Create an empty, unshared property map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a property.
    pub fn set<V: Injectable>(&self, key: impl Into<String>, value: V) {
        let key = key.into();

        #[cfg(feature = "logging")]
        trace!(
            target: "autowire",
            key = %key,
            value_type = std::any::type_name::<V>(),
            "Setting property"
        );

        self.data.insert(key, Instance::new(value));
    }

    /// Remove a property, returning whether it existed.
    pub fn remove(&self, key: &str) -> bool {
        self.data.remove(key).is_some()
    }

    /// Look up `key` as a `T`.
    ///
    /// Returns `None` both when the key is absent and when the stored value
    /// has a different type; use [`contains_key`](Self::contains_key) to tell
    /// the two apart.
    pub fn get<T: Injectable + Clone>(&self, key: &str) -> Option<T> {
        let entry = self.data.get(key)?;
        entry.downcast::<T>().map(|value| T::clone(&value))
    }

    /// String property; accepts both `String` and `&'static str` values.
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get::<String>(key)
            .or_else(|| self.get::<&'static str>(key).map(str::to_owned))
    }

    /// Integer property; accepts both `i64` and `i32` values.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get::<i64>(key)
            .or_else(|| self.get::<i32>(key).map(i64::from))
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get::<bool>(key)
    }

    /// Whether any value is stored under `key`, regardless of its type.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether both handles share one map
    pub fn same_store(&self, other: &Properties) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl std::fmt::Debug for Properties {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Properties")
            .field("count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_found() {
        let props = Properties::new();
        props.set("test1", String::from("Hello"));

        assert_eq!(props.get_string("test1").as_deref(), Some("Hello"));
    }

    #[test]
    fn test_get_not_found() {
        let props = Properties::new();
        props.set("test1", "Hello");

        assert_eq!(props.get_string("test2"), None);
        assert!(!props.contains_key("test2"));
    }

    #[test]
    fn test_get_wrong_type() {
        let props = Properties::new();
        props.set("test1", "Hello");

        assert_eq!(props.get_int("test1"), None);
        assert_eq!(props.get_bool("test1"), None);
        // present, just not an integer
        assert!(props.contains_key("test1"));
    }

    #[test]
    fn test_int_widening() {
        let props = Properties::new();
        props.set("small", 7i32);
        props.set("large", 1i64 << 40);

        assert_eq!(props.get_int("small"), Some(7));
        assert_eq!(props.get_int("large"), Some(1 << 40));
        assert_eq!(props.get::<u8>("small"), None);
    }

    #[test]
    fn test_clones_share_map() {
        let props = Properties::new();
        let view = props.clone();

        props.set("mode", "double");
        assert_eq!(view.get_string("mode").as_deref(), Some("double"));

        props.set("mode", "quad");
        assert_eq!(view.get_string("mode").as_deref(), Some("quad"));
        assert!(view.same_store(&props));
        assert!(!view.same_store(&Properties::new()));
    }

    #[test]
    fn test_remove() {
        let props = Properties::new();
        props.set("flag", true);
        assert_eq!(props.len(), 1);

        assert!(props.remove("flag"));
        assert!(!props.remove("flag"));
        assert!(props.is_empty());
    }
}
