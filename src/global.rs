//! The process-wide default registry
//!
//! Explicit [`Registry`] handles are the primary API. This module keeps one
//! implicit registry for code that prefers free functions; it is created on
//! first use and can be swapped out with [`set_default`].
//!
//! Each helper holds the default registry's lock for the duration of the
//! call, so constructors must not call back into these helpers. A
//! constructor that needs configuration takes a [`Properties`] parameter
//! instead of calling [`properties`].
//!
//! ```rust
//! use autowire::global;
//!
//! #[derive(Clone)]
//! struct Greeting(&'static str);
//!
//! global::set_default(autowire::Registry::new());
//! global::bind(Greeting("hello")).unwrap();
//! assert_eq!(global::resolve::<Greeting>(false).unwrap().0, "hello");
//! ```

use crate::{Injectable, IntoConstructor, Properties, Registry, Result};
use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex, PoisonError};

#[cfg(feature = "logging")]
use tracing::debug;

static DEFAULT_REGISTRY: Lazy<Mutex<Registry>> = Lazy::new(|| Mutex::new(Registry::new()));

/// Run `f` with exclusive access to the default registry.
pub fn with_default<R>(f: impl FnOnce(&mut Registry) -> R) -> R {
    let mut registry = DEFAULT_REGISTRY
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    f(&mut registry)
}

/// Replace the default registry, returning the previous one.
pub fn set_default(registry: Registry) -> Registry {
    #[cfg(feature = "logging")]
    debug!(
        target: "autowire",
        binding_count = registry.len(),
        "Replacing default registry"
    );

    with_default(|current| std::mem::replace(current, registry))
}

/// [`Registry::bind`] on the default registry.
pub fn bind<T: Injectable>(value: T) -> Result<()> {
    with_default(|registry| registry.bind(value))
}

/// [`Registry::bind_constructor`] on the default registry.
pub fn bind_constructor<T: Injectable, Args>(
    ctor: impl IntoConstructor<Args>,
    prototype: bool,
) -> Result<()> {
    with_default(|registry| registry.bind_constructor::<T, Args>(ctor, prototype))
}

/// [`Registry::resolve`] on the default registry.
pub fn resolve<T: Injectable>(force_rebind: bool) -> Result<Arc<T>> {
    with_default(|registry| registry.resolve::<T>(force_rebind))
}

/// [`Registry::resolve_with_constructor`] on the default registry.
pub fn resolve_with_constructor<T: Injectable, Args>(
    ctor: impl IntoConstructor<Args>,
    force_rebind: bool,
) -> Result<Arc<T>> {
    with_default(|registry| registry.resolve_with_constructor::<T, Args>(ctor, force_rebind))
}

/// [`Registry::set_property`] on the default registry.
pub fn set_property<V: Injectable>(key: impl Into<String>, value: V) {
    with_default(|registry| registry.set_property(key, value));
}

/// Handle to the default registry's property map.
///
/// The handle stays tied to the registry that was the default when it was
/// taken, even after [`set_default`].
pub fn properties() -> Properties {
    with_default(|registry| registry.properties())
}
