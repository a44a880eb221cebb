//! # autowire - type-keyed autowiring registry
//!
//! Register plain values or constructor closures under a target type, then
//! ask for fully assembled instances. Constructor parameters are resolved
//! from the registry by their exact type, recursively, before the
//! constructor runs.
//!
//! ## Features
//!
//! - **Constructor injection** - any `Fn` of up to 8 parameters is a constructor
//! - **Fail-fast registration** - constructor shape and output type are
//!   checked before a binding is accepted
//! - **Singleton or prototype** - cache the first result, or rebuild on every resolve
//! - **Forced rebind** - recompute a whole dependency chain on demand
//! - **Live properties** - a shared key/value map injectable as [`Properties`]
//! - **Observable** - optional tracing integration with JSON or pretty output
//!
//! ## Quick Start
//!
//! ```rust
//! use autowire::Registry;
//!
//! #[derive(Clone)]
//! struct Work {
//!     description: String,
//! }
//!
//! struct Employee {
//!     name: String,
//!     work: Work,
//! }
//!
//! let mut registry = Registry::new();
//!
//! registry.bind(Work { description: "typing".into() }).unwrap();
//! registry
//!     .bind_constructor::<Employee, _>(
//!         |work: Work| Employee { name: "Dominik".into(), work },
//!         false,
//!     )
//!     .unwrap();
//!
//! // Resolve - returns Arc<T>
//! let employee = registry.resolve::<Employee>(false).unwrap();
//! assert_eq!(employee.work.description, "typing");
//! ```
//!
//! ## Caching
//!
//! ```rust
//! use autowire::Registry;
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU64, Ordering};
//!
//! static COUNTER: AtomicU64 = AtomicU64::new(0);
//!
//! struct Session(u64);
//! struct RequestId(u64);
//!
//! let mut registry = Registry::new();
//!
//! // Singleton - built once, then cached
//! registry
//!     .bind_constructor::<Session, _>(|| Session(COUNTER.fetch_add(1, Ordering::SeqCst)), false)
//!     .unwrap();
//!
//! // Prototype - built on every resolve
//! registry
//!     .bind_constructor::<RequestId, _>(|| RequestId(COUNTER.fetch_add(1, Ordering::SeqCst)), true)
//!     .unwrap();
//!
//! let a = registry.resolve::<Session>(false).unwrap();
//! let b = registry.resolve::<Session>(false).unwrap();
//! assert!(Arc::ptr_eq(&a, &b));
//!
//! // Forced rebind ignores the cache
//! let c = registry.resolve::<Session>(true).unwrap();
//! assert!(!Arc::ptr_eq(&a, &c));
//!
//! let r1 = registry.resolve::<RequestId>(false).unwrap();
//! let r2 = registry.resolve::<RequestId>(false).unwrap();
//! assert_ne!(r1.0, r2.0);
//! ```
//!
//! ## Properties
//!
//! ```rust
//! use autowire::{Properties, Registry};
//!
//! struct Scale(i64);
//!
//! let mut registry = Registry::new();
//! registry
//!     .bind_constructor::<Scale, _>(
//!         |props: Properties| Scale(props.get_int("factor").unwrap_or(1)),
//!         false,
//!     )
//!     .unwrap();
//!
//! registry.set_property("factor", 2i64);
//! assert_eq!(registry.resolve::<Scale>(false).unwrap().0, 2);
//!
//! registry.set_property("factor", 4i64);
//! assert_eq!(registry.resolve::<Scale>(true).unwrap().0, 4);
//! ```
//!
//! ## Dependency cycles
//!
//! Cycles are not detected. A binding that transitively depends on its own
//! type recurses until the stack overflows; keeping the graph acyclic is up
//! to the caller.

mod binding;
mod constructor;
mod error;
pub mod global;
#[cfg(feature = "logging")]
pub mod logging;
mod properties;
mod provider;
mod registry;
mod storage;

pub use binding::*;
pub use constructor::*;
pub use error::*;
pub use properties::*;
pub use provider::*;
pub use registry::*;
pub use storage::BindingStorage;

// Re-export tracing macros for convenience when logging feature is enabled
#[cfg(feature = "logging")]
pub use tracing::{debug, error, info, trace, warn};

// Re-export for convenience
pub use std::sync::Arc;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Constructor, DiError, Injectable, Instance, IntoConstructor, Properties, Provided,
        Registry, Result, TypeKey,
    };
    pub use std::sync::Arc;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Clone, Debug, PartialEq)]
    struct Database {
        url: String,
    }

    struct UserService {
        db: Database,
    }

    #[test]
    fn test_value_registration() {
        let mut registry = Registry::new();
        registry
            .bind(Database {
                url: "test".into(),
            })
            .unwrap();

        let db = registry.resolve::<Database>(false).unwrap();
        assert_eq!(db.url, "test");
    }

    #[test]
    fn test_transitive_chain() {
        #[derive(Clone)]
        struct Config(&'static str);

        let mut registry = Registry::new();
        registry
            .bind_constructor::<UserService, _>(|db: Database| UserService { db }, false)
            .unwrap();
        registry
            .bind_constructor::<Database, _>(
                |config: Config| Database {
                    url: config.0.to_string(),
                },
                false,
            )
            .unwrap();
        registry.bind(Config("postgres://localhost")).unwrap();

        let users = registry.resolve::<UserService>(false).unwrap();
        assert_eq!(users.db.url, "postgres://localhost");
    }

    #[test]
    fn test_forced_rebind_recomputes_dependencies() {
        static BUILT: AtomicU32 = AtomicU32::new(0);

        let mut registry = Registry::new();
        registry
            .bind_constructor::<Database, _>(
                || Database {
                    url: format!("db-{}", BUILT.fetch_add(1, Ordering::SeqCst)),
                },
                false,
            )
            .unwrap();
        registry
            .bind_constructor::<UserService, _>(|db: Database| UserService { db }, false)
            .unwrap();

        assert_eq!(registry.resolve::<UserService>(false).unwrap().db.url, "db-0");
        assert_eq!(registry.resolve::<UserService>(false).unwrap().db.url, "db-0");
        assert_eq!(registry.resolve::<UserService>(true).unwrap().db.url, "db-1");
        assert_eq!(registry.resolve::<Database>(false).unwrap().url, "db-1");
    }

    #[test]
    fn test_not_found_error() {
        let mut registry = Registry::new();
        let result = registry.resolve::<Database>(false);
        assert!(matches!(result, Err(DiError::BindingNotFound { .. })));
    }
}
