//! Type-erased constructors
//!
//! A [`Constructor`] wraps an ordinary Rust closure behind a uniform calling
//! convention while keeping its signature inspectable: the parameter types
//! and the produced type are known before the closure is ever invoked, which
//! is what registration-time validation and dependency lookup rely on.
//!
//! Any `Fn` of arity 0 to 8 converts through [`IntoConstructor`] as long as
//! every parameter is `Injectable + Clone`. Arguments are handed over as
//! clones of the resolved values.
//!
//! ```rust
//! use autowire::{IntoConstructor, TypeKey};
//!
//! #[derive(Clone)]
//! struct Work(String);
//! struct Employee { work: Work }
//!
//! let ctor = (|work: Work| Employee { work }).into_constructor();
//! assert_eq!(ctor.params(), &[TypeKey::of::<Work>()]);
//! assert_eq!(ctor.output(), Some(TypeKey::of::<Employee>()));
//! ```

use crate::{DiError, Injectable, Instance, Result, TypeKey};
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "logging")]
use tracing::trace;

/// Type-erased invocation: ordered, resolved arguments in, one value out
type InvokeFn = Arc<dyn Fn(&[Instance]) -> Result<Instance> + Send + Sync>;

/// A callable with an introspectable signature.
///
/// Cloning is cheap and shares the wrapped closure.
#[derive(Clone)]
pub struct Constructor {
    params: Arc<[TypeKey]>,
    /// `None` when the callable produces `()`
    output: Option<TypeKey>,
    invoke: InvokeFn,
}

impl Constructor {
    /// Build a constructor from an explicit signature and an erased body.
    ///
    /// `invoke` receives exactly one instance per entry of `params`, in the
    /// same order.
    pub fn from_parts<F>(params: Vec<TypeKey>, output: Option<TypeKey>, invoke: F) -> Self
    where
        F: Fn(&[Instance]) -> Result<Instance> + Send + Sync + 'static,
    {
        Self {
            params: params.into(),
            output,
            invoke: Arc::new(invoke),
        }
    }

    /// Convert any supported closure.
    #[inline]
    pub fn new<Args>(ctor: impl IntoConstructor<Args>) -> Self {
        ctor.into_constructor()
    }

    /// Parameter types in declaration order
    #[inline]
    pub fn params(&self) -> &[TypeKey] {
        &self.params
    }

    /// The produced type, if the callable produces anything
    #[inline]
    pub fn output(&self) -> Option<TypeKey> {
        self.output
    }

    /// Human-readable signature, e.g. `fn(app::Work) -> app::Employee`
    pub fn signature(&self) -> String {
        let params = self
            .params
            .iter()
            .map(TypeKey::name)
            .collect::<Vec<_>>()
            .join(", ");
        let output = self.output.as_ref().map_or("()", TypeKey::name);
        format!("fn({params}) -> {output}")
    }

    /// Invoke with already-resolved arguments.
    pub fn invoke(&self, args: &[Instance]) -> Result<Instance> {
        #[cfg(feature = "logging")]
        trace!(
            target: "autowire",
            signature = %self.signature(),
            arg_count = args.len(),
            "Invoking constructor"
        );

        (self.invoke)(args)
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("signature", &self.signature())
            .finish()
    }
}

/// Conversion from a plain closure into a [`Constructor`].
///
/// `Args` is the tuple of parameter types; it only exists to keep the
/// implementations for different arities apart and is always inferred.
pub trait IntoConstructor<Args>: Send + Sync + 'static {
    fn into_constructor(self) -> Constructor;
}

fn output_key<Out: 'static>() -> Option<TypeKey> {
    let key = TypeKey::of::<Out>();
    (key != TypeKey::of::<()>()).then_some(key)
}

fn next_argument<'a, A: Injectable + Clone>(
    args: &mut impl Iterator<Item = &'a Instance>,
) -> Result<A> {
    let expected = TypeKey::of::<A>();
    let instance = args.next().ok_or_else(|| DiError::not_found_key(expected))?;
    instance
        .downcast::<A>()
        .map(|value| A::clone(&value))
        .ok_or_else(|| DiError::not_convertible(instance.type_key(), expected))
}

macro_rules! impl_into_constructor {
    ($($A:ident),*) => {
        #[allow(non_snake_case, unused_mut, unused_variables)]
        impl<Func, Out, $($A),*> IntoConstructor<($($A,)*)> for Func
        where
            Func: Fn($($A),*) -> Out + Send + Sync + 'static,
            Out: Injectable,
            $($A: Injectable + Clone,)*
        {
            fn into_constructor(self) -> Constructor {
                Constructor::from_parts(
                    vec![$(TypeKey::of::<$A>()),*],
                    output_key::<Out>(),
                    move |args: &[Instance]| {
                        let mut args = args.iter();
                        $(let $A = next_argument::<$A>(&mut args)?;)*
                        Ok(Instance::new((self)($($A),*)))
                    },
                )
            }
        }
    };
}

impl_into_constructor!();
impl_into_constructor!(A);
impl_into_constructor!(A, B);
impl_into_constructor!(A, B, C);
impl_into_constructor!(A, B, C, D);
impl_into_constructor!(A, B, C, D, E);
impl_into_constructor!(A, B, C, D, E, F);
impl_into_constructor!(A, B, C, D, E, F, G);
impl_into_constructor!(A, B, C, D, E, F, G, H);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Work(&'static str);

    #[derive(Debug, PartialEq)]
    struct Employee {
        name: &'static str,
        work: Work,
    }

    #[test]
    fn test_signature_introspection() {
        let ctor = Constructor::new(|work: Work, name: String| Employee {
            name: if name.is_empty() { "anon" } else { "named" },
            work,
        });

        assert_eq!(
            ctor.params(),
            &[TypeKey::of::<Work>(), TypeKey::of::<String>()]
        );
        assert_eq!(ctor.output(), Some(TypeKey::of::<Employee>()));
        assert!(ctor.signature().starts_with("fn("));
    }

    #[test]
    fn test_unit_output_has_no_result() {
        let ctor = Constructor::new(|_: u32| {});
        assert_eq!(ctor.output(), None);
        assert!(ctor.signature().ends_with("-> ()"));
    }

    #[test]
    fn test_invoke_passes_arguments_in_order() {
        let ctor = Constructor::new(|a: i32, b: i32| a - b);
        let out = ctor
            .invoke(&[Instance::new(10i32), Instance::new(3i32)])
            .unwrap();
        assert_eq!(*out.downcast::<i32>().unwrap(), 7);
    }

    #[test]
    fn test_invoke_rejects_mismatched_argument() {
        let ctor = Constructor::new(|work: Work| Employee { name: "x", work });
        let err = ctor.invoke(&[Instance::new(5u8)]).unwrap_err();
        assert_eq!(err, DiError::not_convertible(TypeKey::of::<u8>(), TypeKey::of::<Work>()));
    }

    #[test]
    fn test_invoke_reports_missing_argument() {
        let ctor = Constructor::new(|work: Work| work);
        let err = ctor.invoke(&[]).unwrap_err();
        assert_eq!(err, DiError::not_found::<Work>());
    }

    #[test]
    fn test_zero_arity() {
        let ctor = Constructor::new(|| Work("typing"));
        assert!(ctor.params().is_empty());
        let out = ctor.invoke(&[]).unwrap();
        assert_eq!(*out.downcast::<Work>().unwrap(), Work("typing"));
    }
}
