//! Bindings: one target type mapped to a value or a constructor
//!
//! A binding is either in plain mode (it holds a ready value) or in
//! constructor mode (it holds a [`Constructor`] whose output is computed on
//! resolution and, unless the binding is a prototype, cached in place).

use crate::storage::BindingStorage;
use crate::{Constructor, DiError, Instance, Result, TypeKey};

#[cfg(feature = "logging")]
use tracing::{debug, trace};

/// What a caller hands to the registry for a binding.
#[derive(Clone, Debug)]
pub enum Provided {
    /// A ready value
    Instance(Instance),
    /// A callable producing the value
    Constructor(Constructor),
}

impl Provided {
    /// Type of the provided item itself (not of what a constructor produces)
    pub fn type_key(&self) -> TypeKey {
        match self {
            Provided::Instance(instance) => instance.type_key(),
            Provided::Constructor(_) => TypeKey::of::<Constructor>(),
        }
    }

    fn into_instance(self) -> Instance {
        match self {
            Provided::Instance(instance) => instance,
            Provided::Constructor(ctor) => Instance::new(ctor),
        }
    }
}

impl From<Instance> for Provided {
    fn from(instance: Instance) -> Self {
        Provided::Instance(instance)
    }
}

impl From<Constructor> for Provided {
    fn from(ctor: Constructor) -> Self {
        Provided::Constructor(ctor)
    }
}

/// Outcome of the first half of a resolution step
pub(crate) enum Step {
    /// Value available without invoking anything
    Ready(Instance),
    /// Dependencies must be resolved and the constructor invoked
    Construct(Constructor),
}

/// A single registered type with its resolution state.
#[derive(Clone, Debug)]
pub struct Binding {
    target: TypeKey,
    /// Set only in constructor mode
    ctor: Option<Provided>,
    /// Cached constructor output, or the plain value
    resolved: Option<Instance>,
    prototype: bool,
}

impl Binding {
    /// Create a binding without validating it.
    ///
    /// In constructor mode `provided` becomes the constructor and nothing is
    /// resolved yet; in plain mode `provided` is the value itself.
    pub fn new(
        target: TypeKey,
        provided: impl Into<Provided>,
        is_constructor: bool,
        prototype: bool,
    ) -> Self {
        let provided = provided.into();
        if is_constructor {
            Self {
                target,
                ctor: Some(provided),
                resolved: None,
                prototype,
            }
        } else {
            Self {
                target,
                ctor: None,
                resolved: Some(provided.into_instance()),
                prototype,
            }
        }
    }

    /// Check that the binding can satisfy its target type.
    ///
    /// Purely structural: nothing is invoked.
    pub fn validate(&self, is_constructor: bool) -> Result<()> {
        if is_constructor {
            let ctor = match &self.ctor {
                Some(Provided::Constructor(ctor)) => ctor,
                Some(Provided::Instance(instance)) => {
                    return Err(DiError::invalid_constructor(instance.type_key().name()));
                }
                None => {
                    let name = self.resolved.as_ref().map_or("()", |v| v.type_key().name());
                    return Err(DiError::invalid_constructor(name));
                }
            };

            let Some(output) = ctor.output() else {
                return Err(DiError::invalid_constructor(ctor.signature()));
            };

            if !output.is_convertible_to(&self.target) {
                return Err(DiError::not_convertible(output, self.target));
            }
        } else {
            let produced = match (&self.ctor, &self.resolved) {
                (Some(provided), _) => provided.type_key(),
                (None, Some(value)) => value.type_key(),
                (None, None) => TypeKey::of::<()>(),
            };

            if !produced.is_convertible_to(&self.target) {
                return Err(DiError::not_convertible(produced, self.target));
            }
        }

        Ok(())
    }

    /// Resolve this binding against `scope`.
    ///
    /// Used for bindings that live outside the scope they resolve against;
    /// registered bindings are walked by [`BindingStorage::resolve_at`].
    pub(crate) fn resolve(&mut self, scope: &mut BindingStorage, force_rebind: bool) -> Result<Instance> {
        match self.begin(force_rebind)? {
            Step::Ready(value) => Ok(value),
            Step::Construct(ctor) => {
                let value = scope.construct(&ctor, force_rebind)?;
                self.finish(&value);
                Ok(value)
            }
        }
    }

    /// Cache lookup and mode dispatch.
    pub(crate) fn begin(&self, force_rebind: bool) -> Result<Step> {
        if !force_rebind {
            if let Some(cached) = &self.resolved {
                #[cfg(feature = "logging")]
                trace!(
                    target: "autowire",
                    service = self.target.name(),
                    "Binding resolved from cache"
                );
                return Ok(Step::Ready(cached.clone()));
            }
        }

        match &self.ctor {
            None => self
                .resolved
                .clone()
                .map(Step::Ready)
                .ok_or_else(|| DiError::not_found_key(self.target)),
            Some(Provided::Constructor(ctor)) => {
                #[cfg(feature = "logging")]
                debug!(
                    target: "autowire",
                    service = self.target.name(),
                    prototype = self.prototype,
                    force_rebind = force_rebind,
                    dependencies = ctor.params().len(),
                    "Constructing binding"
                );
                Ok(Step::Construct(ctor.clone()))
            }
            Some(Provided::Instance(instance)) => {
                Err(DiError::invalid_constructor(instance.type_key().name()))
            }
        }
    }

    /// Record a freshly constructed value; prototypes keep nothing.
    pub(crate) fn finish(&mut self, value: &Instance) {
        if !self.prototype {
            self.resolved = Some(value.clone());
        }
    }

    #[inline]
    pub fn target(&self) -> TypeKey {
        self.target
    }

    #[inline]
    pub fn is_prototype(&self) -> bool {
        self.prototype
    }

    #[inline]
    pub fn is_constructor(&self) -> bool {
        self.ctor.is_some()
    }

    /// Whether a resolved value is currently held
    #[inline]
    pub fn is_cached(&self) -> bool {
        self.resolved.is_some()
    }

    #[inline]
    pub fn matches(&self, key: &TypeKey) -> bool {
        self.target == *key
    }
}
