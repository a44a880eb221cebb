//! Error types for registration and resolution

use crate::TypeKey;
use std::any::TypeId;
use thiserror::Error;

/// Errors that can occur while registering or resolving bindings
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiError {
    /// The value supplied for a constructor binding cannot act as a
    /// constructor: it is not callable, or it produces no result.
    #[error("{signature} is not a valid constructor prototype")]
    InvalidConstructor { signature: String },

    /// A produced (or bound) type does not match the binding's target type
    #[error("{produced} is not convertible to target type {target}")]
    NotConvertible {
        produced: &'static str,
        target: &'static str,
    },

    /// No binding is registered for a requested or required type
    #[error("Binding for {type_name} not found")]
    BindingNotFound {
        type_name: &'static str,
        type_id: TypeId,
    },
}

impl DiError {
    /// Create a BindingNotFound error for a type
    #[inline]
    pub fn not_found<T: 'static>() -> Self {
        Self::not_found_key(TypeKey::of::<T>())
    }

    /// Create a BindingNotFound error from an erased key
    #[inline]
    pub fn not_found_key(key: TypeKey) -> Self {
        Self::BindingNotFound {
            type_name: key.name(),
            type_id: key.id(),
        }
    }

    /// Create a NotConvertible error
    #[inline]
    pub fn not_convertible(produced: TypeKey, target: TypeKey) -> Self {
        Self::NotConvertible {
            produced: produced.name(),
            target: target.name(),
        }
    }

    /// Create an InvalidConstructor error
    #[inline]
    pub fn invalid_constructor(signature: impl Into<String>) -> Self {
        Self::InvalidConstructor {
            signature: signature.into(),
        }
    }

    /// Whether this error was raised by registration-time validation.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidConstructor { .. } | Self::NotConvertible { .. }
        )
    }

    /// The missing type, for `BindingNotFound` errors.
    pub fn missing_type(&self) -> Option<&'static str> {
        match self {
            Self::BindingNotFound { type_name, .. } => Some(*type_name),
            _ => None,
        }
    }
}

/// Result type alias for registry operations
pub type Result<T> = std::result::Result<T, DiError>;

#[cfg(test)]
mod tests {
    use super::*;

    struct Missing;

    #[test]
    fn test_not_found_names_type() {
        let err = DiError::not_found::<Missing>();
        assert!(err.to_string().ends_with("Missing not found"));
        assert!(err.missing_type().unwrap().ends_with("Missing"));
        assert!(!err.is_validation());
    }

    #[test]
    fn test_validation_kinds() {
        let err = DiError::not_convertible(TypeKey::of::<u8>(), TypeKey::of::<String>());
        assert_eq!(
            err.to_string(),
            "u8 is not convertible to target type alloc::string::String"
        );
        assert!(err.is_validation());
        assert!(DiError::invalid_constructor("i32").is_validation());
        assert_eq!(err.missing_type(), None);
    }
}
