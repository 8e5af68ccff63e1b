//! Key predicate error types.

use thiserror::Error;

/// Result type for key parsing and validation.
pub type KeyResult<T> = Result<T, KeyError>;

/// Errors raised while turning identifiers and predicates into key descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("Empty key predicate")]
    EmptyPredicate,

    #[error("Malformed key predicate '{predicate}': {reason}")]
    Malformed { predicate: String, reason: String },

    #[error("Malformed identifier '{identifier}': {reason}")]
    MalformedIdentifier { identifier: String, reason: String },

    #[error("Key predicate '{predicate}' has {actual} value(s) but type {type_name} declares {expected} key propert(ies)")]
    KeyCountMismatch {
        predicate: String,
        type_name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Unknown key property '{name}' for type {type_name}")]
    UnknownKeyProperty { type_name: String, name: String },

    #[error("Duplicate key property '{name}' in predicate '{predicate}'")]
    DuplicateKeyProperty { predicate: String, name: String },

    #[error("Key value {literal} is not a valid {expected} literal for '{name}'")]
    TypeMismatch {
        name: String,
        expected: String,
        literal: String,
    },

    #[error("Key property '{name}' has no value on the resource")]
    MissingKeyValue { name: String },
}

impl KeyError {
    pub fn malformed(predicate: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            predicate: predicate.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed_identifier(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedIdentifier {
            identifier: identifier.into(),
            reason: reason.into(),
        }
    }

    pub fn key_count_mismatch(
        predicate: impl Into<String>,
        type_name: impl Into<String>,
        expected: usize,
        actual: usize,
    ) -> Self {
        Self::KeyCountMismatch {
            predicate: predicate.into(),
            type_name: type_name.into(),
            expected,
            actual,
        }
    }

    pub fn unknown_key_property(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnknownKeyProperty {
            type_name: type_name.into(),
            name: name.into(),
        }
    }

    pub fn duplicate_key_property(predicate: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateKeyProperty {
            predicate: predicate.into(),
            name: name.into(),
        }
    }

    pub fn type_mismatch(
        name: impl Into<String>,
        expected: impl Into<String>,
        literal: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            name: name.into(),
            expected: expected.into(),
            literal: literal.into(),
        }
    }

    pub fn missing_key_value(name: impl Into<String>) -> Self {
        Self::MissingKeyValue { name: name.into() }
    }
}
