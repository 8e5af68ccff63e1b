//! Engine error types.

use inlay_core::KeyError;
use inlay_store::StoreError;
use thiserror::Error;

/// Result type for materialization.
pub type MaterializeResult<T> = Result<T, MaterializeError>;

/// Result type for property deserialization.
pub type DeserializeResult<T> = Result<T, DeserializeError>;

/// Errors raised while converting raw payload properties.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeserializeError {
    #[error("Unknown property: {property} on type {type_name}")]
    UnknownProperty { type_name: String, property: String },

    #[error("Invalid value for {type_name}.{property}: expected {expected}, got {actual}")]
    InvalidValue {
        type_name: String,
        property: String,
        expected: String,
        actual: String,
    },

    #[error("Cannot set non-nullable property to null: {property} on type {type_name}")]
    NullNotAllowed { type_name: String, property: String },
}

impl DeserializeError {
    pub fn unknown_property(type_name: impl Into<String>, property: impl Into<String>) -> Self {
        Self::UnknownProperty {
            type_name: type_name.into(),
            property: property.into(),
        }
    }

    pub fn invalid_value(
        type_name: impl Into<String>,
        property: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            type_name: type_name.into(),
            property: property.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn null_not_allowed(type_name: impl Into<String>, property: impl Into<String>) -> Self {
        Self::NullNotAllowed {
            type_name: type_name.into(),
            property: property.into(),
        }
    }
}

/// Coarse classification of a materialization failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed node or edge shape, or an unresolvable name.
    Structural,
    /// Unparsable or mistyped key predicate.
    KeyPredicate,
    /// Failure reported by the resource store.
    Store,
    /// Internal consistency failure.
    Invariant,
}

/// Errors that can occur while materializing a payload.
#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error("Malformed payload at {field}: {message}")]
    Malformed { field: String, message: String },

    #[error("Unknown resource set: {name}")]
    UnknownResourceSet { name: String },

    #[error("Unknown resource type: {name}")]
    UnknownResourceType { name: String },

    #[error("Type {actual} does not match set {set} of type {expected}")]
    TypeMismatch {
        set: String,
        expected: String,
        actual: String,
    },

    #[error("Feed {edge} mixes resource sets {first} and {other}")]
    MixedFeed {
        edge: String,
        first: String,
        other: String,
    },

    #[error("Deserialization failed: {0}")]
    Deserialize(#[from] DeserializeError),

    #[error("Invalid key: {0}")]
    Key(#[from] KeyError),

    #[error("Store failure: {0}")]
    Store(#[from] StoreError),

    #[error("Target not found in {set}: {key}")]
    TargetNotFound { set: String, key: String },

    #[error("Invariant violated: {message}")]
    Invariant { message: String },

    #[error("Recursion depth limit of {limit} exceeded")]
    DepthExceeded { limit: usize },

    #[error("Payload not fully processed at {path}")]
    NotProcessed { path: String },
}

impl MaterializeError {
    pub fn malformed(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Malformed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn unknown_resource_set(name: impl Into<String>) -> Self {
        Self::UnknownResourceSet { name: name.into() }
    }

    pub fn unknown_resource_type(name: impl Into<String>) -> Self {
        Self::UnknownResourceType { name: name.into() }
    }

    pub fn type_mismatch(
        set: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            set: set.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn mixed_feed(
        edge: impl Into<String>,
        first: impl Into<String>,
        other: impl Into<String>,
    ) -> Self {
        Self::MixedFeed {
            edge: edge.into(),
            first: first.into(),
            other: other.into(),
        }
    }

    pub fn target_not_found(set: impl Into<String>, key: impl ToString) -> Self {
        Self::TargetNotFound {
            set: set.into(),
            key: key.to_string(),
        }
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        Self::Invariant {
            message: message.into(),
        }
    }

    pub fn depth_exceeded(limit: usize) -> Self {
        Self::DepthExceeded { limit }
    }

    pub fn not_processed(path: impl Into<String>) -> Self {
        Self::NotProcessed { path: path.into() }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MaterializeError::Malformed { .. }
            | MaterializeError::UnknownResourceSet { .. }
            | MaterializeError::UnknownResourceType { .. }
            | MaterializeError::TypeMismatch { .. }
            | MaterializeError::MixedFeed { .. }
            | MaterializeError::Deserialize(_) => ErrorKind::Structural,
            MaterializeError::Key(_) => ErrorKind::KeyPredicate,
            MaterializeError::Store(_) | MaterializeError::TargetNotFound { .. } => ErrorKind::Store,
            MaterializeError::Invariant { .. }
            | MaterializeError::DepthExceeded { .. }
            | MaterializeError::NotProcessed { .. } => ErrorKind::Invariant,
        }
    }
}
