//! Store error types.

use inlay_core::{KeyError, ResourceId};
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a resource store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Unknown resource set: {0}")]
    UnknownSet(String),

    #[error("Resource not found in {set}: {key}")]
    NotFound { set: String, key: String },

    #[error("Duplicate key in {set}: {key}")]
    DuplicateKey { set: String, key: String },

    #[error("Missing value for key property {key} in {set}")]
    MissingKey { set: String, key: String },

    #[error("Cannot change key property {key} of {resource} in {set}")]
    KeyChange {
        set: String,
        resource: ResourceId,
        key: String,
    },

    #[error("Unknown navigation {name} on set {set}")]
    UnknownNavigation { set: String, name: String },

    #[error("Navigation {name} points to {expected}, not {actual}")]
    NavigationTargetMismatch {
        name: String,
        expected: String,
        actual: String,
    },

    #[error("Bulk operation on {set} got {expected} item(s) but {actual} companion value(s)")]
    LengthMismatch {
        set: String,
        expected: usize,
        actual: usize,
    },

    #[error("Key error: {0}")]
    Key(#[from] KeyError),

    #[error("Backend error: {message}")]
    Backend { message: String },
}

impl StoreError {
    pub fn not_found(set: impl Into<String>, key: impl Into<String>) -> Self {
        Self::NotFound {
            set: set.into(),
            key: key.into(),
        }
    }

    pub fn duplicate_key(set: impl Into<String>, key: impl Into<String>) -> Self {
        Self::DuplicateKey {
            set: set.into(),
            key: key.into(),
        }
    }

    pub fn missing_key(set: impl Into<String>, key: impl Into<String>) -> Self {
        Self::MissingKey {
            set: set.into(),
            key: key.into(),
        }
    }

    pub fn key_change(set: impl Into<String>, resource: ResourceId, key: impl Into<String>) -> Self {
        Self::KeyChange {
            set: set.into(),
            resource,
            key: key.into(),
        }
    }

    pub fn unknown_navigation(set: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnknownNavigation {
            set: set.into(),
            name: name.into(),
        }
    }

    pub fn navigation_target_mismatch(
        name: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::NavigationTargetMismatch {
            name: name.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn length_mismatch(set: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::LengthMismatch {
            set: set.into(),
            expected,
            actual,
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}
