use std::fmt;

use distreg_types::RecordKey;

/// Field covered by a store uniqueness constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UniqueField {
    Identity,
    Location,
    Checksum,
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => write!(f, "identity"),
            Self::Location => write!(f, "location"),
            Self::Checksum => write!(f, "checksum"),
        }
    }
}

/// Errors from store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A write would break a uniqueness constraint.
    #[error("duplicate {field}: '{value}'")]
    Duplicate { field: UniqueField, value: String },

    /// `save` or `replace` was called for a key the store has never seen.
    #[error("record not found: {0}")]
    NotFound(RecordKey),

    /// The stored record changed after the caller read it.
    #[error("record {0} changed since it was read")]
    Stale(RecordKey),

    /// A lock guarding the store was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,

    /// Failure reported by the storage backend.
    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// `true` for uniqueness violations.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    /// `true` for errors a concurrent writer can cause: uniqueness
    /// violations and stale replacements.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Duplicate { .. } | Self::Stale(_))
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
