//! Error types for lineage validation.

use distreg_store::StoreError;
use distreg_types::Identity;

/// Errors that can occur while validating a parent set.
#[derive(Debug, thiserror::Error)]
pub enum LineageError {
    /// Following parents from the candidate set leads back to the subject.
    #[error("parent loop: {subject} is an ancestor of itself via {via}")]
    Cycle {
        /// The record whose parent set is being validated.
        subject: Identity,
        /// The record whose parents name the subject (the subject itself
        /// for a direct self-reference).
        via: Identity,
    },

    /// Reading an ancestor from the store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Convenience alias for lineage results.
pub type LineageResult<T> = Result<T, LineageError>;
