use thiserror::Error;

use distreg_lineage::LineageError;
use distreg_store::StoreError;
use distreg_types::TypeError;

/// Coarse error classification for callers that map errors onto a
/// transport (status codes, exit codes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    NotFound,
    Store,
}

#[derive(Debug, Error)]
pub enum RegistryError {
    /// Malformed or missing input. Raised before any store mutation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Uniqueness violation, lost write race, ambiguous lookup, or lineage
    /// loop.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A strict lookup matched nothing.
    #[error("not found: {0}")]
    NotFound(String),

    /// Registry configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Infrastructure failure from the store.
    #[error("store error: {0}")]
    Store(StoreError),
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::Config(_) => ErrorKind::Validation,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Store(_) => ErrorKind::Store,
        }
    }
}

impl From<StoreError> for RegistryError {
    fn from(err: StoreError) -> Self {
        if err.is_conflict() {
            Self::Conflict(err.to_string())
        } else {
            Self::Store(err)
        }
    }
}

impl From<LineageError> for RegistryError {
    fn from(err: LineageError) -> Self {
        match err {
            LineageError::Cycle { .. } => Self::Conflict(err.to_string()),
            LineageError::Store(e) => e.into(),
        }
    }
}

impl From<TypeError> for RegistryError {
    fn from(err: TypeError) -> Self {
        Self::Validation(err.to_string())
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;
