use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("'{0}' must not be empty")]
    EmptyField(&'static str),

    #[error("invalid record key: {0}")]
    InvalidKey(String),
}
