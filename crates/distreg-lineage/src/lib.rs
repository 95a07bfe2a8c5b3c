//! Lineage validation for the distributive registry.
//!
//! Parent edges are weak references stored on each record. Before a new
//! parent set is persisted, [`LineageValidator`] walks it depth-first through
//! the store and rejects any chain that leads back to the subject's
//! identity triple.

pub mod error;
pub mod validator;

pub use error::{LineageError, LineageResult};
pub use validator::LineageValidator;
