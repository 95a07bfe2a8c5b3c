//! Document store boundary for the distributive registry.
//!
//! The registry never talks to a database directly. It goes through the
//! [`DistributiveStore`] trait, which models a document store offering
//! atomic single-document writes with uniqueness enforcement, filtered
//! reads, and distinct-value queries.
//!
//! # Storage Backends
//!
//! - [`InMemoryStore`]: `RwLock`-guarded store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Each `insert`/`save`/`replace` is atomic, including its uniqueness
//!    check. `replace` also refuses to overwrite a copy changed since it
//!    was read.
//! 2. Identity triples are unique across all records, active or not.
//! 3. Every location and every checksum is unique across all records.
//! 4. A uniqueness violation is reported as [`StoreError::Duplicate`] and
//!    leaves the store untouched.
//! 5. Revisions are append-only.

pub mod error;
pub mod filter;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult, UniqueField};
pub use filter::{ClientMatch, DistributiveFilter};
pub use memory::InMemoryStore;
pub use traits::DistributiveStore;
