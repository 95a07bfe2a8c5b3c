//! Distributive registry.
//!
//! Tracks versioned build artifacts keyed by (type, version, client), their
//! locations and checksums, lineage, deliverability, and an audit trail of
//! deliverable/commentary changes. [`Registry`] is the entry point; it
//! composes the resolver, lineage validator, revision archiver, deliverable
//! evaluator, and version selector over any [`DistributiveStore`].
//!
//! # Quick Start
//!
//! ```rust
//! use distreg_registry::{AddRequest, InMemoryStore, Reference, Registry};
//!
//! let registry = Registry::new(InMemoryStore::new());
//! let added = registry
//!     .add(&AddRequest::new("APP", "1.0.0", "repo/app-1.0.0.zip", "sha1:abc"))
//!     .unwrap();
//! assert_eq!(added.revision, 1);
//! assert!(registry.deliverable(&Reference::identity("APP", "1.0.0", None)).unwrap());
//! ```

pub mod archive;
pub mod config;
pub mod deliverable;
pub mod error;
pub mod mutation;
pub mod query;
pub mod registry;
pub mod request;
pub mod resolver;
#[cfg(test)]
mod testing;
pub mod versions;
pub mod view;

pub use config::RegistryConfig;
pub use error::{ErrorKind, RegistryError, RegistryResult};
pub use registry::Registry;
pub use request::{AddRequest, Changes, ListQuery, Reference, UpdateRequest, VersionsQuery};
pub use versions::{ReleasePart, VersionKey, VersionMode};
pub use view::{DeleteOutcome, DistributiveView, RevisionEntry, UpdateOutcome, VersionEntry};

// Re-export key types
pub use distreg_store::{DistributiveStore, InMemoryStore};
pub use distreg_types::{Distributive, Identity, RecordKey, RevisionRecord};
