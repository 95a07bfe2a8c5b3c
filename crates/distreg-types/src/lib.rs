//! Foundation types for the distributive registry.
//!
//! A *distributive* is a versioned build artifact named by an identity
//! triple (type, version, client). This crate holds the record shapes every
//! other `distreg` crate works with; it performs no I/O.
//!
//! # Key Types
//!
//! - [`Identity`]: the (type, version, client) triple with client normalization
//! - [`RecordKey`]: store-assigned key used for weak references between records
//! - [`Distributive`]: the registry record itself
//! - [`RevisionRecord`]: an archived snapshot of the audited fields

pub mod distributive;
pub mod error;
pub mod identity;
pub mod key;
pub mod revision;

pub use distributive::Distributive;
pub use error::TypeError;
pub use identity::{normalize_client, Identity};
pub use key::RecordKey;
pub use revision::RevisionRecord;
