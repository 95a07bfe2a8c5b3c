use distreg_types::{Distributive, RecordKey, RevisionRecord};

use crate::error::StoreResult;
use crate::filter::DistributiveFilter;

/// Document store holding distributives and their revisions.
///
/// All implementations must satisfy these invariants:
/// - `insert`, `save` and `replace` are atomic per document, uniqueness and
///   staleness checks included.
/// - Identity triples, locations, and checksums are unique across every
///   stored record. A violating write fails with `StoreError::Duplicate`
///   and changes nothing.
/// - `find` returns records in a stable order (insertion order for the
///   bundled backend).
/// - Revisions are append-only; nothing updates or removes them.
pub trait DistributiveStore: Send + Sync {
    /// Create a new record. Fails if the key is already taken or any
    /// uniqueness constraint would break.
    fn insert(&self, record: &Distributive) -> StoreResult<()>;

    /// Replace an existing record by key, re-checking uniqueness against
    /// every *other* record.
    fn save(&self, record: &Distributive) -> StoreResult<()>;

    /// Replace the record stored under `record.key`, but only while the
    /// stored copy still equals `read`, the copy the caller based its change
    /// on. Otherwise fails with `StoreError::Stale` and changes nothing.
    fn replace(&self, read: &Distributive, record: &Distributive) -> StoreResult<()>;

    /// Read a record by key. Returns `Ok(None)` when it does not exist.
    fn get(&self, key: &RecordKey) -> StoreResult<Option<Distributive>>;

    /// All records matching `filter`.
    fn find(&self, filter: &DistributiveFilter) -> StoreResult<Vec<Distributive>>;

    /// Append a revision snapshot.
    fn append_revision(&self, revision: &RevisionRecord) -> StoreResult<()>;

    /// Every revision archived for `subject`, in append order.
    fn revisions_of(&self, subject: &RecordKey) -> StoreResult<Vec<RevisionRecord>>;

    /// Distinct version strings among records matching `filter`.
    ///
    /// Default implementation scans `find()`; order follows first
    /// occurrence and carries no meaning.
    fn distinct_versions(&self, filter: &DistributiveFilter) -> StoreResult<Vec<String>> {
        let mut versions: Vec<String> = Vec::new();
        for record in self.find(filter)? {
            if !versions.contains(&record.identity.version) {
                versions.push(record.identity.version);
            }
        }
        Ok(versions)
    }

    /// Read several records by key.
    ///
    /// Default implementation calls `get()` for each key.
    fn get_batch(&self, keys: &[RecordKey]) -> StoreResult<Vec<Option<Distributive>>> {
        keys.iter().map(|key| self.get(key)).collect()
    }
}
