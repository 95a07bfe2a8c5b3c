//! Store wrappers for exercising behavior the in-memory store never shows
//! on its own.

use std::sync::Barrier;

use distreg_store::{DistributiveFilter, DistributiveStore, InMemoryStore, StoreResult};
use distreg_types::{Distributive, RecordKey, RevisionRecord};

/// `find` reports every match twice, like a backend without uniqueness on
/// the searched field.
pub(crate) struct Doubling(pub InMemoryStore);

impl DistributiveStore for Doubling {
    fn insert(&self, record: &Distributive) -> StoreResult<()> {
        self.0.insert(record)
    }
    fn save(&self, record: &Distributive) -> StoreResult<()> {
        self.0.save(record)
    }
    fn replace(&self, read: &Distributive, record: &Distributive) -> StoreResult<()> {
        self.0.replace(read, record)
    }
    fn get(&self, key: &RecordKey) -> StoreResult<Option<Distributive>> {
        self.0.get(key)
    }
    fn find(&self, filter: &DistributiveFilter) -> StoreResult<Vec<Distributive>> {
        let found = self.0.find(filter)?;
        Ok(found.iter().chain(found.iter()).cloned().collect())
    }
    fn append_revision(&self, revision: &RevisionRecord) -> StoreResult<()> {
        self.0.append_revision(revision)
    }
    fn revisions_of(&self, subject: &RecordKey) -> StoreResult<Vec<RevisionRecord>> {
        self.0.revisions_of(subject)
    }
}

/// Every `find` blocks until `parties` callers have finished one, so
/// concurrent operations all read before any of them writes.
pub(crate) struct Lockstep {
    pub inner: InMemoryStore,
    barrier: Barrier,
}

impl Lockstep {
    pub fn new(inner: InMemoryStore, parties: usize) -> Self {
        Self {
            inner,
            barrier: Barrier::new(parties),
        }
    }
}

impl DistributiveStore for Lockstep {
    fn insert(&self, record: &Distributive) -> StoreResult<()> {
        self.inner.insert(record)
    }
    fn save(&self, record: &Distributive) -> StoreResult<()> {
        self.inner.save(record)
    }
    fn replace(&self, read: &Distributive, record: &Distributive) -> StoreResult<()> {
        self.inner.replace(read, record)
    }
    fn get(&self, key: &RecordKey) -> StoreResult<Option<Distributive>> {
        self.inner.get(key)
    }
    fn find(&self, filter: &DistributiveFilter) -> StoreResult<Vec<Distributive>> {
        let found = self.inner.find(filter)?;
        self.barrier.wait();
        Ok(found)
    }
    fn append_revision(&self, revision: &RevisionRecord) -> StoreResult<()> {
        self.inner.append_revision(revision)
    }
    fn revisions_of(&self, subject: &RecordKey) -> StoreResult<Vec<RevisionRecord>> {
        self.inner.revisions_of(subject)
    }
}
