use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

use distreg_types::{Distributive, RecordKey, RevisionRecord};

use crate::error::{StoreError, StoreResult, UniqueField};
use crate::filter::DistributiveFilter;
use crate::traits::DistributiveStore;

/// In-memory distributive store.
///
/// Intended for tests and embedding. Records and revisions live behind one
/// `RwLock`, so every write, including its uniqueness check, is atomic with
/// respect to concurrent callers. Records are cloned on read and write.
pub struct InMemoryStore {
    inner: RwLock<StoreState>,
}

#[derive(Default)]
struct StoreState {
    /// Records in insertion order.
    records: Vec<Distributive>,
    /// Key -> position in `records`.
    index: HashMap<RecordKey, usize>,
    revisions: Vec<RevisionRecord>,
}

impl StoreState {
    /// Check `candidate` against every record except the one at `skip`.
    fn check_unique(&self, candidate: &Distributive, skip: Option<usize>) -> StoreResult<()> {
        for (pos, other) in self.records.iter().enumerate() {
            if Some(pos) == skip {
                continue;
            }
            if other.identity == candidate.identity {
                return Err(StoreError::Duplicate {
                    field: UniqueField::Identity,
                    value: candidate.identity.to_string(),
                });
            }
            if let Some(loc) = candidate.locations.iter().find(|l| other.has_location(l)) {
                return Err(StoreError::Duplicate {
                    field: UniqueField::Location,
                    value: loc.clone(),
                });
            }
            if let Some(sum) = candidate.checksums.iter().find(|c| other.has_checksum(c)) {
                return Err(StoreError::Duplicate {
                    field: UniqueField::Checksum,
                    value: sum.clone(),
                });
            }
        }
        Ok(())
    }
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreState::default()),
        }
    }

    /// Number of records, active or not.
    pub fn len(&self) -> StoreResult<usize> {
        let state = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(state.records.len())
    }

    /// Returns `true` if no record has been stored.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Number of archived revisions across all subjects.
    pub fn revision_count(&self) -> StoreResult<usize> {
        let state = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(state.revisions.len())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DistributiveStore for InMemoryStore {
    fn insert(&self, record: &Distributive) -> StoreResult<()> {
        let mut state = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        if state.index.contains_key(&record.key) {
            return Err(StoreError::Backend(format!(
                "key {} already in use",
                record.key
            )));
        }
        state.check_unique(record, None)?;
        let pos = state.records.len();
        state.records.push(record.clone());
        state.index.insert(record.key, pos);
        debug!(key = %record.key.short_id(), identity = %record.identity, "inserted record");
        Ok(())
    }

    fn save(&self, record: &Distributive) -> StoreResult<()> {
        let mut state = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let pos = *state
            .index
            .get(&record.key)
            .ok_or(StoreError::NotFound(record.key))?;
        state.check_unique(record, Some(pos))?;
        state.records[pos] = record.clone();
        debug!(key = %record.key.short_id(), revision = record.revision, "saved record");
        Ok(())
    }

    fn replace(&self, read: &Distributive, record: &Distributive) -> StoreResult<()> {
        if read.key != record.key {
            return Err(StoreError::Backend(format!(
                "replacement of {} based on a read of {}",
                record.key, read.key
            )));
        }
        let mut state = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let pos = *state
            .index
            .get(&record.key)
            .ok_or(StoreError::NotFound(record.key))?;
        if state.records[pos] != *read {
            debug!(key = %record.key.short_id(), "refusing stale replacement");
            return Err(StoreError::Stale(record.key));
        }
        state.check_unique(record, Some(pos))?;
        state.records[pos] = record.clone();
        debug!(key = %record.key.short_id(), revision = record.revision, "replaced record");
        Ok(())
    }

    fn get(&self, key: &RecordKey) -> StoreResult<Option<Distributive>> {
        let state = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(state.index.get(key).map(|&pos| state.records[pos].clone()))
    }

    fn find(&self, filter: &DistributiveFilter) -> StoreResult<Vec<Distributive>> {
        let state = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(state
            .records
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    fn append_revision(&self, revision: &RevisionRecord) -> StoreResult<()> {
        let mut state = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        state.revisions.push(revision.clone());
        debug!(subject = %revision.subject.short_id(), revision = revision.revision, "archived revision");
        Ok(())
    }

    fn revisions_of(&self, subject: &RecordKey) -> StoreResult<Vec<RevisionRecord>> {
        let state = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(state
            .revisions
            .iter()
            .filter(|r| r.subject == *subject)
            .cloned()
            .collect())
    }
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStore")
            .field("record_count", &self.len().ok())
            .field("revision_count", &self.revision_count().ok())
            .finish()
    }
}
