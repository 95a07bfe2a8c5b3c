//! Revision archiving.
//!
//! A revision is a snapshot of a record's audited fields taken *before* a
//! gated change. The snapshot is persisted only after the primary write
//! succeeds, so a failed mutation never leaves an orphan revision behind.

use chrono::Utc;
use tracing::debug;

use distreg_store::DistributiveStore;
use distreg_types::{Distributive, RevisionRecord};

use crate::error::{RegistryError, RegistryResult};

// ---------------------------------------------------------------------------
// AuditedChange
// ---------------------------------------------------------------------------

/// The effective deliverable/commentary change requested for a record.
///
/// Fields are `Some` only when they differ from the stored values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuditedChange {
    pub deliverable: Option<bool>,
    pub commentary: Option<String>,
}

impl AuditedChange {
    /// Compare the requested values against `current`.
    ///
    /// Flipping `deliverable` requires a non-empty commentary in the same
    /// request, even one equal to the stored commentary.
    pub fn evaluate(
        current: &Distributive,
        deliverable: Option<bool>,
        commentary: Option<&str>,
    ) -> RegistryResult<Self> {
        let commentary = commentary.filter(|c| !c.is_empty());

        let deliverable = match deliverable {
            Some(flag) if flag != current.deliverable => {
                if commentary.is_none() {
                    return Err(RegistryError::Validation(
                        "Deliverable flag can not be changed without a commentary".into(),
                    ));
                }
                Some(flag)
            }
            _ => None,
        };

        let commentary = commentary
            .filter(|c| *c != current.commentary)
            .map(str::to_string);

        Ok(Self {
            deliverable,
            commentary,
        })
    }

    /// `true` when applying this change must archive a revision.
    pub fn is_archivable(&self) -> bool {
        self.deliverable.is_some() || self.commentary.is_some()
    }

    pub fn apply(self, record: &mut Distributive) {
        if let Some(flag) = self.deliverable {
            record.deliverable = flag;
        }
        if let Some(text) = self.commentary {
            record.commentary = text;
        }
    }
}

// ---------------------------------------------------------------------------
// Revision protocol
// ---------------------------------------------------------------------------

/// Snapshot `record` as stored, then bump its revision and timestamp.
///
/// The returned snapshot must be handed to [`commit`] together with the
/// mutated record.
pub fn begin_revision(record: &mut Distributive) -> RevisionRecord {
    let snapshot = RevisionRecord::snapshot(record);
    record.revision += 1;
    record.timestamp = Utc::now();
    snapshot
}

/// How the primary record reaches the store.
#[derive(Clone, Copy, Debug)]
pub enum Write<'a> {
    /// A brand-new record.
    Insert,
    /// Replace the stored record, provided it still equals this copy.
    Replace(&'a Distributive),
}

/// Persist `record`, then its pending snapshot if any.
pub fn commit<S: DistributiveStore + ?Sized>(
    store: &S,
    record: &Distributive,
    write: Write<'_>,
    snapshot: Option<&RevisionRecord>,
) -> RegistryResult<()> {
    match write {
        Write::Insert => store.insert(record)?,
        Write::Replace(read) => store.replace(read, record)?,
    }

    if let Some(snapshot) = snapshot {
        store.append_revision(snapshot)?;
        debug!(
            subject = %record.identity,
            archived = snapshot.revision,
            current = record.revision,
            "revision archived"
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use distreg_store::InMemoryStore;
    use distreg_types::Identity;

    fn record() -> Distributive {
        Distributive::new(
            Identity::new("APP", "1.0.0", None).unwrap(),
            "p1",
            "c1",
            true,
            "Initial addition",
        )
    }

    // -----------------------------------------------------------------------
    // Gate
    // -----------------------------------------------------------------------

    #[test]
    fn same_values_are_not_archivable() {
        let d = record();
        let change = AuditedChange::evaluate(&d, Some(true), Some("Initial addition")).unwrap();
        assert!(!change.is_archivable());
        assert!(!AuditedChange::evaluate(&d, None, None).unwrap().is_archivable());
    }

    #[test]
    fn deliverable_flip_needs_commentary() {
        let d = record();
        let err = AuditedChange::evaluate(&d, Some(false), None).unwrap_err();
        assert!(err.to_string().contains("without a commentary"));
        assert!(AuditedChange::evaluate(&d, Some(false), Some("")).is_err());
    }

    #[test]
    fn deliverable_flip_with_unchanged_commentary() {
        let d = record();
        let change = AuditedChange::evaluate(&d, Some(false), Some("Initial addition")).unwrap();
        assert_eq!(change.deliverable, Some(false));
        assert!(change.commentary.is_none());
        assert!(change.is_archivable());
    }

    #[test]
    fn new_commentary_alone_is_archivable() {
        let mut d = record();
        let change = AuditedChange::evaluate(&d, None, Some("rebuilt")).unwrap();
        assert!(change.is_archivable());
        change.apply(&mut d);
        assert_eq!(d.commentary, "rebuilt");
        assert!(d.deliverable);
    }

    // -----------------------------------------------------------------------
    // Protocol
    // -----------------------------------------------------------------------

    #[test]
    fn begin_revision_snapshots_pre_state() {
        let mut d = record();
        let before = d.timestamp;
        let snap = begin_revision(&mut d);
        assert_eq!(snap.revision, 1);
        assert_eq!(snap.timestamp, before);
        assert_eq!(d.revision, 2);
        assert!(d.timestamp >= before);
    }

    #[test]
    fn commit_persists_record_then_snapshot() {
        let store = InMemoryStore::new();
        let mut d = record();
        commit(&store, &d, Write::Insert, None).unwrap();
        assert_eq!(store.revision_count().unwrap(), 0);

        let read = d.clone();
        let snap = begin_revision(&mut d);
        d.deliverable = false;
        commit(&store, &d, Write::Replace(&read), Some(&snap)).unwrap();

        assert_eq!(store.get(&d.key).unwrap().unwrap().revision, 2);
        let revisions = store.revisions_of(&d.key).unwrap();
        assert_eq!(revisions, vec![snap]);
    }

    #[test]
    fn failed_write_leaves_no_revision() {
        let store = InMemoryStore::new();
        let d = record();
        commit(&store, &d, Write::Insert, None).unwrap();

        let mut twin = Distributive::new(
            Identity::new("APP", "2.0.0", None).unwrap(),
            "p1",
            "c9",
            true,
            "x",
        );
        let snap = begin_revision(&mut twin);
        assert!(commit(&store, &twin, Write::Insert, Some(&snap)).is_err());
        assert_eq!(store.revision_count().unwrap(), 0);
    }

    #[test]
    fn stale_replacement_leaves_no_revision() {
        let store = InMemoryStore::new();
        let read = record();
        commit(&store, &read, Write::Insert, None).unwrap();

        let mut winner = read.clone();
        winner.append_location("p2");
        commit(&store, &winner, Write::Replace(&read), None).unwrap();

        let mut loser = read.clone();
        let snap = begin_revision(&mut loser);
        loser.commentary = "late".into();
        let err = commit(&store, &loser, Write::Replace(&read), Some(&snap)).unwrap_err();
        assert!(matches!(err, RegistryError::Conflict(_)));
        assert_eq!(store.revision_count().unwrap(), 0);
        assert_eq!(store.get(&read.key).unwrap().unwrap().revision, 1);
    }
}
