//! Write paths: add, update, delete.
//!
//! # Invariants
//!
//! - Every check that can reject a request runs before the first store write.
//! - A revision snapshot is written only after the record write succeeded.
//! - At most one active record exists per identity triple; the store's
//!   uniqueness index backs this up for concurrent writers.
//! - Existing records are written back only over the copy that was read. A
//!   writer that lost the race gets `Conflict`, never a silent overwrite.

use tracing::{debug, info, warn};

use distreg_store::{DistributiveFilter, DistributiveStore};
use distreg_types::{Distributive, Identity, RecordKey};

use crate::archive::{begin_revision, commit, AuditedChange, Write};
use crate::error::{RegistryError, RegistryResult};
use crate::registry::Registry;
use crate::request::{present, AddRequest, Reference, UpdateRequest};
use crate::resolver::describe;
use crate::view::{DeleteOutcome, UpdateOutcome};

impl<S: DistributiveStore> Registry<S> {
    // -----------------------------------------------------------------------
    // Add
    // -----------------------------------------------------------------------

    /// Register a distributive, or bring a soft-deleted one back.
    ///
    /// Reincarnating an inactive record archives its last state, bumps the
    /// revision, and resets locations, checksums, and parents to what the
    /// request carries.
    pub fn add(&self, request: &AddRequest) -> RegistryResult<Distributive> {
        request.validate()?;
        let identity = Identity::new(&request.kind, &request.version, request.client.as_deref())?;
        let deliverable = request.deliverable.unwrap_or(self.config.default_deliverable);
        let commentary = present(&request.commentary)
            .unwrap_or(self.config.default_commentary.as_str())
            .to_string();

        let existing = self.store.find(&DistributiveFilter::identity(&identity))?;
        if let Some(record) = existing.iter().find(|r| r.active) {
            warn!(%identity, "distributive already exists");
            return Err(RegistryError::Conflict(format!(
                "Already exists: '{}'",
                record.identity
            )));
        }

        let parents = self.bind_parents(&identity, request.parents.as_deref())?;

        match existing.into_iter().next() {
            Some(read) => {
                debug!(%identity, revision = read.revision, "reincarnating deleted distributive");
                let mut record = read.clone();
                let snapshot = begin_revision(&mut record);
                record.locations = vec![request.location.clone()];
                record.checksums = vec![request.checksum.clone()];
                record.set_parents(parents);
                record.deliverable = deliverable;
                record.commentary = commentary;
                record.active = true;

                commit(&self.store, &record, Write::Replace(&read), Some(&snapshot))
                    .inspect_err(|e| warn!(%identity, error = %e, "reincarnation rejected"))?;
                info!(%identity, revision = record.revision, "distributive reincarnated");
                Ok(record)
            }
            None => {
                let mut record = Distributive::new(
                    identity,
                    request.location.clone(),
                    request.checksum.clone(),
                    deliverable,
                    commentary,
                );
                record.set_parents(parents);

                commit(&self.store, &record, Write::Insert, None)
                    .inspect_err(|e| warn!(identity = %record.identity, error = %e, "addition rejected"))?;
                info!(identity = %record.identity, key = %record.key.short_id(), "distributive created");
                Ok(record)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Update
    // -----------------------------------------------------------------------

    /// Apply `request.changes` to one active distributive.
    ///
    /// Locations and checksums are appended. A non-empty parent list
    /// replaces the stored set. Changing `deliverable` needs a commentary
    /// and, like a new commentary, archives a revision.
    pub fn update(&self, request: &UpdateRequest) -> RegistryResult<UpdateOutcome> {
        let changes = &request.changes;
        if changes.is_empty() {
            warn!(reference = %describe(&request.reference), "update without changes");
            return Err(RegistryError::Validation("'changes' are mandatory".into()));
        }

        let read = self.resolver().resolve(&request.reference, true)?;
        let mut record = read.clone();
        debug!(identity = %record.identity, "updating distributive");

        let ignored = changes.ignored_fields();
        if !ignored.is_empty() {
            debug!(?ignored, "fields not updatable, ignoring");
        }

        let audited = AuditedChange::evaluate(
            &record,
            changes.deliverable,
            changes.commentary.as_deref(),
        )
        .inspect_err(|e| warn!(identity = %record.identity, error = %e, "update rejected"))?;

        let mut changed = false;
        if let Some(location) = present(&changes.location) {
            changed |= record.append_location(location);
        }
        if let Some(checksum) = present(&changes.checksum) {
            changed |= record.append_checksum(checksum);
        }

        if let Some(references) = changes.parents.as_deref().filter(|p| !p.is_empty()) {
            let parents = self.bind_parents(&record.identity, Some(references))?;
            if record.same_parents(&parents) {
                debug!(identity = %record.identity, "parent set unchanged");
            } else {
                record.set_parents(parents);
                changed = true;
            }
        }

        let snapshot = if audited.is_archivable() {
            let snapshot = begin_revision(&mut record);
            audited.apply(&mut record);
            Some(snapshot)
        } else {
            None
        };

        if !changed && snapshot.is_none() {
            debug!(identity = %record.identity, "no effective changes");
            return Ok(UpdateOutcome::Unchanged(record));
        }

        commit(&self.store, &record, Write::Replace(&read), snapshot.as_ref())
            .inspect_err(|e| warn!(identity = %record.identity, error = %e, "update rejected"))?;
        info!(
            identity = %record.identity,
            revision = record.revision,
            archived = snapshot.is_some(),
            "distributive updated"
        );
        Ok(UpdateOutcome::Updated(record))
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    /// Soft-delete by identity or location.
    ///
    /// A location reference on a record with several locations removes just
    /// that one. Otherwise all locations go and the record turns inactive.
    /// Nothing to delete is not an error.
    pub fn delete(&self, reference: &Reference) -> RegistryResult<DeleteOutcome> {
        if reference.checksum_key().is_some() {
            warn!(reference = %describe(reference), "deletion by checksum refused");
            return Err(RegistryError::Validation("Unsupported key: 'checksum'".into()));
        }

        let read = match self.resolver().resolve(reference, true) {
            Ok(record) => record,
            Err(RegistryError::NotFound(what)) => {
                debug!(reference = %what, "nothing to delete");
                return Ok(DeleteOutcome::NotFound);
            }
            Err(e) => return Err(e),
        };

        let mut record = read.clone();
        record.remove_location(reference.location_key());
        self.store.replace(&read, &record)?;

        if record.active {
            info!(identity = %record.identity, remaining = record.locations.len(), "location removed");
        } else {
            info!(identity = %record.identity, "distributive deactivated");
        }
        Ok(DeleteOutcome::Updated(record))
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Resolve parent references leniently and reject loops back to
    /// `subject`.
    fn bind_parents(
        &self,
        subject: &Identity,
        references: Option<&[Reference]>,
    ) -> RegistryResult<Vec<RecordKey>> {
        let Some(references) = references else {
            return Ok(Vec::new());
        };
        let parents = self.resolver().resolve_parents(references)?;
        self.lineage()
            .validate(subject, &parents)
            .inspect_err(|e| warn!(%subject, error = %e, "parent binding rejected"))?;
        Ok(parents)
    }
}
