//! Read paths.

use std::cmp::Reverse;

use tracing::debug;

use distreg_store::{ClientMatch, DistributiveFilter, DistributiveStore};
use distreg_types::{normalize_client, Distributive};

use crate::deliverable;
use crate::error::{RegistryError, RegistryResult};
use crate::registry::Registry;
use crate::request::{ListQuery, Reference, VersionsQuery};
use crate::resolver::list_filter;
use crate::versions::{self, VersionMode};
use crate::view::{DistributiveView, RevisionEntry, VersionEntry};

impl<S: DistributiveStore> Registry<S> {
    /// Active distributives matching the query, parents shown as identities.
    ///
    /// Falls back to the configured `list_limit` when the query has none.
    pub fn list(&self, query: &ListQuery) -> RegistryResult<Vec<DistributiveView>> {
        let filter = list_filter(&query.reference)
            .with_active(true)
            .with_deliverable(query.deliverable);
        let mut records = self.store.find(&filter)?;

        if let Some(limit) = query.limit.or(self.config.list_limit) {
            records.truncate(limit);
        }
        debug!(count = records.len(), "listing distributives");

        records.into_iter().map(|record| self.view(record)).collect()
    }

    /// Revision history of one active distributive, newest first, with the
    /// current state as the first entry.
    pub fn revisions(&self, reference: &Reference) -> RegistryResult<Vec<RevisionEntry>> {
        let record = self.resolver().resolve(reference, true)?;

        let mut archived = self.store.revisions_of(&record.key)?;
        archived.sort_by_key(|r| Reverse((r.timestamp, r.revision)));

        let mut entries = Vec::with_capacity(archived.len() + 1);
        entries.push(RevisionEntry::from(&record));
        entries.extend(archived.iter().map(RevisionEntry::from));
        Ok(entries)
    }

    /// Distinct versions of one type, active or not. Order is unspecified.
    pub fn versions_by_type(&self, query: &VersionsQuery) -> RegistryResult<Vec<String>> {
        if query.kind.is_empty() {
            return Err(RegistryError::Validation("'type' is mandatory".into()));
        }
        let filter = DistributiveFilter::kind(query.kind.as_str())
            .with_client(ClientMatch::Exactly(normalize_client(query.client.as_deref())))
            .with_deliverable(query.deliverable);
        Ok(self.store.distinct_versions(&filter)?)
    }

    /// See [`deliverable::evaluate`].
    pub fn deliverable(&self, reference: &Reference) -> RegistryResult<bool> {
        deliverable::evaluate(&self.store, reference)
    }

    /// Version entries for each requested type, active records included.
    ///
    /// `mode` is `"latest"` or `"all"`. Duplicate types are queried once.
    pub fn versions_ordered<T: AsRef<str>>(
        &self,
        mode: &str,
        types: &[T],
    ) -> RegistryResult<Vec<VersionEntry>> {
        let mode: VersionMode = mode.parse()?;
        if types.is_empty() {
            return Err(RegistryError::Validation("No type specified in request".into()));
        }

        let mut seen: Vec<&str> = Vec::with_capacity(types.len());
        let mut entries = Vec::new();
        for item in types {
            let kind: &str = item.as_ref();
            if seen.contains(&kind) {
                continue;
            }
            seen.push(kind);

            let records = self.store.find(&DistributiveFilter::kind(kind))?;
            debug!(kind, %mode, found = records.len(), "selecting versions");
            entries.extend(versions::select(mode, records).into_iter().map(VersionEntry::from));
        }

        if entries.is_empty() {
            return Err(RegistryError::NotFound("No version data found".into()));
        }
        Ok(entries)
    }

    fn view(&self, record: Distributive) -> RegistryResult<DistributiveView> {
        let parents = self
            .store
            .get_batch(&record.parents)?
            .into_iter()
            .flatten()
            .map(|parent| parent.identity)
            .collect();
        Ok(DistributiveView::new(record, parents))
    }
}
