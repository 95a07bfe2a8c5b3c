//! Turning loose references into store filters and records.
//!
//! Two modes exist. Strict resolution must land on exactly one record and
//! fails otherwise. Lenient resolution is used only for binding parents: a
//! reference that is malformed, matches nothing, or matches several records
//! is skipped and logged, never reported to the caller.

use tracing::debug;

use distreg_store::{ClientMatch, DistributiveFilter, DistributiveStore};
use distreg_types::{normalize_client, Distributive, RecordKey};

use crate::error::{RegistryError, RegistryResult};
use crate::request::{present, Reference};

/// Build the store filter for a strict or lenient lookup.
///
/// `type` and `version` must come together. When they do, an absent client
/// means "no client". A client given next to a location or checksum narrows
/// that search as well.
pub fn search_filter(reference: &Reference) -> RegistryResult<DistributiveFilter> {
    let kind = present(&reference.kind);
    let version = present(&reference.version);

    let client = match (kind, version) {
        (Some(_), None) | (None, Some(_)) => {
            return Err(RegistryError::Validation(
                "both 'type' and 'version' must be specified".into(),
            ));
        }
        (Some(_), Some(_)) => ClientMatch::Exactly(normalize_client(reference.client.as_deref())),
        (None, None) => match &reference.client {
            Some(c) => ClientMatch::Exactly(normalize_client(Some(c))),
            None => ClientMatch::Any,
        },
    };

    let filter = DistributiveFilter {
        kind: kind.map(Into::into),
        version: version.map(Into::into),
        client,
        location: reference.location_key().map(Into::into),
        checksum: reference.checksum_key().map(Into::into),
        ..DistributiveFilter::default()
    };

    if filter.kind.is_none() && filter.location.is_none() && filter.checksum.is_none() {
        return Err(RegistryError::Validation(
            "reference needs 'type' and 'version', a 'location', or a 'checksum'".into(),
        ));
    }
    Ok(filter)
}

/// Build the filter for listings: every present key constrains, no pairing
/// rule, no mandatory key.
pub fn list_filter(reference: &Reference) -> DistributiveFilter {
    DistributiveFilter {
        kind: present(&reference.kind).map(Into::into),
        version: present(&reference.version).map(Into::into),
        client: match &reference.client {
            Some(c) => ClientMatch::Exactly(normalize_client(Some(c))),
            None => ClientMatch::Any,
        },
        location: reference.location_key().map(Into::into),
        checksum: reference.checksum_key().map(Into::into),
        ..DistributiveFilter::default()
    }
}

/// Resolves references against a store.
pub struct Resolver<'a, S: DistributiveStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: DistributiveStore + ?Sized> Resolver<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Resolve to exactly one record.
    ///
    /// With `active_only`, soft-deleted records are invisible. Zero matches
    /// is `NotFound`, several is `Conflict`.
    pub fn resolve(&self, reference: &Reference, active_only: bool) -> RegistryResult<Distributive> {
        let mut filter = search_filter(reference)?;
        if active_only {
            filter = filter.with_active(true);
        }
        debug!(?filter, "resolving reference");

        let mut found = self.store.find(&filter)?;
        match found.len() {
            0 => Err(RegistryError::NotFound(describe(reference))),
            1 => Ok(found.remove(0)),
            n => Err(RegistryError::Conflict(format!(
                "{} matches {n} distributives",
                describe(reference)
            ))),
        }
    }

    /// Resolve parent references leniently, active or not.
    ///
    /// Unusable references are skipped. Duplicates collapse, first
    /// occurrence wins. Store failures still propagate.
    pub fn resolve_parents(&self, parents: &[Reference]) -> RegistryResult<Vec<RecordKey>> {
        let mut keys: Vec<RecordKey> = Vec::with_capacity(parents.len());
        for parent in parents {
            match self.resolve(parent, false) {
                Ok(record) => {
                    debug!(parent = %record.identity, "binding parent");
                    if !keys.contains(&record.key) {
                        keys.push(record.key);
                    }
                }
                Err(RegistryError::Store(e)) => return Err(RegistryError::Store(e)),
                Err(e) => {
                    debug!(parent = %describe(parent), error = %e, "skipping parent binding");
                }
            }
        }
        Ok(keys)
    }
}

/// Human-readable form of a reference for messages and logs.
pub fn describe(reference: &Reference) -> String {
    let mut parts = Vec::new();
    if let Some(kind) = present(&reference.kind) {
        parts.push(format!("type={kind}"));
    }
    if let Some(version) = present(&reference.version) {
        parts.push(format!("version={version}"));
    }
    if let Some(client) = present(&reference.client) {
        parts.push(format!("client={client}"));
    }
    if let Some(location) = reference.location_key() {
        parts.push(format!("location={location}"));
    }
    if let Some(checksum) = reference.checksum_key() {
        parts.push(format!("checksum={checksum}"));
    }
    format!("{{{}}}", parts.join(", "))
}
