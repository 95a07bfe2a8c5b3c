use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::Identity;
use crate::key::RecordKey;

/// A registered distributive.
///
/// `locations` and `checksums` behave as insertion-ordered sets: the helper
/// methods never push a value that is already present. Global uniqueness
/// across records is the store's job.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distributive {
    pub key: RecordKey,
    #[serde(flatten)]
    pub identity: Identity,
    /// Starts at 1; bumped once per archived revision.
    pub revision: u64,
    /// Instant of the last archived change (or creation).
    pub timestamp: DateTime<Utc>,
    pub locations: Vec<String>,
    pub checksums: Vec<String>,
    /// Weak lineage edges.
    pub parents: Vec<RecordKey>,
    pub deliverable: bool,
    pub commentary: String,
    /// `false` means soft-deleted.
    pub active: bool,
}

impl Distributive {
    /// A brand-new active record at revision 1 with a single location and
    /// checksum, no parents.
    pub fn new(
        identity: Identity,
        location: impl Into<String>,
        checksum: impl Into<String>,
        deliverable: bool,
        commentary: impl Into<String>,
    ) -> Self {
        Self {
            key: RecordKey::new(),
            identity,
            revision: 1,
            timestamp: Utc::now(),
            locations: vec![location.into()],
            checksums: vec![checksum.into()],
            parents: Vec::new(),
            deliverable,
            commentary: commentary.into(),
            active: true,
        }
    }

    pub fn has_location(&self, location: &str) -> bool {
        self.locations.iter().any(|l| l == location)
    }

    pub fn has_checksum(&self, checksum: &str) -> bool {
        self.checksums.iter().any(|c| c == checksum)
    }

    /// Append a location unless already present. Returns `true` if appended.
    pub fn append_location(&mut self, location: &str) -> bool {
        if self.has_location(location) {
            return false;
        }
        self.locations.push(location.to_string());
        true
    }

    /// Append a checksum unless already present. Returns `true` if appended.
    pub fn append_checksum(&mut self, checksum: &str) -> bool {
        if self.has_checksum(checksum) {
            return false;
        }
        self.checksums.push(checksum.to_string());
        true
    }

    /// Remove one location, or all of them when `location` is `None` or is
    /// the last one left. Deactivates the record once no location remains.
    pub fn remove_location(&mut self, location: Option<&str>) {
        match location {
            Some(loc) if self.has_location(loc) && self.locations.len() > 1 => {
                self.locations.retain(|l| l != loc);
            }
            _ => self.locations.clear(),
        }
        if self.locations.is_empty() {
            self.active = false;
        }
    }

    /// Replace the parent set. Duplicates are dropped, first occurrence wins.
    pub fn set_parents(&mut self, parents: Vec<RecordKey>) {
        let mut unique: Vec<RecordKey> = Vec::with_capacity(parents.len());
        for parent in parents {
            if !unique.contains(&parent) {
                unique.push(parent);
            }
        }
        self.parents = unique;
    }

    /// `true` when `parents` names the same set as the stored parents.
    pub fn same_parents(&self, parents: &[RecordKey]) -> bool {
        parents.iter().all(|p| self.parents.contains(p))
            && self.parents.iter().all(|p| parents.contains(p))
    }
}
