//! Response shapes returned by registry operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use distreg_types::{Distributive, Identity, RevisionRecord};

/// A listed distributive with its parents expanded to identity triples.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributiveView {
    #[serde(flatten)]
    pub identity: Identity,
    pub revision: u64,
    pub timestamp: DateTime<Utc>,
    pub locations: Vec<String>,
    pub checksums: Vec<String>,
    pub parents: Vec<Identity>,
    pub deliverable: bool,
    pub commentary: String,
    pub active: bool,
}

impl DistributiveView {
    pub fn new(record: Distributive, parents: Vec<Identity>) -> Self {
        Self {
            identity: record.identity,
            revision: record.revision,
            timestamp: record.timestamp,
            locations: record.locations,
            checksums: record.checksums,
            parents,
            deliverable: record.deliverable,
            commentary: record.commentary,
            active: record.active,
        }
    }
}

/// One entry of a revision history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionEntry {
    pub revision: u64,
    pub timestamp: DateTime<Utc>,
    pub deliverable: bool,
    pub commentary: String,
}

impl From<&RevisionRecord> for RevisionEntry {
    fn from(r: &RevisionRecord) -> Self {
        Self {
            revision: r.revision,
            timestamp: r.timestamp,
            deliverable: r.deliverable,
            commentary: r.commentary.clone(),
        }
    }
}

impl From<&Distributive> for RevisionEntry {
    fn from(d: &Distributive) -> Self {
        Self {
            revision: d.revision,
            timestamp: d.timestamp,
            deliverable: d.deliverable,
            commentary: d.commentary.clone(),
        }
    }
}

/// One record as reported by `versions_ordered`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub version: String,
    /// Sorted.
    pub locations: Vec<String>,
    /// Sorted.
    pub checksums: Vec<String>,
}

impl From<Distributive> for VersionEntry {
    fn from(d: Distributive) -> Self {
        let mut locations = d.locations;
        let mut checksums = d.checksums;
        locations.sort();
        checksums.sort();
        Self {
            kind: d.identity.kind,
            version: d.identity.version,
            locations,
            checksums,
        }
    }
}

/// Result of an update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "record", rename_all = "snake_case")]
pub enum UpdateOutcome {
    /// The record was persisted.
    Updated(Distributive),
    /// Nothing effective was requested; the stored record is returned as is.
    Unchanged(Distributive),
}

impl UpdateOutcome {
    pub fn record(&self) -> &Distributive {
        match self {
            Self::Updated(d) | Self::Unchanged(d) => d,
        }
    }

    pub fn is_updated(&self) -> bool {
        matches!(self, Self::Updated(_))
    }
}

/// Result of a delete. Deleting something absent is not an error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "record", rename_all = "snake_case")]
pub enum DeleteOutcome {
    Updated(Distributive),
    NotFound,
}
