use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::distributive::Distributive;
use crate::key::RecordKey;

/// Archived copy of a distributive's audited fields.
///
/// Captures the state *before* a gated change. The subject is a weak
/// reference: the distributive keeps evolving after the snapshot is taken.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionRecord {
    pub subject: RecordKey,
    pub revision: u64,
    pub timestamp: DateTime<Utc>,
    pub deliverable: bool,
    pub commentary: String,
}

impl RevisionRecord {
    /// Copy the audited fields of `distributive` as they are right now.
    pub fn snapshot(distributive: &Distributive) -> Self {
        Self {
            subject: distributive.key,
            revision: distributive.revision,
            timestamp: distributive.timestamp,
            deliverable: distributive.deliverable,
            commentary: distributive.commentary.clone(),
        }
    }
}
