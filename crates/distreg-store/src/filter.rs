use distreg_types::{Distributive, Identity};

/// How a filter constrains the client part of the identity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ClientMatch {
    /// Any client, including none.
    #[default]
    Any,
    /// Exactly this client; `Exactly(None)` matches only client-less records.
    Exactly(Option<String>),
}

/// Equality filter over distributive fields. Unset fields match anything.
///
/// `location` and `checksum` match when the record's set *contains* the
/// value, the way array equality works in document stores.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DistributiveFilter {
    pub kind: Option<String>,
    pub version: Option<String>,
    pub client: ClientMatch,
    pub location: Option<String>,
    pub checksum: Option<String>,
    pub deliverable: Option<bool>,
    pub active: Option<bool>,
}

impl DistributiveFilter {
    /// Filter matching every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter matching exactly one identity triple.
    pub fn identity(identity: &Identity) -> Self {
        Self {
            kind: Some(identity.kind.clone()),
            version: Some(identity.version.clone()),
            client: ClientMatch::Exactly(identity.client.clone()),
            ..Self::default()
        }
    }

    /// Filter matching every record of one type.
    pub fn kind(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Self::default()
        }
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn with_deliverable(mut self, deliverable: Option<bool>) -> Self {
        self.deliverable = deliverable;
        self
    }

    pub fn with_client(mut self, client: ClientMatch) -> Self {
        self.client = client;
        self
    }

    /// Evaluate the filter against one record.
    pub fn matches(&self, record: &Distributive) -> bool {
        let id = &record.identity;
        self.kind.as_ref().map_or(true, |k| *k == id.kind)
            && self.version.as_ref().map_or(true, |v| *v == id.version)
            && match &self.client {
                ClientMatch::Any => true,
                ClientMatch::Exactly(c) => *c == id.client,
            }
            && self.location.as_deref().map_or(true, |l| record.has_location(l))
            && self.checksum.as_deref().map_or(true, |c| record.has_checksum(c))
            && self.deliverable.map_or(true, |d| d == record.deliverable)
            && self.active.map_or(true, |a| a == record.active)
    }
}
