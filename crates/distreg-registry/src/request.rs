//! Request shapes accepted by the registry.
//!
//! Field names match the wire format (`type`, `version`, `client`,
//! `location`, `checksum`, ...) so any transport can deserialize straight
//! into these types. Empty strings are treated as absent throughout.

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, RegistryResult};

/// `Some(s)` only when `s` is non-empty.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// A loose reference to a distributive: any subset of its search keys.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

impl Reference {
    /// Reference by identity triple.
    pub fn identity(kind: &str, version: &str, client: Option<&str>) -> Self {
        Self {
            kind: Some(kind.into()),
            version: Some(version.into()),
            client: client.map(Into::into),
            ..Self::default()
        }
    }

    /// Reference by a location.
    pub fn location(location: &str) -> Self {
        Self {
            location: Some(location.into()),
            ..Self::default()
        }
    }

    /// Reference by a checksum.
    pub fn checksum(checksum: &str) -> Self {
        Self {
            checksum: Some(checksum.into()),
            ..Self::default()
        }
    }

    pub fn with_client(mut self, client: &str) -> Self {
        self.client = Some(client.into());
        self
    }

    /// The location key, if one was given.
    pub fn location_key(&self) -> Option<&str> {
        present(&self.location)
    }

    /// The checksum key, if one was given.
    pub fn checksum_key(&self) -> Option<&str> {
        present(&self.checksum)
    }
}

/// Request to register a distributive.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddRequest {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub checksum: String,
    #[serde(default)]
    pub parents: Option<Vec<Reference>>,
    #[serde(default)]
    pub deliverable: Option<bool>,
    #[serde(default)]
    pub commentary: Option<String>,
}

impl AddRequest {
    pub fn new(kind: &str, version: &str, location: &str, checksum: &str) -> Self {
        Self {
            kind: kind.into(),
            version: version.into(),
            location: location.into(),
            checksum: checksum.into(),
            ..Self::default()
        }
    }

    pub fn client(mut self, client: &str) -> Self {
        self.client = Some(client.into());
        self
    }

    pub fn parents(mut self, parents: Vec<Reference>) -> Self {
        self.parents = Some(parents);
        self
    }

    pub fn deliverable(mut self, deliverable: bool) -> Self {
        self.deliverable = Some(deliverable);
        self
    }

    pub fn commentary(mut self, commentary: &str) -> Self {
        self.commentary = Some(commentary.into());
        self
    }

    /// Reject requests missing a mandatory field.
    pub fn validate(&self) -> RegistryResult<()> {
        let mandatory = [
            ("type", &self.kind),
            ("version", &self.version),
            ("location", &self.location),
            ("checksum", &self.checksum),
        ];
        for (name, value) in mandatory {
            if value.is_empty() {
                return Err(RegistryError::Validation(format!("'{name}' is mandatory")));
            }
        }
        Ok(())
    }
}

/// Field changes requested by an update.
///
/// `type`, `version`, `client`, and `active` are accepted so that payloads
/// carrying them still parse, but the update path never applies them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changes {
    /// Location to append.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Checksum to append.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
    /// Full replacement of the parent set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parents: Option<Vec<Reference>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deliverable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commentary: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl Changes {
    /// `true` when no field at all was supplied.
    pub fn is_empty(&self) -> bool {
        self.location.is_none()
            && self.checksum.is_none()
            && self.parents.is_none()
            && self.deliverable.is_none()
            && self.commentary.is_none()
            && self.ignored_fields().is_empty()
    }

    /// Names of supplied fields the update path refuses to apply.
    pub fn ignored_fields(&self) -> Vec<&'static str> {
        let mut ignored = Vec::new();
        if self.kind.is_some() {
            ignored.push("type");
        }
        if self.version.is_some() {
            ignored.push("version");
        }
        if self.client.is_some() {
            ignored.push("client");
        }
        if self.active.is_some() {
            ignored.push("active");
        }
        ignored
    }
}

/// Request to modify one active distributive.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRequest {
    #[serde(flatten)]
    pub reference: Reference,
    #[serde(default)]
    pub changes: Changes,
}

impl UpdateRequest {
    pub fn new(reference: Reference, changes: Changes) -> Self {
        Self { reference, changes }
    }
}

/// Filter for listing active distributives.
///
/// Unlike strict references, a type without a version (or the reverse) is
/// fine here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(flatten)]
    pub reference: Reference,
    #[serde(default)]
    pub deliverable: Option<bool>,
    #[serde(default, alias = "count")]
    pub limit: Option<usize>,
}

/// Query for the distinct versions of one type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionsQuery {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub deliverable: Option<bool>,
    #[serde(default)]
    pub client: Option<String>,
}

impl VersionsQuery {
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }
}
