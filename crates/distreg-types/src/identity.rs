use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Normalize a client value coming from a request.
///
/// Absent and empty clients both mean "no client". This is the only place
/// the two are folded together; everything past this point treats `None`
/// as the marker.
pub fn normalize_client(client: Option<&str>) -> Option<String> {
    match client {
        Some(c) if !c.is_empty() => Some(c.to_string()),
        _ => None,
    }
}

/// The (type, version, client) triple naming a distributive.
///
/// At most one active record exists per identity. Two identities are equal
/// only when all three parts are equal, so `client: None` never matches a
/// named client.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Identity {
    /// Artifact type (e.g. "APP", "DOCS").
    #[serde(rename = "type")]
    pub kind: String,
    /// Version string, kept verbatim.
    pub version: String,
    /// Client the build was produced for; `None` for generic builds.
    #[serde(default)]
    pub client: Option<String>,
}

impl Identity {
    /// Build an identity, normalizing the client and rejecting empty parts.
    pub fn new(
        kind: impl Into<String>,
        version: impl Into<String>,
        client: Option<&str>,
    ) -> Result<Self, TypeError> {
        let kind = kind.into();
        let version = version.into();
        if kind.is_empty() {
            return Err(TypeError::EmptyField("type"));
        }
        if version.is_empty() {
            return Err(TypeError::EmptyField("version"));
        }
        Ok(Self {
            kind,
            version,
            client: normalize_client(client),
        })
    }

    /// Client as a plain string slice, empty when there is none.
    pub fn client_str(&self) -> &str {
        self.client.as_deref().unwrap_or("")
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({self})")
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.kind, self.version, self.client_str())
    }
}
