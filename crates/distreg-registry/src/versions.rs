//! Version precedence and selection modes.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use semver::Prerelease;

use distreg_types::Distributive;

use crate::error::RegistryError;

// ---------------------------------------------------------------------------
// VersionMode
// ---------------------------------------------------------------------------

/// Which records `versions_ordered` keeps per type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VersionMode {
    /// Only the record with the highest version.
    Latest,
    /// Every record.
    All,
}

impl FromStr for VersionMode {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(Self::Latest),
            "all" => Ok(Self::All),
            other => Err(RegistryError::NotFound(format!(
                "No version for '{other}' found. Try 'all' or 'latest'."
            ))),
        }
    }
}

impl fmt::Display for VersionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => write!(f, "latest"),
            Self::All => write!(f, "all"),
        }
    }
}

// ---------------------------------------------------------------------------
// VersionKey
// ---------------------------------------------------------------------------

/// Sort key for a version string.
///
/// Unparsed versions order below every parsed one, lexically among
/// themselves. Parsed versions compare by numeric release components with
/// trailing zeros dropped, then by pre-release (no pre-release is highest).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum VersionKey {
    Unparsed(String),
    Parsed { release: Vec<ReleasePart>, pre: Prerelease },
}

/// One numeric release component of any length, kept as its digits with
/// leading zeros stripped (`"0"` for zero).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReleasePart(String);

impl ReleasePart {
    fn parse(part: &str) -> Option<Self> {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let digits = part.trim_start_matches('0');
        Some(Self(if digits.is_empty() { "0" } else { digits }.to_string()))
    }

    fn is_zero(&self) -> bool {
        self.0 == "0"
    }
}

impl Ord for ReleasePart {
    fn cmp(&self, other: &Self) -> Ordering {
        // Without leading zeros, more digits means a larger number.
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for ReleasePart {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl VersionKey {
    pub fn parse(raw: &str) -> Self {
        Self::parse_parts(raw).unwrap_or_else(|| Self::Unparsed(raw.to_string()))
    }

    fn parse_parts(raw: &str) -> Option<Self> {
        let body = raw.trim();
        let body = body.strip_prefix(|c: char| c == 'v' || c == 'V').unwrap_or(body);
        let body = body.split_once('+').map_or(body, |(version, _build)| version);

        let (release, pre) = match body.split_once('-') {
            Some((_, "")) => return None,
            Some((release, pre)) => (release, Prerelease::new(pre).ok()?),
            None => (body, Prerelease::EMPTY),
        };

        let mut release = release
            .split('.')
            .map(ReleasePart::parse)
            .collect::<Option<Vec<_>>>()?;
        while release.last().is_some_and(ReleasePart::is_zero) {
            release.pop();
        }

        Some(Self::Parsed { release, pre })
    }
}

/// Order two version strings by precedence.
pub fn compare(a: &str, b: &str) -> Ordering {
    VersionKey::parse(a).cmp(&VersionKey::parse(b))
}

/// Apply `mode` to the records of one type, keeping store order.
///
/// For `Latest`, ties go to the last record with the maximal version.
pub fn select(mode: VersionMode, records: Vec<Distributive>) -> Vec<Distributive> {
    match mode {
        VersionMode::All => records,
        VersionMode::Latest => records
            .into_iter()
            .map(|record| (VersionKey::parse(&record.identity.version), record))
            .max_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, record)| record)
            .into_iter()
            .collect(),
    }
}
