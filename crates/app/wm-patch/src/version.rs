//! Semantic version parsing and ordering.
//!
//! Release tags and manifests are written by hand, so parsing is lenient: a
//! leading `v` is dropped and short versions such as `1.2` are padded to
//! `1.2.0`. Ordering follows semver precedence and ignores build metadata.

use std::{cmp::Ordering, fmt, str::FromStr};

use semver::Version;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, thiserror::Error)]
#[error("invalid version '{input}'")]
pub struct VersionParseError {
    pub input: String,
    #[source]
    pub source: semver::Error,
}

#[derive(Debug, Clone)]
pub struct AppVersion(Version);

impl AppVersion {
    pub fn parse(input: &str) -> Result<Self, VersionParseError> {
        let normalized = normalize(input);
        Version::parse(&normalized)
            .map(AppVersion)
            .map_err(|source| VersionParseError {
                input: input.to_string(),
                source,
            })
    }

    pub fn as_semver(&self) -> &Version {
        &self.0
    }
}

fn normalize(input: &str) -> String {
    let trimmed = input.trim();
    let trimmed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);

    let split_at = trimmed.find(['-', '+']).unwrap_or(trimmed.len());
    let (core, suffix) = trimmed.split_at(split_at);

    let components: Vec<&str> = core.split('.').collect();
    let all_numeric = components
        .iter()
        .all(|c| !c.is_empty() && c.chars().all(|ch| ch.is_ascii_digit()));

    if all_numeric && components.len() < 3 {
        let mut padded = core.to_string();
        for _ in components.len()..3 {
            padded.push_str(".0");
        }
        padded.push_str(suffix);
        padded
    } else {
        trimmed.to_string()
    }
}

impl FromStr for AppVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppVersion::parse(s)
    }
}

impl fmt::Display for AppVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq for AppVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for AppVersion {}

impl PartialOrd for AppVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AppVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp_precedence(&other.0)
    }
}

impl Serialize for AppVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AppVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        AppVersion::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Compares two version strings by semver precedence.
pub fn compare(a: &str, b: &str) -> Result<Ordering, VersionParseError> {
    Ok(AppVersion::parse(a)?.cmp(&AppVersion::parse(b)?))
}

/// Whether a release tag is newer than `current`. Tags that do not parse
/// count as newer so a possibly relevant release is never hidden.
pub fn tag_is_newer(tag: &str, current: &AppVersion) -> bool {
    match AppVersion::parse(tag) {
        Ok(version) => version > *current,
        Err(e) => {
            tracing::debug!("Treating unparseable tag as newer: {}", e);
            true
        }
    }
}
