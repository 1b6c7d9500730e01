use serde::{Deserialize, Serialize};

/// A release as returned by the registry, newest first in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRelease {
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Release notes.
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub assets: Vec<RemoteAsset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteAsset {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub size: u64,
    /// Registry API endpoint for the asset.
    #[serde(default)]
    pub url: String,
    /// Direct link served to browsers.
    #[serde(default)]
    pub browser_download_url: String,
}

/// Result of an update check. Also the payload of the update cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStatus {
    pub update_available: bool,
    pub current_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_notes: Option<String>,
    #[serde(default)]
    pub patches: Vec<PatchInfo>,
    #[serde(default)]
    pub message: String,
    /// A newer release exists but carries no patch archive.
    #[serde(default)]
    pub manual_download: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchInfo {
    pub name: String,
    pub size: u64,
    pub download_url: String,
    pub release_tag: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Download,
    Extract,
    Apply,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetFailure {
    /// Asset name, or bundle id for apply failures.
    pub asset: String,
    pub kind: FailureKind,
    pub message: String,
}

/// Outcome of downloading and extracting candidate assets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageReport {
    pub downloaded: Vec<String>,
    pub failed: Vec<AssetFailure>,
}

impl StageReport {
    pub fn downloaded_count(&self) -> usize {
        self.downloaded.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchResult {
    pub success: bool,
    pub message: String,
    pub downloaded_count: usize,
    pub applied_count: usize,
    #[serde(default)]
    pub errors: Vec<AssetFailure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch_error: Option<String>,
    /// Applied bundles missing from the ledger. A restart would apply them again.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unrecorded: Vec<String>,
    pub needs_restart: bool,
}
