//! Persistent, append-only records of applied bundles and downloaded assets.
//!
//! Both ledgers re-read their file on every call so that an edit made by a
//! recovery tool between two calls is honoured. A missing or corrupt file reads
//! as empty; writes go through a temp file and a rename.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, warn};
use wm_fs::create_dirs_then_write;

use crate::{error::LedgerError, version::AppVersion};

trait LedgerDocument: Serialize + DeserializeOwned + Default {
    fn entries(&self) -> &Vec<String>;
    fn entries_mut(&mut self) -> &mut Vec<String>;
}

#[derive(Debug, Clone)]
struct LedgerFile {
    path: PathBuf,
}

impl LedgerFile {
    fn load<D: LedgerDocument>(&self) -> D {
        match wm_fs::read_json_file_or_default(&self.path) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("Ignoring unreadable ledger {}: {:#}", self.path.display(), e);
                D::default()
            }
        }
    }

    fn persist<D: LedgerDocument>(&self, doc: &D) -> Result<(), LedgerError> {
        let contents = serde_json::to_string_pretty(doc)?;
        create_dirs_then_write(&self.path, contents).map_err(|source| LedgerError::Persist {
            path: self.path.clone(),
            source,
        })
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct AppliedDocument {
    #[serde(default)]
    patches: Vec<String>,
    #[serde(default)]
    last_updated: Option<String>,
}

impl LedgerDocument for AppliedDocument {
    fn entries(&self) -> &Vec<String> {
        &self.patches
    }

    fn entries_mut(&mut self) -> &mut Vec<String> {
        &mut self.patches
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct DownloadedDocument {
    #[serde(default)]
    downloaded: Vec<String>,
    #[serde(default)]
    last_updated: Option<DateTime<Utc>>,
}

impl LedgerDocument for DownloadedDocument {
    fn entries(&self) -> &Vec<String> {
        &self.downloaded
    }

    fn entries_mut(&mut self) -> &mut Vec<String> {
        &mut self.downloaded
    }
}

/// Bundle ids that have been applied to this installation.
#[derive(Debug, Clone)]
pub struct PatchLedger {
    file: LedgerFile,
}

impl PatchLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: LedgerFile { path: path.into() },
        }
    }

    pub fn path(&self) -> &Path {
        &self.file.path
    }

    pub fn applied_ids(&self) -> BTreeSet<String> {
        self.file
            .load::<AppliedDocument>()
            .patches
            .into_iter()
            .collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.file
            .load::<AppliedDocument>()
            .entries()
            .iter()
            .any(|p| p == id)
    }

    /// Version left behind by the most recently applied bundle.
    pub fn last_applied_version(&self) -> Option<AppVersion> {
        let raw = self.file.load::<AppliedDocument>().last_updated?;
        match AppVersion::parse(&raw) {
            Ok(version) => Some(version),
            Err(e) => {
                warn!("Ignoring ledger version: {}", e);
                None
            }
        }
    }

    /// Records `id` as applied. Recording an id that is already present does
    /// not touch the file.
    pub fn record_applied(&self, id: &str, version: &AppVersion) -> Result<(), LedgerError> {
        let mut doc = self.file.load::<AppliedDocument>();
        if doc.entries().iter().any(|p| p == id) {
            debug!("Patch {} already recorded", id);
            return Ok(());
        }

        doc.entries_mut().push(id.to_string());
        doc.last_updated = Some(version.to_string());
        self.file.persist(&doc)?;
        debug!("Recorded patch {} at version {}", id, version);
        Ok(())
    }
}

/// Remote asset names that have already been fetched and staged.
#[derive(Debug, Clone)]
pub struct DownloadLedger {
    file: LedgerFile,
}

impl DownloadLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: LedgerFile { path: path.into() },
        }
    }

    pub fn path(&self) -> &Path {
        &self.file.path
    }

    pub fn downloaded(&self) -> BTreeSet<String> {
        self.file
            .load::<DownloadedDocument>()
            .downloaded
            .into_iter()
            .collect()
    }

    pub fn record_downloaded(&self, asset_name: &str) -> Result<(), LedgerError> {
        let mut doc = self.file.load::<DownloadedDocument>();
        if doc.entries().iter().any(|d| d == asset_name) {
            return Ok(());
        }

        doc.entries_mut().push(asset_name.to_string());
        doc.last_updated = Some(Utc::now());
        self.file.persist(&doc)
    }

    /// Drops `asset_name` so the next fetch downloads it again. Returns whether
    /// an entry was removed.
    pub fn forget(&self, asset_name: &str) -> Result<bool, LedgerError> {
        let mut doc = self.file.load::<DownloadedDocument>();
        let before = doc.entries().len();
        doc.entries_mut().retain(|d| d != asset_name);
        if doc.entries().len() == before {
            return Ok(false);
        }

        doc.last_updated = Some(Utc::now());
        self.file.persist(&doc)?;
        Ok(true)
    }
}
