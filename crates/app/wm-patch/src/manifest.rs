use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    error::{PatchError, Result},
    version::AppVersion,
};

pub const MANIFEST_FILE: &str = "patch.json";

/// On-disk `patch.json`, produced by the release build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub files: Vec<FileMapping>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMapping {
    /// Path inside the bundle directory.
    pub source: PathBuf,
    /// Path inside the installation root.
    pub target: PathBuf,
}

/// A staged bundle whose manifest parsed and whose versions are valid.
#[derive(Debug, Clone)]
pub struct PatchBundle {
    pub id: String,
    pub version: AppVersion,
    pub min_version: Option<AppVersion>,
    pub description: Option<String>,
    pub files: Vec<FileMapping>,
    pub dir: PathBuf,
}

impl PatchBundle {
    /// Loads the bundle staged in `dir`. `Ok(None)` means the directory has no
    /// manifest and is not a bundle.
    pub fn load(dir: &Path) -> Result<Option<Self>> {
        let manifest_path = dir.join(MANIFEST_FILE);
        let raw = match std::fs::read_to_string(&manifest_path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(PatchError::ManifestRead {
                    path: manifest_path,
                    source,
                });
            }
        };

        let manifest: PatchManifest =
            serde_json::from_str(&raw).map_err(|source| PatchError::ManifestParse {
                path: manifest_path.clone(),
                source,
            })?;

        Self::from_manifest(manifest, dir).map(Some)
    }

    fn from_manifest(manifest: PatchManifest, dir: &Path) -> Result<Self> {
        let id = manifest
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| {
                dir.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default()
            });

        let version =
            AppVersion::parse(&manifest.version).map_err(|source| PatchError::InvalidVersion {
                bundle: id.clone(),
                field: "version",
                source,
            })?;

        let min_version = manifest
            .min_version
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .map(AppVersion::parse)
            .transpose()
            .map_err(|source| PatchError::InvalidVersion {
                bundle: id.clone(),
                field: "min_version",
                source,
            })?;

        Ok(Self {
            id,
            version,
            min_version,
            description: manifest.description,
            files: manifest.files,
            dir: dir.to_path_buf(),
        })
    }
}

/// Whether `path` stays inside whatever root it is joined onto.
pub(crate) fn is_contained(path: &Path) -> bool {
    !path.as_os_str().is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
