use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Installation-relative locations as written in the settings file.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PathSettings {
    pub staging_dir: PathBuf,
    pub data_dir: PathBuf,
    pub backup_dir: PathBuf,
    pub log_dir: PathBuf,
    /// Mutable source trees copied into each pre-apply backup.
    pub backup_sources: Vec<PathBuf>,
}

/// Absolute paths of every file and directory the patch pipeline touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub install_root: PathBuf,
    pub staging_dir: PathBuf,
    pub data_dir: PathBuf,
    pub backup_dir: PathBuf,
    pub log_dir: PathBuf,
    pub backup_sources: Vec<PathBuf>,
}

impl PathSettings {
    pub fn resolve(&self, install_root: &Path) -> AppPaths {
        let join = |p: &Path| {
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                install_root.join(p)
            }
        };

        AppPaths {
            install_root: install_root.to_path_buf(),
            staging_dir: join(&self.staging_dir),
            data_dir: join(&self.data_dir),
            backup_dir: join(&self.backup_dir),
            log_dir: join(&self.log_dir),
            backup_sources: self.backup_sources.iter().map(|p| join(p)).collect(),
        }
    }
}

impl AppPaths {
    pub fn applied_patches_file(&self) -> PathBuf {
        self.data_dir.join("applied_patches.json")
    }

    pub fn downloaded_patches_file(&self) -> PathBuf {
        self.data_dir.join("downloaded_patches.json")
    }

    pub fn update_cache_file(&self) -> PathBuf {
        self.data_dir.join("update_cache.json")
    }

    pub fn restart_marker_file(&self) -> PathBuf {
        self.data_dir.join("just_updated.json")
    }
}
