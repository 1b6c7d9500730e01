use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::version::AppVersion;

/// Left behind by a process that applied patches and handed over to a fresh
/// one. The fresh process consumes it exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestartMarker {
    pub applied_count: usize,
    pub version: AppVersion,
}

impl RestartMarker {
    pub fn new(applied_count: usize, version: AppVersion) -> Self {
        Self {
            applied_count,
            version,
        }
    }

    /// Writes the marker, replacing any previous one.
    pub fn write(&self, path: &Path) -> std::io::Result<()> {
        let contents = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        wm_fs::create_dirs_then_write(path, contents)
    }

    /// Reads and deletes the marker. A marker that exists but cannot be
    /// parsed is still deleted so it is not reported forever.
    pub fn take(path: &Path) -> Option<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Failed to read restart marker {}: {}", path.display(), e);
                return None;
            }
        };

        if let Err(e) = std::fs::remove_file(path) {
            warn!("Failed to remove restart marker {}: {}", path.display(), e);
        }

        match serde_json::from_str(&raw) {
            Ok(marker) => {
                debug!("Consumed restart marker {}", path.display());
                Some(marker)
            }
            Err(e) => {
                warn!("Discarding malformed restart marker: {}", e);
                None
            }
        }
    }

    /// Removes a marker without reading it.
    pub fn discard(path: &Path) {
        match std::fs::remove_file(path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove restart marker {}: {}", path.display(), e),
        }
    }
}
