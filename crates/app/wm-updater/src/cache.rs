use std::{path::PathBuf, time::Duration};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use wm_patch::AppVersion;

use crate::types::UpdateStatus;

#[derive(Debug, Serialize, Deserialize)]
struct CacheDocument {
    timestamp: DateTime<Utc>,
    data: UpdateStatus,
}

/// Last successful update check, reused until it expires or the installed
/// version changes.
#[derive(Debug, Clone)]
pub struct UpdateCache {
    path: PathBuf,
    max_age: Duration,
}

impl UpdateCache {
    pub fn new(path: impl Into<PathBuf>, max_age: Duration) -> Self {
        Self {
            path: path.into(),
            max_age,
        }
    }

    /// The cached status if it is younger than `max_age` at `now` and was
    /// produced for `current_version`.
    pub fn load_fresh(
        &self,
        current_version: &AppVersion,
        now: DateTime<Utc>,
    ) -> Option<UpdateStatus> {
        let doc = match wm_fs::read_json_file_or_default::<Option<CacheDocument>>(&self.path) {
            Ok(doc) => doc?,
            Err(e) => {
                warn!("Ignoring unreadable update cache: {:#}", e);
                return None;
            }
        };

        let age = now.signed_duration_since(doc.timestamp).to_std().ok()?;
        if age >= self.max_age {
            debug!("Update cache expired");
            return None;
        }

        match AppVersion::parse(&doc.data.current_version) {
            Ok(cached) if cached == *current_version => Some(doc.data),
            _ => {
                debug!(
                    "Update cache was written for {}, now at {}",
                    doc.data.current_version, current_version
                );
                None
            }
        }
    }

    pub fn store(&self, status: &UpdateStatus, now: DateTime<Utc>) -> anyhow::Result<()> {
        wm_fs::write_json_pretty(
            &self.path,
            &CacheDocument {
                timestamp: now,
                data: status.clone(),
            },
        )
    }
}
