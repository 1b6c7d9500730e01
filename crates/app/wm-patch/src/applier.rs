//! Applies staged patch bundles to the live installation.
//!
//! Bundles are applied in ascending version order. Each success advances the
//! effective version used to gate `min_version` for the rest of the batch, so
//! a chain of micro-patches can each require its direct predecessor.

use std::{collections::HashSet, path::PathBuf};

use tracing::{debug, error, info, warn};

use crate::{
    backup::create_backup,
    error::{PatchError, Result, error_chain},
    ledger::PatchLedger,
    manifest::{PatchBundle, is_contained},
    version::AppVersion,
};

const WRITE_PROBE: &str = ".wm_write_probe";

#[derive(Debug, Clone)]
pub struct ApplierPaths {
    pub install_root: PathBuf,
    pub staging_dir: PathBuf,
    pub backup_dir: PathBuf,
    /// Trees copied into the backup taken before each bundle.
    pub backup_sources: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleFailure {
    pub id: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct ApplyReport {
    /// Ids of fully applied bundles, in application order.
    pub applied: Vec<String>,
    pub failed: Vec<BundleFailure>,
    /// Bundles held back by their `min_version`.
    pub gated: Vec<String>,
    /// Applied bundles whose ledger entry could not be written. They will be
    /// offered again on the next run.
    pub unrecorded: Vec<String>,
    /// Version of the installation after this batch.
    pub version: AppVersion,
}

impl ApplyReport {
    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }

    /// Every applied bundle made it into the ledger.
    pub fn is_recorded(&self) -> bool {
        self.unrecorded.is_empty()
    }
}

pub struct LocalPatchApplier {
    paths: ApplierPaths,
    ledger: PatchLedger,
    current_version: AppVersion,
}

impl LocalPatchApplier {
    pub fn new(paths: ApplierPaths, ledger: PatchLedger, current_version: AppVersion) -> Self {
        Self {
            paths,
            ledger,
            current_version,
        }
    }

    pub fn current_version(&self) -> &AppVersion {
        &self.current_version
    }

    pub fn ledger(&self) -> &PatchLedger {
        &self.ledger
    }

    pub fn staging_dir(&self) -> &std::path::Path {
        &self.paths.staging_dir
    }

    /// Staged bundles not yet applied and newer than the current version,
    /// sorted by version then id. Bundles with unreadable manifests or
    /// versions are skipped with a warning, and so is every folder after the
    /// first that declares an id already seen.
    pub fn pending_bundles(&self) -> Result<Vec<PatchBundle>> {
        let staging = &self.paths.staging_dir;
        let dirs = wm_fs::list_subdirs(staging).map_err(|source| PatchError::Staging {
            path: staging.clone(),
            source,
        })?;

        let applied = self.ledger.applied_ids();
        let mut pending = Vec::new();

        for dir in dirs {
            let bundle = match PatchBundle::load(&dir) {
                Ok(Some(bundle)) => bundle,
                Ok(None) => {
                    debug!("No manifest in {}, skipping", dir.display());
                    continue;
                }
                Err(e) => {
                    warn!("Skipping staged bundle {}: {}", dir.display(), error_chain(&e));
                    continue;
                }
            };

            if applied.contains(&bundle.id) {
                debug!("Patch {} already applied", bundle.id);
                continue;
            }

            if bundle.version <= self.current_version {
                debug!(
                    "Patch {} ({}) is not newer than {}",
                    bundle.id, bundle.version, self.current_version
                );
                continue;
            }

            pending.push(bundle);
        }

        pending.sort_by(|a, b| {
            a.version
                .cmp(&b.version)
                .then_with(|| a.id.cmp(&b.id))
                .then_with(|| a.dir.cmp(&b.dir))
        });

        let mut seen = HashSet::new();
        pending.retain(|bundle| {
            if seen.insert(bundle.id.clone()) {
                return true;
            }
            warn!(
                "Ignoring {}: patch {} is already staged elsewhere",
                bundle.dir.display(),
                bundle.id
            );
            false
        });
        Ok(pending)
    }

    /// Applies every pending bundle. Individual bundle failures are reported
    /// in the result; only an unusable staging directory or an unwritable
    /// installation root fail the whole call.
    pub fn apply_pending(&mut self) -> Result<ApplyReport> {
        let pending = self.pending_bundles()?;
        let mut report = ApplyReport {
            applied: Vec::new(),
            failed: Vec::new(),
            gated: Vec::new(),
            unrecorded: Vec::new(),
            version: self.current_version.clone(),
        };

        if pending.is_empty() {
            info!("No patches to apply");
            return Ok(report);
        }

        self.ensure_install_root_writable()?;

        let mut effective = self.current_version.clone();
        for bundle in pending {
            if let Some(min_version) = &bundle.min_version
                && effective < *min_version
            {
                warn!(
                    "Skipping patch {}: requires {} but installation is at {}",
                    bundle.id, min_version, effective
                );
                report.gated.push(bundle.id);
                continue;
            }

            info!(
                "Applying patch {} ({}){}",
                bundle.id,
                bundle.version,
                bundle
                    .description
                    .as_deref()
                    .map(|d| format!(" - {d}"))
                    .unwrap_or_default()
            );

            match self.apply_bundle(&bundle) {
                Ok(()) => {
                    if let Err(e) = self.ledger.record_applied(&bundle.id, &bundle.version) {
                        error!("Failed to record patch {}: {}", bundle.id, error_chain(&e));
                        report.unrecorded.push(bundle.id.clone());
                    }
                    info!("Applied patch {}", bundle.id);
                    effective = bundle.version.clone();
                    report.applied.push(bundle.id);
                }
                Err(e) => {
                    let reason = error_chain(&e);
                    error!("Failed to apply patch {}: {}", bundle.id, reason);
                    report.failed.push(BundleFailure {
                        id: bundle.id,
                        reason,
                    });
                }
            }
        }

        if !report.applied.is_empty() {
            info!(
                "Applied {} patches, now at {}",
                report.applied.len(),
                effective
            );
        }

        self.current_version = effective.clone();
        report.version = effective;
        Ok(report)
    }

    fn apply_bundle(&self, bundle: &PatchBundle) -> Result<()> {
        for mapping in &bundle.files {
            for path in [&mapping.source, &mapping.target] {
                if !is_contained(path) {
                    return Err(PatchError::UnsafePath {
                        bundle: bundle.id.clone(),
                        path: path.clone(),
                    });
                }
            }
        }

        create_backup(
            &self.paths.backup_dir,
            &self.paths.install_root,
            &self.paths.backup_sources,
            &bundle.id,
        )?;

        for mapping in &bundle.files {
            let source = bundle.dir.join(&mapping.source);
            let target = self.paths.install_root.join(&mapping.target);

            if !source.is_file() {
                warn!(
                    "Patch {} is missing {}, skipping it",
                    bundle.id,
                    source.display()
                );
                continue;
            }

            let copy_err = |source| PatchError::Copy {
                bundle: bundle.id.clone(),
                target: target.clone(),
                source,
            };

            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent).map_err(copy_err)?;
            }
            std::fs::copy(&source, &target).map_err(copy_err)?;
            debug!(
                "Copied {} -> {}",
                mapping.source.display(),
                mapping.target.display()
            );
        }

        Ok(())
    }

    fn ensure_install_root_writable(&self) -> Result<()> {
        let root = &self.paths.install_root;
        let probe = root.join(WRITE_PROBE);
        let unwritable = |source| PatchError::InstallRootUnwritable {
            path: root.clone(),
            source,
        };

        std::fs::write(&probe, b"").map_err(unwritable)?;
        std::fs::remove_file(&probe).map_err(unwritable)?;
        Ok(())
    }
}
