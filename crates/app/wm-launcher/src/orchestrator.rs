//! Startup sequence: fetch remote patches, apply everything staged and, when
//! anything was applied, hand over to a fresh process so the new files are
//! the ones that run.

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{error, info, warn};
use wm_patch::{
    AppVersion, ApplierPaths, LocalPatchApplier, PatchLedger, RestartMarker, installed_version,
};
use wm_settings::{AppPaths, AppSettings};
use wm_updater::{FetcherOptions, ReleaseRegistry, RemotePatchFetcher, UpdateCache};

use crate::restart::Relauncher;

#[derive(Debug)]
pub enum StartupDecision {
    /// Keep starting up in this process.
    Continue(PatchStatus),
    /// A replacement process is running; this one should exit now.
    Restart {
        applied_count: usize,
        version: AppVersion,
    },
}

/// Patches the previous generation applied before restarting into this one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchSummary {
    pub applied_count: usize,
    pub current_version: AppVersion,
}

/// Handed out once the startup sequence has finished.
#[derive(Debug)]
pub struct PatchStatus {
    marker_path: PathBuf,
}

impl PatchStatus {
    /// Consumes the restart marker, so only the first call returns a summary.
    pub fn startup_patch_summary(&self) -> Option<PatchSummary> {
        RestartMarker::take(&self.marker_path).map(|marker| PatchSummary {
            applied_count: marker.applied_count,
            current_version: marker.version,
        })
    }
}

pub struct StartupOrchestrator {
    settings: AppSettings,
    paths: AppPaths,
    relauncher: Box<dyn Relauncher>,
    registry: Option<Arc<dyn ReleaseRegistry>>,
}

impl StartupOrchestrator {
    pub fn new(
        settings: AppSettings,
        paths: AppPaths,
        relauncher: impl Relauncher + 'static,
    ) -> Self {
        Self {
            settings,
            paths,
            relauncher: Box::new(relauncher),
            registry: None,
        }
    }

    /// Uses `registry` instead of the configured GitHub registry.
    pub fn with_registry(mut self, registry: Arc<dyn ReleaseRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    pub fn ledger(&self) -> PatchLedger {
        PatchLedger::new(self.paths.applied_patches_file())
    }

    pub fn installed_version(&self) -> Result<AppVersion> {
        let configured = AppVersion::parse(&self.settings.app.version)
            .context("Invalid app.version in settings")?;
        Ok(installed_version(&configured, &self.ledger()))
    }

    pub fn applier(&self, current_version: AppVersion) -> LocalPatchApplier {
        LocalPatchApplier::new(
            ApplierPaths {
                install_root: self.paths.install_root.clone(),
                staging_dir: self.paths.staging_dir.clone(),
                backup_dir: self.paths.backup_dir.clone(),
                backup_sources: self.paths.backup_sources.clone(),
            },
            self.ledger(),
            current_version,
        )
    }

    pub fn fetcher(&self, current_version: AppVersion) -> Result<RemotePatchFetcher> {
        let Some(registry) = self.registry.clone() else {
            return RemotePatchFetcher::from_settings(
                &self.settings,
                &self.paths,
                current_version,
            )
            .context("Failed to set up the release registry client");
        };

        let update = &self.settings.update;
        Ok(RemotePatchFetcher::new(
            registry,
            wm_patch::DownloadLedger::new(self.paths.downloaded_patches_file()),
            UpdateCache::new(self.paths.update_cache_file(), update.check_interval),
            current_version,
            FetcherOptions {
                staging_dir: self.paths.staging_dir.clone(),
                releases_per_page: update.releases_per_page,
                archive_extension: update.archive_extension.clone(),
            },
        ))
    }

    fn marker_path(&self) -> PathBuf {
        self.paths.restart_marker_file()
    }

    fn continue_startup(&self) -> StartupDecision {
        StartupDecision::Continue(PatchStatus {
            marker_path: self.marker_path(),
        })
    }

    /// Runs the startup sequence. Every failure short of a successful
    /// relaunch ends in `Continue`.
    pub async fn run(self) -> StartupDecision {
        let version = match self.installed_version() {
            Ok(version) => version,
            Err(e) => {
                error!("Skipping updates: {:#}", e);
                return self.continue_startup();
            }
        };
        info!("{} {} starting", self.settings.app.name, version);

        let mut applier = self.applier(version);
        let batch = if self.settings.update.enabled {
            self.fetch_and_apply(&mut applier).await
        } else {
            info!("Updates are disabled, applying local patches only");
            apply_local(&mut applier)
        };

        if batch.applied_count == 0 {
            return self.continue_startup();
        }

        let applied_count = batch.applied_count;
        let version = applier.current_version().clone();
        if !batch.recorded {
            error!(
                "Applied {} patches but could not record them in {}, not restarting",
                applied_count,
                applier.ledger().path().display()
            );
            return self.continue_startup();
        }

        let marker_path = self.marker_path();
        if let Err(e) = RestartMarker::new(applied_count, version.clone()).write(&marker_path) {
            error!("Failed to write restart marker, not restarting: {}", e);
            return self.continue_startup();
        }

        match self.relauncher.relaunch() {
            Ok(()) => {
                info!("Applied {} patches, restarting at {}", applied_count, version);
                StartupDecision::Restart {
                    applied_count,
                    version,
                }
            }
            Err(e) => {
                error!("Failed to restart after applying patches: {}", e);
                RestartMarker::discard(&marker_path);
                self.continue_startup()
            }
        }
    }

    async fn fetch_and_apply(&self, applier: &mut LocalPatchApplier) -> AppliedBatch {
        let mut fetcher = match self.fetcher(applier.current_version().clone()) {
            Ok(fetcher) => fetcher,
            Err(e) => {
                error!("{:#}", e);
                return apply_local(applier);
            }
        };

        match fetcher.download_and_apply_patches(applier).await {
            Ok(result) => {
                if let Some(reason) = &result.fetch_error {
                    warn!("Patch download failed, used staged patches only: {}", reason);
                }
                for failure in &result.errors {
                    warn!(
                        "{:?} failed for {}: {}",
                        failure.kind, failure.asset, failure.message
                    );
                }
                info!("{}", result.message);
                AppliedBatch {
                    applied_count: result.applied_count,
                    recorded: result.unrecorded.is_empty(),
                }
            }
            Err(e) => {
                error!("Failed to apply patches: {}", e);
                AppliedBatch::default()
            }
        }
    }
}

/// What one startup managed to apply.
#[derive(Debug, Default)]
struct AppliedBatch {
    applied_count: usize,
    /// Every applied bundle is in the ledger.
    recorded: bool,
}

fn apply_local(applier: &mut LocalPatchApplier) -> AppliedBatch {
    match applier.apply_pending() {
        Ok(report) => AppliedBatch {
            applied_count: report.applied_count(),
            recorded: report.is_recorded(),
        },
        Err(e) => {
            error!("Failed to apply patches: {}", e);
            AppliedBatch::default()
        }
    }
}
