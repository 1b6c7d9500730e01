use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::Utc;
use tracing::{debug, error, info, warn};
use wm_patch::{
    AppVersion, DownloadLedger, LocalPatchApplier, PatchError, error_chain, version::tag_is_newer,
};
use wm_settings::{AppPaths, AppSettings};

use crate::{
    cache::UpdateCache,
    error::{FetchError, RegistryError},
    extract::extract_bundle,
    registry::{GitHubRegistry, ReleaseRegistry},
    types::{
        AssetFailure, FailureKind, PatchInfo, PatchResult, RemoteAsset, RemoteRelease,
        StageReport, UpdateStatus,
    },
};

#[derive(Debug, Clone)]
pub struct FetcherOptions {
    pub staging_dir: PathBuf,
    pub releases_per_page: usize,
    /// Assets whose name ends with this are patch archives.
    pub archive_extension: String,
}

struct Candidate<'a> {
    release: &'a RemoteRelease,
    asset: &'a RemoteAsset,
}

impl From<&Candidate<'_>> for PatchInfo {
    fn from(candidate: &Candidate<'_>) -> Self {
        PatchInfo {
            name: candidate.asset.name.clone(),
            size: candidate.asset.size,
            download_url: candidate.asset.browser_download_url.clone(),
            release_tag: candidate.release.tag_name.clone(),
        }
    }
}

pub struct RemotePatchFetcher {
    registry: Arc<dyn ReleaseRegistry>,
    downloads: DownloadLedger,
    cache: UpdateCache,
    current_version: AppVersion,
    options: FetcherOptions,
}

impl RemotePatchFetcher {
    pub fn new(
        registry: Arc<dyn ReleaseRegistry>,
        downloads: DownloadLedger,
        cache: UpdateCache,
        current_version: AppVersion,
        options: FetcherOptions,
    ) -> Self {
        Self {
            registry,
            downloads,
            cache,
            current_version,
            options,
        }
    }

    /// Builds a fetcher backed by the configured GitHub registry.
    pub fn from_settings(
        settings: &AppSettings,
        paths: &AppPaths,
        current_version: AppVersion,
    ) -> Result<Self, RegistryError> {
        let registry = GitHubRegistry::new(&settings.update)?;
        Ok(Self::new(
            Arc::new(registry),
            DownloadLedger::new(paths.downloaded_patches_file()),
            UpdateCache::new(paths.update_cache_file(), settings.update.check_interval),
            current_version,
            FetcherOptions {
                staging_dir: paths.staging_dir.clone(),
                releases_per_page: settings.update.releases_per_page,
                archive_extension: settings.update.archive_extension.clone(),
            },
        ))
    }

    pub fn current_version(&self) -> &AppVersion {
        &self.current_version
    }

    pub fn download_ledger(&self) -> &DownloadLedger {
        &self.downloads
    }

    /// Reports whether patches are available. Unless `force` is set, a recent
    /// result for the same version is served from the cache. Failures are
    /// reported in the status and never cached.
    pub async fn check_for_updates(&self, force: bool) -> UpdateStatus {
        let now = Utc::now();
        if !force && let Some(cached) = self.cache.load_fresh(&self.current_version, now) {
            debug!("Using cached update status");
            return cached;
        }

        match self.live_check().await {
            Ok(status) => {
                if let Err(e) = self.cache.store(&status, now) {
                    warn!("Failed to write update cache: {:#}", e);
                }
                status
            }
            Err(e) => {
                let reason = error_chain(&e);
                error!("Update check failed: {}", reason);
                UpdateStatus {
                    current_version: self.current_version.to_string(),
                    message: "Update check failed".to_string(),
                    error: Some(reason),
                    ..Default::default()
                }
            }
        }
    }

    async fn live_check(&self) -> Result<UpdateStatus, RegistryError> {
        let releases = self
            .registry
            .list_releases(self.options.releases_per_page)
            .await?;
        let candidates = self.discover(&releases);
        let current_version = self.current_version.to_string();

        if let Some(first) = candidates.first() {
            info!("{} patches available", candidates.len());
            return Ok(UpdateStatus {
                update_available: true,
                current_version,
                latest_version: Some(release_version(&first.release.tag_name)),
                release_name: first.release.name.clone(),
                release_notes: first.release.body.clone(),
                patches: candidates.iter().map(PatchInfo::from).collect(),
                message: format!("{} patches available", candidates.len()),
                ..Default::default()
            });
        }

        let latest = match self.registry.latest_release().await {
            Ok(Some(release)) => Some(release),
            Ok(None) => releases.first().cloned(),
            Err(e) => {
                warn!("Failed to fetch latest release: {}", error_chain(&e));
                releases.first().cloned()
            }
        };

        let status = match latest {
            Some(release) if tag_is_newer(&release.tag_name, &self.current_version) => {
                info!(
                    "Release {} has no patch archives, manual download required",
                    release.tag_name
                );
                UpdateStatus {
                    update_available: true,
                    current_version,
                    message: format!(
                        "Version {} is available but has no patch files, download it manually",
                        release.tag_name
                    ),
                    latest_version: Some(release_version(&release.tag_name)),
                    release_name: release.name,
                    release_notes: release.body,
                    manual_download: true,
                    ..Default::default()
                }
            }
            Some(release) => UpdateStatus {
                current_version,
                latest_version: Some(release_version(&release.tag_name)),
                message: "Already up to date".to_string(),
                ..Default::default()
            },
            None => UpdateStatus {
                current_version,
                message: "No releases published".to_string(),
                ..Default::default()
            },
        };
        Ok(status)
    }

    /// Archive assets from releases newer than the current version that have
    /// not been downloaded yet, newest release first.
    fn discover<'a>(&self, releases: &'a [RemoteRelease]) -> Vec<Candidate<'a>> {
        let downloaded = self.downloads.downloaded();
        let extension = self.options.archive_extension.to_ascii_lowercase();
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        for release in releases {
            if !tag_is_newer(&release.tag_name, &self.current_version) {
                debug!("Skipping release {}", release.tag_name);
                continue;
            }

            for asset in &release.assets {
                if !asset.name.to_ascii_lowercase().ends_with(&extension) {
                    continue;
                }
                if downloaded.contains(&asset.name) {
                    debug!("{} already downloaded", asset.name);
                    continue;
                }
                if seen.insert(asset.name.as_str()) {
                    candidates.push(Candidate { release, asset });
                }
            }
        }

        candidates
    }

    /// Downloads and extracts every candidate archive into the staging
    /// directory. A failed asset does not stop the others and is not recorded
    /// as downloaded.
    pub async fn stage_patches(&self) -> Result<StageReport, FetchError> {
        let releases = self
            .registry
            .list_releases(self.options.releases_per_page)
            .await?;
        let candidates = self.discover(&releases);

        let mut report = StageReport::default();
        if candidates.is_empty() {
            info!("No new patches to download");
            return Ok(report);
        }

        let staging = &self.options.staging_dir;
        std::fs::create_dir_all(staging).map_err(|source| FetchError::Staging {
            path: staging.clone(),
            source,
        })?;

        for candidate in &candidates {
            let name = &candidate.asset.name;
            match self.stage_one(candidate.asset).await {
                Ok(folder) => {
                    info!("Staged {} into {}", name, folder.display());
                    if let Err(e) = self.downloads.record_downloaded(name) {
                        warn!("Failed to record download of {}: {}", name, error_chain(&e));
                    }
                    report.downloaded.push(name.clone());
                }
                Err(failure) => {
                    error!("Failed to stage {}: {}", name, failure.message);
                    report.failed.push(failure);
                }
            }
        }

        Ok(report)
    }

    async fn stage_one(&self, asset: &RemoteAsset) -> Result<PathBuf, AssetFailure> {
        let failure = |kind, message| AssetFailure {
            asset: asset.name.clone(),
            kind,
            message,
        };

        let archive = self
            .options
            .staging_dir
            .join(format!(".download-{}", asset.id));
        if let Err(e) = self.registry.download_asset(asset, &archive).await {
            return Err(failure(FailureKind::Download, error_chain(&e)));
        }

        let staging = self.options.staging_dir.clone();
        let name = asset.name.clone();
        let archive_path = archive.clone();
        let extracted =
            tokio::task::spawn_blocking(move || extract_bundle(&archive_path, &name, &staging))
                .await;
        remove_quietly(&archive);

        match extracted {
            Ok(Ok(folder)) => Ok(folder),
            Ok(Err(e)) => Err(failure(FailureKind::Extract, error_chain(&e))),
            Err(e) => Err(failure(FailureKind::Extract, e.to_string())),
        }
    }

    /// Stages whatever the registry offers, then applies every staged bundle.
    /// The applier runs even when the registry cannot be reached, so bundles
    /// staged earlier or placed by hand still go in.
    pub async fn download_and_apply_patches(
        &mut self,
        applier: &mut LocalPatchApplier,
    ) -> Result<PatchResult, PatchError> {
        let (staged, fetch_error) = match self.stage_patches().await {
            Ok(report) => (report, None),
            Err(e) => {
                let reason = error_chain(&e);
                error!("Failed to fetch patches: {}", reason);
                (StageReport::default(), Some(reason))
            }
        };

        let applied = applier.apply_pending()?;
        self.current_version = applier.current_version().clone();

        let mut errors = staged.failed;
        errors.extend(applied.failed.iter().map(|f| AssetFailure {
            asset: f.id.clone(),
            kind: FailureKind::Apply,
            message: f.reason.clone(),
        }));

        let downloaded_count = staged.downloaded.len();
        let applied_count = applied.applied_count();
        let message = if applied_count > 0 {
            format!("Applied {} patches, now at {}", applied_count, applied.version)
        } else if downloaded_count > 0 {
            format!("Downloaded {downloaded_count} patches, none eligible to apply")
        } else if fetch_error.is_some() {
            "Could not reach the release registry".to_string()
        } else {
            "No patches to apply".to_string()
        };

        Ok(PatchResult {
            success: fetch_error.is_none() && errors.is_empty() && applied.is_recorded(),
            message,
            downloaded_count,
            applied_count,
            errors,
            fetch_error,
            needs_restart: applied_count > 0 && applied.is_recorded(),
            unrecorded: applied.unrecorded,
        })
    }

    pub async fn get_release_notes(&self, tag: &str) -> Option<String> {
        match self.registry.release_by_tag(tag).await {
            Ok(release) => release.and_then(|r| r.body),
            Err(e) => {
                warn!("Failed to fetch release {}: {}", tag, error_chain(&e));
                None
            }
        }
    }

    pub async fn list_releases(&self, per_page: usize) -> Vec<RemoteRelease> {
        match self.registry.list_releases(per_page).await {
            Ok(releases) => releases,
            Err(e) => {
                warn!("Failed to list releases: {}", error_chain(&e));
                Vec::new()
            }
        }
    }
}

/// Release tag as shown to users: `v1.2.0` becomes `1.2.0`.
fn release_version(tag: &str) -> String {
    tag.trim_start_matches('v').to_string()
}

fn remove_quietly(path: &Path) {
    if let Err(e) = std::fs::remove_file(path)
        && e.kind() != std::io::ErrorKind::NotFound
    {
        warn!("Failed to remove {}: {}", path.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::test_support::{FakeRegistry, release, zip_bytes};
    use tempfile::TempDir;
    use wm_patch::{ApplierPaths, PatchLedger};

    struct Fixture {
        _tmp: TempDir,
        root: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let tmp = TempDir::new().unwrap();
            let root = tmp.path().to_path_buf();
            Self { _tmp: tmp, root }
        }

        fn fetcher(&self, registry: Arc<FakeRegistry>, current: &str) -> RemotePatchFetcher {
            RemotePatchFetcher::new(
                registry,
                DownloadLedger::new(self.root.join("data/downloaded_patches.json")),
                UpdateCache::new(
                    self.root.join("data/update_cache.json"),
                    Duration::from_secs(24 * 3600),
                ),
                AppVersion::parse(current).unwrap(),
                FetcherOptions {
                    staging_dir: self.root.join("patches"),
                    releases_per_page: 10,
                    archive_extension: ".zip".to_string(),
                },
            )
        }

        fn applier(&self, current: &str) -> LocalPatchApplier {
            LocalPatchApplier::new(
                ApplierPaths {
                    install_root: self.root.clone(),
                    staging_dir: self.root.join("patches"),
                    backup_dir: self.root.join("backups"),
                    backup_sources: vec![self.root.join("src")],
                },
                PatchLedger::new(self.root.join("data/applied_patches.json")),
                AppVersion::parse(current).unwrap(),
            )
        }
    }

    fn bundle_zip(folder: &str, version: &str, content: &str) -> Vec<u8> {
        let files = r#"[{"source":"src/app.py","target":"src/app.py"}]"#;
        let manifest = format!(r#"{{"id":"{folder}","version":"{version}","files":{files}}}"#);
        let manifest_path = format!("{folder}/patch.json");
        let source_path = format!("{folder}/src/app.py");
        zip_bytes(&[
            (manifest_path.as_str(), manifest.as_str()),
            (source_path.as_str(), content),
        ])
    }

    #[tokio::test]
    async fn test_check_lists_only_newer_undownloaded_archives() {
        let fx = Fixture::new();
        let registry = Arc::new(FakeRegistry {
            releases: vec![
                release("v1.2.0", &["patch_v1.2.0.zip", "notes.txt"]),
                release("nightly", &["nightly.ZIP"]),
                release("v1.1.1", &["patch_v1.1.1.zip", "done.zip"]),
                release("v1.1.0", &["patch_v1.1.0.zip"]),
            ],
            ..Default::default()
        });
        let fetcher = fx.fetcher(registry, "1.1.0");
        fetcher.download_ledger().record_downloaded("done.zip").unwrap();

        let status = fetcher.check_for_updates(true).await;

        assert!(status.update_available);
        assert!(!status.manual_download);
        assert_eq!(status.current_version, "1.1.0");
        assert_eq!(status.latest_version.as_deref(), Some("1.2.0"));
        assert_eq!(status.release_notes.as_deref(), Some("Notes for v1.2.0"));
        let names: Vec<_> = status.patches.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["patch_v1.2.0.zip", "nightly.ZIP", "patch_v1.1.1.zip"]);
        assert_eq!(status.patches[2].release_tag, "v1.1.1");
    }

    #[tokio::test]
    async fn test_check_is_cached_until_forced() {
        let fx = Fixture::new();
        let registry = Arc::new(FakeRegistry {
            releases: vec![release("v1.1.1", &["patch_v1.1.1.zip"])],
            ..Default::default()
        });
        let fetcher = fx.fetcher(registry.clone(), "1.1.0");

        let first = fetcher.check_for_updates(false).await;
        let second = fetcher.check_for_updates(false).await;
        assert_eq!(first, second);
        assert_eq!(registry.calls(), vec!["list"]);

        fetcher.check_for_updates(true).await;
        assert_eq!(registry.calls(), vec!["list", "list"]);
    }

    #[tokio::test]
    async fn test_version_change_bypasses_cache() {
        let fx = Fixture::new();
        let registry = Arc::new(FakeRegistry {
            releases: vec![release("v1.1.1", &["patch_v1.1.1.zip"])],
            ..Default::default()
        });

        let before = fx.fetcher(registry.clone(), "1.1.0").check_for_updates(false).await;
        assert!(before.update_available);

        let after = fx.fetcher(registry.clone(), "1.1.1").check_for_updates(false).await;
        assert_eq!(after.current_version, "1.1.1");
        assert!(!after.update_available);
        assert_eq!(registry.calls(), vec!["list", "list", "latest"]);
    }

    #[tokio::test]
    async fn test_failed_check_is_not_cached() {
        let fx = Fixture::new();
        let registry = Arc::new(FakeRegistry {
            fail_listing: true,
            ..Default::default()
        });
        let fetcher = fx.fetcher(registry, "1.1.0");

        let status = fetcher.check_for_updates(false).await;
        assert!(!status.update_available);
        assert!(status.error.is_some());
        assert!(!fx.root.join("data/update_cache.json").exists());
    }

    #[tokio::test]
    async fn test_up_to_date_reports_latest_without_prefix() {
        let fx = Fixture::new();
        let registry = Arc::new(FakeRegistry {
            releases: vec![release("v1.1.0", &["patch_v1.1.0.zip"])],
            ..Default::default()
        });

        let status = fx.fetcher(registry, "1.1.0").check_for_updates(true).await;

        assert!(!status.update_available);
        assert_eq!(status.latest_version.as_deref(), Some("1.1.0"));
        assert_eq!(status.message, "Already up to date");
    }

    #[tokio::test]
    async fn test_release_without_archives_needs_manual_download() {
        let fx = Fixture::new();
        let registry = Arc::new(FakeRegistry {
            releases: vec![release("v2.0.0", &["WorkManagement-Setup.exe"])],
            ..Default::default()
        });

        let status = fx.fetcher(registry, "1.1.0").check_for_updates(true).await;

        assert!(status.update_available);
        assert!(status.manual_download);
        assert!(status.patches.is_empty());
        assert_eq!(status.latest_version.as_deref(), Some("2.0.0"));
    }

    #[tokio::test]
    async fn test_download_and_apply_end_to_end() {
        let fx = Fixture::new();
        let registry = Arc::new(FakeRegistry {
            releases: vec![
                release("v1.1.10", &["patch_v1.1.10.zip"]),
                release("v1.1.2", &["patch_v1.1.2.zip"]),
            ],
            archives: [
                (
                    "patch_v1.1.10.zip".to_string(),
                    bundle_zip("patch_v1.1.10", "1.1.10", "ten"),
                ),
                (
                    "patch_v1.1.2.zip".to_string(),
                    bundle_zip("patch_v1.1.2", "1.1.2", "two"),
                ),
            ]
            .into(),
            ..Default::default()
        });
        let mut fetcher = fx.fetcher(registry, "1.1.0");
        let mut applier = fx.applier("1.1.0");

        let result = fetcher.download_and_apply_patches(&mut applier).await.unwrap();

        assert!(result.success, "{result:?}");
        assert_eq!(result.downloaded_count, 2);
        assert_eq!(result.applied_count, 2);
        assert!(result.needs_restart);
        assert_eq!(
            std::fs::read_to_string(fx.root.join("src/app.py")).unwrap(),
            "ten"
        );
        assert_eq!(fetcher.current_version().to_string(), "1.1.10");
        assert_eq!(fetcher.download_ledger().downloaded().len(), 2);
        assert!(!fx.root.join("patches/.download-1").exists());
    }

    #[tokio::test]
    async fn test_failed_assets_are_isolated_and_not_recorded() {
        let fx = Fixture::new();
        let registry = Arc::new(FakeRegistry {
            releases: vec![release(
                "v1.1.1",
                &["corrupt.zip", "missing.zip", "raw.zip", "patch_v1.1.1.zip"],
            )],
            archives: [
                ("corrupt.zip".to_string(), b"not a zip".to_vec()),
                (
                    "raw.zip".to_string(),
                    zip_bytes(&[("web/js/app.js", "js"), ("web/index.html", "html")]),
                ),
                (
                    "patch_v1.1.1.zip".to_string(),
                    bundle_zip("patch_v1.1.1", "1.1.1", "one"),
                ),
            ]
            .into(),
            ..Default::default()
        });
        let fetcher = fx.fetcher(registry, "1.1.0");

        let report = fetcher.stage_patches().await.unwrap();

        assert_eq!(report.downloaded, vec!["raw.zip", "patch_v1.1.1.zip"]);
        let kinds: Vec<_> = report
            .failed
            .iter()
            .map(|f| (f.asset.as_str(), f.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("corrupt.zip", FailureKind::Extract),
                ("missing.zip", FailureKind::Download)
            ]
        );

        let downloaded = fetcher.download_ledger().downloaded();
        assert!(downloaded.contains("raw.zip"));
        assert!(!downloaded.contains("corrupt.zip"));
        assert!(!downloaded.contains("missing.zip"));
        assert!(fx.root.join("patches/web/js/app.js").is_file());
    }

    #[tokio::test]
    async fn test_forgotten_download_is_fetched_again() {
        let fx = Fixture::new();
        let registry = Arc::new(FakeRegistry {
            releases: vec![release("v1.1.1", &["patch_v1.1.1.zip"])],
            archives: [(
                "patch_v1.1.1.zip".to_string(),
                bundle_zip("patch_v1.1.1", "1.1.1", "one"),
            )]
            .into(),
            ..Default::default()
        });
        let fetcher = fx.fetcher(registry.clone(), "1.1.0");

        assert_eq!(fetcher.stage_patches().await.unwrap().downloaded_count(), 1);
        assert_eq!(fetcher.stage_patches().await.unwrap().downloaded_count(), 0);

        fetcher.download_ledger().forget("patch_v1.1.1.zip").unwrap();
        assert_eq!(fetcher.stage_patches().await.unwrap().downloaded_count(), 1);
        assert_eq!(
            registry
                .calls()
                .iter()
                .filter(|c| c.starts_with("download"))
                .count(),
            2
        );
    }

    #[tokio::test]
    async fn test_registry_failure_still_applies_staged_bundles() {
        let fx = Fixture::new();
        let staged = fx.root.join("patches/manual");
        std::fs::create_dir_all(staged.join("src")).unwrap();
        std::fs::write(staged.join("src/app.py"), "manual").unwrap();
        std::fs::write(
            staged.join("patch.json"),
            r#"{"version":"1.1.1","files":[{"source":"src/app.py","target":"src/app.py"}]}"#,
        )
        .unwrap();

        let registry = Arc::new(FakeRegistry {
            fail_listing: true,
            ..Default::default()
        });
        let mut fetcher = fx.fetcher(registry, "1.1.0");
        let mut applier = fx.applier("1.1.0");

        let result = fetcher.download_and_apply_patches(&mut applier).await.unwrap();

        assert!(!result.success);
        assert!(result.fetch_error.is_some());
        assert_eq!(result.applied_count, 1);
        assert!(result.needs_restart);
        assert_eq!(
            std::fs::read_to_string(fx.root.join("src/app.py")).unwrap(),
            "manual"
        );
    }

    #[tokio::test]
    async fn test_unrecorded_patches_do_not_request_restart() {
        let fx = Fixture::new();
        let registry = Arc::new(FakeRegistry {
            releases: vec![release("v1.1.1", &["patch_v1.1.1.zip"])],
            archives: [(
                "patch_v1.1.1.zip".to_string(),
                bundle_zip("patch_v1.1.1", "1.1.1", "1.1.1"),
            )]
            .into(),
            ..Default::default()
        });
        std::fs::create_dir_all(fx.root.join("data/applied_patches.json")).unwrap();
        let mut fetcher = fx.fetcher(registry, "1.1.0");
        let mut applier = fx.applier("1.1.0");

        let result = fetcher.download_and_apply_patches(&mut applier).await.unwrap();

        assert_eq!(result.applied_count, 1);
        assert_eq!(result.unrecorded, vec!["patch_v1.1.1"]);
        assert!(!result.needs_restart);
        assert!(!result.success);
    }

    #[tokio::test]
    async fn test_downloaded_but_not_eligible() {
        let fx = Fixture::new();
        let registry = Arc::new(FakeRegistry {
            releases: vec![release("v1.2.0", &["patch_v1.2.0.zip"])],
            archives: [(
                "patch_v1.2.0.zip".to_string(),
                zip_bytes(&[(
                    "patch_v1.2.0/patch.json",
                    r#"{"version":"1.2.0","min_version":"1.1.5","files":[]}"#,
                )]),
            )]
            .into(),
            ..Default::default()
        });
        let mut fetcher = fx.fetcher(registry, "1.1.0");
        let mut applier = fx.applier("1.1.0");

        let result = fetcher.download_and_apply_patches(&mut applier).await.unwrap();

        assert_eq!(result.downloaded_count, 1);
        assert_eq!(result.applied_count, 0);
        assert!(!result.needs_restart);
        assert!(result.message.contains("none eligible"));
    }

    #[tokio::test]
    async fn test_release_notes_and_listing() {
        let fx = Fixture::new();
        let registry = Arc::new(FakeRegistry {
            releases: vec![release("v1.1.1", &[]), release("v1.1.0", &[])],
            ..Default::default()
        });
        let fetcher = fx.fetcher(registry, "1.1.0");

        assert_eq!(
            fetcher.get_release_notes("v1.1.0").await.as_deref(),
            Some("Notes for v1.1.0")
        );
        assert_eq!(fetcher.get_release_notes("v9.9.9").await, None);
        assert_eq!(fetcher.list_releases(1).await.len(), 1);
    }
}
