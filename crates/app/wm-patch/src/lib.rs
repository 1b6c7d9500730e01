//! Local half of the update pipeline: reading staged patch bundles, applying
//! them to the installation and remembering what has been applied.

mod applier;
mod backup;
mod error;
mod ledger;
mod manifest;
mod marker;
pub mod version;

pub use applier::{ApplierPaths, ApplyReport, BundleFailure, LocalPatchApplier};
pub use error::{LedgerError, PatchError, Result, error_chain};
pub use ledger::{DownloadLedger, PatchLedger};
pub use manifest::{FileMapping, MANIFEST_FILE, PatchBundle, PatchManifest};
pub use marker::RestartMarker;
pub use version::{AppVersion, VersionParseError};

/// Version the installation is actually running: the configured release
/// version, raised to whatever the last applied bundle declared.
pub fn installed_version(configured: &AppVersion, ledger: &PatchLedger) -> AppVersion {
    match ledger.last_applied_version() {
        Some(applied) if applied > *configured => applied,
        _ => configured.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_installed_version_prefers_newer_ledger() {
        let tmp = TempDir::new().unwrap();
        let ledger = PatchLedger::new(tmp.path().join("applied_patches.json"));
        let configured = AppVersion::parse("1.2.0").unwrap();

        assert_eq!(installed_version(&configured, &ledger), configured);

        ledger
            .record_applied("patch-v1.2.3", &AppVersion::parse("1.2.3").unwrap())
            .unwrap();
        assert_eq!(
            installed_version(&configured, &ledger).to_string(),
            "1.2.3"
        );

        let newer_release = AppVersion::parse("2.0.0").unwrap();
        assert_eq!(installed_version(&newer_release, &ledger), newer_release);
    }
}
