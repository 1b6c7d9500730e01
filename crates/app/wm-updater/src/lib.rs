//! Remote half of the update pipeline: asking the release registry what is
//! new, downloading patch archives and staging them for the local applier.

mod cache;
mod error;
mod extract;
mod fetcher;
mod registry;
mod types;

pub use cache::UpdateCache;
pub use error::{ExtractError, FetchError, RegistryError};
pub use extract::extract_bundle;
pub use fetcher::{FetcherOptions, RemotePatchFetcher};
pub use registry::{DownloadMethod, GitHubRegistry, ReleaseRegistry};
pub use types::{
    AssetFailure, FailureKind, PatchInfo, PatchResult, RemoteAsset, RemoteRelease, StageReport,
    UpdateStatus,
};

#[cfg(test)]
pub(crate) mod test_support {
    use std::{
        collections::HashMap,
        io::{Cursor, Write},
        path::Path,
        sync::Mutex,
    };

    use async_trait::async_trait;
    use zip::write::SimpleFileOptions;

    use crate::{RegistryError, ReleaseRegistry, RemoteAsset, RemoteRelease};

    pub fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        for (name, contents) in entries {
            if name.ends_with('/') {
                zip.add_directory(*name, options).unwrap();
            } else {
                zip.start_file(*name, options).unwrap();
                zip.write_all(contents.as_bytes()).unwrap();
            }
        }
        zip.finish().unwrap().into_inner()
    }

    pub fn write_zip(path: &Path, entries: &[(&str, &str)]) {
        std::fs::write(path, zip_bytes(entries)).unwrap();
    }

    pub fn release(tag: &str, assets: &[&str]) -> RemoteRelease {
        RemoteRelease {
            tag_name: tag.to_string(),
            name: Some(format!("Release {tag}")),
            body: Some(format!("Notes for {tag}")),
            assets: assets
                .iter()
                .enumerate()
                .map(|(i, name)| RemoteAsset {
                    id: i as u64 + 1,
                    name: name.to_string(),
                    size: 100,
                    url: format!("https://api.test/assets/{name}"),
                    browser_download_url: format!("https://dl.test/{tag}/{name}"),
                })
                .collect(),
        }
    }

    /// In-memory registry. Assets download the bytes registered under their
    /// name and fail when none are registered.
    #[derive(Default)]
    pub struct FakeRegistry {
        pub releases: Vec<RemoteRelease>,
        pub archives: HashMap<String, Vec<u8>>,
        pub fail_listing: bool,
        pub calls: Mutex<Vec<String>>,
    }

    impl FakeRegistry {
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl ReleaseRegistry for FakeRegistry {
        async fn list_releases(
            &self,
            per_page: usize,
        ) -> Result<Vec<RemoteRelease>, RegistryError> {
            self.record("list".to_string());
            if self.fail_listing {
                return Err(RegistryError::Timeout {
                    url: "https://api.test/releases".to_string(),
                });
            }
            Ok(self.releases.iter().take(per_page).cloned().collect())
        }

        async fn latest_release(&self) -> Result<Option<RemoteRelease>, RegistryError> {
            self.record("latest".to_string());
            Ok(self.releases.first().cloned())
        }

        async fn release_by_tag(&self, tag: &str) -> Result<Option<RemoteRelease>, RegistryError> {
            self.record(format!("tag {tag}"));
            Ok(self.releases.iter().find(|r| r.tag_name == tag).cloned())
        }

        async fn download_asset(
            &self,
            asset: &RemoteAsset,
            dest: &Path,
        ) -> Result<(), RegistryError> {
            self.record(format!("download {}", asset.name));
            match self.archives.get(&asset.name) {
                Some(bytes) => std::fs::write(dest, bytes).map_err(|source| RegistryError::Io {
                    path: dest.to_path_buf(),
                    source,
                }),
                None => Err(RegistryError::DownloadExhausted {
                    asset: asset.name.clone(),
                    attempts: vec!["direct link: 404".to_string()],
                }),
            }
        }
    }
}
