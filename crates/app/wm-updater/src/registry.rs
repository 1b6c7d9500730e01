//! Release registry access.
//!
//! `GitHubRegistry` talks to a GitHub-compatible REST API. Read-only calls are
//! made with the configured token and retried once anonymously when the token
//! is rejected, since public repositories work without one.

use std::{
    fmt,
    ffi::OsString,
    path::{Path, PathBuf},
    time::Duration,
};

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{
    RequestBuilder, Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION},
};
use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument, warn};
use wm_patch::error_chain;
use wm_settings::UpdateSettings;

use crate::{
    error::RegistryError,
    types::{RemoteAsset, RemoteRelease},
};

const API_ACCEPT: &str = "application/vnd.github+json";
const BINARY_ACCEPT: &str = "application/octet-stream";

#[async_trait]
pub trait ReleaseRegistry: Send + Sync {
    /// Most recent releases, newest first.
    async fn list_releases(&self, per_page: usize) -> Result<Vec<RemoteRelease>, RegistryError>;

    async fn latest_release(&self) -> Result<Option<RemoteRelease>, RegistryError>;

    async fn release_by_tag(&self, tag: &str) -> Result<Option<RemoteRelease>, RegistryError>;

    /// Downloads `asset` to `dest`. `dest` only appears once the body has
    /// been received completely.
    async fn download_asset(&self, asset: &RemoteAsset, dest: &Path) -> Result<(), RegistryError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadMethod {
    DirectLink,
    ApiWithToken,
    ApiAnonymous,
}

impl fmt::Display for DownloadMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadMethod::DirectLink => write!(f, "direct link"),
            DownloadMethod::ApiWithToken => write!(f, "API with token"),
            DownloadMethod::ApiAnonymous => write!(f, "API without token"),
        }
    }
}

pub struct GitHubRegistry {
    client: reqwest::Client,
    api_base_url: String,
    owner: String,
    repo: String,
    token: Option<String>,
    request_timeout: Duration,
    download_timeout: Duration,
}

impl GitHubRegistry {
    pub fn new(settings: &UpdateSettings) -> Result<Self, RegistryError> {
        let client = reqwest::ClientBuilder::new()
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(RegistryError::Client)?;

        Ok(Self {
            client,
            api_base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            owner: settings.owner.clone(),
            repo: settings.repo.clone(),
            token: settings.token().map(str::to_string),
            request_timeout: settings.request_timeout,
            download_timeout: settings.download_timeout,
        })
    }

    fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}{}",
            self.api_base_url, self.owner, self.repo, path
        )
    }

    fn with_token(&self, request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => request.header(AUTHORIZATION, format!("token {token}")),
            None => request,
        }
    }

    async fn send_api_get(
        &self,
        url: &str,
        token: Option<&str>,
    ) -> Result<Response, RegistryError> {
        let request = self
            .client
            .get(url)
            .header(ACCEPT, API_ACCEPT)
            .timeout(self.request_timeout);
        self.with_token(request, token)
            .send()
            .await
            .map_err(|e| RegistryError::from_reqwest(url, e))
    }

    /// GETs `url` as JSON. A 404 is `Ok(None)`.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>, RegistryError> {
        let mut response = self.send_api_get(url, self.token.as_deref()).await?;

        if self.token.is_some()
            && matches!(
                response.status(),
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
            )
        {
            warn!(
                "Registry rejected the token ({}), retrying without it",
                response.status()
            );
            response = self.send_api_get(url, None).await?;
        }

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("{} not found", url);
            return Ok(None);
        }
        if !status.is_success() {
            return Err(RegistryError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map(Some)
            .map_err(|source| RegistryError::Decode {
                url: url.to_string(),
                source,
            })
    }

    /// The request for one download method, or `None` when the asset or the
    /// configuration does not support that method.
    fn download_request<'a>(
        &self,
        asset: &'a RemoteAsset,
        method: DownloadMethod,
    ) -> Option<(&'a str, RequestBuilder)> {
        let (url, request) = match method {
            DownloadMethod::DirectLink => {
                let url = asset.browser_download_url.as_str();
                if url.is_empty() {
                    return None;
                }
                (url, self.client.get(url))
            }
            DownloadMethod::ApiWithToken => {
                let token = self.token.as_deref()?;
                let url = asset.url.as_str();
                if url.is_empty() {
                    return None;
                }
                let request = self.client.get(url).header(ACCEPT, BINARY_ACCEPT);
                (url, self.with_token(request, Some(token)))
            }
            DownloadMethod::ApiAnonymous => {
                let url = asset.url.as_str();
                if url.is_empty() {
                    return None;
                }
                (url, self.client.get(url).header(ACCEPT, BINARY_ACCEPT))
            }
        };
        Some((url, request.timeout(self.download_timeout)))
    }

    async fn try_download(
        &self,
        url: &str,
        request: RequestBuilder,
        dest: &Path,
    ) -> Result<u64, RegistryError> {
        let response = request
            .send()
            .await
            .map_err(|e| RegistryError::from_reqwest(url, e))?;

        if response.status() != StatusCode::OK {
            return Err(RegistryError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        stream_to_file(response, url, dest).await
    }
}

#[async_trait]
impl ReleaseRegistry for GitHubRegistry {
    #[instrument(skip(self), fields(owner = %self.owner, repo = %self.repo))]
    async fn list_releases(&self, per_page: usize) -> Result<Vec<RemoteRelease>, RegistryError> {
        let url = self.repo_url(&format!("/releases?per_page={per_page}&page=1"));
        debug!("Listing releases: {}", url);
        let releases: Vec<RemoteRelease> = self.get_json(&url).await?.unwrap_or_default();
        debug!("Registry returned {} releases", releases.len());
        Ok(releases)
    }

    #[instrument(skip(self), fields(owner = %self.owner, repo = %self.repo))]
    async fn latest_release(&self) -> Result<Option<RemoteRelease>, RegistryError> {
        self.get_json(&self.repo_url("/releases/latest")).await
    }

    #[instrument(skip(self), fields(owner = %self.owner, repo = %self.repo))]
    async fn release_by_tag(&self, tag: &str) -> Result<Option<RemoteRelease>, RegistryError> {
        self.get_json(&self.repo_url(&format!("/releases/tags/{tag}")))
            .await
    }

    #[instrument(skip(self, asset, dest), fields(asset = %asset.name))]
    async fn download_asset(&self, asset: &RemoteAsset, dest: &Path) -> Result<(), RegistryError> {
        let mut attempts = Vec::new();

        for method in [
            DownloadMethod::DirectLink,
            DownloadMethod::ApiWithToken,
            DownloadMethod::ApiAnonymous,
        ] {
            let Some((url, request)) = self.download_request(asset, method) else {
                continue;
            };

            debug!("Downloading {} via {}", asset.name, method);
            match self.try_download(url, request, dest).await {
                Ok(bytes) => {
                    info!("Downloaded {} ({} bytes) via {}", asset.name, bytes, method);
                    return Ok(());
                }
                Err(e) => {
                    let reason = error_chain(&e);
                    debug!("Download via {} failed: {}", method, reason);
                    attempts.push(format!("{method}: {reason}"));
                }
            }
        }

        Err(RegistryError::DownloadExhausted {
            asset: asset.name.clone(),
            attempts,
        })
    }
}

fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_owned();
    name.push(OsString::from(".part"));
    PathBuf::from(name)
}

async fn stream_to_file(response: Response, url: &str, dest: &Path) -> Result<u64, RegistryError> {
    let partial = partial_path(dest);
    let io_err = |source| RegistryError::Io {
        path: partial.clone(),
        source,
    };

    let result = async {
        let mut file = tokio::fs::File::create(&partial).await.map_err(io_err)?;
        let mut written = 0u64;
        let mut bytes_stream = response.bytes_stream();

        while let Some(chunk_result) = bytes_stream.next().await {
            let chunk = chunk_result.map_err(|e| RegistryError::from_reqwest(url, e))?;
            file.write_all(&chunk).await.map_err(io_err)?;
            written += chunk.len() as u64;
        }

        file.flush().await.map_err(io_err)?;
        drop(file);
        tokio::fs::rename(&partial, dest).await.map_err(io_err)?;
        Ok::<_, RegistryError>(written)
    }
    .await;

    if result.is_err() {
        let _ = tokio::fs::remove_file(&partial).await;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(token: Option<&str>) -> UpdateSettings {
        let mut update = wm_settings::AppSettings::defaults().unwrap().update;
        update.api_base_url = "http://registry.test/".to_string();
        update.owner = "acme".to_string();
        update.repo = "tracker".to_string();
        update.github_token = token.map(str::to_string);
        update
    }

    fn asset(url: &str, browser: &str) -> RemoteAsset {
        RemoteAsset {
            id: 7,
            name: "patch_v1.0.1.zip".to_string(),
            size: 10,
            url: url.to_string(),
            browser_download_url: browser.to_string(),
        }
    }

    #[test]
    fn test_repo_url() {
        let registry = GitHubRegistry::new(&settings(None)).unwrap();
        assert_eq!(
            registry.repo_url("/releases/latest"),
            "http://registry.test/repos/acme/tracker/releases/latest"
        );
    }

    #[test]
    fn test_download_methods_without_token() {
        let registry = GitHubRegistry::new(&settings(Some("   "))).unwrap();
        let linked = asset("http://registry.test/a/7", "http://dl.test/p.zip");

        let (url, _) = registry
            .download_request(&linked, DownloadMethod::DirectLink)
            .unwrap();
        assert_eq!(url, "http://dl.test/p.zip");
        assert!(
            registry
                .download_request(&linked, DownloadMethod::ApiWithToken)
                .is_none()
        );
        let (url, _) = registry
            .download_request(&linked, DownloadMethod::ApiAnonymous)
            .unwrap();
        assert_eq!(url, "http://registry.test/a/7");

        let no_links = asset("", "");
        assert!(
            registry
                .download_request(&no_links, DownloadMethod::DirectLink)
                .is_none()
        );
    }

    #[test]
    fn test_partial_path_appends_suffix() {
        assert_eq!(
            partial_path(Path::new("/tmp/patch.zip")),
            PathBuf::from("/tmp/patch.zip.part")
        );
    }
}
