use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettings {
    pub enabled: bool,
    pub owner: String,
    pub repo: String,
    pub api_base_url: String,
    pub github_token: Option<String>,
    #[serde(with = "humantime_serde")]
    pub check_interval: Duration,
    pub releases_per_page: usize,
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    #[serde(with = "humantime_serde")]
    pub download_timeout: Duration,
    pub archive_extension: String,
    pub user_agent: String,
}

impl UpdateSettings {
    /// The token, unless it is unset or blank.
    pub fn token(&self) -> Option<&str> {
        self.github_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}
