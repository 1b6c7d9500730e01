use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;
use wm_fs::create_dirs_then_write;

use crate::{AppSettings, json::merge_non_null_json_value};

pub(crate) static DEFAULTS: &str = include_str!("../assets/defaults.jsonc");

pub const SETTINGS_DIR: &str = "config";
pub const SETTINGS_FILE: &str = "settings.json";

const TOKEN_ENV: &str = "WM_GITHUB_TOKEN";
const REGISTRY_URL_ENV: &str = "WM_REGISTRY_URL";

impl AppSettings {
    pub fn load(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            create_dirs_then_write(config_path, "{}\n")?;
        }

        let raw = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let customizations: serde_json::Value = serde_json_lenient::from_str(&raw)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        let mut app_settings = Self::merged_with_defaults(customizations)?;
        app_settings.apply_overrides(|key| std::env::var(key).ok());

        Ok(app_settings)
    }

    /// Loads `<install_root>/config/settings.json`.
    pub fn load_from_install_root(install_root: &Path) -> Result<Self> {
        AppSettings::load(&install_root.join(SETTINGS_DIR).join(SETTINGS_FILE))
    }

    pub fn defaults() -> Result<Self> {
        Self::merged_with_defaults(serde_json::json!({}))
    }

    fn merged_with_defaults(customizations: serde_json::Value) -> Result<Self> {
        let mut settings: serde_json::Value =
            serde_json_lenient::from_str(DEFAULTS).context("Failed to parse embedded defaults")?;
        merge_non_null_json_value(customizations, &mut settings);
        Ok(serde_json::from_value(settings)?)
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(token) = lookup(TOKEN_ENV).filter(|t| !t.trim().is_empty()) {
            debug!("Using registry token from {}", TOKEN_ENV);
            self.update.github_token = Some(token);
        }
        if let Some(url) = lookup(REGISTRY_URL_ENV).filter(|u| !u.trim().is_empty()) {
            debug!("Using registry url from {}: {}", REGISTRY_URL_ENV, url);
            self.update.api_base_url = url;
        }
    }
}
