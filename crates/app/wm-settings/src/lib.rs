use serde::{Deserialize, Serialize};

mod json;
mod persistence;
mod settings;

pub use persistence::{SETTINGS_DIR, SETTINGS_FILE};
pub use settings::{AppInfo, AppPaths, PathSettings, UpdateSettings};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub app: AppInfo,
    pub update: UpdateSettings,
    pub paths: PathSettings,
}
