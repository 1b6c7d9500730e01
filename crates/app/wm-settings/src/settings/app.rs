use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppInfo {
    pub name: String,
    /// Version the installation shipped with. Applied patches may move the
    /// installed version past this one.
    pub version: String,
}
