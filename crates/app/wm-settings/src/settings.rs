mod app;
mod paths;
mod update;

pub use app::AppInfo;
pub use paths::{AppPaths, PathSettings};
pub use update::UpdateSettings;
