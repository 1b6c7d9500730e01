use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, info};

use crate::error::{PatchError, Result};

/// Copies every existing source tree into a fresh timestamped directory under
/// `backup_root`, keeping each tree's path relative to `install_root`.
pub(crate) fn create_backup(
    backup_root: &Path,
    install_root: &Path,
    sources: &[PathBuf],
    bundle_id: &str,
) -> Result<PathBuf> {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let backup_dir = backup_root.join(format!("backup_{}_{}", stamp, sanitize(bundle_id)));

    let backup_err = |path: &Path, source| PatchError::Backup {
        bundle: bundle_id.to_string(),
        path: path.to_path_buf(),
        source,
    };

    std::fs::create_dir_all(&backup_dir).map_err(|e| backup_err(&backup_dir, e))?;

    for source in sources {
        if !source.exists() {
            debug!("Nothing to back up at {}", source.display());
            continue;
        }

        let relative = source
            .strip_prefix(install_root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| source.file_name().map(PathBuf::from).unwrap_or_default());
        let target = backup_dir.join(relative);

        let copied = if source.is_dir() {
            wm_fs::copy_dir_all(source, &target).map_err(|e| backup_err(source, e))?
        } else {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent).map_err(|e| backup_err(source, e))?;
            }
            std::fs::copy(source, &target).map_err(|e| backup_err(source, e))?;
            1
        };
        debug!("Backed up {} files from {}", copied, source.display());
    }

    info!("Created backup: {}", backup_dir.display());
    Ok(backup_dir)
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect()
}
