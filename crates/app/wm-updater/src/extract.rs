use std::{
    fs::File,
    path::{Component, Path, PathBuf},
};

use tracing::{debug, warn};
use wm_patch::MANIFEST_FILE;
use zip::ZipArchive;

use crate::error::ExtractError;

const FALLBACK_FOLDER: &str = "patch";

/// Extracts a downloaded patch archive into `staging_dir` and returns the
/// bundle folder.
///
/// When every entry lives under one top-level directory, that directory is the
/// bundle folder. Otherwise the entries are placed in a folder named after the
/// asset, without its extension. An existing folder of the same name is
/// replaced.
pub fn extract_bundle(
    archive_path: &Path,
    asset_name: &str,
    staging_dir: &Path,
) -> Result<PathBuf, ExtractError> {
    let file = File::open(archive_path).map_err(|source| ExtractError::Open {
        path: archive_path.to_path_buf(),
        source,
    })?;
    let archive_err = |source| ExtractError::Archive {
        path: archive_path.to_path_buf(),
        source,
    };
    let mut archive = ZipArchive::new(file).map_err(archive_err)?;

    let mut entries = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let entry = archive.by_index(index).map_err(archive_err)?;
        let path = entry
            .enclosed_name()
            .ok_or_else(|| ExtractError::UnsafeEntry {
                entry: entry.name().to_string(),
            })?;
        if path.as_os_str().is_empty() {
            continue;
        }
        entries.push((index, path, entry.is_dir()));
    }

    if entries.is_empty() {
        return Err(ExtractError::Empty {
            path: archive_path.to_path_buf(),
        });
    }

    let (folder, base) = match single_root(&entries) {
        Some(root) => (staging_dir.join(root), staging_dir.to_path_buf()),
        None => {
            let folder = staging_dir.join(folder_from_asset(asset_name));
            (folder.clone(), folder)
        }
    };

    let io_err = |path: &Path, source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    };

    if folder.exists() {
        debug!("Replacing staged folder {}", folder.display());
        std::fs::remove_dir_all(&folder).map_err(|e| io_err(&folder, e))?;
    }
    std::fs::create_dir_all(&folder).map_err(|e| io_err(&folder, e))?;

    let written = (|| -> Result<(), ExtractError> {
        for (index, path, is_dir) in &entries {
            let out = base.join(path);
            if *is_dir {
                std::fs::create_dir_all(&out).map_err(|e| io_err(&out, e))?;
                continue;
            }

            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
            }
            let mut entry = archive.by_index(*index).map_err(archive_err)?;
            let mut target = File::create(&out).map_err(|e| io_err(&out, e))?;
            std::io::copy(&mut entry, &mut target).map_err(|e| io_err(&out, e))?;
        }
        Ok(())
    })();

    if let Err(e) = written {
        let _ = std::fs::remove_dir_all(&folder);
        return Err(e);
    }

    if !folder.join(MANIFEST_FILE).exists() {
        warn!(
            "{} has no {}, staged as plain files",
            asset_name, MANIFEST_FILE
        );
    }

    debug!("Extracted {} into {}", asset_name, folder.display());
    Ok(folder)
}

/// The directory every entry shares, if entries have one.
fn single_root(entries: &[(usize, PathBuf, bool)]) -> Option<PathBuf> {
    let mut root: Option<&std::ffi::OsStr> = None;

    for (_, path, is_dir) in entries {
        let mut components = path.components();
        let first = match components.next() {
            Some(Component::Normal(first)) => first,
            _ => return None,
        };
        let nested = components.next().is_some();
        if !nested && !is_dir {
            return None;
        }

        match root {
            None => root = Some(first),
            Some(existing) if existing == first => {}
            Some(_) => return None,
        }
    }

    root.map(PathBuf::from)
}

fn folder_from_asset(asset_name: &str) -> String {
    Path::new(asset_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| FALLBACK_FOLDER.to_string())
}
