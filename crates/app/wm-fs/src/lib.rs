use std::{
    fs::{self, File},
    io::Read,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Serialize, de::DeserializeOwned};
use walkdir::WalkDir;

/// Write atomically, creating all leading directories.
pub fn create_dirs_then_write<P: AsRef<Path>>(
    file_path: P,
    contents: impl AsRef<[u8]>,
) -> std::io::Result<()> {
    let file_path = file_path.as_ref();

    let parent_dir = file_path.parent().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "File path has no parent directory",
        )
    })?;
    fs::create_dir_all(parent_dir)?;

    let temp_path = create_temp_file_path(parent_dir);

    fs::write(&temp_path, contents.as_ref())?;

    if let Err(err) = fs::rename(&temp_path, file_path) {
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }

    Ok(())
}

fn create_temp_file_path(dir: &Path) -> PathBuf {
    use std::time::{SystemTime, UNIX_EPOCH};

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();

    let process_id = std::process::id();
    let temp_name = format!(".tmp_{}__{}", process_id, timestamp);

    dir.join(temp_name)
}

/// Serialize `value` as pretty JSON and write it atomically.
pub fn write_json_pretty<P: AsRef<Path>, T: Serialize>(file_path: P, value: &T) -> Result<()> {
    let file_path = file_path.as_ref();
    let contents = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
    create_dirs_then_write(file_path, contents)
        .with_context(|| format!("Failed to write {}", file_path.display()))
}

/// Reads a JSON document, returning `T::default()` when the file does not exist.
///
/// A file that exists but cannot be parsed is an error; callers that want to
/// treat corruption as "empty" decide that themselves.
pub fn read_json_file_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(err) => return Err(err.into()),
    };
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    let value: T = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(value)
}

/// Immediate subdirectories of `dir`, sorted by path. A missing `dir` yields none.
pub fn list_subdirs<P: AsRef<Path>>(dir: P) -> std::io::Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut dirs = vec![];
    if !dir.exists() {
        return Ok(dirs);
    }

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Recursively copies `src` into `dst`, overwriting files that already exist.
/// Returns the number of files copied.
pub fn copy_dir_all<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> std::io::Result<u64> {
    let src = src.as_ref();
    let dst = dst.as_ref();
    let mut copied = 0;

    fs::create_dir_all(dst)?;

    for entry in WalkDir::new(src) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(std::io::Error::other)?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    struct Doc {
        items: Vec<String>,
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("doc.json");

        create_dirs_then_write(&path, "first").unwrap();
        create_dirs_then_write(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        let leftovers: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(".tmp_"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_json_round_trip_and_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("doc.json");

        let missing: Doc = read_json_file_or_default(&path).unwrap();
        assert_eq!(missing, Doc::default());

        let doc = Doc {
            items: vec!["a".into()],
        };
        write_json_pretty(&path, &doc).unwrap();
        let loaded: Doc = read_json_file_or_default(&path).unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_corrupt_json_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("doc.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(read_json_file_or_default::<Doc>(&path).is_err());
    }

    #[test]
    fn test_copy_dir_all_and_list_subdirs() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        fs::create_dir_all(src.join("web")).unwrap();
        fs::write(src.join("main.py"), "print()").unwrap();
        fs::write(src.join("web").join("api.py"), "api").unwrap();

        let dst = tmp.path().join("backup").join("src");
        let copied = copy_dir_all(&src, &dst).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(fs::read_to_string(dst.join("web/api.py")).unwrap(), "api");

        let subdirs = list_subdirs(tmp.path()).unwrap();
        assert_eq!(subdirs, vec![tmp.path().join("backup"), tmp.path().join("src")]);
        assert!(list_subdirs(tmp.path().join("missing")).unwrap().is_empty());
    }
}
