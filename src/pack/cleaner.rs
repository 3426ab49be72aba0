//! Removal of previously generated model files.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

/// Delete every `.json` file directly inside `dir`.
///
/// Subdirectories and their contents are left alone. Returns the removed
/// files.
///
/// # Errors
/// - If `dir` is not an existing directory
/// - If the directory cannot be read or a file cannot be removed
#[tracing::instrument(level = "debug")]
pub fn clean_models(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut removed = Vec::new();
    for dir_entry in fs::read_dir(dir)? {
        let dir_entry = dir_entry?;
        let path = dir_entry.path();
        let is_json = dir_entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(".json"));
        // follows symlinks, a linked model file counts as a file
        if is_json && path.is_file() {
            fs::remove_file(&path)?;
            tracing::debug!("Removed {}", path.display());
            removed.push(path);
        }
    }

    tracing::info!("Removed {} generated model files", removed.len());
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_models() {
        let dir = tempfile::tempdir().expect("error creating tempdir");
        fs::write(dir.path().join("a.json"), "{}").expect("write failed");
        fs::write(dir.path().join("b.txt"), "b").expect("write failed");
        fs::create_dir(dir.path().join("sub")).expect("error creating dir");
        fs::write(dir.path().join("sub/c.json"), "{}").expect("write failed");

        let removed = clean_models(dir.path()).expect("clean failed");
        assert_eq!(removed, vec![dir.path().join("a.json")]);

        let mut remaining = fs::read_dir(dir.path())
            .expect("read failed")
            .map(|entry| entry.expect("entry").file_name())
            .collect::<Vec<_>>();
        remaining.sort();
        assert_eq!(remaining, vec!["b.txt", "sub"]);
        assert!(dir.path().join("sub/c.json").is_file());

        // a second run has nothing left to do
        assert!(clean_models(dir.path()).expect("clean failed").is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_clean_follows_symlinks() {
        let dir = tempfile::tempdir().expect("error creating tempdir");
        fs::create_dir(dir.path().join("sub")).expect("error creating dir");
        fs::write(dir.path().join("sub/target.json"), "{}").expect("write failed");
        std::os::unix::fs::symlink(
            dir.path().join("sub/target.json"),
            dir.path().join("link.json"),
        )
        .expect("error creating symlink");

        let removed = clean_models(dir.path()).expect("clean failed");

        assert_eq!(removed, vec![dir.path().join("link.json")]);
        assert!(!dir.path().join("link.json").exists());
        assert!(dir.path().join("sub/target.json").is_file());
    }

    #[test]
    fn test_clean_missing_directory() {
        let dir = tempfile::tempdir().expect("error creating tempdir");
        let missing = dir.path().join("missing");

        match clean_models(&missing) {
            Err(Error::DirectoryNotFound(path)) => assert_eq!(path, missing),
            other => panic!("expected directory not found, got {other:?}"),
        }
    }
}
