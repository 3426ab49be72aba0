//! Packing of the working tree into distributable archives.

use std::path::{Path, PathBuf};

use crate::{
    error::{Error, Result},
    virtual_fs::VFolder,
};

/// Options for assembling archives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveOptions {
    /// Files whose name ends with one of these suffixes are left out.
    pub excluded_suffixes: Vec<String>,
    /// Whether existing archives may be replaced.
    pub overwrite: bool,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            excluded_suffixes: Vec::new(),
            overwrite: true,
        }
    }
}

/// Zip the contents of `source` into every archive in `destinations`.
///
/// Entry paths are relative to `source`. All archives get the same entries.
///
/// # Errors
/// - If `source` is not a directory
/// - If a destination exists and `options.overwrite` is not set
/// - If a file cannot be read or an archive cannot be written
#[tracing::instrument(level = "debug")]
pub fn assemble(source: &Path, destinations: &[PathBuf], options: &ArchiveOptions) -> Result<()> {
    if !source.is_dir() {
        return Err(Error::DirectoryNotFound(source.to_path_buf()));
    }
    if !options.overwrite {
        if let Some(existing) = destinations.iter().find(|path| path.exists()) {
            return Err(Error::ArchiveExists(existing.clone()));
        }
    }

    let contents = VFolder::from_dir(source, &options.excluded_suffixes)?;
    for destination in destinations {
        contents.zip(destination)?;
        tracing::info!(
            "Packed {} files into {}",
            contents.file_count(),
            destination.display()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{fs, io::Read};

    use zip::ZipArchive;

    use super::*;

    fn entries(path: &Path) -> Vec<String> {
        let archive = ZipArchive::new(fs::File::open(path).expect("archive missing"))
            .expect("invalid archive");
        archive.file_names().map(ToString::to_string).collect()
    }

    fn source_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("error creating tempdir");
        let models = dir.path().join("texturepack/assets/minecraft/models/item");
        fs::create_dir_all(&models).expect("error creating dirs");
        fs::write(models.join("model.json"), "{\"parent\": \"item/generated\"}")
            .expect("write failed");
        fs::write(models.join("model.bbmodel"), "{}").expect("write failed");
        fs::write(dir.path().join("texturepack/pack.mcmeta"), "{}").expect("write failed");
        dir
    }

    #[test]
    fn test_assemble_excludes_suffixes() {
        let dir = source_tree();
        let output = dir.path().join("pack.zip");
        let options = ArchiveOptions {
            excluded_suffixes: vec![".bbmodel".to_string()],
            ..Default::default()
        };

        assemble(&dir.path().join("texturepack"), &[output.clone()], &options)
            .expect("assemble failed");

        let mut names = entries(&output);
        names.sort();
        assert_eq!(
            names,
            vec!["assets/minecraft/models/item/model.json", "pack.mcmeta"]
        );

        let mut archive = ZipArchive::new(fs::File::open(&output).expect("archive missing"))
            .expect("invalid archive");
        let mut file = archive
            .by_name("assets/minecraft/models/item/model.json")
            .expect("entry missing");
        assert_eq!(file.compression(), zip::CompressionMethod::Deflated);
        let mut contents = String::new();
        file.read_to_string(&mut contents).expect("read failed");
        assert_eq!(contents, "{\"parent\": \"item/generated\"}");
    }

    #[test]
    fn test_assemble_multiple_destinations_are_identical() {
        let dir = source_tree();
        let first = dir.path().join("first.zip");
        let second = dir.path().join("second.zip");

        assemble(
            &dir.path().join("texturepack"),
            &[first.clone(), second.clone()],
            &ArchiveOptions::default(),
        )
        .expect("assemble failed");

        assert_eq!(entries(&first).len(), 3);
        assert_eq!(
            fs::read(&first).expect("read failed"),
            fs::read(&second).expect("read failed")
        );
    }

    #[test]
    fn test_assemble_overwrite() {
        let dir = source_tree();
        let output = dir.path().join("pack.zip");
        fs::write(&output, "not a zip").expect("write failed");

        let options = ArchiveOptions {
            overwrite: false,
            ..Default::default()
        };
        match assemble(&dir.path().join("texturepack"), &[output.clone()], &options) {
            Err(Error::ArchiveExists(path)) => assert_eq!(path, output),
            other => panic!("expected archive exists error, got {other:?}"),
        }
        assert_eq!(fs::read(&output).expect("read failed"), b"not a zip");

        assemble(
            &dir.path().join("texturepack"),
            &[output.clone()],
            &ArchiveOptions::default(),
        )
        .expect("assemble failed");
        assert_eq!(entries(&output).len(), 3);
    }

    #[test]
    fn test_assemble_missing_source() {
        let dir = tempfile::tempdir().expect("error creating tempdir");

        assert!(matches!(
            assemble(
                &dir.path().join("missing"),
                &[dir.path().join("pack.zip")],
                &ArchiveOptions::default()
            ),
            Err(Error::DirectoryNotFound(_))
        ));
    }
}
