//! In-memory file tree used to stage generated files and pack contents.

use std::{collections::BTreeMap, fs, io, path::Path};

use zip::{write::SimpleFileOptions, CompressionMethod, DateTime, ZipWriter};

/// Folder representation in virtual file system
///
/// Children are kept sorted by name, so iteration order (and with it the
/// order of archive entries) does not depend on the order of the directory
/// listing it was read from.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VFolder {
    folders: BTreeMap<String, VFolder>,
    files: BTreeMap<String, VFile>,
}
impl VFolder {
    /// Create a new, empty virtual folder.
    #[must_use]
    pub fn new() -> VFolder {
        VFolder {
            folders: BTreeMap::new(),
            files: BTreeMap::new(),
        }
    }

    /// Get all direct subfolders in the folder.
    #[must_use]
    pub fn get_folders(&self) -> &BTreeMap<String, VFolder> {
        &self.folders
    }
    /// Get all direct files in the folder.
    #[must_use]
    pub fn get_files(&self) -> &BTreeMap<String, VFile> {
        &self.files
    }

    /// Recursively add an existing folder to the folder.
    pub fn add_existing_folder(&mut self, path: &str, folder: VFolder) {
        let (head, tail) = split_path(path);
        if let Some(tail) = tail {
            self.folders
                .entry(head.to_string())
                .or_default()
                .add_existing_folder(tail, folder);
        } else {
            self.folders.insert(path.to_string(), folder);
        }
    }
    /// Recursively add a new file to the folder.
    pub fn add_file(&mut self, path: &str, file: VFile) {
        let (head, tail) = split_path(path);
        if let Some(tail) = tail {
            self.folders
                .entry(head.to_string())
                .or_default()
                .add_file(tail, file);
        } else {
            self.files.insert(path.to_string(), file);
        }
    }

    /// Recursively get a subfolder by path.
    #[must_use]
    pub fn get_folder(&self, path: &str) -> Option<&VFolder> {
        let (head, tail) = split_path(path);
        if let Some(tail) = tail {
            self.folders.get(head)?.get_folder(tail)
        } else {
            self.folders.get(path)
        }
    }
    /// Recursively get a file by path.
    #[must_use]
    pub fn get_file(&self, path: &str) -> Option<&VFile> {
        let (head, tail) = split_path(path);
        if let Some(tail) = tail {
            self.folders.get(head)?.get_file(tail)
        } else {
            self.files.get(path)
        }
    }

    /// Number of files in the folder and all of its subfolders.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
            + self
                .folders
                .values()
                .map(VFolder::file_count)
                .sum::<usize>()
    }

    /// Read a directory from disk, leaving out every file whose name ends
    /// with one of `excluded_suffixes`.
    ///
    /// Paths inside the returned folder are relative to `path`.
    ///
    /// # Errors
    /// - If the directory or one of its files cannot be read
    /// - If a file name is not valid UTF-8
    pub fn from_dir<S: AsRef<str>>(path: &Path, excluded_suffixes: &[S]) -> io::Result<Self> {
        let mut root_vfolder = VFolder::new();
        for dir_entry in fs::read_dir(path)? {
            let dir_entry = dir_entry?;
            let path = dir_entry.path();
            let Ok(name) = dir_entry.file_name().into_string() else {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Invalid file name: {}", path.display()),
                ));
            };

            if path.is_dir() {
                root_vfolder
                    .add_existing_folder(&name, VFolder::from_dir(&path, excluded_suffixes)?);
            } else if path.is_file() {
                if excluded_suffixes
                    .iter()
                    .any(|suffix| name.ends_with(suffix.as_ref()))
                {
                    tracing::debug!("Excluding {}", path.display());
                    continue;
                }
                let data = fs::read(&path)?;
                root_vfolder.add_file(&name, VFile::Binary(data));
            } else {
                tracing::warn!("Skipping {}: neither file nor directory", path.display());
            }
        }

        Ok(root_vfolder)
    }

    /// Zip the folder and its contents into a deflate-compressed archive.
    ///
    /// Entries are written in path order with the zip epoch as timestamp, so
    /// the same folder always produces the same bytes. An existing file at
    /// `path` is truncated.
    ///
    /// # Errors
    /// - If the archive cannot be created or written
    pub fn zip(&self, path: &Path) -> crate::Result<()> {
        use io::Write;

        let file = fs::File::create(path)?;
        let mut writer = ZipWriter::new(file);
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());

        for (entry, file) in self.flatten() {
            tracing::debug!("Adding {entry}");
            writer.start_file(entry, options)?;
            writer.write_all(file.as_bytes())?;
        }

        writer.finish()?;

        Ok(())
    }

    /// Flatten the folder and its contents into a list of files with full
    /// paths, sorted by path.
    #[must_use]
    pub fn flatten(&self) -> Vec<(String, &VFile)> {
        let mut files = self
            .files
            .iter()
            .map(|(k, v)| (k.to_owned(), v))
            .collect::<Vec<_>>();

        for (name, folder) in &self.folders {
            files.extend(
                folder
                    .flatten()
                    .into_iter()
                    .map(|(path, file)| (format!("{name}/{path}"), file)),
            );
        }

        files.sort_by(|(a, _), (b, _)| a.cmp(b));
        files
    }
}

fn split_path(path: &str) -> (&str, Option<&str>) {
    path.split_once('/')
        .map(|(h, t)| (h, (!t.is_empty()).then_some(t)))
        .unwrap_or((path, None))
}

/// File representation in virtual file system
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VFile {
    /// Text file
    Text(String),
    /// Binary file
    Binary(Vec<u8>),
}

impl VFile {
    /// Raw contents of the file.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            VFile::Text(text) => text.as_bytes(),
            VFile::Binary(data) => data,
        }
    }

    /// Write the file to disk, truncating anything already there.
    ///
    /// The parent directory has to exist.
    ///
    /// # Errors
    /// - If the file cannot be written
    pub fn write_to(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.as_bytes())
    }
}

impl From<&str> for VFile {
    fn from(value: &str) -> Self {
        VFile::Text(value.to_string())
    }
}
