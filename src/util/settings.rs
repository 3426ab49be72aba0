//! Settings of a pack build.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Placeholder in output paths that is replaced by the dotted version.
pub const VERSION_PLACEHOLDER: &str = "{version_str}";

/// Settings of a pack build, read from a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Working tree of the pack.
    pub original_folder: PathBuf,
    /// Version of the pack, e.g. `[1, 2, 0]`.
    pub version: Vec<u32>,
    /// Templated paths of the archives to create.
    #[serde(default)]
    pub output_files: Vec<String>,
    /// Templated path of a single archive to create.
    #[serde(default)]
    pub output_file: Option<String>,
    /// File name suffixes left out of the archives.
    #[serde(default)]
    pub excluded_files: Vec<String>,
    /// Spreadsheet with the custom model definitions.
    #[serde(default = "default_spreadsheet")]
    pub spreadsheet: PathBuf,
    /// Folder of the generated item models, relative to `original_folder`.
    #[serde(default = "default_models_folder")]
    pub models_folder: PathBuf,
    /// Base folder for the files linked in the spreadsheet.
    #[serde(default = "default_asset_root")]
    pub asset_root: PathBuf,
    /// Whether existing archives may be replaced.
    #[serde(default = "default_overwrite")]
    pub overwrite: bool,
}

fn default_spreadsheet() -> PathBuf {
    PathBuf::from("data/custom_models.xlsx")
}
fn default_models_folder() -> PathBuf {
    PathBuf::from("assets/minecraft/models/item")
}
fn default_asset_root() -> PathBuf {
    PathBuf::from(".")
}
fn default_overwrite() -> bool {
    true
}

impl Settings {
    /// Load the settings from a JSON file.
    ///
    /// # Errors
    /// - If the file does not exist or cannot be read
    /// - If the file is not valid JSON for the settings layout
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::SettingsNotFound(path.to_path_buf()));
        }
        Self::from_json(path, &fs::read_to_string(path)?)
    }

    fn from_json(path: &Path, json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| Error::Settings {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Version joined with dots, e.g. `1.2.0`.
    #[must_use]
    pub fn version_str(&self) -> String {
        self.version
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Paths of all archives to create, with the version filled in.
    ///
    /// # Errors
    /// - If neither `output_files` nor `output_file` is set
    pub fn output_paths(&self) -> Result<Vec<PathBuf>> {
        let version_str = self.version_str();
        let paths = self
            .output_files
            .iter()
            .chain(self.output_file.iter())
            .map(|template| PathBuf::from(template.replace(VERSION_PLACEHOLDER, &version_str)))
            .collect::<Vec<_>>();

        if paths.is_empty() {
            return Err(Error::InvalidSettings("no output_files or output_file given".to_string()));
        }
        Ok(paths)
    }

    /// Folder the item model files are generated in.
    #[must_use]
    pub fn models_path(&self) -> PathBuf {
        self.original_folder.join(&self.models_folder)
    }
}
