//! Error type shared by every stage of the pack build.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a pack.
///
/// Every error is fatal to the run; nothing is retried or rolled back.
#[derive(Debug, Error)]
pub enum Error {
    /// The spreadsheet header row does not match the expected column set.
    #[error("spreadsheet columns do not match, missing: {missing:?}, unexpected: {unexpected:?}")]
    Schema {
        /// Expected columns that were not found.
        missing: Vec<String>,
        /// Columns found that were not expected (or found more than once).
        unexpected: Vec<String>,
    },

    /// A cell could not be converted to an integer.
    #[error("row {row}: column '{column}' is not an integer: {value}")]
    TypeConversion {
        /// Spreadsheet row number (1-based, header is row 1).
        row: usize,
        /// Column name.
        column: String,
        /// Raw cell content.
        value: String,
    },

    /// A custom model data value was used more than once.
    #[error("row {row}: custom_model_data {custom_model_data} already used in row {first_row}")]
    DuplicateKey {
        /// The repeated value.
        custom_model_data: i64,
        /// Row of the repeated value.
        row: usize,
        /// Row where the value was first seen.
        first_row: usize,
    },

    /// A file linked from the spreadsheet does not exist.
    #[error("linked file not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// A required cell is empty.
    #[error("row {row}: column '{column}' must not be empty")]
    MissingValue {
        /// Spreadsheet row number.
        row: usize,
        /// Column name.
        column: String,
    },

    /// The model type column holds an unknown value.
    #[error("row {row}: unknown model type '{value}', expected 'model' or 'item'")]
    InvalidModelType {
        /// Spreadsheet row number.
        row: usize,
        /// Raw cell content.
        value: String,
    },

    /// The textures column is not a valid mapping.
    #[error("row {row}: invalid textures mapping")]
    InvalidTextures {
        /// Spreadsheet row number.
        row: usize,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },

    /// A generated item model file could not be parsed.
    #[error("invalid item model file: {}", .path.display())]
    InvalidModelFile {
        /// Path of the model file.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },

    /// A directory that has to exist is missing.
    #[error("directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// The settings file is missing.
    #[error("settings file not found: {}", .0.display())]
    SettingsNotFound(PathBuf),

    /// The settings file is not valid JSON for the expected layout.
    #[error("malformed settings file: {}", .path.display())]
    Settings {
        /// Path of the settings file.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },

    /// The settings file is well-formed but unusable.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// The destination archive exists and overwriting is disabled.
    #[error("archive already exists and overwriting is disabled: {}", .0.display())]
    ArchiveExists(PathBuf),

    /// The workbook has no worksheet or no header row.
    #[error("workbook has no usable worksheet: {}", .0.display())]
    EmptyWorkbook(PathBuf),

    /// The workbook could not be read.
    #[error("failed to read spreadsheet")]
    Spreadsheet(#[from] calamine::Error),

    /// Filesystem error.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Error while writing a zip archive.
    #[error("failed to write archive")]
    Zip(#[from] zip::result::ZipError),
}
