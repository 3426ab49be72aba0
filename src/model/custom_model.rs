//! A single custom model override.

use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

use getset::{CopyGetters, Getters};

use crate::error::{Error, Result};

/// The kind of asset a custom model is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelType {
    /// A block-like 3D model.
    Model,
    /// A flat item sprite.
    Item,
}

impl ModelType {
    /// Parse the name used in the spreadsheet.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "model" => Some(Self::Model),
            "item" => Some(Self::Item),
            _ => None,
        }
    }
}

impl Display for ModelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Model => "model",
            Self::Item => "item",
        })
    }
}

/// A model override selected by its custom model data value.
#[derive(Debug, Clone, PartialEq, Eq, Getters, CopyGetters)]
pub struct CustomModel {
    /// Human readable name.
    #[get = "pub"]
    verbose_name: String,
    /// Kind of model.
    #[getset(get_copy = "pub")]
    model_type: ModelType,
    /// Value matched by the `custom_model_data` predicate.
    #[getset(get_copy = "pub")]
    custom_model_data: i64,
    /// Model reference written into the override, e.g. `item/custom/sword`.
    #[get = "pub"]
    location: String,
    /// Source Blockbench project.
    #[get = "pub"]
    link_to_bbmodel: Option<PathBuf>,
    /// Exported model JSON.
    #[get = "pub"]
    link_to_json: Option<PathBuf>,
    /// Folder holding the model textures.
    #[get = "pub"]
    link_to_texture_folder: Option<PathBuf>,
    /// Command giving the item in game.
    #[get = "pub"]
    give_command: Option<String>,
}

impl CustomModel {
    /// Create a new custom model without any linked files.
    #[must_use]
    pub fn new(
        verbose_name: &str,
        model_type: ModelType,
        custom_model_data: i64,
        location: &str,
    ) -> Self {
        Self {
            verbose_name: verbose_name.to_string(),
            model_type,
            custom_model_data,
            location: location.to_string(),
            link_to_bbmodel: None,
            link_to_json: None,
            link_to_texture_folder: None,
            give_command: None,
        }
    }

    /// Link the Blockbench project of the model.
    ///
    /// # Errors
    /// - If the file does not exist
    pub fn with_link_to_bbmodel(self, path: Option<PathBuf>) -> Result<Self> {
        Ok(Self {
            link_to_bbmodel: existing(path)?,
            ..self
        })
    }

    /// Link the exported model JSON.
    ///
    /// # Errors
    /// - If the file does not exist
    pub fn with_link_to_json(self, path: Option<PathBuf>) -> Result<Self> {
        Ok(Self {
            link_to_json: existing(path)?,
            ..self
        })
    }

    /// Link the texture folder of the model.
    ///
    /// # Errors
    /// - If the folder does not exist
    pub fn with_link_to_texture_folder(self, path: Option<PathBuf>) -> Result<Self> {
        Ok(Self {
            link_to_texture_folder: existing(path)?,
            ..self
        })
    }

    /// Set the give command of the model.
    #[must_use]
    pub fn with_give_command(self, give_command: Option<String>) -> Self {
        Self {
            give_command,
            ..self
        }
    }
}

fn existing(path: Option<PathBuf>) -> Result<Option<PathBuf>> {
    match path {
        Some(path) if !Path::exists(&path) => Err(Error::MissingFile(path)),
        path => Ok(path),
    }
}
