//! Generation of item model files with custom model data overrides.

use std::{
    fs,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    model::{CustomModel, ModelSet, OriginalItem},
    virtual_fs::VFile,
};

/// Contents of a generated item model file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemModelFile {
    /// Parent model.
    pub parent: String,
    /// Texture layers.
    pub textures: IndexMap<String, String>,
    /// Overrides in the order the game checks them.
    pub overrides: Vec<ModelOverride>,
}

/// One entry of the `overrides` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Predicate {
    /// Custom model data value the override matches.
    pub custom_model_data: i64,
}

/// An override selecting `model` when the predicate matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelOverride {
    /// Condition of the override.
    pub predicate: Predicate,
    /// Model used when the condition matches.
    pub model: String,
}

impl From<&CustomModel> for ModelOverride {
    fn from(value: &CustomModel) -> Self {
        Self {
            predicate: Predicate {
                custom_model_data: value.custom_model_data(),
            },
            model: value.location().clone(),
        }
    }
}

impl ItemModelFile {
    /// Create the model file of an item with its custom models.
    #[must_use]
    pub fn new(item: &OriginalItem, models: &[CustomModel]) -> Self {
        Self {
            parent: item.parent().clone(),
            textures: item.textures().clone(),
            overrides: models.iter().map(ModelOverride::from).collect(),
        }
    }

    /// Read a previously generated model file.
    ///
    /// # Errors
    /// - If the file cannot be read or is not a valid model file
    pub fn read(path: &Path) -> Result<Self> {
        serde_json::from_slice(&fs::read(path)?).map_err(|source| Error::InvalidModelFile {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Compile the model file into a pretty printed virtual file.
    #[must_use]
    pub fn compile(&self) -> VFile {
        VFile::Text(serde_json::to_string_pretty(self).expect("Failed to serialize item model"))
    }
}

/// Write one model file per item into `models_dir`, named after the item id
/// without its namespace.
///
/// Existing files are overwritten. `models_dir` has to exist. When a write
/// fails, the files written before stay in place.
///
/// Ids that only differ in their namespace (`minecraft:stick` and
/// `mymod:stick`) share a file. The item that comes later in the set
/// replaces the earlier one's file, and a warning is logged.
///
/// # Errors
/// - If a file cannot be written
#[tracing::instrument(level = "debug", skip(set))]
pub fn emit_models(models_dir: &Path, set: &ModelSet) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(set.item_count());
    for (item, models) in set.iter() {
        let path = models_dir.join(format!("{}.json", item.file_stem()));
        ItemModelFile::new(item, models).compile().write_to(&path)?;
        tracing::debug!("Wrote {} overrides to {}", models.len(), path.display());
        if written.contains(&path) {
            tracing::warn!("{} replaced the model file {}", item.id(), path.display());
        } else {
            written.push(path);
        }
    }

    tracing::info!("Generated {} item model files", written.len());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use crate::{
        model::tests::{row, table},
        table::Cell,
    };

    use super::*;

    fn model_set() -> ModelSet {
        ModelSet::from_table(
            &table(vec![
                row(
                    "minecraft:stick",
                    "item/handheld",
                    "{'layer0': 'item/stick'}",
                    Cell::Int(30),
                    "item/custom/wand",
                ),
                row(
                    "minecraft:paper",
                    "item/generated",
                    "{'layer0': 'item/paper'}",
                    Cell::Int(10),
                    "item/custom/letter",
                ),
                row(
                    "minecraft:stick",
                    "item/handheld",
                    "{'layer0': 'item/stick'}",
                    Cell::Int(20),
                    "item/custom/staff",
                ),
            ]),
            Path::new("."),
        )
        .expect("valid table")
    }

    #[test]
    fn test_compile_shape() {
        let set = model_set();
        let (item, models) = set.get("minecraft:stick").expect("stick present");

        let VFile::Text(text) = ItemModelFile::new(item, models).compile() else {
            panic!("model file should be text not binary")
        };
        let json = serde_json::from_str::<serde_json::Value>(&text).expect("valid json");

        assert_eq!(
            json,
            serde_json::json!({
                "parent": "item/handheld",
                "textures": {"layer0": "item/stick"},
                "overrides": [
                    {"predicate": {"custom_model_data": 30}, "model": "item/custom/wand"},
                    {"predicate": {"custom_model_data": 20}, "model": "item/custom/staff"}
                ]
            })
        );
        assert!(text.starts_with("{\n  \"parent\""));
    }

    #[test]
    fn test_emit_models_round_trip() {
        let dir = tempfile::tempdir().expect("error creating tempdir");
        let set = model_set();

        let written = emit_models(dir.path(), &set).expect("emit failed");
        assert_eq!(
            written,
            vec![dir.path().join("stick.json"), dir.path().join("paper.json")]
        );

        let stick = ItemModelFile::read(&dir.path().join("stick.json")).expect("read failed");
        let pairs = stick
            .overrides
            .iter()
            .map(|o| (o.predicate.custom_model_data, o.model.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(
            pairs,
            vec![(30, "item/custom/wand"), (20, "item/custom/staff")]
        );
    }

    #[test]
    fn test_emit_overwrites() {
        let dir = tempfile::tempdir().expect("error creating tempdir");
        fs::write(
            dir.path().join("paper.json"),
            "old contents that are much longer than needed",
        )
        .expect("write failed");

        emit_models(dir.path(), &model_set()).expect("emit failed");

        let paper = ItemModelFile::read(&dir.path().join("paper.json")).expect("read failed");
        assert_eq!(paper.overrides.len(), 1);
        assert_eq!(paper.parent, "item/generated");
    }

    #[test]
    fn test_emit_namespaces_share_file() {
        let dir = tempfile::tempdir().expect("error creating tempdir");
        let set = ModelSet::from_table(
            &table(vec![
                row("minecraft:stick", "item/handheld", "", Cell::Int(1), "item/a"),
                row("mymod:stick", "item/generated", "", Cell::Int(2), "item/b"),
            ]),
            Path::new("."),
        )
        .expect("valid table");
        assert_eq!(set.item_count(), 2);

        let written = emit_models(dir.path(), &set).expect("emit failed");
        assert_eq!(written, vec![dir.path().join("stick.json")]);

        let stick = ItemModelFile::read(&dir.path().join("stick.json")).expect("read failed");
        assert_eq!(stick.parent, "item/generated");
        assert_eq!(stick.overrides.len(), 1);
        assert_eq!(stick.overrides[0].model, "item/b");
    }

    #[test]
    fn test_emit_missing_directory() {
        let dir = tempfile::tempdir().expect("error creating tempdir");

        assert!(matches!(
            emit_models(&dir.path().join("missing"), &model_set()),
            Err(Error::Io(_))
        ));
    }
}
