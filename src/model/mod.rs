//! Custom model definitions read from the spreadsheet.

mod custom_model;
mod item;
pub use custom_model::{CustomModel, ModelType};
pub use item::OriginalItem;

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;

use crate::{
    error::{Error, Result},
    table::{Record, Table, EXPECTED_HEADERS},
};

// positions in `EXPECTED_HEADERS`
const VERBOSE_NAME: usize = 0;
const TYPE: usize = 1;
const MINECRAFT_ITEM: usize = 2;
const PARENT: usize = 3;
const TEXTURES: usize = 4;
const CUSTOM_MODEL_DATA: usize = 5;
const LOCATION: usize = 6;
const LINK_TO_BBMODEL: usize = 7;
const LINK_TO_JSON: usize = 8;
const LINK_TO_TEXTURE_FOLDER: usize = 9;
const GIVE_COMMAND: usize = 10;

/// All custom models of a pack, grouped by the item they override.
///
/// Items keep the order in which they first appear in the spreadsheet and the
/// models of an item keep their row order.
#[derive(Debug, Clone, Default)]
pub struct ModelSet {
    items: IndexMap<OriginalItem, Vec<CustomModel>>,
}

impl ModelSet {
    /// Build the model set from the rows of the custom model spreadsheet.
    ///
    /// Linked files are resolved against `asset_root` after removing every
    /// `../` from the link. Blank rows are skipped.
    ///
    /// # Errors
    /// - If the columns do not match [`EXPECTED_HEADERS`]
    /// - If a row is invalid, uses a custom model data value twice or links a
    ///   missing file
    #[tracing::instrument(level = "debug", skip(table))]
    pub fn from_table(table: &Table, asset_root: &Path) -> Result<Self> {
        let (items, _) = table
            .records(&EXPECTED_HEADERS)?
            .filter(|record| !record.is_blank())
            .try_fold(
                (IndexMap::new(), HashMap::new()),
                |(mut items, mut assigned), record| -> Result<_> {
                    let custom_model_data = custom_model_data(&record)?;
                    if let Some(&first_row) = assigned.get(&custom_model_data) {
                        return Err(Error::DuplicateKey {
                            custom_model_data,
                            row: record.row(),
                            first_row,
                        });
                    }
                    assigned.insert(custom_model_data, record.row());

                    let item = original_item(&record)?;
                    let model = custom_model(&record, custom_model_data, asset_root)?;
                    tracing::debug!(
                        "Row {}: {} -> {} ({})",
                        record.row(),
                        item.id(),
                        model.location(),
                        custom_model_data
                    );

                    items
                        .entry(item)
                        .or_insert_with(Vec::new)
                        .push(model);
                    Ok((items, assigned))
                },
            )?;

        let set = Self { items };
        tracing::info!(
            "Loaded {} custom models for {} items",
            set.model_count(),
            set.item_count()
        );
        Ok(set)
    }

    /// Get an item and its models by item id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<(&OriginalItem, &[CustomModel])> {
        self.items
            .get_key_value(id)
            .map(|(item, models)| (item, models.as_slice()))
    }

    /// Iterate the items with their models.
    pub fn iter(&self) -> impl Iterator<Item = (&OriginalItem, &[CustomModel])> {
        self.items
            .iter()
            .map(|(item, models)| (item, models.as_slice()))
    }

    /// Number of distinct items.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Number of custom models over all items.
    #[must_use]
    pub fn model_count(&self) -> usize {
        self.items.values().map(Vec::len).sum()
    }
}

fn required(record: &Record, column: usize) -> Result<String> {
    record
        .cell(column)
        .as_text()
        .ok_or_else(|| Error::MissingValue {
            row: record.row(),
            column: EXPECTED_HEADERS[column].to_string(),
        })
}

fn custom_model_data(record: &Record) -> Result<i64> {
    let cell = record.cell(CUSTOM_MODEL_DATA);
    if cell.is_empty() {
        return Err(Error::MissingValue {
            row: record.row(),
            column: EXPECTED_HEADERS[CUSTOM_MODEL_DATA].to_string(),
        });
    }
    cell.as_int().ok_or_else(|| Error::TypeConversion {
        row: record.row(),
        column: EXPECTED_HEADERS[CUSTOM_MODEL_DATA].to_string(),
        value: cell.to_string(),
    })
}

fn original_item(record: &Record) -> Result<OriginalItem> {
    let textures = match record.cell(TEXTURES).as_text() {
        Some(text) => {
            OriginalItem::parse_textures(&text).map_err(|source| Error::InvalidTextures {
                row: record.row(),
                source,
            })?
        }
        None => IndexMap::new(),
    };

    Ok(OriginalItem::new(
        &required(record, MINECRAFT_ITEM)?,
        &required(record, PARENT)?,
        textures,
    ))
}

fn custom_model(record: &Record, custom_model_data: i64, asset_root: &Path) -> Result<CustomModel> {
    let model_type = required(record, TYPE)?;
    let model_type = ModelType::from_name(&model_type).ok_or(Error::InvalidModelType {
        row: record.row(),
        value: model_type,
    })?;

    CustomModel::new(
        &required(record, VERBOSE_NAME)?,
        model_type,
        custom_model_data,
        &required(record, LOCATION)?,
    )
    .with_link_to_bbmodel(link(record, LINK_TO_BBMODEL, asset_root))?
    .with_link_to_json(link(record, LINK_TO_JSON, asset_root))?
    .with_link_to_texture_folder(link(record, LINK_TO_TEXTURE_FOLDER, asset_root))
    .map(|model| model.with_give_command(record.cell(GIVE_COMMAND).as_text()))
}

fn link(record: &Record, column: usize, asset_root: &Path) -> Option<PathBuf> {
    record
        .cell(column)
        .as_text()
        .map(|link| asset_root.join(link.replace("../", "")))
}
