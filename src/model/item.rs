//! The base game item that custom models override.

use std::{
    borrow::Borrow,
    hash::{Hash, Hasher},
};

use getset::Getters;
use indexmap::IndexMap;

/// A vanilla item whose model file receives the overrides.
///
/// Two items are equal when their ids are equal, whatever their parent and
/// textures. When the spreadsheet defines the same item twice with different
/// payloads, the first definition is the one that ends up in the model set.
#[derive(Debug, Clone, Getters)]
pub struct OriginalItem {
    /// Namespaced item id, e.g. `minecraft:stick`.
    #[get = "pub"]
    id: String,
    /// Parent model of the generated item model.
    #[get = "pub"]
    parent: String,
    /// Texture layers of the generated item model.
    #[get = "pub"]
    textures: IndexMap<String, String>,
}

impl OriginalItem {
    /// Create a new original item.
    #[must_use]
    pub fn new(id: &str, parent: &str, textures: IndexMap<String, String>) -> Self {
        Self {
            id: id.to_string(),
            parent: parent.to_string(),
            textures,
        }
    }

    /// Item id without its namespace, used as the model file name.
    #[must_use]
    pub fn file_stem(&self) -> &str {
        self.id.rsplit(':').next().unwrap_or(&self.id)
    }

    /// Parse a texture mapping as written in the spreadsheet.
    ///
    /// Single quotes are accepted in place of double quotes, so both
    /// `{'layer0': 'item/stick'}` and `{"layer0": "item/stick"}` work.
    ///
    /// # Errors
    /// - If the text is not an object of strings
    pub fn parse_textures(text: &str) -> serde_json::Result<IndexMap<String, String>> {
        serde_json::from_str(&text.replace('\'', "\""))
    }
}

impl PartialEq for OriginalItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for OriginalItem {}

impl Hash for OriginalItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Borrow<str> for OriginalItem {
    fn borrow(&self) -> &str {
        &self.id
    }
}
