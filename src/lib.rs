//! Packsmith builds Minecraft resource packs with custom item models.
//!
//! The custom models are listed in a spreadsheet. A build removes the item
//! model files of the previous build, writes one item model file with
//! `custom_model_data` overrides per overridden item and zips the working
//! tree into the configured archives.

#![warn(
    missing_docs,
    missing_debug_implementations,
    nonstandard_style,
    clippy::complexity,
    clippy::style,
    clippy::suspicious
)]
#![deny(unsafe_code)]

pub mod error;
pub mod model;
pub mod pack;
pub mod table;
pub mod util;
pub mod virtual_fs;

pub use error::{Error, Result};

/// Re-exports of the types needed for a pack build.
pub mod prelude {
    #[doc(inline)]
    pub use crate::{
        error::{Error, Result},
        model::{CustomModel, ModelSet, ModelType, OriginalItem},
        pack::{
            assemble, clean_models, emit_models, run, ArchiveOptions, BuildReport, ItemModelFile,
        },
        table::{Table, EXPECTED_HEADERS},
        util::settings::Settings,
    };
}
