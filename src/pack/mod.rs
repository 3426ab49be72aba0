//! Pack build stages and the pipeline that runs them.

mod assembler;
mod cleaner;
mod emitter;
pub use assembler::{assemble, ArchiveOptions};
pub use cleaner::clean_models;
pub use emitter::{emit_models, ItemModelFile, ModelOverride, Predicate};

use std::path::PathBuf;

use crate::{error::Result, model::ModelSet, table::Table, util::settings::Settings};

/// Files touched by a pack build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Previously generated model files that were deleted.
    pub removed: Vec<PathBuf>,
    /// Item model files that were written.
    pub models: Vec<PathBuf>,
    /// Archives that were written.
    pub archives: Vec<PathBuf>,
}

/// Run a complete pack build.
///
/// Cleans the models folder, regenerates the item models from the
/// spreadsheet and zips the working tree into every configured archive. The
/// first error aborts the build; files written up to that point are kept.
///
/// # Errors
/// - If any stage of the build fails
#[tracing::instrument(level = "debug", skip_all)]
pub fn run(settings: &Settings) -> Result<BuildReport> {
    let models_path = settings.models_path();
    let archives = settings.output_paths()?;

    tracing::info!("Cleaning {}", models_path.display());
    let removed = clean_models(&models_path)?;

    tracing::info!("Reading {}", settings.spreadsheet.display());
    let table = Table::open(&settings.spreadsheet)?;
    let set = ModelSet::from_table(&table, &settings.asset_root)?;

    let models = emit_models(&models_path, &set)?;

    let options = ArchiveOptions {
        excluded_suffixes: settings.excluded_files.clone(),
        overwrite: settings.overwrite,
    };
    assemble(&settings.original_folder, &archives, &options)?;

    Ok(BuildReport {
        removed,
        models,
        archives,
    })
}
