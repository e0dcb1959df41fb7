//! Static artifact export.
//!
//! Produces the same JSON artifacts the HTTP API serves, laid out for plain
//! file hosting: `data/` holds the four JSON files and `images/` holds a flat
//! copy of every referenced image that resolves.

use std::fs;
use std::io;
use std::path::Path;

use indexmap::IndexSet;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::constants::export::{
    CATEGORIES_FILE, DATA_SUBDIR, EPISODES_FILE, IMAGES_SUBDIR, IMAGE_MISSING_MSG, ITEMS_FILE,
    STATISTICS_FILE,
};
use crate::errors::DatasetError;
use crate::query::QueryEngine;

/// Counters describing one finished export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportSummary {
    /// Items written to `data/vqa_data.json`.
    pub items: usize,
    /// Distinct episodes written to `data/episodes.json`.
    pub episodes: usize,
    /// Distinct categories written to `data/categories.json`.
    pub categories: usize,
    /// Image files copied into `images/`.
    pub images_copied: usize,
    /// Referenced images that did not resolve to a copyable file.
    pub images_missing: usize,
}

/// Write the full static site data set under `output_dir`.
///
/// A referenced image that cannot be resolved or copied is a warning and a
/// counter bump, never a failure; structural problems (directory creation,
/// artifact writes) abort the export.
pub fn export_static_site(
    engine: &QueryEngine,
    output_dir: &Path,
) -> Result<ExportSummary, DatasetError> {
    let data_dir = output_dir.join(DATA_SUBDIR);
    let images_dir = output_dir.join(IMAGES_SUBDIR);
    fs::create_dir_all(&data_dir)?;
    fs::create_dir_all(&images_dir)?;

    let items = engine.store().all();
    let episodes = engine.episodes();
    let categories = engine.categories();

    write_json(&data_dir.join(ITEMS_FILE), &items)?;
    write_json(&data_dir.join(EPISODES_FILE), &json!({ "episodes": episodes }))?;
    write_json(&data_dir.join(CATEGORIES_FILE), &categories)?;
    write_json(&data_dir.join(STATISTICS_FILE), &engine.statistics())?;

    let mut referenced: IndexSet<&str> = IndexSet::new();
    for item in items {
        referenced.extend(item.referenced_image_ids().map(String::as_str));
    }

    let mut images_copied = 0;
    let mut images_missing = 0;
    for id in referenced {
        match copy_image(engine, &images_dir, id) {
            Ok(()) => images_copied += 1,
            Err(err) => {
                warn!(image_id = id, error = %err, IMAGE_MISSING_MSG);
                images_missing += 1;
            }
        }
    }

    let summary = ExportSummary {
        items: items.len(),
        episodes: episodes.len(),
        categories: categories.categories.len(),
        images_copied,
        images_missing,
    };
    debug!(
        output = %output_dir.display(),
        items = summary.items,
        images_copied = summary.images_copied,
        images_missing = summary.images_missing,
        "static export written"
    );
    Ok(summary)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), DatasetError> {
    let encoded = serde_json::to_vec(value).map_err(io::Error::other)?;
    fs::write(path, encoded)?;
    Ok(())
}

fn copy_image(engine: &QueryEngine, images_dir: &Path, id: &str) -> Result<(), DatasetError> {
    let resolved = engine.images().resolve(id)?;
    fs::copy(resolved.path(), images_dir.join(&resolved.file_name))?;
    Ok(())
}
