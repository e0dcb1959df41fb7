//! Dataset loading and normalization.
//!
//! Ownership model:
//! - `json`/`csv` parse one source encoding each into shared `RawRecord`s.
//! - `load_dataset` selects the parser by extension, canonicalizes the raw
//!   records into `VqaItem`s, registers image locations, and optionally
//!   shuffles the final order.

use std::path::Path;

use rand::seq::SliceRandom;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::LoadOptions;
use crate::constants::images::IMAGES_SUBDIR;
use crate::constants::loader::{CSV_EXTENSION, JSON_EXTENSION, SKIP_NO_EPISODE_MSG};
use crate::constants::model::DEFAULT_TAG;
use crate::data::{Choice, ItemMetadata, Question, VqaItem};
use crate::errors::DatasetError;
use crate::images::ImageLocator;
use crate::store::{DatasetSnapshot, DatasetStore};

/// Tabular source parser (flattened choice column groups).
pub mod csv;
/// Hierarchical source parser (`vqa_items` document).
pub mod json;

/// Supported source encodings, selected by file-name extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceFormat {
    /// Hierarchical JSON document holding a `vqa_items` array.
    Json,
    /// Flat CSV rows, one item per row.
    Csv,
}

impl SourceFormat {
    /// Detect the format from a path's extension (case-insensitive), or
    /// `None` when the extension names no supported encoding.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        if extension.eq_ignore_ascii_case(JSON_EXTENSION) {
            Some(Self::Json)
        } else if extension.eq_ignore_ascii_case(CSV_EXTENSION) {
            Some(Self::Csv)
        } else {
            None
        }
    }
}

/// Pre-canonical record shape both parsers converge on.
///
/// Field-level absence is preserved here; `canonicalize` applies the defined
/// defaults exactly once.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawRecord {
    #[serde(default)]
    pub unique_id: Option<String>,
    #[serde(default)]
    pub trajectory_id: Option<String>,
    #[serde(default)]
    pub episode_dir: Option<String>,
    #[serde(default)]
    pub question: RawQuestion,
    #[serde(default)]
    pub choices: Vec<RawChoice>,
    #[serde(default)]
    pub metadata: RawMetadata,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawQuestion {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub image_ids: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawChoice {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub is_correct: bool,
    #[serde(default)]
    pub image_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawMetadata {
    #[serde(default)]
    pub tag: Option<String>,
}

/// Load and normalize a dataset source in one pass.
///
/// The entire source is parsed before anything is visible to callers; the
/// returned snapshot is immutable. Structural failures (unknown extension,
/// unreadable/unparsable file) abort the load, while records without an
/// `episode_dir` are dropped with a warning and do not.
pub fn load_dataset(
    source: &Path,
    base_dir: &Path,
    options: &LoadOptions,
) -> Result<DatasetSnapshot, DatasetError> {
    let format = SourceFormat::from_path(source).ok_or_else(|| DatasetError::UnsupportedFormat {
        path: source.to_path_buf(),
    })?;
    let raw_records = match format {
        SourceFormat::Json => json::read_records(source)?,
        SourceFormat::Csv => csv::read_records(source)?,
    };

    let mut images = ImageLocator::default();
    let mut items = Vec::with_capacity(raw_records.len());
    let mut skipped = 0usize;
    for raw in raw_records {
        let Some(item) = canonicalize(raw) else {
            skipped += 1;
            continue;
        };
        register_episode_images(&item, base_dir, &mut images);
        items.push(item);
    }

    if options.shuffle {
        items.shuffle(&mut rand::thread_rng());
    }
    debug!(
        source = %source.display(),
        format = ?format,
        items = items.len(),
        skipped,
        registered_images = images.len(),
        shuffled = options.shuffle,
        "dataset loaded"
    );

    Ok(DatasetSnapshot {
        store: DatasetStore::new(items),
        images,
    })
}

/// Apply canonical defaults to one raw record, or drop it.
///
/// Returns `None` (after a warning) for records without a usable
/// `episode_dir`; everything else normalizes: empty trajectory/tag/image ids
/// collapse to their defined defaults and textless choices are excluded.
fn canonicalize(raw: RawRecord) -> Option<VqaItem> {
    let episode_dir = match raw.episode_dir.filter(|dir| !dir.is_empty()) {
        Some(dir) => dir,
        None => {
            let unique_id = raw.unique_id.as_deref().filter(|id| !id.is_empty());
            warn!(
                unique_id = unique_id.unwrap_or("unknown"),
                SKIP_NO_EPISODE_MSG
            );
            return None;
        }
    };
    Some(VqaItem {
        unique_id: raw.unique_id.unwrap_or_default(),
        trajectory_id: raw.trajectory_id.filter(|trajectory| !trajectory.is_empty()),
        episode_dir,
        question: Question {
            text: raw.question.text,
            image_ids: raw.question.image_ids,
        },
        choices: raw.choices.into_iter().filter_map(canonical_choice).collect(),
        metadata: ItemMetadata {
            tag: raw
                .metadata
                .tag
                .filter(|tag| !tag.is_empty())
                .unwrap_or_else(|| DEFAULT_TAG.to_string()),
        },
    })
}

fn canonical_choice(raw: RawChoice) -> Option<Choice> {
    let text = raw.text.filter(|text| !text.is_empty())?;
    Some(Choice {
        text,
        is_correct: raw.is_correct,
        image_id: raw.image_id.filter(|id| !id.is_empty()),
    })
}

/// Register the item's referenced image ids under its episode image directory.
///
/// Registration only happens when `<base_dir>/<episode_dir>/images` exists at
/// load time; ids under an absent directory are never registered, so later
/// lookups for them report not-found.
fn register_episode_images(item: &VqaItem, base_dir: &Path, images: &mut ImageLocator) {
    let images_dir = base_dir.join(&item.episode_dir).join(IMAGES_SUBDIR);
    if !images_dir.is_dir() {
        return;
    }
    for id in item.referenced_image_ids() {
        images.register(id, &images_dir);
    }
}
