use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::constants::images::IMAGE_EXTENSION;
use crate::constants::loader::IMAGE_DIR_COLLISION_MSG;
use crate::errors::DatasetError;
use crate::types::ImageId;

/// Lookup table mapping each referenced image id to the episode image
/// directory holding its file.
///
/// Populated only as a side effect of dataset loading; there is no public
/// mutation API and the table is read-only for the life of the snapshot.
/// Ids are globally scoped: when two episodes reference the same id, the
/// last-loaded registration wins (and the move is logged).
#[derive(Debug, Default)]
pub struct ImageLocator {
    dirs: HashMap<ImageId, PathBuf>,
}

impl ImageLocator {
    /// Record that `id` lives under `dir`, overwriting any earlier mapping.
    pub(crate) fn register(&mut self, id: &str, dir: &Path) {
        if let Some(previous) = self.dirs.get(id)
            && previous != dir
        {
            warn!(
                image_id = %id,
                previous = %previous.display(),
                new = %dir.display(),
                IMAGE_DIR_COLLISION_MSG
            );
        }
        self.dirs.insert(id.to_string(), dir.to_path_buf());
    }

    /// Directory registered for `id`, if any. Pure table lookup.
    pub fn dir_for(&self, id: &str) -> Option<&Path> {
        self.dirs.get(id).map(PathBuf::as_path)
    }

    /// Number of registered image ids.
    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    /// True when no image id has been registered.
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Resolve `id` to a concrete file, probing `<id>.png` before the bare id.
    ///
    /// The id is validated against `[A-Za-z0-9_-]+` before any lookup so a
    /// traversal attempt never touches the table or the filesystem.
    pub fn resolve(&self, id: &str) -> Result<ResolvedImage, DatasetError> {
        if !is_valid_image_id(id) {
            return Err(DatasetError::InvalidImageId(id.to_string()));
        }
        let dir = self
            .dirs
            .get(id)
            .ok_or_else(|| DatasetError::UnknownImageId(id.to_string()))?;
        let with_extension = format!("{id}.{IMAGE_EXTENSION}");
        if dir.join(&with_extension).is_file() {
            return Ok(ResolvedImage {
                dir: dir.clone(),
                file_name: with_extension,
            });
        }
        if dir.join(id).is_file() {
            return Ok(ResolvedImage {
                dir: dir.clone(),
                file_name: id.to_string(),
            });
        }
        Err(DatasetError::ImageFileMissing(id.to_string(), dir.clone()))
    }
}

/// True when `id` is non-empty and built only from `[A-Za-z0-9_-]`.
pub fn is_valid_image_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
}

/// A resolved image location ready for serving or copying.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedImage {
    /// Directory containing the file.
    pub dir: PathBuf,
    /// File name chosen by extension probing.
    pub file_name: String,
}

impl ResolvedImage {
    /// Full path to the resolved file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}
