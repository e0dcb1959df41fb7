use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::ImageId;

/// Error type for dataset loading, lookup, and export failures.
///
/// Load-time structural failures (`UnsupportedFormat`, `SourceRead`) abort the
/// whole load. Lookup misses are recoverable and map to a 404-equivalent at
/// the transport layer; `InvalidImageId` maps to a 400-equivalent. Per-record
/// and per-image problems during loading/export are warnings, not errors.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("unsupported dataset format for '{path}': expected a .json or .csv source")]
    UnsupportedFormat { path: PathBuf },
    #[error("failed to read dataset source '{path}': {reason}")]
    SourceRead { path: PathBuf, reason: String },
    #[error("no item at index {index} (store holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("no item with unique id '{0}'")]
    UnknownUniqueId(String),
    #[error("image id '{0}' contains characters outside [A-Za-z0-9_-]")]
    InvalidImageId(ImageId),
    #[error("image id '{0}' is not registered to any episode image directory")]
    UnknownImageId(ImageId),
    #[error("no file for image id '{0}' in '{dir}'", dir = .1.display())]
    ImageFileMissing(ImageId, PathBuf),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl DatasetError {
    /// Build a `SourceRead` error from any displayable parse/IO failure.
    pub(crate) fn source_read(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        Self::SourceRead {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }
}
