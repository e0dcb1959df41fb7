#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Command-line runners behind the shipped binaries.
pub mod apps;
/// Category grouping over a loaded store.
pub mod categories;
/// Load-time configuration.
pub mod config;
/// Centralized constants used across loading, querying, export, and serving.
pub mod constants;
/// Canonical item model and answer labels.
pub mod data;
/// Static artifact export.
pub mod export;
/// Image id registration and resolution.
pub mod images;
/// Dataset loading and format parsers.
pub mod loader;
/// Read-side query engine.
pub mod query;
/// HTTP transport over the query engine.
pub mod server;
/// Dataset-wide statistics.
pub mod stats;
/// In-memory item store and snapshot.
pub mod store;
/// Shared type aliases.
pub mod types;

mod errors;

pub use categories::{CategoryIndex, CategoryListing};
pub use config::LoadOptions;
pub use data::{AnswerLabel, Choice, ItemMetadata, Question, VqaItem};
pub use errors::DatasetError;
pub use export::{ExportSummary, export_static_site};
pub use images::{ImageLocator, ResolvedImage, is_valid_image_id};
pub use loader::{SourceFormat, load_dataset};
pub use query::{ListPage, ListParams, QueryEngine};
pub use stats::{AnswerDistribution, Statistics};
pub use store::{DatasetSnapshot, DatasetStore};
pub use types::{EpisodeDir, ImageId, Tag, TrajectoryId, UniqueId};
