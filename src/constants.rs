/// Constants used by the canonical item model.
pub mod model {
    /// Category applied when item metadata carries no usable tag.
    pub const DEFAULT_TAG: &str = "other";
    /// Bucket used in statistics for items missing an episode or trajectory value.
    pub const UNKNOWN_BUCKET: &str = "unknown";
    /// Number of answer positions covered by the A-D label mapping.
    pub const ANSWER_POSITIONS: usize = 4;
}

/// Constants used by the dataset loader and format parsers.
pub mod loader {
    /// Extension selecting the hierarchical (JSON) parser.
    pub const JSON_EXTENSION: &str = "json";
    /// Extension selecting the tabular (CSV) parser.
    pub const CSV_EXTENSION: &str = "csv";
    /// Delimiter joining question image ids in a tabular source.
    pub const IMAGE_ID_DELIMITER: char = ',';
    /// Literal (matched case-insensitively) that marks a tabular choice correct.
    pub const TRUE_LITERAL: &str = "true";
    /// Number of flattened `choice_{i}_*` column groups in a tabular source.
    pub const CHOICE_COLUMN_GROUPS: usize = 4;
    /// Log message used when a record without an episode directory is dropped.
    pub const SKIP_NO_EPISODE_MSG: &str = "skipping item without episode_dir";
    /// Log message used when an image id registration moves to a new directory.
    pub const IMAGE_DIR_COLLISION_MSG: &str = "image id re-registered under a different directory";
}

/// Constants used by image location and resolution.
pub mod images {
    /// Per-episode subdirectory expected to hold image files.
    pub const IMAGES_SUBDIR: &str = "images";
    /// Extension probed first when resolving an image id to a file.
    pub const IMAGE_EXTENSION: &str = "png";
}

/// Constants used by the query engine and its transport-facing defaults.
pub mod query {
    /// Page requested when a listing call does not specify one.
    pub const DEFAULT_PAGE: i64 = 0;
    /// Page size applied when a listing call does not specify one.
    pub const DEFAULT_LIMIT: i64 = 10;
}

/// Constants used by the static exporter's artifact layout.
pub mod export {
    /// Subdirectory receiving the JSON artifacts.
    pub const DATA_SUBDIR: &str = "data";
    /// Subdirectory receiving copied image files.
    pub const IMAGES_SUBDIR: &str = "images";
    /// Artifact holding the full item array.
    pub const ITEMS_FILE: &str = "vqa_data.json";
    /// Artifact holding the sorted episode listing.
    pub const EPISODES_FILE: &str = "episodes.json";
    /// Artifact holding category names and counts.
    pub const CATEGORIES_FILE: &str = "categories.json";
    /// Artifact holding dataset-wide statistics.
    pub const STATISTICS_FILE: &str = "statistics.json";
    /// Log message used when a referenced image cannot be copied.
    pub const IMAGE_MISSING_MSG: &str = "referenced image not copied";
}

/// Constants used by the HTTP transport layer.
pub mod server {
    /// Default bind host for `vqa-server`.
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    /// Default bind port for `vqa-server`.
    pub const DEFAULT_PORT: u16 = 5005;
    /// Content type served for `.png` image files.
    pub const PNG_CONTENT_TYPE: &str = "image/png";
    /// Content type served for extensionless image files.
    pub const BINARY_CONTENT_TYPE: &str = "application/octet-stream";
    /// Content type for JSON responses.
    pub const JSON_CONTENT_TYPE: &str = "application/json";
}
