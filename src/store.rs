use std::collections::BTreeSet;

use crate::data::VqaItem;
use crate::errors::DatasetError;
use crate::images::ImageLocator;
use crate::types::EpisodeDir;

/// Immutable, ordered collection of normalized items.
///
/// Built once per load and never mutated afterwards, so any number of readers
/// can query it concurrently without locking. Reloading means building a new
/// store and publishing it by reference.
#[derive(Debug, Default)]
pub struct DatasetStore {
    items: Vec<VqaItem>,
}

impl DatasetStore {
    /// Wrap an already-normalized item sequence.
    pub fn new(items: Vec<VqaItem>) -> Self {
        Self { items }
    }

    /// All items in store order.
    pub fn all(&self) -> &[VqaItem] {
        &self.items
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the store holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at position `index` in store order.
    pub fn by_index(&self, index: usize) -> Result<&VqaItem, DatasetError> {
        self.items
            .get(index)
            .ok_or(DatasetError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })
    }

    /// First item whose `unique_id` equals `id`, in store order.
    ///
    /// Ids are expected unique but not enforced; with duplicates, later items
    /// are unreachable through this lookup.
    pub fn by_unique_id(&self, id: &str) -> Result<&VqaItem, DatasetError> {
        self.items
            .iter()
            .find(|item| item.unique_id == id)
            .ok_or_else(|| DatasetError::UnknownUniqueId(id.to_string()))
    }

    /// De-duplicated, lexicographically sorted non-empty episode directories.
    pub fn episodes(&self) -> Vec<EpisodeDir> {
        let unique: BTreeSet<&str> = self
            .items
            .iter()
            .map(|item| item.episode_dir.as_str())
            .filter(|episode| !episode.is_empty())
            .collect();
        unique.into_iter().map(str::to_string).collect()
    }
}

/// Everything one load pass produces: the item store plus the image index.
///
/// The snapshot is the unit a reload would swap atomically; queries hold a
/// reference to one snapshot for their whole lifetime.
#[derive(Debug, Default)]
pub struct DatasetSnapshot {
    /// Ordered item collection.
    pub store: DatasetStore,
    /// Image id to directory index populated alongside the store.
    pub images: ImageLocator,
}
