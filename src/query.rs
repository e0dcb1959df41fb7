//! Read-side query engine over a loaded snapshot.

use serde::Serialize;

use crate::categories::{CategoryIndex, CategoryListing};
use crate::constants::query::{DEFAULT_LIMIT, DEFAULT_PAGE};
use crate::data::VqaItem;
use crate::errors::DatasetError;
use crate::images::{ImageLocator, ResolvedImage};
use crate::stats::Statistics;
use crate::store::{DatasetSnapshot, DatasetStore};
use crate::types::{EpisodeDir, Tag};

/// Filtered, paginated listing request.
///
/// ```
/// use vqa_gallery::ListParams;
///
/// let params = ListParams::default()
///     .with_page(2)
///     .with_category("counting");
/// assert_eq!(params.limit, 10);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ListParams {
    /// Zero-based page index. Negative values yield an empty page.
    pub page: i64,
    /// Page size. Zero or negative values yield an empty page.
    pub limit: i64,
    /// Keep only items with exactly this category tag.
    pub category: Option<Tag>,
    /// Keep only items from exactly this episode.
    pub episode: Option<EpisodeDir>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            category: None,
            episode: None,
        }
    }
}

impl ListParams {
    /// Set the zero-based page index.
    pub fn with_page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    /// Set the page size.
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    /// Filter by category tag.
    pub fn with_category(mut self, category: impl Into<Tag>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Filter by episode directory name.
    pub fn with_episode(mut self, episode: impl Into<EpisodeDir>) -> Self {
        self.episode = Some(episode.into());
        self
    }
}

/// One page of listing results.
///
/// `total` counts the filtered set before paging; `page` and `limit` echo the
/// request verbatim, including out-of-range values that produced no data.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ListPage {
    /// Size of the filtered set, independent of paging.
    pub total: usize,
    /// Requested page, echoed back.
    pub page: i64,
    /// Requested page size, echoed back.
    pub limit: i64,
    /// Items of this page, in store order.
    pub data: Vec<VqaItem>,
}

/// Read-only queries over one immutable dataset snapshot.
///
/// The engine never mutates its snapshot, so it can be shared freely across
/// threads behind an `Arc`.
#[derive(Debug)]
pub struct QueryEngine {
    snapshot: DatasetSnapshot,
}

impl QueryEngine {
    /// Wrap a loaded snapshot.
    pub fn new(snapshot: DatasetSnapshot) -> Self {
        Self { snapshot }
    }

    /// The underlying item store.
    pub fn store(&self) -> &DatasetStore {
        &self.snapshot.store
    }

    /// The underlying image locator.
    pub fn images(&self) -> &ImageLocator {
        &self.snapshot.images
    }

    /// Filter and slice the store into one result page.
    ///
    /// Filters compose with AND: episode first, then category, each an exact
    /// match. The window is `[min(page*limit, total), min(start+limit,
    /// total))` over the filtered set; out-of-range paging degrades to an
    /// empty page with the correct `total` rather than an error.
    pub fn list(&self, params: &ListParams) -> ListPage {
        let filtered: Vec<&VqaItem> = self
            .snapshot
            .store
            .all()
            .iter()
            .filter(|item| {
                params
                    .episode
                    .as_deref()
                    .is_none_or(|episode| item.episode_dir == episode)
            })
            .filter(|item| {
                params
                    .category
                    .as_deref()
                    .is_none_or(|category| item.metadata.tag == category)
            })
            .collect();
        let total = filtered.len();

        let data = if params.page < 0 || params.limit <= 0 {
            Vec::new()
        } else {
            let limit = usize::try_from(params.limit).unwrap_or(usize::MAX);
            let start = usize::try_from(params.page.saturating_mul(params.limit))
                .unwrap_or(usize::MAX)
                .min(total);
            let end = start.saturating_add(limit).min(total);
            filtered[start..end].iter().map(|&item| item.clone()).collect()
        };

        ListPage {
            total,
            page: params.page,
            limit: params.limit,
            data,
        }
    }

    /// Item at a load-order position.
    pub fn by_index(&self, index: usize) -> Result<&VqaItem, DatasetError> {
        self.snapshot.store.by_index(index)
    }

    /// First item with the given unique id.
    pub fn by_unique_id(&self, unique_id: &str) -> Result<&VqaItem, DatasetError> {
        self.snapshot.store.by_unique_id(unique_id)
    }

    /// Resolve an image id to its on-disk location.
    pub fn resolve_image(&self, id: &str) -> Result<ResolvedImage, DatasetError> {
        self.snapshot.images.resolve(id)
    }

    /// Sorted distinct episode directories.
    pub fn episodes(&self) -> Vec<EpisodeDir> {
        self.snapshot.store.episodes()
    }

    /// Category names and per-category counts.
    pub fn categories(&self) -> CategoryListing {
        CategoryIndex::from_store(&self.snapshot.store).listing()
    }

    /// Dataset-wide statistics.
    pub fn statistics(&self) -> Statistics {
        Statistics::compute(&self.snapshot.store)
    }
}
