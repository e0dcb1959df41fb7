//! Category grouping over a loaded store.

use indexmap::IndexMap;
use serde::Serialize;

use crate::data::VqaItem;
use crate::store::DatasetStore;
use crate::types::Tag;

/// Items grouped by their metadata tag, in first-encounter order.
///
/// This is a derived view over an immutable store; callers rebuild it when
/// they need it instead of keeping it in sync.
#[derive(Debug)]
pub struct CategoryIndex<'store> {
    groups: IndexMap<Tag, Vec<&'store VqaItem>>,
}

impl<'store> CategoryIndex<'store> {
    /// Group every stored item under its tag. Tags are already canonical
    /// (never empty) by the time items reach a store.
    pub fn from_store(store: &'store DatasetStore) -> Self {
        let mut groups: IndexMap<Tag, Vec<&'store VqaItem>> = IndexMap::new();
        for item in store.all() {
            groups
                .entry(item.metadata.tag.clone())
                .or_default()
                .push(item);
        }
        Self { groups }
    }

    /// Items carrying the given tag, in store order.
    pub fn items(&self, tag: &str) -> &[&'store VqaItem] {
        self.groups.get(tag).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of distinct tags.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no tag has been seen.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Owned, serializable summary of the grouping.
    pub fn listing(&self) -> CategoryListing {
        CategoryListing {
            categories: self.groups.keys().cloned().collect(),
            counts: self
                .groups
                .iter()
                .map(|(tag, items)| (tag.clone(), items.len()))
                .collect(),
        }
    }
}

/// Serializable `{categories, counts}` summary, key order matching
/// first-encounter order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryListing {
    /// Distinct tags in first-encounter order.
    pub categories: Vec<Tag>,
    /// Item count per tag, same order as `categories`.
    pub counts: IndexMap<Tag, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ItemMetadata;

    fn item(unique_id: &str, tag: &str) -> VqaItem {
        VqaItem {
            unique_id: unique_id.into(),
            trajectory_id: None,
            episode_dir: "ep_1".into(),
            question: crate::data::Question::default(),
            choices: Vec::new(),
            metadata: ItemMetadata { tag: tag.into() },
        }
    }

    #[test]
    fn groups_preserve_first_encounter_order() {
        let store = DatasetStore::new(vec![
            item("q0", "counting"),
            item("q1", "spatial"),
            item("q2", "counting"),
            item("q3", "other"),
        ]);
        let index = CategoryIndex::from_store(&store);

        let listing = index.listing();
        assert_eq!(listing.categories, vec!["counting", "spatial", "other"]);
        assert_eq!(listing.counts.get("counting"), Some(&2));
        assert_eq!(listing.counts.get("spatial"), Some(&1));
        assert_eq!(listing.counts.get("other"), Some(&1));
    }

    #[test]
    fn items_for_tag_keep_store_order() {
        let store = DatasetStore::new(vec![
            item("q0", "counting"),
            item("q1", "spatial"),
            item("q2", "counting"),
        ]);
        let index = CategoryIndex::from_store(&store);

        let counting: Vec<&str> = index
            .items("counting")
            .iter()
            .map(|item| item.unique_id.as_str())
            .collect();
        assert_eq!(counting, vec!["q0", "q2"]);
        assert!(index.items("absent").is_empty());
    }

    #[test]
    fn listing_serializes_counts_in_order() {
        let store = DatasetStore::new(vec![item("q0", "b_tag"), item("q1", "a_tag")]);
        let listing = CategoryIndex::from_store(&store).listing();
        let encoded = serde_json::to_string(&listing).unwrap();
        assert_eq!(
            encoded,
            r#"{"categories":["b_tag","a_tag"],"counts":{"b_tag":1,"a_tag":1}}"#
        );
    }
}
