//! Dataset-wide statistics.

use indexmap::IndexMap;
use serde::Serialize;

use crate::constants::model::UNKNOWN_BUCKET;
use crate::data::AnswerLabel;
use crate::store::DatasetStore;
use crate::types::{EpisodeDir, Tag, TrajectoryId};

/// Aggregated view of a loaded dataset.
///
/// Field names and nesting are fixed; the serialized form is the
/// `statistics.json` artifact and the `/api/statistics` payload.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Statistics {
    /// Number of stored items.
    pub total_items: usize,
    /// Item count per category tag, in first-encounter order.
    pub categories: IndexMap<Tag, usize>,
    /// Items whose question references at least one non-empty image id.
    pub items_with_question_images: usize,
    /// Items with at least one choice carrying a non-empty image id.
    pub items_with_choice_images: usize,
    /// Where the first correct choice sits, per answer label.
    pub correct_answer_distribution: AnswerDistribution,
    /// Item count per episode, in first-encounter order.
    pub episodes: IndexMap<EpisodeDir, usize>,
    /// Item count per trajectory; items without one count under "unknown".
    pub trajectories: IndexMap<TrajectoryId, usize>,
}

impl Statistics {
    /// Aggregate every stored item in one pass.
    pub fn compute(store: &DatasetStore) -> Self {
        let mut categories: IndexMap<Tag, usize> = IndexMap::new();
        let mut episodes: IndexMap<EpisodeDir, usize> = IndexMap::new();
        let mut trajectories: IndexMap<TrajectoryId, usize> = IndexMap::new();
        let mut distribution = AnswerDistribution::default();
        let mut items_with_question_images = 0;
        let mut items_with_choice_images = 0;

        for item in store.all() {
            *categories.entry(item.metadata.tag.clone()).or_insert(0) += 1;

            if item.question.image_ids.iter().any(|id| !id.is_empty()) {
                items_with_question_images += 1;
            }
            if item
                .choices
                .iter()
                .any(|choice| choice.image_id.as_deref().is_some_and(|id| !id.is_empty()))
            {
                items_with_choice_images += 1;
            }

            // Only the first correct choice counts; positions past D fall
            // outside the label space and are not counted at all.
            if let Some(position) = item.first_correct_position()
                && let Some(label) = AnswerLabel::from_position(position)
            {
                distribution.bump(label);
            }

            let episode = if item.episode_dir.is_empty() {
                UNKNOWN_BUCKET
            } else {
                item.episode_dir.as_str()
            };
            *episodes.entry(episode.to_string()).or_insert(0) += 1;

            let trajectory = item.trajectory_id.as_deref().unwrap_or(UNKNOWN_BUCKET);
            *trajectories.entry(trajectory.to_string()).or_insert(0) += 1;
        }

        Self {
            total_items: store.len(),
            categories,
            items_with_question_images,
            items_with_choice_images,
            correct_answer_distribution: distribution,
            episodes,
            trajectories,
        }
    }
}

/// Counts of items by the label of their first correct choice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct AnswerDistribution {
    /// Items whose first correct choice is at position 0.
    pub a: usize,
    /// Items whose first correct choice is at position 1.
    pub b: usize,
    /// Items whose first correct choice is at position 2.
    pub c: usize,
    /// Items whose first correct choice is at position 3.
    pub d: usize,
}

impl AnswerDistribution {
    /// Count for one label.
    pub fn count(self, label: AnswerLabel) -> usize {
        match label {
            AnswerLabel::A => self.a,
            AnswerLabel::B => self.b,
            AnswerLabel::C => self.c,
            AnswerLabel::D => self.d,
        }
    }

    /// Sum across all labels. Never exceeds the number of items the
    /// distribution was computed from.
    pub fn total(self) -> usize {
        self.a + self.b + self.c + self.d
    }

    fn bump(&mut self, label: AnswerLabel) {
        match label {
            AnswerLabel::A => self.a += 1,
            AnswerLabel::B => self.b += 1,
            AnswerLabel::C => self.c += 1,
            AnswerLabel::D => self.d += 1,
        }
    }
}
