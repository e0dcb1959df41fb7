use serde::{Deserialize, Serialize};

use crate::constants::model::{ANSWER_POSITIONS, DEFAULT_TAG};

pub use crate::types::{EpisodeDir, ImageId, Tag, TrajectoryId, UniqueId};

/// Canonical VQA item produced by the loader.
///
/// Every stored item is guaranteed a non-empty `episode_dir`; raw records
/// without one never reach the store. All other fields carry defined defaults
/// so both source encodings converge on this one shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VqaItem {
    /// Item identifier, expected (not enforced) to be unique in the dataset.
    #[serde(default)]
    pub unique_id: UniqueId,
    /// Trajectory this item belongs to; statistics bucket `None` as "unknown".
    #[serde(default)]
    pub trajectory_id: Option<TrajectoryId>,
    /// Source episode subdirectory, used to locate the item's images.
    pub episode_dir: EpisodeDir,
    /// Question text and referenced image ids.
    #[serde(default)]
    pub question: Question,
    /// Answer choices in presentation order (position 0 is answer A).
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Free-form metadata; currently only the category tag.
    #[serde(default)]
    pub metadata: ItemMetadata,
}

impl VqaItem {
    /// Iterate all non-empty image ids referenced by the question or a choice.
    pub fn referenced_image_ids(&self) -> impl Iterator<Item = &ImageId> {
        self.question
            .image_ids
            .iter()
            .filter(|id| !id.is_empty())
            .chain(self.choices.iter().filter_map(|choice| choice.image_id.as_ref()))
    }

    /// Position of the first choice marked correct, if any.
    ///
    /// When several choices are marked correct only the first counts; this is
    /// the documented first-match policy used by the answer distribution.
    pub fn first_correct_position(&self) -> Option<usize> {
        self.choices.iter().position(|choice| choice.is_correct)
    }
}

/// Question payload of an item.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Prompt text shown with the choices.
    #[serde(default)]
    pub text: String,
    /// Referenced image ids in display order; may be empty, and entries may be
    /// empty strings (ignored by registration, statistics, and export).
    #[serde(default)]
    pub image_ids: Vec<ImageId>,
}

/// One answer choice.
///
/// Canonical choices always have non-empty `text`; raw choices without it are
/// excluded from the item entirely during normalization.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// Choice text (non-empty by construction).
    pub text: String,
    /// Whether this choice is the marked answer.
    #[serde(default)]
    pub is_correct: bool,
    /// Optional image shown with the choice; `None` covers both absent ids and
    /// the empty-string spelling used by tabular sources.
    #[serde(default)]
    pub image_id: Option<ImageId>,
}

/// Item metadata carried through from the source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemMetadata {
    /// Category tag; absent or empty tags normalize to "other".
    #[serde(default = "default_tag")]
    pub tag: Tag,
}

impl Default for ItemMetadata {
    fn default() -> Self {
        Self {
            tag: default_tag(),
        }
    }
}

fn default_tag() -> Tag {
    DEFAULT_TAG.to_string()
}

/// Answer-position label used by the correct-answer distribution.
///
/// Maps choice positions 0..=3 to A..=D; positions beyond the label space are
/// outside the distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnswerLabel {
    /// Choice position 0.
    A,
    /// Choice position 1.
    B,
    /// Choice position 2.
    C,
    /// Choice position 3.
    D,
}

impl AnswerLabel {
    /// All labels in position order.
    pub const ALL: [AnswerLabel; ANSWER_POSITIONS] =
        [AnswerLabel::A, AnswerLabel::B, AnswerLabel::C, AnswerLabel::D];

    /// Label for a choice position, or `None` when the position is ≥ 4.
    pub fn from_position(position: usize) -> Option<Self> {
        Self::ALL.get(position).copied()
    }

    /// Serialized name of the label ("A".."D").
    pub fn as_str(self) -> &'static str {
        match self {
            AnswerLabel::A => "A",
            AnswerLabel::B => "B",
            AnswerLabel::C => "C",
            AnswerLabel::D => "D",
        }
    }
}
