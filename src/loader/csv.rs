//! Tabular CSV source parsing.
//!
//! Each row carries one item with its choices flattened into
//! `choice_{n}_text` / `choice_{n}_is_correct` / `choice_{n}_image_id`
//! column groups. Columns are resolved by header name, so column order and
//! extra columns do not matter.

use std::collections::HashMap;
use std::path::Path;

use csv::StringRecord;

use super::{RawChoice, RawMetadata, RawQuestion, RawRecord};
use crate::constants::loader::{CHOICE_COLUMN_GROUPS, IMAGE_ID_DELIMITER, TRUE_LITERAL};
use crate::errors::DatasetError;

const UNIQUE_ID_COLUMN: &str = "unique_id";
const TRAJECTORY_ID_COLUMN: &str = "trajectory_id";
const EPISODE_DIR_COLUMN: &str = "episode_dir";
const QUESTION_TEXT_COLUMN: &str = "question_text";
const QUESTION_IMAGE_IDS_COLUMN: &str = "question_image_ids";
const TAG_COLUMN: &str = "metadata_tag";

/// Read every record from a CSV source file.
pub(crate) fn read_records(path: &Path) -> Result<Vec<RawRecord>, DatasetError> {
    let mut reader =
        csv::Reader::from_path(path).map_err(|err| DatasetError::source_read(path, err))?;
    let columns = ColumnMap::new(
        reader
            .headers()
            .map_err(|err| DatasetError::source_read(path, err))?,
    );
    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|err| DatasetError::source_read(path, err))?;
        records.push(row_to_record(&columns, &row));
    }
    Ok(records)
}

/// Header-name to column-index lookup for one source file.
struct ColumnMap(HashMap<String, usize>);

impl ColumnMap {
    fn new(headers: &StringRecord) -> Self {
        Self(
            headers
                .iter()
                .enumerate()
                .map(|(index, name)| (name.to_string(), index))
                .collect(),
        )
    }

    fn get<'row>(&self, row: &'row StringRecord, name: &str) -> Option<&'row str> {
        self.0.get(name).and_then(|&index| row.get(index))
    }
}

fn row_to_record(columns: &ColumnMap, row: &StringRecord) -> RawRecord {
    let image_ids = match columns.get(row, QUESTION_IMAGE_IDS_COLUMN) {
        Some(joined) if !joined.is_empty() => joined
            .split(IMAGE_ID_DELIMITER)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };

    let mut choices = Vec::with_capacity(CHOICE_COLUMN_GROUPS);
    for group in 1..=CHOICE_COLUMN_GROUPS {
        let Some(text) = columns.get(row, &format!("choice_{group}_text")) else {
            continue;
        };
        if text.is_empty() {
            continue;
        }
        choices.push(RawChoice {
            text: Some(text.to_string()),
            is_correct: columns
                .get(row, &format!("choice_{group}_is_correct"))
                .is_some_and(is_true_literal),
            image_id: columns
                .get(row, &format!("choice_{group}_image_id"))
                .map(str::to_string),
        });
    }

    RawRecord {
        unique_id: columns.get(row, UNIQUE_ID_COLUMN).map(str::to_string),
        trajectory_id: columns.get(row, TRAJECTORY_ID_COLUMN).map(str::to_string),
        episode_dir: columns.get(row, EPISODE_DIR_COLUMN).map(str::to_string),
        question: RawQuestion {
            text: columns
                .get(row, QUESTION_TEXT_COLUMN)
                .unwrap_or_default()
                .to_string(),
            image_ids,
        },
        choices,
        metadata: RawMetadata {
            tag: columns.get(row, TAG_COLUMN).map(str::to_string),
        },
    }
}

fn is_true_literal(value: &str) -> bool {
    value.eq_ignore_ascii_case(TRUE_LITERAL)
}
