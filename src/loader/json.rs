//! Hierarchical JSON source parsing.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use super::RawRecord;
use crate::errors::DatasetError;

/// Top-level document shape. A missing `vqa_items` key reads as an empty
/// dataset rather than an error.
#[derive(Debug, Default, Deserialize)]
struct SourceDocument {
    #[serde(default)]
    vqa_items: Vec<RawRecord>,
}

/// Read every record from a JSON source document.
pub(crate) fn read_records(path: &Path) -> Result<Vec<RawRecord>, DatasetError> {
    let file = File::open(path).map_err(|err| DatasetError::source_read(path, err))?;
    let document: SourceDocument = serde_json::from_reader(BufReader::new(file))
        .map_err(|err| DatasetError::source_read(path, err))?;
    Ok(document.vqa_items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn reads_nested_records() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("vqa_data.json");
        std::fs::write(
            &path,
            r#"{"vqa_items": [
                {"unique_id": "ep_1_q_0",
                 "trajectory_id": "traj_9",
                 "episode_dir": "ep_1",
                 "question": {"text": "How many?", "image_ids": ["img_0", "img_1"]},
                 "choices": [
                     {"text": "two", "is_correct": false},
                     {"text": "three", "is_correct": true, "image_id": "img_2"}
                 ],
                 "metadata": {"tag": "counting"}}
            ]}"#,
        )
        .unwrap();

        let records = read_records(&path).unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.unique_id.as_deref(), Some("ep_1_q_0"));
        assert_eq!(record.trajectory_id.as_deref(), Some("traj_9"));
        assert_eq!(record.episode_dir.as_deref(), Some("ep_1"));
        assert_eq!(record.question.text, "How many?");
        assert_eq!(record.question.image_ids, vec!["img_0", "img_1"]);
        assert_eq!(record.choices.len(), 2);
        assert!(record.choices[1].is_correct);
        assert_eq!(record.choices[1].image_id.as_deref(), Some("img_2"));
        assert_eq!(record.metadata.tag.as_deref(), Some("counting"));
    }

    #[test]
    fn missing_items_key_reads_as_empty() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("vqa_data.json");
        std::fs::write(&path, "{}").unwrap();
        assert!(read_records(&path).unwrap().is_empty());
    }

    #[test]
    fn malformed_document_is_a_read_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("vqa_data.json");
        std::fs::write(&path, r#"{"vqa_items": ["#).unwrap();
        let err = read_records(&path).unwrap_err();
        assert!(matches!(err, DatasetError::SourceRead { .. }));
    }

    #[test]
    fn absent_fields_read_as_none() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("vqa_data.json");
        std::fs::write(&path, r#"{"vqa_items": [{}]}"#).unwrap();
        let records = read_records(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].unique_id, None);
        assert_eq!(records[0].episode_dir, None);
        assert!(records[0].choices.is_empty());
        assert_eq!(records[0].metadata.tag, None);
    }
}
