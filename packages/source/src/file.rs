//! Local JSON file source.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use eco_migration_occurrence_models::{DatasetOrigin, RawRecord};

use crate::{OccurrenceSource, SourceError};

/// Reads occurrence records from a JSON array on disk, in the same shape
/// the API returns.
pub struct FileOccurrenceSource {
    path: PathBuf,
}

impl FileOccurrenceSource {
    /// Creates a source reading `path` on every fetch.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this source reads.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl OccurrenceSource for FileOccurrenceSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn origin(&self) -> DatasetOrigin {
        DatasetOrigin::File
    }

    async fn fetch(&self) -> Result<Vec<RawRecord>, SourceError> {
        log::info!("Reading occurrences from {}", self.path.display());
        let text = tokio::fs::read_to_string(&self.path).await?;
        let records: Vec<RawRecord> = serde_json::from_str(&text)?;
        log::info!(
            "Read {} occurrence records from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "eco_migration_source_{}_{name}.json",
            std::process::id()
        ))
    }

    #[tokio::test]
    async fn reads_api_shaped_array() {
        let path = temp_path("ok");
        std::fs::write(
            &path,
            r#"[
                {"species": "Koala", "decimalLatitude": -33.87, "decimalLongitude": 151.21,
                 "eventDate": "2020-05-01", "individualCount": 2},
                {"species": "Platypus", "decimalLatitude": "-42.88", "decimalLongitude": "147.33",
                 "eventDate": "2021-09-12", "individualCount": null}
            ]"#,
        )
        .unwrap();

        let source = FileOccurrenceSource::new(&path);
        let records = source.fetch().await.unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].species.as_deref(), Some("Koala"));
        assert_eq!(records[1].decimal_latitude.as_deref(), Some("-42.88"));
        assert_eq!(records[1].individual_count, None);
        assert_eq!(source.origin(), DatasetOrigin::File);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let source = FileOccurrenceSource::new(temp_path("missing"));
        assert!(matches!(source.fetch().await, Err(SourceError::Io(_))));
    }

    #[tokio::test]
    async fn non_array_is_json_error() {
        let path = temp_path("object");
        std::fs::write(&path, r#"{"error": "not found"}"#).unwrap();

        let result = FileOccurrenceSource::new(&path).fetch().await;
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(SourceError::Json(_))));
    }
}
