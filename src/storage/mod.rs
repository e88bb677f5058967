// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};
use crate::extractors::models::Extraction;
use crate::utils::error::StorageError;

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Saves the records and skipped entries as `<stem>_results.json`
    pub fn save_results(&self, stem: &str, extraction: &Extraction) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}_results.json", stem));

        let body = serde_json::json!({
            "results": extraction.records,
            "skipped": extraction.skipped,
        });
        let content = serde_json::to_string_pretty(&body)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, content)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved results to {}", file_path.display());

        Ok(file_path)
    }

    /// Saves run metadata in JSON format as `<stem>_meta.json`
    pub fn save_metadata(
        &self,
        stem: &str,
        extraction: &Extraction,
        toc_source: &Path,
        text_source: &Path,
    ) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(format!("{}_meta.json", stem));

        let metadata = serde_json::json!({
            "toc_source": toc_source.display().to_string(),
            "text_source": text_source.display().to_string(),
            "record_count": extraction.records.len(),
            "skipped_count": extraction.skipped.len(),
            "skipped_anchors": extraction.skipped.iter().map(|s| s.anchor.as_str()).collect::<Vec<_>>(),
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str)
            .map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());

        Ok(file_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::ReportExtractor;

    fn sample() -> Extraction {
        ReportExtractor::new()
            .extract(
                "• 1.1 Kept ...... 1\n• 1.2 Gone ...... 2\n",
                "1.1 Kept ** PASSED ** Info ok",
            )
            .unwrap()
    }

    #[test]
    fn test_creates_missing_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        StorageManager::new(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_save_results_and_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();
        let extraction = sample();

        let results_path = storage.save_results("report", &extraction).unwrap();
        assert_eq!(results_path, dir.path().join("report_results.json"));
        let results: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&results_path).unwrap()).unwrap();
        assert_eq!(results["results"][0]["number"], "1.1");
        assert_eq!(results["results"][0]["type"], "PASSED");
        assert_eq!(results["skipped"][0]["anchor"], "1.2 Gone");

        let meta_path = storage
            .save_metadata("report", &extraction, Path::new("toc.txt"), Path::new("body.txt"))
            .unwrap();
        let meta: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&meta_path).unwrap()).unwrap();
        assert_eq!(meta["record_count"], 1);
        assert_eq!(meta["skipped_count"], 1);
        assert_eq!(meta["skipped_anchors"], serde_json::json!(["1.2 Gone"]));
        assert_eq!(meta["toc_source"], "toc.txt");
        assert!(meta["extraction_timestamp"].is_string());
    }
}
