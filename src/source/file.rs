use super::{parse_merged_options, FetchError, MergedOptionsSource};
use crate::infer::MergedOptions;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Reads a merged options JSON document from disk on every fetch
#[derive(Debug, Clone)]
pub struct FileMergedOptionsSource {
    path: PathBuf,
}

impl FileMergedOptionsSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl MergedOptionsSource for FileMergedOptionsSource {
    async fn fetch_merged_options(&self) -> Result<MergedOptions, FetchError> {
        let body = tokio::fs::read(&self.path).await.map_err(|e| FetchError::Io {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;
        parse_merged_options(&body)
    }

    fn name(&self) -> &str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("merged.json");
        std::fs::write(&path, r#"{"messages": {"title": "Hello"}}"#).unwrap();

        let options = FileMergedOptionsSource::new(&path).fetch_merged_options().await.unwrap();
        assert!(options.messages.entries().unwrap().contains_key("title"));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let source = FileMergedOptionsSource::new(dir.path().join("absent.json"));
        assert!(matches!(
            source.fetch_merged_options().await,
            Err(FetchError::Io { .. })
        ));
    }
}
