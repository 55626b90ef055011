//! Data Source Module
//!
//! Reads the cutoff dataset from disk on a cache miss.

use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::error::{AppError, Result};

// == Data Source ==
/// File-backed dataset. The file contents are served verbatim.
#[derive(Debug, Clone)]
pub struct DataSource {
    path: PathBuf,
}

impl DataSource {
    // == Constructor ==
    /// Creates a source reading from `path`. The file is not opened until `load`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the dataset file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    // == Load ==
    /// Reads the whole dataset file.
    pub async fn load(&self) -> Result<String> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                debug!(
                    "Loaded {} bytes from {}",
                    contents.len(),
                    self.path.display()
                );
                Ok(contents)
            }
            Err(e) => {
                error!("Failed to read {}: {}", self.path.display(), e);
                Err(AppError::DataSource(format!(
                    "could not read {}",
                    self.path.display()
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_load_reads_file_verbatim() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"college":"IIT Bombay","cutoff":66}}]"#).unwrap();

        let source = DataSource::new(file.path());
        let contents = source.load().await.unwrap();
        assert_eq!(contents, r#"[{"college":"IIT Bombay","cutoff":66}]"#);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = DataSource::new(dir.path().join("absent.json"));

        let result = source.load().await;
        assert!(matches!(result, Err(AppError::DataSource(_))));
    }
}
