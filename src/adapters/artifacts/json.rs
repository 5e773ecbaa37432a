use crate::domain::artifact::ArtifactRecord;
use crate::domain::ports::ArtifactSource;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Artifact descriptions stored as a JSON array of records:
///
/// ```json
/// [{ "id": "UC1", "name": "Checkout", "kind": "UseCase", "linkedIds": ["com.acme.Cart"] }]
/// ```
pub struct JsonArtifactSource {
    pub path: PathBuf,
}

impl JsonArtifactSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ArtifactSource for JsonArtifactSource {
    fn load(&self) -> Result<Vec<ArtifactRecord>> {
        let content = std::fs::read_to_string(&self.path).with_context(|| {
            format!("Failed to read artifact file: {}", self.path.display())
        })?;
        let records: Vec<ArtifactRecord> = serde_json::from_str(&content).with_context(|| {
            format!("Failed to parse artifact file: {}", self.path.display())
        })?;
        debug!(path = %self.path.display(), artifacts = records.len(), "loaded artifacts");
        Ok(records)
    }
}
