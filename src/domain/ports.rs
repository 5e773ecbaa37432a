use crate::domain::artifact::ArtifactRecord;
use crate::domain::classfile::DecodedClass;
use anyhow::Result;
use thiserror::Error;

/// A class that could not be decoded. Reported and skipped; never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to decode {origin}: {reason}")]
pub struct DecodeFailure {
    /// Where the class came from (file path or container entry name).
    pub origin: String,
    pub reason: String,
}

/// Per-class outcome of loading a class container.
pub type ClassLoad = std::result::Result<DecodedClass, DecodeFailure>;

/// Class container port (implemented by Infrastructure).
///
/// The outer error is a missing or unreadable container and is fatal to the run;
/// individual classes that fail to decode come back as `Err` items.
pub trait ClassSource {
    fn load(&self) -> Result<Vec<ClassLoad>>;
}

/// Artifact description port. A missing or unreadable description is fatal.
pub trait ArtifactSource {
    fn load(&self) -> Result<Vec<ArtifactRecord>>;
}

/// No artifacts at all.
pub struct NoArtifacts;

impl ArtifactSource for NoArtifacts {
    fn load(&self) -> Result<Vec<ArtifactRecord>> {
        Ok(Vec::new())
    }
}
