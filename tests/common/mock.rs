//! Mock ports for integration tests.
#![allow(dead_code)]

use anyhow::{Result, bail};
use calltrack::domain::artifact::ArtifactRecord;
use calltrack::domain::classfile::DecodedClass;
use calltrack::domain::ports::{ArtifactSource, ClassLoad, ClassSource, DecodeFailure};

/// Class source serving decoded classes (and failures) from memory.
#[derive(Default)]
pub struct MockClassSource {
    loads: Vec<ClassLoad>,
    missing: bool,
}

impl MockClassSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(mut self, class: DecodedClass) -> Self {
        self.loads.push(Ok(class));
        self
    }

    pub fn with_failure(mut self, origin: &str, reason: &str) -> Self {
        self.loads.push(Err(DecodeFailure {
            origin: origin.to_string(),
            reason: reason.to_string(),
        }));
        self
    }

    /// Behave like an unreadable container.
    pub fn missing() -> Self {
        Self {
            loads: Vec::new(),
            missing: true,
        }
    }
}

impl ClassSource for MockClassSource {
    fn load(&self) -> Result<Vec<ClassLoad>> {
        if self.missing {
            bail!("Input path does not exist: mock");
        }
        Ok(self.loads.clone())
    }
}

/// Artifact source serving a fixed record list.
#[derive(Default)]
pub struct MockArtifactSource {
    records: Vec<ArtifactRecord>,
    missing: bool,
}

impl MockArtifactSource {
    pub fn new(records: Vec<ArtifactRecord>) -> Self {
        Self {
            records,
            missing: false,
        }
    }

    pub fn missing() -> Self {
        Self {
            records: Vec::new(),
            missing: true,
        }
    }
}

impl ArtifactSource for MockArtifactSource {
    fn load(&self) -> Result<Vec<ArtifactRecord>> {
        if self.missing {
            bail!("Failed to read artifact file: mock.json");
        }
        Ok(self.records.clone())
    }
}
