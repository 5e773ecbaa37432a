//! Artifact description adapters

mod json;
mod xml;

pub use json::JsonArtifactSource;
pub use xml::{XmlArtifactSource, parse_artifacts};

use crate::domain::ports::ArtifactSource;
use std::path::Path;

/// Artifact source for a description file, chosen by extension: `.xml` files
/// are read as XML, everything else as JSON.
pub fn artifact_source_for(path: &Path) -> Box<dyn ArtifactSource> {
    if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("xml")) {
        Box::new(XmlArtifactSource::new(path))
    } else {
        Box::new(JsonArtifactSource::new(path))
    }
}
