use crate::domain::artifact::{ArtifactKind, ArtifactRecord};
use crate::domain::ports::ArtifactSource;
use anyhow::{Context, Result, anyhow};
use roxmltree::{Document, Node};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Artifact descriptions in the XML layout:
///
/// ```xml
/// <artifacts>
///   <artifact id="UC1" type="UseCase" openUrlOnClick="true">
///     <name>Checkout</name>
///     <OnClickURL>https://tracker.example/UC1</OnClickURL>
///     <to><id>com.acme.Cart</id></to>
///   </artifact>
/// </artifacts>
/// ```
///
/// `OnClickURL` is only used when `openUrlOnClick="true"`. Every element child
/// of `<to>` is a linked id, whatever its tag.
pub struct XmlArtifactSource {
    pub path: PathBuf,
}

impl XmlArtifactSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ArtifactSource for XmlArtifactSource {
    fn load(&self) -> Result<Vec<ArtifactRecord>> {
        let content = std::fs::read_to_string(&self.path).with_context(|| {
            format!("Failed to read artifact file: {}", self.path.display())
        })?;
        let records = parse_artifacts(&content).with_context(|| {
            format!("Failed to parse artifact file: {}", self.path.display())
        })?;
        debug!(path = %self.path.display(), artifacts = records.len(), "loaded artifacts");
        Ok(records)
    }
}

pub fn parse_artifacts(xml: &str) -> Result<Vec<ArtifactRecord>> {
    let doc = Document::parse(xml)?;
    doc.descendants()
        .filter(|n| n.has_tag_name("artifact"))
        .map(parse_artifact)
        .collect()
}

fn parse_artifact(node: Node<'_, '_>) -> Result<ArtifactRecord> {
    let id = node
        .attribute("id")
        .ok_or_else(|| anyhow!("artifact without an id attribute"))?;
    let name = child(node, "name")
        .map(text_content)
        .ok_or_else(|| anyhow!("artifact {id} has no <name>"))?;
    let kind = match node.attribute("type") {
        Some("UseCase") => ArtifactKind::UseCase,
        Some("TestCase") => ArtifactKind::TestCase,
        _ => ArtifactKind::Other,
    };
    let on_click_url = match node.attribute("openUrlOnClick") {
        Some("true") => child(node, "OnClickURL").map(text_content),
        _ => None,
    };
    let linked_ids = child(node, "to")
        .map(|to| {
            to.children()
                .filter(|c| c.is_element())
                .map(text_content)
                .collect()
        })
        .unwrap_or_default();

    let mut record = ArtifactRecord::new(id, name, kind, linked_ids);
    record.on_click_url = on_click_url;
    Ok(record)
}

fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|c| c.has_tag_name(tag))
}

/// Concatenated text of all descendants, trimmed.
fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|d| d.is_text())
        .filter_map(|d| d.text())
        .collect::<String>()
        .trim()
        .to_string()
}
