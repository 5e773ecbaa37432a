use crate::app::dto::{GraphDocument, Granularity};
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::info;

/// On-disk format of a projected document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// The document as pretty-printed JSON.
    #[default]
    Json,
    /// A `data = {...};` script holding Cytoscape elements, loadable by the viewer pages.
    Viewer,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Viewer => "js",
        }
    }
}

/// `<dir>/data-class.json`, `<dir>/data-method.js`, ...
pub fn output_path(dir: &Path, granularity: Granularity, format: OutputFormat) -> PathBuf {
    dir.join(format!("data-{}.{}", granularity.as_str(), format.extension()))
}

pub fn render(document: &GraphDocument, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(document).context("Failed to serialize document")
        }
        OutputFormat::Viewer => {
            let elements = viewer_elements(document);
            let body = serde_json::to_string_pretty(&elements)
                .context("Failed to serialize viewer elements")?;
            Ok(format!("data = {body};\n"))
        }
    }
}

/// Write a document, replacing any previous file at `path`.
pub fn write_document(path: &Path, document: &GraphDocument, format: OutputFormat) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    let content = render(document, format)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write document: {}", path.display()))?;
    info!(path = %path.display(), nodes = document.nodes.len(), edges = document.edges.len(), "wrote document");
    Ok(())
}

/// Remove a document left by an earlier run so a failed graph leaves nothing
/// stale behind. Returns whether a file was removed.
pub fn remove_document(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    std::fs::remove_file(path)
        .with_context(|| format!("Failed to remove stale document: {}", path.display()))?;
    info!(path = %path.display(), "removed stale document");
    Ok(true)
}

fn viewer_elements(document: &GraphDocument) -> serde_json::Value {
    let nodes: Vec<_> = document
        .nodes
        .iter()
        .map(|node| {
            let mut data = json!({
                "id": node.id,
                "label": node.label,
                "kind": node.kind,
                "shape": node.shape,
                "color": node.fill_color,
                "colorHighlight": node.highlight_color,
            });
            if let Some(url) = &node.url {
                data["url"] = json!(url);
            }
            json!({ "data": data })
        })
        .collect();

    let edges: Vec<_> = document
        .edges
        .iter()
        .map(|edge| {
            json!({
                "data": {
                    "id": edge.id,
                    "source": edge.source_id,
                    "target": edge.target_id,
                }
            })
        })
        .collect();

    json!({ "nodes": nodes, "edges": edges })
}
