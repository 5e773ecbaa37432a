//! Externally declared artifact nodes (use-cases, test-cases) and their merge
//! into an extracted graph.

use crate::domain::error::GraphError;
use crate::domain::graph::ReferenceGraph;
use crate::domain::node::{Node, NodeKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Declared artifact type. Anything unrecognised is treated as a plain node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ArtifactKind {
    UseCase,
    TestCase,
    #[default]
    #[serde(other)]
    Other,
}

impl From<ArtifactKind> for NodeKind {
    fn from(kind: ArtifactKind) -> Self {
        match kind {
            ArtifactKind::UseCase => NodeKind::UseCase,
            ArtifactKind::TestCase => NodeKind::TestCase,
            ArtifactKind::Other => NodeKind::Normal,
        }
    }
}

/// One artifact description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kind: ArtifactKind,
    /// Ids of extracted nodes this artifact is associated with.
    #[serde(default)]
    pub linked_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_click_url: Option<String>,
}

impl ArtifactRecord {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: ArtifactKind,
        linked_ids: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            linked_ids,
            on_click_url: None,
        }
    }
}

/// Merges artifact records into an already extracted graph.
pub struct ArtifactAugmenter;

impl ArtifactAugmenter {
    /// Insert every artifact and link it from each of its linked nodes
    /// (`linked → artifact`). Must run after extraction: a link to an id that is
    /// not in the graph fails with [`GraphError::NodeNotFound`].
    pub fn merge(graph: &mut ReferenceGraph, artifacts: &[ArtifactRecord]) -> Result<(), GraphError> {
        for artifact in artifacts {
            let node = Node::new(&artifact.id, &artifact.name, artifact.kind.into())
                .with_url(artifact.on_click_url.clone());
            if graph.insert_node(node) {
                debug!(id = %artifact.id, kind = ?artifact.kind, "added artifact node");
            }

            for linked in artifact.linked_ids.iter().filter(|l| **l != artifact.id) {
                graph.put_edge(linked, &artifact.id)?;
            }
        }
        info!(artifacts = artifacts.len(), "merged artifacts");
        Ok(())
    }
}
