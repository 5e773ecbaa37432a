use serde::{Deserialize, Serialize};

/// Unique identifier for a node: a fully qualified class name, a `Class:method`
/// signature, or an externally supplied artifact id.
pub type NodeId = String;

/// Node kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NodeKind {
    #[default]
    Normal,
    UseCase,
    TestCase,
}

impl NodeKind {
    /// Artifacts (use-cases and test-cases) are styled apart from code entities.
    pub fn is_artifact(self) -> bool {
        matches!(self, NodeKind::UseCase | NodeKind::TestCase)
    }
}

/// Graph node. Identity is the `id` alone; everything else is fixed by the
/// first insertion of that id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    pub kind: NodeKind,
    /// Link the viewer opens when the node is clicked (artifacts only).
    pub url: Option<String>,
    pub reached: bool,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            url: None,
            reached: false,
        }
    }

    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }
}

/// Display label for an id: the last `.`-separated segment.
///
/// `com.acme.Order` → `Order`, `com.acme.Order:total` → `Order:total`.
pub fn label_for(id: &str) -> &str {
    id.rsplit('.').next().unwrap_or(id)
}
