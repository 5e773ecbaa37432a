use crate::domain::node::NodeKind;
use serde::{Deserialize, Serialize};

/// Node shape in the rendered graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Rectangle,
    Triangle,
    Ellipse,
}

/// Rendering document for one graph: nodes in id order, then their edges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub nodes: Vec<VisualNode>,
    pub edges: Vec<VisualEdge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualNode {
    /// Stable within one run; see `GraphProjector`.
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    pub shape: Shape,
    pub fill_color: String,
    pub highlight_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualEdge {
    pub id: String,
    pub source_id: String,
    pub target_id: String,
}

impl GraphDocument {
    pub fn node(&self, id: &str) -> Option<&VisualNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Visual node for a label; labels are not unique, the first match wins.
    pub fn node_by_label(&self, label: &str) -> Option<&VisualNode> {
        self.nodes.iter().find(|n| n.label == label)
    }
}

/// Granularity of a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Class,
    Method,
}

impl Granularity {
    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Class => "class",
            Granularity::Method => "method",
        }
    }
}

/// Per-graph counts after a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSummary {
    pub tuples: usize,
    pub nodes: usize,
    pub edges: usize,
    pub reached: usize,
    pub artifacts: usize,
    pub visual_nodes: usize,
    pub visual_edges: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub classes_decoded: usize,
    pub classes_skipped: usize,
    pub class_graph: Option<GraphSummary>,
    pub method_graph: Option<GraphSummary>,
}
