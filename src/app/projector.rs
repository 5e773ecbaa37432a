use crate::app::dto::{GraphDocument, Shape, VisualEdge, VisualNode};
use crate::domain::graph::ReferenceGraph;
use crate::domain::node::{Node, NodeKind};
use std::collections::HashMap;

pub const ARTIFACT_FILL: &str = "#FF0000";
pub const ARTIFACT_HIGHLIGHT: &str = "#ED181B";
pub const NODE_FILL: &str = "#97C2FC";
pub const NODE_HIGHLIGHT: &str = "#61BFFC";

/// Visual style derived from a node kind: `(shape, fill, highlight)`.
pub fn style_for(kind: NodeKind) -> (Shape, &'static str, &'static str) {
    match kind {
        NodeKind::UseCase => (Shape::Rectangle, ARTIFACT_FILL, ARTIFACT_HIGHLIGHT),
        NodeKind::TestCase => (Shape::Triangle, ARTIFACT_FILL, ARTIFACT_HIGHLIGHT),
        NodeKind::Normal => (Shape::Ellipse, NODE_FILL, NODE_HIGHLIGHT),
    }
}

/// Graph Projector - turns a reference graph into a rendering document.
///
/// Nodes that are neither reached nor point anywhere are dropped, and so are
/// edges into dropped nodes. Surviving nodes get ids `n0, n1, ...` in id order,
/// so the same graph always projects to the same document. Edge ids join their
/// endpoint ids: `n3-n0`.
pub struct GraphProjector;

impl GraphProjector {
    pub fn project(graph: &ReferenceGraph) -> GraphDocument {
        let retained: Vec<&Node> = graph.nodes().filter(|n| is_retained(graph, n)).collect();
        let visual_ids: HashMap<&str, String> = retained
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id.as_str(), format!("n{i}")))
            .collect();

        let mut document = GraphDocument::default();
        for node in &retained {
            let source_id = &visual_ids[node.id.as_str()];
            let (shape, fill, highlight) = style_for(node.kind);
            document.nodes.push(VisualNode {
                id: source_id.clone(),
                label: node.label.clone(),
                kind: node.kind,
                shape,
                fill_color: fill.to_string(),
                highlight_color: highlight.to_string(),
                url: node.url.clone(),
            });

            for target in graph.outgoing(&node.id) {
                if let Some(target_id) = visual_ids.get(target) {
                    document.edges.push(VisualEdge {
                        id: format!("{source_id}-{target_id}"),
                        source_id: source_id.clone(),
                        target_id: target_id.clone(),
                    });
                }
            }
        }
        document
    }
}

fn is_retained(graph: &ReferenceGraph, node: &Node) -> bool {
    node.reached || !graph.outgoing(&node.id).is_empty()
}
