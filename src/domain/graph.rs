use crate::domain::edge::UsedBy;
use crate::domain::error::GraphError;
use crate::domain::extractor::ReferenceTuple;
use crate::domain::node::{Node, NodeId, NodeKind, label_for};
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{BTreeMap, BTreeSet};

/// Reference Graph - directed used-by graph of named nodes.
///
/// Iteration is always in lexicographic id order, which fixes the emission order
/// of projected documents. Written during extraction and artifact merge, read
/// during projection; nothing is ever removed.
#[derive(Debug, Clone, Default)]
pub struct ReferenceGraph {
    /// Nodes and `UsedBy` edges
    pub graph: DiGraph<Node, UsedBy>,

    /// Mapping from node id to node index, sorted by id
    id_to_node: BTreeMap<NodeId, NodeIndex>,
}

impl ReferenceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from extracted tuples, see [`ReferenceGraph::add_reference`].
    pub fn from_references<'a>(
        tuples: impl IntoIterator<Item = &'a ReferenceTuple>,
    ) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        for tuple in tuples {
            graph.add_reference(tuple)?;
        }
        Ok(graph)
    }

    /// Insert a node unless its id is already present. The first label and kind
    /// for an id win. Returns whether the node was inserted.
    pub fn put_node(&mut self, id: &str, label: &str, kind: NodeKind) -> bool {
        self.insert_node(Node::new(id, label, kind))
    }

    /// [`ReferenceGraph::put_node`] for a fully built node.
    pub fn insert_node(&mut self, node: Node) -> bool {
        if self.id_to_node.contains_key(&node.id) {
            return false;
        }
        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.id_to_node.insert(id, idx);
        true
    }

    /// Insert the edge `from → to`.
    ///
    /// Both endpoints must already exist. `to` is marked reached, then so is every
    /// node reachable along the edges `to` already has; the walk stops at nodes that
    /// are already marked. Inserting an existing edge again changes nothing.
    pub fn put_edge(&mut self, from: &str, to: &str) -> Result<(), GraphError> {
        let from_idx = self.index_of(from)?;
        let to_idx = self.index_of(to)?;
        self.mark_reached(to_idx);
        self.graph.update_edge(from_idx, to_idx, UsedBy);
        Ok(())
    }

    /// Fold one extracted tuple in: both ids become `Normal` nodes labelled by
    /// their last dot segment, and the edge is stored referenced → referencer.
    pub fn add_reference(&mut self, tuple: &ReferenceTuple) -> Result<(), GraphError> {
        self.put_node(&tuple.target, label_for(&tuple.target), NodeKind::Normal);
        self.put_node(&tuple.source, label_for(&tuple.source), NodeKind::Normal);
        if tuple.source != tuple.target {
            self.put_edge(&tuple.target, &tuple.source)?;
        }
        Ok(())
    }

    fn mark_reached(&mut self, start: NodeIndex) {
        let mut stack = vec![start];
        while let Some(idx) = stack.pop() {
            if self.graph[idx].reached {
                continue;
            }
            self.graph[idx].reached = true;
            stack.extend(self.graph.neighbors_directed(idx, Direction::Outgoing));
        }
    }

    fn index_of(&self, id: &str) -> Result<NodeIndex, GraphError> {
        self.get_node_by_id(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))
    }

    pub fn get_node_by_id(&self, id: &str) -> Option<NodeIndex> {
        self.id_to_node.get(id).copied()
    }

    pub fn node(&self, idx: NodeIndex) -> &Node {
        &self.graph[idx]
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.get_node_by_id(id).map(|idx| self.node(idx))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.id_to_node.contains_key(id)
    }

    /// All nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.id_to_node.values().map(move |&idx| &self.graph[idx])
    }

    /// Ids this node points to, in id order. Empty for unknown ids.
    pub fn outgoing(&self, id: &str) -> BTreeSet<&str> {
        self.get_node_by_id(id)
            .map(|idx| {
                self.graph
                    .neighbors_directed(idx, Direction::Outgoing)
                    .map(|n| self.graph[n].id.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        match (self.get_node_by_id(from), self.get_node_by_id(to)) {
            (Some(a), Some(b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn reached_count(&self) -> usize {
        self.graph.node_weights().filter(|n| n.reached).count()
    }
}
