//! Domain error types.

use thiserror::Error;

/// Failures raised by the reference graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// An edge or artifact link names an id that was never inserted. Indicates
    /// the pipeline ran out of order (artifacts merged before extraction).
    #[error("The node {0} was not found.")]
    NodeNotFound(String),
}

impl GraphError {
    pub fn is_node_not_found(&self) -> bool {
        matches!(self, GraphError::NodeNotFound(_))
    }

    /// The id that could not be resolved.
    pub fn node_id(&self) -> &str {
        match self {
            GraphError::NodeNotFound(id) => id,
        }
    }
}
