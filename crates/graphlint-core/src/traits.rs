use crate::{GraphEdge, GraphNode, Result};
use async_trait::async_trait;

/// Capability supplying the graph under analysis. Bulk fetch failures abort
/// the whole pass; the per-node and path queries exist for downstream
/// consumers and are not used by the detectors themselves.
#[async_trait]
pub trait GraphAdapter: Send + Sync {
    async fn get_all_nodes(&self) -> Result<Vec<GraphNode>>;
    async fn get_all_edges(&self) -> Result<Vec<GraphEdge>>;
    async fn get_edges_from(&self, node_id: &str) -> Result<Vec<GraphEdge>>;
    async fn get_edges_to(&self, node_id: &str) -> Result<Vec<GraphEdge>>;
    async fn has_path(&self, from: &str, to: &str) -> Result<bool>;
}
