use async_trait::async_trait;
use graphlint_core::{GraphAdapter, GraphEdge, GraphNode, NodeId, Result};
use std::collections::{HashMap, HashSet, VecDeque};

/// `GraphAdapter` over owned node and edge vectors. Used by tests and
/// benches, and by embedders that already hold the graph in memory.
pub struct MemoryGraphAdapter {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    outgoing: HashMap<NodeId, Vec<GraphEdge>>,
    incoming: HashMap<NodeId, Vec<GraphEdge>>,
}

impl MemoryGraphAdapter {
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        let mut outgoing: HashMap<NodeId, Vec<GraphEdge>> = HashMap::new();
        let mut incoming: HashMap<NodeId, Vec<GraphEdge>> = HashMap::new();
        for edge in &edges {
            outgoing
                .entry(edge.from.clone())
                .or_default()
                .push(edge.clone());
            incoming
                .entry(edge.to.clone())
                .or_default()
                .push(edge.clone());
        }
        Self {
            nodes,
            edges,
            outgoing,
            incoming,
        }
    }
}

#[async_trait]
impl GraphAdapter for MemoryGraphAdapter {
    async fn get_all_nodes(&self) -> Result<Vec<GraphNode>> {
        Ok(self.nodes.clone())
    }

    async fn get_all_edges(&self) -> Result<Vec<GraphEdge>> {
        Ok(self.edges.clone())
    }

    async fn get_edges_from(&self, node_id: &str) -> Result<Vec<GraphEdge>> {
        Ok(self.outgoing.get(node_id).cloned().unwrap_or_default())
    }

    async fn get_edges_to(&self, node_id: &str) -> Result<Vec<GraphEdge>> {
        Ok(self.incoming.get(node_id).cloned().unwrap_or_default())
    }

    async fn has_path(&self, from: &str, to: &str) -> Result<bool> {
        if from == to {
            return Ok(true);
        }
        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        visited.insert(from);
        queue.push_back(from);
        while let Some(current) = queue.pop_front() {
            for edge in self.outgoing.get(current).into_iter().flatten() {
                if edge.to == to {
                    return Ok(true);
                }
                if visited.insert(edge.to.as_str()) {
                    queue.push_back(edge.to.as_str());
                }
            }
        }
        Ok(false)
    }
}
