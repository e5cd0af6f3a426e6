use graphlint_core::{GraphAdapter, GraphEdge, GraphNode, NodeId, PatternDetectionConfig, Result};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Immutable view of the graph for one detection pass.
///
/// Exclusion filters are applied once here, so every detector sees the same
/// graph. Excluding a node type removes the node and every edge touching it;
/// excluding an edge type removes edges only (nodes that become isolated as
/// a result are then reported by the orphan detector). Adjacency maps are
/// built in a single pass over the edges and preserve adapter order.
pub struct GraphSnapshot {
    nodes: Vec<GraphNode>,
    index: HashMap<NodeId, usize>,
    outgoing: HashMap<NodeId, Vec<GraphEdge>>,
    incoming: HashMap<NodeId, Vec<GraphEdge>>,
    edge_count: usize,
}

impl GraphSnapshot {
    /// Fetches the graph through the adapter's bulk operations. This is the
    /// only suspension point of a pass.
    pub async fn acquire(
        adapter: &dyn GraphAdapter,
        config: &PatternDetectionConfig,
    ) -> Result<Self> {
        let nodes = adapter.get_all_nodes().await?;
        let edges = adapter.get_all_edges().await?;
        Ok(Self::build(nodes, edges, config))
    }

    pub fn build(
        nodes: Vec<GraphNode>,
        edges: Vec<GraphEdge>,
        config: &PatternDetectionConfig,
    ) -> Self {
        let (nodes, excluded): (Vec<GraphNode>, Vec<GraphNode>) = nodes
            .into_iter()
            .partition(|n| !config.excluded_node_types.contains(&n.node_type));
        let excluded_ids: HashSet<NodeId> = excluded.into_iter().map(|n| n.id).collect();

        let index: HashMap<NodeId, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), i))
            .collect();

        let mut outgoing: HashMap<NodeId, Vec<GraphEdge>> = HashMap::new();
        let mut incoming: HashMap<NodeId, Vec<GraphEdge>> = HashMap::new();
        let mut edge_count = 0;

        for edge in edges {
            if config.excluded_edge_types.contains(&edge.edge_type) {
                continue;
            }
            if excluded_ids.contains(&edge.from) || excluded_ids.contains(&edge.to) {
                continue;
            }
            if !index.contains_key(&edge.from) || !index.contains_key(&edge.to) {
                warn!(
                    from = %edge.from,
                    to = %edge.to,
                    edge_type = %edge.edge_type,
                    "dropping edge referencing unknown node"
                );
                continue;
            }
            outgoing
                .entry(edge.from.clone())
                .or_default()
                .push(edge.clone());
            incoming.entry(edge.to.clone()).or_default().push(edge);
            edge_count += 1;
        }

        debug!(
            nodes = nodes.len(),
            edges = edge_count,
            "graph snapshot built"
        );

        Self {
            nodes,
            index,
            outgoing,
            incoming,
            edge_count,
        }
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn edges_from(&self, id: &str) -> &[GraphEdge] {
        self.outgoing.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn edges_to(&self, id: &str) -> &[GraphEdge] {
        self.incoming.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn out_degree(&self, id: &str) -> usize {
        self.edges_from(id).len()
    }

    pub fn in_degree(&self, id: &str) -> usize {
        self.edges_to(id).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, node_type: &str) -> GraphNode {
        GraphNode::new(id, node_type)
    }

    fn edge(from: &str, to: &str) -> GraphEdge {
        GraphEdge::new(from, to, "depends_on")
    }

    #[test]
    fn adjacency_preserves_order_and_degrees() {
        let snapshot = GraphSnapshot::build(
            vec![node("a", "module"), node("b", "module"), node("c", "module")],
            vec![edge("a", "b"), edge("a", "c"), edge("b", "c")],
            &PatternDetectionConfig::default(),
        );
        assert_eq!(snapshot.node_count(), 3);
        assert_eq!(snapshot.edge_count(), 3);
        assert_eq!(snapshot.out_degree("a"), 2);
        assert_eq!(snapshot.in_degree("c"), 2);
        assert_eq!(snapshot.edges_from("a")[0].to, "b");
        assert_eq!(snapshot.edges_from("a")[1].to, "c");
    }

    #[test]
    fn excluding_a_node_type_removes_its_edges() {
        let config = PatternDetectionConfig {
            excluded_node_types: ["test_fixture".to_string()].into(),
            ..Default::default()
        };
        let snapshot = GraphSnapshot::build(
            vec![node("a", "module"), node("t", "test_fixture")],
            vec![edge("a", "t"), edge("t", "a")],
            &config,
        );
        assert!(!snapshot.contains("t"));
        assert_eq!(snapshot.edge_count(), 0);
        assert_eq!(snapshot.out_degree("a"), 0);
        assert_eq!(snapshot.in_degree("a"), 0);
    }

    #[test]
    fn excluding_an_edge_type_keeps_the_nodes() {
        let config = PatternDetectionConfig {
            excluded_edge_types: ["mentions".to_string()].into(),
            ..Default::default()
        };
        let snapshot = GraphSnapshot::build(
            vec![node("a", "module"), node("b", "module")],
            vec![
                GraphEdge::new("a", "b", "mentions"),
                GraphEdge::new("a", "b", "depends_on"),
            ],
            &config,
        );
        assert!(snapshot.contains("a"));
        assert!(snapshot.contains("b"));
        assert_eq!(snapshot.edge_count(), 1);
        assert_eq!(snapshot.edges_from("a")[0].edge_type, "depends_on");
    }

    #[test]
    fn edges_to_unknown_nodes_are_dropped() {
        let snapshot = GraphSnapshot::build(
            vec![node("a", "module")],
            vec![edge("a", "ghost"), edge("ghost", "a")],
            &PatternDetectionConfig::default(),
        );
        assert_eq!(snapshot.edge_count(), 0);
        assert_eq!(snapshot.out_degree("a"), 0);
    }

    #[test]
    fn parallel_edges_with_distinct_types_both_count() {
        let snapshot = GraphSnapshot::build(
            vec![node("a", "module"), node("b", "module")],
            vec![
                GraphEdge::new("a", "b", "calls"),
                GraphEdge::new("a", "b", "imports"),
            ],
            &PatternDetectionConfig::default(),
        );
        assert_eq!(snapshot.out_degree("a"), 2);
        assert_eq!(snapshot.in_degree("b"), 2);
    }
}
