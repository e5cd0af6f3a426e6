use criterion::{criterion_group, criterion_main, Criterion};
use graphlint_analysis::{
    CycleDetector, DeadCodeDetector, GraphSnapshot, HubDetector, OrphanDetector, PatternDetector,
};
use graphlint_core::{GraphEdge, GraphNode, PatternDetectionConfig};
use std::hint::black_box;
use tokio_util::sync::CancellationToken;

/// Deterministic layered graph: every node points at two nodes of the next
/// layer, and each layer's last node points back to the layer's first node
/// of the previous layer, seeding cycles of varying length.
fn layered_graph(layers: usize, width: usize) -> (Vec<GraphNode>, Vec<GraphEdge>) {
    let mut nodes = Vec::with_capacity(layers * width);
    let mut edges = Vec::new();

    for layer in 0..layers {
        for slot in 0..width {
            nodes.push(GraphNode::new(format!("n{}_{}", layer, slot), "module"));
        }
    }
    for layer in 0..layers.saturating_sub(1) {
        for slot in 0..width {
            let from = format!("n{}_{}", layer, slot);
            edges.push(GraphEdge::new(
                from.clone(),
                format!("n{}_{}", layer + 1, slot),
                "depends_on",
            ));
            edges.push(GraphEdge::new(
                from,
                format!("n{}_{}", layer + 1, (slot + 1) % width),
                "depends_on",
            ));
        }
        if layer > 0 {
            edges.push(GraphEdge::new(
                format!("n{}_{}", layer, width - 1),
                format!("n{}_0", layer - 1),
                "depends_on",
            ));
        }
    }
    (nodes, edges)
}

fn bench_detectors(c: &mut Criterion) {
    let config = PatternDetectionConfig::default();
    let (nodes, edges) = layered_graph(50, 20);
    let snapshot = GraphSnapshot::build(nodes, edges, &config);
    let cancel = CancellationToken::new();

    c.bench_function("cycles_1k_nodes", |b| {
        b.iter(|| black_box(CycleDetector.detect(&snapshot, &config, &cancel)))
    });
    c.bench_function("orphans_1k_nodes", |b| {
        b.iter(|| black_box(OrphanDetector.detect(&snapshot, &config, &cancel)))
    });
    c.bench_function("hubs_1k_nodes", |b| {
        b.iter(|| black_box(HubDetector.detect(&snapshot, &config, &cancel)))
    });
    c.bench_function("dead_code_1k_nodes", |b| {
        b.iter(|| black_box(DeadCodeDetector.detect(&snapshot, &config, &cancel)))
    });
}

criterion_group!(benches, bench_detectors);
criterion_main!(benches);
