use crate::{DetectorOutput, GraphSnapshot, PatternDetector};
use graphlint_core::{
    DetectedPattern, GraphEdge, NodeId, PatternDetails, PatternDetectionConfig, PatternType,
    Severity,
};
use std::collections::HashSet;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Enumerates distinct elementary cycles.
///
/// Runs a depth-first search from every unvisited node, keeping the current
/// path and an on-path membership set. An edge back into the path yields the
/// cycle slice from that node's position to the top; the back edge itself is
/// not traversed further, so a reported cycle is never re-derived through
/// its own back edge. The DFS uses an explicit frame stack, so recursion
/// depth is bounded by the heap, not the call stack.
///
/// Severity policy (fixed): distinct-node length <= 3 is a warning, 4 to 6
/// an error, above 6 critical.
pub struct CycleDetector;

impl PatternDetector for CycleDetector {
    fn name(&self) -> &'static str {
        "cycles"
    }

    fn pattern_type(&self) -> PatternType {
        PatternType::CircularDependency
    }

    fn detect(
        &self,
        snapshot: &GraphSnapshot,
        _config: &PatternDetectionConfig,
        cancel: &CancellationToken,
    ) -> DetectorOutput {
        let mut output = DetectorOutput::default();
        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut seen_cycles: HashSet<Vec<NodeId>> = HashSet::new();

        for root in snapshot.nodes() {
            if cancel.is_cancelled() {
                output.cancelled = true;
                break;
            }
            if visited.contains(&root.id) {
                continue;
            }

            let mut path: Vec<NodeId> = vec![root.id.clone()];
            let mut on_path: HashSet<NodeId> = [root.id.clone()].into();
            // (node, index of the next outgoing edge to try)
            let mut stack: Vec<(NodeId, usize)> = vec![(root.id.clone(), 0)];
            visited.insert(root.id.clone());

            loop {
                let (current, edge_idx) = match stack.last_mut() {
                    Some(frame) => {
                        let current = frame.0.clone();
                        let edge_idx = frame.1;
                        frame.1 += 1;
                        (current, edge_idx)
                    }
                    None => break,
                };

                let edges = snapshot.edges_from(&current);
                if edge_idx >= edges.len() {
                    stack.pop();
                    path.pop();
                    on_path.remove(&current);
                    continue;
                }

                let next = &edges[edge_idx].to;
                if on_path.contains(next) {
                    // Back edge: the path slice from `next` to the top is a cycle.
                    let start = path.iter().position(|n| n == next).unwrap();
                    let cycle_nodes = path[start..].to_vec();
                    if seen_cycles.insert(normalize_rotation(&cycle_nodes)) {
                        output.patterns.push(cycle_pattern(snapshot, cycle_nodes));
                    }
                } else if !visited.contains(next) {
                    visited.insert(next.clone());
                    on_path.insert(next.clone());
                    path.push(next.clone());
                    stack.push((next.clone(), 0));
                }
            }
        }

        debug!(cycles = output.patterns.len(), "cycle detection finished");
        output
    }
}

/// Rotates a cycle so it starts at its lexicographically smallest node id.
/// Two rotations of the same cycle normalize to the same sequence.
fn normalize_rotation(cycle: &[NodeId]) -> Vec<NodeId> {
    let start = cycle
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.cmp(b.1))
        .map(|(i, _)| i)
        .unwrap_or(0);
    cycle[start..]
        .iter()
        .chain(cycle[..start].iter())
        .cloned()
        .collect()
}

fn cycle_severity(cycle_length: usize) -> Severity {
    match cycle_length {
        0..=3 => Severity::Warning,
        4..=6 => Severity::Error,
        _ => Severity::Critical,
    }
}

fn cycle_pattern(snapshot: &GraphSnapshot, cycle_nodes: Vec<NodeId>) -> DetectedPattern {
    let cycle_length = cycle_nodes.len();
    let mut closed = cycle_nodes.clone();
    closed.push(cycle_nodes[0].clone());

    let edges: Vec<GraphEdge> = closed
        .windows(2)
        .filter_map(|pair| {
            snapshot
                .edges_from(&pair[0])
                .iter()
                .find(|e| e.to == pair[1])
                .cloned()
        })
        .collect();

    let description = format!("Circular dependency: {}", closed.join(" -> "));
    DetectedPattern::new(
        cycle_severity(cycle_length),
        description,
        cycle_nodes,
        PatternDetails::CircularDependency {
            cycle: closed,
            cycle_length,
        },
    )
    .with_edges(edges)
    .with_metadata("cycle_length", serde_json::json!(cycle_length))
}
