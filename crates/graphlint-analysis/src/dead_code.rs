use crate::{DetectorOutput, GraphSnapshot, PatternDetector};
use graphlint_core::{
    DetectedPattern, NodeId, PatternDetails, PatternDetectionConfig, PatternType, Severity,
};
use std::collections::{HashSet, VecDeque};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Reports nodes unreachable from the root set as a single aggregate
/// pattern.
///
/// Roots come from the config when given (unknown ids are ignored), else
/// every in-degree-0 node is taken as an entry point. A graph with no
/// inferable roots (e.g. one big cycle) yields no pattern; the condition is
/// recorded in the result metadata instead.
pub struct DeadCodeDetector;

impl PatternDetector for DeadCodeDetector {
    fn name(&self) -> &'static str {
        "dead_code"
    }

    fn pattern_type(&self) -> PatternType {
        PatternType::DeadCode
    }

    fn detect(
        &self,
        snapshot: &GraphSnapshot,
        config: &PatternDetectionConfig,
        cancel: &CancellationToken,
    ) -> DetectorOutput {
        let mut output = DetectorOutput::default();

        let roots: Vec<NodeId> = match &config.dead_code_roots {
            Some(explicit) => explicit
                .iter()
                .filter(|id| {
                    let known = snapshot.contains(id);
                    if !known {
                        warn!(root = %id, "ignoring unknown dead-code root");
                    }
                    known
                })
                .cloned()
                .collect(),
            None => snapshot
                .nodes()
                .iter()
                .filter(|n| snapshot.in_degree(&n.id) == 0)
                .map(|n| n.id.clone())
                .collect(),
        };

        if roots.is_empty() {
            debug!("dead-code detection skipped: empty root set");
            output.metadata.insert(
                "dead_code_skipped".to_string(),
                serde_json::json!("root set is empty and could not be inferred"),
            );
            return output;
        }

        let mut visited: HashSet<NodeId> = HashSet::new();
        for root in &roots {
            if cancel.is_cancelled() {
                // A partial reachability sweep would misclassify reachable
                // nodes as dead, so report nothing on cancellation.
                output.cancelled = true;
                return output;
            }
            if visited.contains(root) {
                continue;
            }
            let mut queue: VecDeque<NodeId> = VecDeque::new();
            visited.insert(root.clone());
            queue.push_back(root.clone());
            while let Some(current) = queue.pop_front() {
                for edge in snapshot.edges_from(&current) {
                    if visited.insert(edge.to.clone()) {
                        queue.push_back(edge.to.clone());
                    }
                }
            }
        }

        let unreachable: Vec<NodeId> = snapshot
            .nodes()
            .iter()
            .filter(|n| !visited.contains(&n.id))
            .map(|n| n.id.clone())
            .collect();

        debug!(
            unreachable = unreachable.len(),
            roots = roots.len(),
            "dead-code detection finished"
        );

        if unreachable.is_empty() {
            return output;
        }

        let ratio = unreachable.len() as f64 / snapshot.node_count() as f64;
        let severity = if ratio < 0.10 {
            Severity::Info
        } else if ratio <= 0.40 {
            Severity::Warning
        } else {
            Severity::Error
        };

        let pattern = DetectedPattern::new(
            severity,
            format!(
                "Dead code: {} of {} nodes unreachable from {} root(s)",
                unreachable.len(),
                snapshot.node_count(),
                roots.len()
            ),
            unreachable.clone(),
            PatternDetails::DeadCode {
                unreachable: unreachable.clone(),
                roots,
            },
        )
        .with_metadata("unreachable_count", serde_json::json!(unreachable.len()))
        .with_metadata("total_nodes", serde_json::json!(snapshot.node_count()));
        output.patterns.push(pattern);
        output
    }
}
