use crate::{DetectorOutput, GraphSnapshot, PatternDetector};
use graphlint_core::{
    DetectedPattern, PatternDetails, PatternDetectionConfig, PatternType, Severity,
};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Flags nodes whose total degree strictly exceeds the configured threshold.
/// Severity escalates once the degree passes twice the threshold. The
/// threshold in force is recorded on each pattern for auditing.
pub struct HubDetector;

impl PatternDetector for HubDetector {
    fn name(&self) -> &'static str {
        "hubs"
    }

    fn pattern_type(&self) -> PatternType {
        PatternType::HubNode
    }

    fn detect(
        &self,
        snapshot: &GraphSnapshot,
        config: &PatternDetectionConfig,
        cancel: &CancellationToken,
    ) -> DetectorOutput {
        let threshold = config.hub_node_threshold;
        let mut output = DetectorOutput::default();

        for node in snapshot.nodes() {
            if cancel.is_cancelled() {
                output.cancelled = true;
                break;
            }

            let incoming = snapshot.in_degree(&node.id);
            let outgoing = snapshot.out_degree(&node.id);
            let total = incoming + outgoing;
            if total <= threshold {
                continue;
            }

            let severity = if total <= 2 * threshold {
                Severity::Warning
            } else {
                Severity::Error
            };
            output.patterns.push(DetectedPattern::new(
                severity,
                format!(
                    "Hub node '{}': {} connections ({} in, {} out) exceed threshold {}",
                    node.id, total, incoming, outgoing, threshold
                ),
                vec![node.id.clone()],
                PatternDetails::HubNode {
                    node: node.id.clone(),
                    incoming,
                    outgoing,
                    total,
                    threshold,
                },
            ));
        }

        debug!(hubs = output.patterns.len(), "hub detection finished");
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphlint_core::{GraphEdge, GraphNode};

    /// A star graph: `spokes` nodes each pointing at "hub".
    fn star(spokes: usize, config: &PatternDetectionConfig) -> GraphSnapshot {
        let mut nodes = vec![GraphNode::new("hub", "module")];
        let mut edges = Vec::new();
        for i in 0..spokes {
            let id = format!("spoke{}", i);
            nodes.push(GraphNode::new(id.clone(), "module"));
            edges.push(GraphEdge::new(id, "hub", "depends_on"));
        }
        GraphSnapshot::build(nodes, edges, config)
    }

    #[test]
    fn degree_equal_to_threshold_is_not_a_hub() {
        let config = PatternDetectionConfig {
            hub_node_threshold: 3,
            ..Default::default()
        };
        let snapshot = star(3, &config);
        let output = HubDetector.detect(&snapshot, &config, &CancellationToken::new());
        assert!(output.patterns.is_empty());
    }

    #[test]
    fn degree_one_past_threshold_is_a_hub() {
        let config = PatternDetectionConfig {
            hub_node_threshold: 3,
            ..Default::default()
        };
        let snapshot = star(4, &config);
        let output = HubDetector.detect(&snapshot, &config, &CancellationToken::new());
        assert_eq!(output.patterns.len(), 1);

        let pattern = &output.patterns[0];
        assert_eq!(pattern.severity, Severity::Warning);
        assert_eq!(
            pattern.details,
            PatternDetails::HubNode {
                node: "hub".to_string(),
                incoming: 4,
                outgoing: 0,
                total: 4,
                threshold: 3,
            }
        );
    }

    #[test]
    fn degree_past_twice_threshold_escalates() {
        let config = PatternDetectionConfig {
            hub_node_threshold: 3,
            ..Default::default()
        };
        let snapshot = star(7, &config);
        let output = HubDetector.detect(&snapshot, &config, &CancellationToken::new());
        assert_eq!(output.patterns.len(), 1);
        assert_eq!(output.patterns[0].severity, Severity::Error);
    }
}
