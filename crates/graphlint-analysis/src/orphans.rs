use crate::{DetectorOutput, GraphSnapshot, PatternDetector};
use graphlint_core::{
    DetectedPattern, PatternDetails, PatternDetectionConfig, PatternType, Severity,
};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Flags nodes lacking inbound and/or outbound edges.
///
/// A fully isolated node is always reported. Partially isolated nodes
/// (source-only or sink-only) are reported only when
/// `detect_partially_isolated_nodes` is set.
pub struct OrphanDetector;

impl PatternDetector for OrphanDetector {
    fn name(&self) -> &'static str {
        "orphans"
    }

    fn pattern_type(&self) -> PatternType {
        PatternType::OrphanedNode
    }

    fn detect(
        &self,
        snapshot: &GraphSnapshot,
        config: &PatternDetectionConfig,
        cancel: &CancellationToken,
    ) -> DetectorOutput {
        let mut output = DetectorOutput::default();

        for node in snapshot.nodes() {
            if cancel.is_cancelled() {
                output.cancelled = true;
                break;
            }

            let no_incoming = snapshot.in_degree(&node.id) == 0;
            let no_outgoing = snapshot.out_degree(&node.id) == 0;

            let (severity, description) = if no_incoming && no_outgoing {
                (
                    Severity::Warning,
                    format!("Orphaned node '{}': no incoming or outgoing edges", node.id),
                )
            } else if config.detect_partially_isolated_nodes && no_incoming {
                (
                    Severity::Info,
                    format!("Node '{}' has no incoming edges (source only)", node.id),
                )
            } else if config.detect_partially_isolated_nodes && no_outgoing {
                (
                    Severity::Info,
                    format!("Node '{}' has no outgoing edges (sink only)", node.id),
                )
            } else {
                continue;
            };

            output.patterns.push(DetectedPattern::new(
                severity,
                description,
                vec![node.id.clone()],
                PatternDetails::OrphanedNode {
                    node: node.id.clone(),
                    no_incoming,
                    no_outgoing,
                },
            ));
        }

        debug!(orphans = output.patterns.len(), "orphan detection finished");
        output
    }
}
