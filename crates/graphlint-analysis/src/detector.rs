use crate::GraphSnapshot;
use graphlint_core::{DetectedPattern, PatternDetectionConfig, PatternType};
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;

/// What one detector produced. `cancelled` marks a partial pattern list cut
/// short by the cancellation token; `metadata` carries detector notes that
/// belong on the final result (e.g. an uninferable dead-code root set).
#[derive(Debug, Default)]
pub struct DetectorOutput {
    pub patterns: Vec<DetectedPattern>,
    pub cancelled: bool,
    pub metadata: HashMap<String, serde_json::Value>,
}

impl DetectorOutput {
    pub fn with_patterns(patterns: Vec<DetectedPattern>) -> Self {
        Self {
            patterns,
            ..Default::default()
        }
    }
}

/// A pure, read-only pass over an immutable snapshot. Detectors never fail
/// once the snapshot exists; the only exit besides completion is the
/// cancellation token, checked at traversal-root granularity.
pub trait PatternDetector: Send + Sync {
    fn name(&self) -> &'static str;
    fn pattern_type(&self) -> PatternType;
    fn detect(
        &self,
        snapshot: &GraphSnapshot,
        config: &PatternDetectionConfig,
        cancel: &CancellationToken,
    ) -> DetectorOutput;
}
