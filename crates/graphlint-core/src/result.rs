use crate::{DetectedPattern, PatternDetectionConfig, PatternType, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DetectionSummary {
    pub circular_dependencies: usize,
    pub orphaned_nodes: usize,
    pub hub_nodes: usize,
    pub dead_code: usize,
    pub total: usize,
}

impl DetectionSummary {
    pub fn record(&mut self, pattern_type: PatternType) {
        match pattern_type {
            PatternType::CircularDependency => self.circular_dependencies += 1,
            PatternType::OrphanedNode => self.orphaned_nodes += 1,
            PatternType::HubNode => self.hub_nodes += 1,
            PatternType::DeadCode => self.dead_code += 1,
        }
        self.total += 1;
    }
}

/// Outcome of one detection pass. `patterns` is grouped by pattern type in
/// declaration order, then by detection order within a type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternDetectionResult {
    pub patterns: Vec<DetectedPattern>,
    pub summary: DetectionSummary,
    pub by_severity: BTreeMap<Severity, usize>,
    pub config: PatternDetectionConfig,
    pub analyzed_at: DateTime<Utc>,
    pub duration_ms: u64,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl PatternDetectionResult {
    /// True when the pass was interrupted and `patterns` is a prefix of what
    /// a full run would have produced.
    pub fn is_cancelled(&self) -> bool {
        self.metadata
            .get("cancelled")
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }

    pub fn patterns_of_type(&self, pattern_type: PatternType) -> Vec<&DetectedPattern> {
        self.patterns
            .iter()
            .filter(|p| p.pattern_type() == pattern_type)
            .collect()
    }
}
