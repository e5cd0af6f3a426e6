use crate::{GraphLintError, NodeId, PatternType, Result, Severity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Policy knobs for one detection pass. All fields have defaults, so a config
/// deserialized from an empty document is valid and enables everything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternDetectionConfig {
    /// A node is a hub when its total degree strictly exceeds this.
    pub hub_node_threshold: usize,
    pub enabled_patterns: BTreeSet<PatternType>,
    pub min_severity: Severity,
    pub compute_remediations: bool,
    pub excluded_node_types: BTreeSet<String>,
    pub excluded_edge_types: BTreeSet<String>,
    /// When false, only fully isolated nodes are reported as orphans.
    pub detect_partially_isolated_nodes: bool,
    /// Explicit dead-code entry points. When absent, all in-degree-0 nodes
    /// are used as roots.
    pub dead_code_roots: Option<Vec<NodeId>>,
}

impl Default for PatternDetectionConfig {
    fn default() -> Self {
        Self {
            hub_node_threshold: 10,
            enabled_patterns: PatternType::ALL.into_iter().collect(),
            min_severity: Severity::Info,
            compute_remediations: true,
            excluded_node_types: BTreeSet::new(),
            excluded_edge_types: BTreeSet::new(),
            detect_partially_isolated_nodes: false,
            dead_code_roots: None,
        }
    }
}

impl PatternDetectionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.hub_node_threshold < 1 {
            return Err(GraphLintError::Configuration(
                "hub_node_threshold must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)
            .map_err(|e| GraphLintError::Configuration(format!("invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn is_enabled(&self, pattern_type: PatternType) -> bool {
        self.enabled_patterns.contains(&pattern_type)
    }
}
