use crate::{GraphEdge, NodeId, PatternType, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemediationAction {
    Remove,
    Refactor,
    Document,
    Split,
    Merge,
    Investigate,
}

impl fmt::Display for RemediationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RemediationAction::Remove => "remove",
            RemediationAction::Refactor => "refactor",
            RemediationAction::Document => "document",
            RemediationAction::Split => "split",
            RemediationAction::Merge => "merge",
            RemediationAction::Investigate => "investigate",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemediationSuggestion {
    pub action: RemediationAction,
    pub description: String,
    #[serde(default)]
    pub steps: Vec<String>,
    /// 1 is the highest priority; ties are allowed.
    pub priority: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_effort_hours: Option<f64>,
}

impl RemediationSuggestion {
    pub fn new(action: RemediationAction, description: impl Into<String>, priority: u32) -> Self {
        Self {
            action,
            description: description.into(),
            steps: Vec::new(),
            priority,
            estimated_effort_hours: None,
        }
    }

    pub fn with_steps(mut self, steps: Vec<String>) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_effort(mut self, hours: f64) -> Self {
        self.estimated_effort_hours = Some(hours);
        self
    }
}

/// Variant-specific payload of a detected pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "pattern", rename_all = "snake_case")]
pub enum PatternDetails {
    /// `cycle` lists the cycle in traversal order with the first id repeated
    /// at the end; `cycle_length` counts distinct nodes (1 for a self-loop).
    CircularDependency {
        cycle: Vec<NodeId>,
        cycle_length: usize,
    },
    /// At least one of the two flags is true.
    OrphanedNode {
        node: NodeId,
        no_incoming: bool,
        no_outgoing: bool,
    },
    /// `total = incoming + outgoing`; `threshold` is the limit that was
    /// exceeded when this pattern was recorded.
    HubNode {
        node: NodeId,
        incoming: usize,
        outgoing: usize,
        total: usize,
        threshold: usize,
    },
    DeadCode {
        unreachable: Vec<NodeId>,
        roots: Vec<NodeId>,
    },
}

impl PatternDetails {
    pub fn pattern_type(&self) -> PatternType {
        match self {
            PatternDetails::CircularDependency { .. } => PatternType::CircularDependency,
            PatternDetails::OrphanedNode { .. } => PatternType::OrphanedNode,
            PatternDetails::HubNode { .. } => PatternType::HubNode,
            PatternDetails::DeadCode { .. } => PatternType::DeadCode,
        }
    }

    /// Stable identity key over the variant's identifying fields. Two runs
    /// over the same snapshot and config derive the same key.
    fn identity_key(&self) -> String {
        match self {
            PatternDetails::CircularDependency { cycle, .. } => cycle.join("->"),
            PatternDetails::OrphanedNode {
                node,
                no_incoming,
                no_outgoing,
            } => format!("{}:{}:{}", node, no_incoming, no_outgoing),
            PatternDetails::HubNode {
                node, threshold, ..
            } => format!("{}:{}", node, threshold),
            PatternDetails::DeadCode { unreachable, roots } => {
                format!("{}|{}", unreachable.join(","), roots.join(","))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedPattern {
    pub id: String,
    pub severity: Severity,
    pub description: String,
    pub nodes: Vec<NodeId>,
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
    #[serde(default)]
    pub suggestions: Vec<RemediationSuggestion>,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    pub detected_at: DateTime<Utc>,
    #[serde(flatten)]
    pub details: PatternDetails,
}

impl DetectedPattern {
    pub fn new(
        severity: Severity,
        description: impl Into<String>,
        nodes: Vec<NodeId>,
        details: PatternDetails,
    ) -> Self {
        Self {
            id: pattern_id(&details),
            severity,
            description: description.into(),
            nodes,
            edges: Vec::new(),
            suggestions: Vec::new(),
            metadata: HashMap::new(),
            detected_at: Utc::now(),
            details,
        }
    }

    pub fn pattern_type(&self) -> PatternType {
        self.details.pattern_type()
    }

    pub fn with_edges(mut self, edges: Vec<GraphEdge>) -> Self {
        self.edges = edges;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// Content-derived pattern id: identical findings carry identical ids across
/// runs, which keeps reports diffable.
pub fn pattern_id(details: &PatternDetails) -> String {
    let mut hasher = Sha256::new();
    hasher.update(details.pattern_type().to_string().as_bytes());
    hasher.update(b":");
    hasher.update(details.identity_key().as_bytes());
    let digest = hasher.finalize();
    let hex: String = digest.iter().take(8).map(|b| format!("{:02x}", b)).collect();
    format!("{}-{}", details.pattern_type(), hex)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_ids_are_stable_across_runs() {
        let details = PatternDetails::CircularDependency {
            cycle: vec!["a".into(), "b".into(), "a".into()],
            cycle_length: 2,
        };
        assert_eq!(pattern_id(&details), pattern_id(&details.clone()));
    }

    #[test]
    fn pattern_ids_differ_for_different_findings() {
        let hub = PatternDetails::HubNode {
            node: "a".into(),
            incoming: 5,
            outgoing: 6,
            total: 11,
            threshold: 10,
        };
        let orphan = PatternDetails::OrphanedNode {
            node: "a".into(),
            no_incoming: true,
            no_outgoing: true,
        };
        assert_ne!(pattern_id(&hub), pattern_id(&orphan));
    }

    #[test]
    fn serialized_pattern_carries_discriminant() {
        let pattern = DetectedPattern::new(
            Severity::Warning,
            "orphaned node 'a'",
            vec!["a".into()],
            PatternDetails::OrphanedNode {
                node: "a".into(),
                no_incoming: true,
                no_outgoing: true,
            },
        );
        let json = serde_json::to_value(&pattern).unwrap();
        assert_eq!(json["pattern"], "orphaned_node");
        assert_eq!(json["no_incoming"], true);

        let back: DetectedPattern = serde_json::from_value(json).unwrap();
        assert_eq!(back.details, pattern.details);
    }
}
