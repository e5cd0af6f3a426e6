use crate::GraphSnapshot;
use graphlint_core::{
    DetectedPattern, GraphNode, NodeId, PatternDetails, PatternType, RemediationAction,
    RemediationSuggestion,
};
use once_cell::sync::Lazy;
use std::collections::HashMap;

struct SuggestionTemplate {
    action: RemediationAction,
    priority: u32,
    summary: &'static str,
}

const CYCLE_TEMPLATES: &[SuggestionTemplate] = &[
    SuggestionTemplate {
        action: RemediationAction::Refactor,
        priority: 1,
        summary: "Break the cycle by inverting or removing one dependency",
    },
    SuggestionTemplate {
        action: RemediationAction::Investigate,
        priority: 2,
        summary: "Review whether the mutual dependency is intentional",
    },
];

const ORPHAN_TEMPLATES: &[SuggestionTemplate] = &[
    SuggestionTemplate {
        action: RemediationAction::Remove,
        priority: 1,
        summary: "Remove the isolated node if it is no longer needed",
    },
    SuggestionTemplate {
        action: RemediationAction::Document,
        priority: 2,
        summary: "Document the node as an intentional entry or exit point",
    },
    SuggestionTemplate {
        action: RemediationAction::Investigate,
        priority: 1,
        summary: "Check why the node is only partially connected",
    },
];

const HUB_TEMPLATES: &[SuggestionTemplate] = &[
    SuggestionTemplate {
        action: RemediationAction::Split,
        priority: 1,
        summary: "Split the hub into smaller, focused nodes",
    },
    SuggestionTemplate {
        action: RemediationAction::Document,
        priority: 2,
        summary: "Document the hub as a deliberate aggregation point",
    },
];

const DEAD_CODE_TEMPLATES: &[SuggestionTemplate] = &[SuggestionTemplate {
    action: RemediationAction::Remove,
    priority: 1,
    summary: "Remove unreachable nodes",
}];

static SUGGESTION_TABLE: Lazy<HashMap<PatternType, &'static [SuggestionTemplate]>> =
    Lazy::new(|| {
        HashMap::from([
            (PatternType::CircularDependency, CYCLE_TEMPLATES),
            (PatternType::OrphanedNode, ORPHAN_TEMPLATES),
            (PatternType::HubNode, HUB_TEMPLATES),
            (PatternType::DeadCode, DEAD_CODE_TEMPLATES),
        ])
    });

fn template(
    templates: &'static [SuggestionTemplate],
    action: RemediationAction,
) -> &'static SuggestionTemplate {
    // The table is static and covers every action referenced below.
    templates
        .iter()
        .find(|t| t.action == action)
        .unwrap_or(&templates[0])
}

fn instantiate(template: &SuggestionTemplate, description: String) -> RemediationSuggestion {
    RemediationSuggestion::new(template.action, description, template.priority)
}

/// Nodes that look like deliberate entry or exit points keep a `document`
/// suggestion alongside `remove`: the type tag is one of the conventional
/// entry-point tags, or the node carries a truthy `entrypoint` attribute.
fn looks_like_entry_point(node: Option<&GraphNode>) -> bool {
    match node {
        Some(node) => {
            matches!(node.node_type.as_str(), "entry" | "main" | "root" | "export")
                || node
                    .attributes
                    .get("entrypoint")
                    .and_then(|v| v.as_bool())
                    .unwrap_or(false)
        }
        None => false,
    }
}

/// Pure mapping from a detected pattern to ranked suggestions. Table-driven
/// and deterministic: identical patterns always yield identical suggestions.
pub fn suggest_remediations(
    snapshot: &GraphSnapshot,
    pattern: &DetectedPattern,
) -> Vec<RemediationSuggestion> {
    let templates = SUGGESTION_TABLE
        .get(&pattern.pattern_type())
        .copied()
        .unwrap_or(&[]);
    if templates.is_empty() {
        return Vec::new();
    }

    match &pattern.details {
        PatternDetails::CircularDependency {
            cycle,
            cycle_length,
        } => {
            let refactor = template(templates, RemediationAction::Refactor);
            let investigate = template(templates, RemediationAction::Investigate);
            vec![
                instantiate(
                    refactor,
                    format!("{}: {}", refactor.summary, cycle.join(" -> ")),
                )
                .with_steps(vec![
                    "Pick the least essential edge in the cycle".to_string(),
                    "Extract the shared behavior behind a new node".to_string(),
                    "Re-point the remaining dependency at the extraction".to_string(),
                ])
                .with_effort(1.5 * *cycle_length as f64),
                instantiate(investigate, investigate.summary.to_string()).with_effort(1.0),
            ]
        }
        PatternDetails::OrphanedNode {
            node,
            no_incoming,
            no_outgoing,
        } => {
            if *no_incoming && *no_outgoing {
                let remove = template(templates, RemediationAction::Remove);
                let mut suggestions = vec![instantiate(
                    remove,
                    format!("{}: '{}'", remove.summary, node),
                )
                .with_effort(0.5)];
                if looks_like_entry_point(snapshot.node(node)) {
                    let document = template(templates, RemediationAction::Document);
                    suggestions.push(
                        instantiate(document, format!("{}: '{}'", document.summary, node))
                            .with_effort(0.25),
                    );
                }
                suggestions
            } else {
                let investigate = template(templates, RemediationAction::Investigate);
                vec![
                    instantiate(investigate, format!("{}: '{}'", investigate.summary, node))
                        .with_effort(0.5),
                ]
            }
        }
        PatternDetails::HubNode { node, total, .. } => {
            let split = template(templates, RemediationAction::Split);
            let document = template(templates, RemediationAction::Document);
            vec![
                instantiate(split, format!("{}: '{}'", split.summary, node))
                    .with_steps(vec![
                        "Group the hub's edges by responsibility".to_string(),
                        "Move each group behind its own node".to_string(),
                    ])
                    .with_effort(0.5 * *total as f64),
                instantiate(document, format!("{}: '{}'", document.summary, node))
                    .with_effort(0.25),
            ]
        }
        PatternDetails::DeadCode { unreachable, .. } => {
            let remove = template(templates, RemediationAction::Remove);
            let ids: Vec<&str> = unreachable.iter().map(NodeId::as_str).collect();
            vec![
                instantiate(remove, format!("{}: {}", remove.summary, ids.join(", ")))
                    .with_effort(0.25 * unreachable.len() as f64),
            ]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphlint_core::{DetectedPattern, GraphEdge, PatternDetectionConfig, Severity};

    fn empty_snapshot() -> GraphSnapshot {
        GraphSnapshot::build(Vec::new(), Vec::new(), &PatternDetectionConfig::default())
    }

    fn pattern(details: PatternDetails, nodes: Vec<String>) -> DetectedPattern {
        DetectedPattern::new(Severity::Warning, "test", nodes, details)
    }

    #[test]
    fn every_pattern_type_has_a_mapping() {
        for pattern_type in PatternType::ALL {
            let templates = SUGGESTION_TABLE.get(&pattern_type).unwrap();
            assert!(!templates.is_empty());
        }
    }

    #[test]
    fn cycles_get_refactor_then_investigate() {
        let p = pattern(
            PatternDetails::CircularDependency {
                cycle: vec!["a".into(), "b".into(), "a".into()],
                cycle_length: 2,
            },
            vec!["a".into(), "b".into()],
        );
        let suggestions = suggest_remediations(&empty_snapshot(), &p);
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].action, RemediationAction::Refactor);
        assert_eq!(suggestions[0].priority, 1);
        assert!(!suggestions[0].steps.is_empty());
        assert_eq!(suggestions[1].action, RemediationAction::Investigate);
        assert_eq!(suggestions[1].priority, 2);
    }

    #[test]
    fn plain_orphan_gets_remove_only() {
        let p = pattern(
            PatternDetails::OrphanedNode {
                node: "a".into(),
                no_incoming: true,
                no_outgoing: true,
            },
            vec!["a".into()],
        );
        let suggestions = suggest_remediations(&empty_snapshot(), &p);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].action, RemediationAction::Remove);
    }

    #[test]
    fn entry_point_orphan_also_gets_document() {
        let snapshot = GraphSnapshot::build(
            vec![GraphNode::new("a", "entry")],
            Vec::<GraphEdge>::new(),
            &PatternDetectionConfig::default(),
        );
        let p = pattern(
            PatternDetails::OrphanedNode {
                node: "a".into(),
                no_incoming: true,
                no_outgoing: true,
            },
            vec!["a".into()],
        );
        let suggestions = suggest_remediations(&snapshot, &p);
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[1].action, RemediationAction::Document);
        assert_eq!(suggestions[1].priority, 2);
    }

    #[test]
    fn entrypoint_attribute_counts_as_entry_point() {
        let snapshot = GraphSnapshot::build(
            vec![GraphNode::new("a", "module")
                .with_attribute("entrypoint", serde_json::json!(true))],
            Vec::<GraphEdge>::new(),
            &PatternDetectionConfig::default(),
        );
        let p = pattern(
            PatternDetails::OrphanedNode {
                node: "a".into(),
                no_incoming: true,
                no_outgoing: true,
            },
            vec!["a".into()],
        );
        assert_eq!(suggest_remediations(&snapshot, &p).len(), 2);
    }

    #[test]
    fn partial_orphan_maps_to_investigate() {
        let p = pattern(
            PatternDetails::OrphanedNode {
                node: "a".into(),
                no_incoming: true,
                no_outgoing: false,
            },
            vec!["a".into()],
        );
        let suggestions = suggest_remediations(&empty_snapshot(), &p);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].action, RemediationAction::Investigate);
    }

    #[test]
    fn hubs_get_split_then_document() {
        let p = pattern(
            PatternDetails::HubNode {
                node: "hub".into(),
                incoming: 8,
                outgoing: 4,
                total: 12,
                threshold: 10,
            },
            vec!["hub".into()],
        );
        let suggestions = suggest_remediations(&empty_snapshot(), &p);
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].action, RemediationAction::Split);
        assert_eq!(suggestions[1].action, RemediationAction::Document);
    }

    #[test]
    fn dead_code_remove_names_every_node() {
        let p = pattern(
            PatternDetails::DeadCode {
                unreachable: vec!["x".into(), "y".into()],
                roots: vec!["a".into()],
            },
            vec!["x".into(), "y".into()],
        );
        let suggestions = suggest_remediations(&empty_snapshot(), &p);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].action, RemediationAction::Remove);
        assert!(suggestions[0].description.contains("x, y"));
    }

    #[test]
    fn suggestions_are_deterministic() {
        let p = pattern(
            PatternDetails::HubNode {
                node: "hub".into(),
                incoming: 8,
                outgoing: 4,
                total: 12,
                threshold: 10,
            },
            vec!["hub".into()],
        );
        let snapshot = empty_snapshot();
        assert_eq!(
            suggest_remediations(&snapshot, &p),
            suggest_remediations(&snapshot, &p)
        );
    }
}
