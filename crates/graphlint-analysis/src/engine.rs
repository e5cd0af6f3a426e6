use crate::{
    suggest_remediations, CycleDetector, DeadCodeDetector, DetectorOutput, GraphSnapshot,
    HubDetector, OrphanDetector, PatternDetector,
};
use graphlint_core::{
    DetectionSummary, GraphAdapter, GraphLintError, PatternDetectionConfig,
    PatternDetectionResult, PatternType, Result, Severity,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Runs the enabled detectors against one snapshot and aggregates their
/// findings into a single result.
///
/// Detectors are pure and read-only over the shared snapshot, so they run on
/// parallel blocking tasks; the engine is the only owner of accumulation
/// state and merges the joined outputs in the fixed pattern-type order, so
/// the observable result is identical to a sequential run.
pub struct PatternDetectionEngine<A> {
    adapter: A,
    config: PatternDetectionConfig,
}

impl<A: GraphAdapter> PatternDetectionEngine<A> {
    /// Fails fast with a configuration error; no adapter call is made here.
    pub fn new(adapter: A, config: PatternDetectionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { adapter, config })
    }

    pub fn config(&self) -> &PatternDetectionConfig {
        &self.config
    }

    pub async fn detect_patterns(&self) -> Result<PatternDetectionResult> {
        self.detect_patterns_with_cancellation(CancellationToken::new())
            .await
    }

    /// Fails only if snapshot acquisition fails. A cancellation observed
    /// mid-pass yields a partial result with `metadata.cancelled = true`
    /// rather than an error.
    pub async fn detect_patterns_with_cancellation(
        &self,
        cancel: CancellationToken,
    ) -> Result<PatternDetectionResult> {
        let started = Instant::now();
        let snapshot = Arc::new(GraphSnapshot::acquire(&self.adapter, &self.config).await?);
        info!(
            nodes = snapshot.node_count(),
            edges = snapshot.edge_count(),
            "snapshot acquired"
        );

        let mut handles = Vec::new();
        for detector in self.detectors() {
            let snapshot = Arc::clone(&snapshot);
            let config = self.config.clone();
            let cancel = cancel.clone();
            handles.push(tokio::task::spawn_blocking(move || {
                debug!(detector = detector.name(), "running detector");
                detector.detect(&snapshot, &config, &cancel)
            }));
        }

        // join_all preserves dispatch order, which is the fixed type order.
        let mut outputs: Vec<DetectorOutput> = Vec::with_capacity(handles.len());
        for joined in futures::future::join_all(handles).await {
            outputs.push(joined.map_err(|e| {
                GraphLintError::Internal(format!("detector task failed: {}", e))
            })?);
        }

        let mut patterns = Vec::new();
        let mut metadata: HashMap<String, serde_json::Value> = HashMap::new();
        let mut cancelled = false;
        for output in outputs {
            cancelled |= output.cancelled;
            metadata.extend(output.metadata);
            patterns.extend(output.patterns);
        }

        patterns.retain(|p| p.severity >= self.config.min_severity);

        if self.config.compute_remediations {
            for pattern in &mut patterns {
                pattern.suggestions = suggest_remediations(&snapshot, pattern);
            }
        }

        let mut summary = DetectionSummary::default();
        let mut by_severity: BTreeMap<Severity, usize> = BTreeMap::new();
        for pattern in &patterns {
            summary.record(pattern.pattern_type());
            *by_severity.entry(pattern.severity).or_insert(0) += 1;
        }

        if cancelled {
            metadata.insert("cancelled".to_string(), serde_json::json!(true));
        }

        let duration_ms = started.elapsed().as_millis() as u64;
        info!(
            total = summary.total,
            duration_ms, cancelled, "pattern detection finished"
        );

        Ok(PatternDetectionResult {
            patterns,
            summary,
            by_severity,
            config: self.config.clone(),
            analyzed_at: chrono::Utc::now(),
            duration_ms,
            metadata,
        })
    }

    /// Enabled detectors in the fixed report order:
    /// circular -> orphaned -> hub -> dead code.
    fn detectors(&self) -> Vec<Box<dyn PatternDetector>> {
        let mut detectors: Vec<Box<dyn PatternDetector>> = Vec::new();
        if self.config.is_enabled(PatternType::CircularDependency) {
            detectors.push(Box::new(CycleDetector));
        }
        if self.config.is_enabled(PatternType::OrphanedNode) {
            detectors.push(Box::new(OrphanDetector));
        }
        if self.config.is_enabled(PatternType::HubNode) {
            detectors.push(Box::new(HubDetector));
        }
        if self.config.is_enabled(PatternType::DeadCode) {
            detectors.push(Box::new(DeadCodeDetector));
        }
        detectors
    }
}
