// LoopOptimizer Analyzer
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Read-only inspection of an animation: repetitive frames and a size estimate.

use crate::error::OptimizerError;
use crate::optimizer::model::{
    AnalysisReport, AnimationRecord, Frame, OptimizationPotential, PotentialLevel,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Records larger than this many serialized bytes rate `high`.
pub const HIGH_POTENTIAL_BYTES: usize = 10_000;
/// Records larger than this many serialized bytes rate `medium`.
pub const MEDIUM_POTENTIAL_BYTES: usize = 1_000;
/// Share of the serialized size assumed recoverable.
pub const ESTIMATED_REDUCTION_RATIO: f64 = 0.3;
/// Repetitive-frame share above which performance potential rates `high`.
pub const HIGH_REPETITION_RATIO: f64 = 0.3;

/// Decides whether two adjacent frames count as the same frame.
pub trait FrameComparator: Send + Sync {
    fn is_repeat(&self, previous: &Frame, current: &Frame) -> bool;
}

/// Two frames are equal iff their canonical JSON serializations are byte-identical.
///
/// serde_json's default `Map` keeps keys sorted, so key order in the input does
/// not matter.
#[derive(Debug, Default, Clone, Copy)]
pub struct CanonicalJsonComparator;

impl CanonicalJsonComparator {
    fn canonical(frame: &Frame) -> Option<Vec<u8>> {
        serde_json::to_vec(frame).ok()
    }
}

impl FrameComparator for CanonicalJsonComparator {
    fn is_repeat(&self, previous: &Frame, current: &Frame) -> bool {
        match (Self::canonical(previous), Self::canonical(current)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

#[derive(Clone)]
pub struct Analyzer {
    comparator: Arc<dyn FrameComparator>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(Arc::new(CanonicalJsonComparator))
    }
}

impl Analyzer {
    pub fn new(comparator: Arc<dyn FrameComparator>) -> Self {
        Self { comparator }
    }

    /// Analyze raw JSON. Fails with `InvalidInput` unless `animation` is an object.
    pub fn analyze_value(&self, animation: &Value) -> Result<AnalysisReport, OptimizerError> {
        let record = AnimationRecord::from_value(animation)?;
        self.analyze(&record)
    }

    pub fn analyze(&self, animation: &AnimationRecord) -> Result<AnalysisReport, OptimizerError> {
        let repetitive_frames = self.find_repetitive_frames(&animation.frames);
        let serialized_size = animation.serialized_size()?;

        debug!(
            "[ANALYZER] {} frames, {} repetitive, {} bytes",
            animation.frame_count(),
            repetitive_frames.len(),
            serialized_size
        );

        let estimated_optimization_potential = OptimizationPotential {
            size_reduction_potential: size_potential(serialized_size),
            performance_improvement_potential: performance_potential(
                repetitive_frames.len(),
                animation.frame_count(),
            )
            .as_str()
            .to_string(),
            estimated_size_reduction: (serialized_size as f64 * ESTIMATED_REDUCTION_RATIO).floor()
                as u64,
        };

        Ok(AnalysisReport {
            frame_count: animation.frame_count(),
            duration: animation.duration_secs(),
            repetitive_frames,
            redundant_properties: Vec::new(),
            estimated_optimization_potential,
        })
    }

    /// Indices `i >= 1` whose frame repeats frame `i - 1`. A run of N identical
    /// frames yields N - 1 indices.
    pub fn find_repetitive_frames(&self, frames: &[Frame]) -> Vec<usize> {
        frames
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| self.comparator.is_repeat(&pair[0], &pair[1]))
            .map(|(i, _)| i + 1)
            .collect()
    }
}

fn size_potential(serialized_size: usize) -> PotentialLevel {
    if serialized_size > HIGH_POTENTIAL_BYTES {
        PotentialLevel::High
    } else if serialized_size > MEDIUM_POTENTIAL_BYTES {
        PotentialLevel::Medium
    } else {
        PotentialLevel::Low
    }
}

fn performance_potential(repetitive: usize, total: usize) -> PotentialLevel {
    if total == 0 || repetitive == 0 {
        PotentialLevel::Low
    } else if repetitive as f64 / total as f64 > HIGH_REPETITION_RATIO {
        PotentialLevel::High
    } else {
        PotentialLevel::Medium
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn frame(tag: &str) -> Value {
        json!({ "shape": tag, "x": 1 })
    }

    #[test]
    fn test_run_of_duplicates() {
        let animation = json!({ "frames": [frame("A"), frame("A"), frame("A"), frame("B")] });
        let report = Analyzer::default().analyze_value(&animation).unwrap();
        assert_eq!(report.frame_count, 4);
        assert_eq!(report.repetitive_frames, vec![1, 2]);
        assert!(report.redundant_properties.is_empty());
    }

    #[test]
    fn test_only_immediate_predecessor_counts() {
        let animation = json!({ "frames": [frame("A"), frame("B"), frame("A"), frame("B"), frame("B")] });
        let report = Analyzer::default().analyze_value(&animation).unwrap();
        assert_eq!(report.repetitive_frames, vec![4]);
    }

    #[test]
    fn test_key_order_does_not_matter() {
        let a: Value = serde_json::from_str(r#"{"x":1,"y":2}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"y":2,"x":1}"#).unwrap();
        assert!(CanonicalJsonComparator.is_repeat(&a, &b));
    }

    #[test]
    fn test_distinct_frames() {
        let animation = json!({ "frames": [frame("A"), frame("B"), frame("C")] });
        let report = Analyzer::default().analyze_value(&animation).unwrap();
        assert!(report.repetitive_frames.is_empty());
        assert_eq!(
            report.estimated_optimization_potential.performance_improvement_potential,
            "low"
        );
    }

    #[test]
    fn test_missing_frames_is_empty_report() {
        let report = Analyzer::default().analyze_value(&json!({})).unwrap();
        assert_eq!(report.frame_count, 0);
        assert_eq!(report.duration, 0.0);
        assert!(report.repetitive_frames.is_empty());
    }

    #[test]
    fn test_rejects_non_object() {
        let err = Analyzer::default().analyze_value(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, OptimizerError::InvalidInput(_)));
    }

    #[test]
    fn test_size_thresholds_are_exclusive() {
        assert_eq!(size_potential(1_000), PotentialLevel::Low);
        assert_eq!(size_potential(1_001), PotentialLevel::Medium);
        assert_eq!(size_potential(10_000), PotentialLevel::Medium);
        assert_eq!(size_potential(10_001), PotentialLevel::High);
    }

    #[test]
    fn test_estimated_reduction_is_floor_of_thirty_percent() {
        let animation = json!({ "frames": [frame("A"), frame("A")], "duration": 1.5 });
        let record = AnimationRecord::from_value(&animation).unwrap();
        let size = record.serialized_size().unwrap();
        let report = Analyzer::default().analyze(&record).unwrap();
        assert_eq!(
            report.estimated_optimization_potential.estimated_size_reduction,
            (size as f64 * 0.3).floor() as u64
        );
        assert_eq!(report.duration, 1.5);
    }

    #[test]
    fn test_large_record_rates_high() {
        let frames: Vec<Value> = (0..500).map(|i| json!({ "index": i, "pad": "xxxxxxxxxx" })).collect();
        let report = Analyzer::default().analyze_value(&json!({ "frames": frames })).unwrap();
        assert_eq!(
            report.estimated_optimization_potential.size_reduction_potential,
            PotentialLevel::High
        );
    }

    #[test]
    fn test_performance_potential_tiers() {
        assert_eq!(performance_potential(0, 10), PotentialLevel::Low);
        assert_eq!(performance_potential(2, 10), PotentialLevel::Medium);
        assert_eq!(performance_potential(4, 10), PotentialLevel::High);
    }

    struct AlwaysRepeat;

    impl FrameComparator for AlwaysRepeat {
        fn is_repeat(&self, _: &Frame, _: &Frame) -> bool {
            true
        }
    }

    #[test]
    fn test_custom_comparator() {
        let analyzer = Analyzer::new(Arc::new(AlwaysRepeat));
        let animation = json!({ "frames": [frame("A"), frame("B"), frame("C")] });
        let report = analyzer.analyze_value(&animation).unwrap();
        assert_eq!(report.repetitive_frames, vec![1, 2]);
    }
}
