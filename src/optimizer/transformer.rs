// LoopOptimizer Local Transform
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use crate::error::OptimizerError;
use crate::optimizer::model::{AnalysisReport, AnimationRecord};
use crate::optimizer::options::OptimizationOptions;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use std::collections::HashSet;

/// Build an independent copy of `animation` with repetitive frames removed (when
/// compression is enabled) and optimization metadata merged in.
///
/// Existing metadata keys survive unless they are `optimized`, `optimizationDate`
/// or `optimizationOptions`.
pub fn transform_locally(
    animation: &AnimationRecord,
    report: &AnalysisReport,
    options: &OptimizationOptions,
    now: DateTime<Utc>,
) -> Result<AnimationRecord, OptimizerError> {
    let mut optimized = animation.clone();

    if options.enable_compression && !report.repetitive_frames.is_empty() {
        let drop: HashSet<usize> = report.repetitive_frames.iter().copied().collect();
        optimized.frames = animation
            .frames
            .iter()
            .enumerate()
            .filter(|(i, _)| !drop.contains(i))
            .map(|(_, frame)| frame.clone())
            .collect();
    }

    optimized
        .metadata
        .insert("optimized".to_string(), Value::Bool(true));
    optimized.metadata.insert(
        "optimizationDate".to_string(),
        Value::String(iso_timestamp(now)),
    );
    optimized
        .metadata
        .insert("optimizationOptions".to_string(), options.to_value()?);

    Ok(optimized)
}

/// RFC 3339 / ISO-8601 in UTC with millisecond precision.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimizer::analyzer::Analyzer;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn run(input: Value, enable_compression: bool) -> (AnimationRecord, AnimationRecord) {
        let record = AnimationRecord::from_value(&input).unwrap();
        let report = Analyzer::default().analyze(&record).unwrap();
        let options = OptimizationOptions {
            enable_compression,
            ..OptimizationOptions::default()
        };
        let out = transform_locally(&record, &report, &options, fixed_now()).unwrap();
        (record, out)
    }

    #[test]
    fn test_removes_repeats_when_enabled() {
        let (_, out) = run(json!({ "frames": ["A", "A", "A", "B"] }), true);
        assert_eq!(out.frames, vec![json!("A"), json!("B")]);
    }

    #[test]
    fn test_keeps_frames_when_disabled() {
        let (original, out) = run(json!({ "frames": ["A", "A", "A", "B"] }), false);
        assert_eq!(out.frames, original.frames);
    }

    #[test]
    fn test_distinct_frames_unchanged_either_way() {
        for enabled in [true, false] {
            let (original, out) = run(json!({ "frames": ["A", "B", "C"] }), enabled);
            assert_eq!(out.frames, original.frames);
        }
    }

    #[test]
    fn test_metadata_is_merged_not_replaced() {
        let (original, out) = run(
            json!({
                "frames": [],
                "metadata": { "author": "kim", "optimized": false }
            }),
            true,
        );
        assert_eq!(out.metadata["author"], "kim");
        assert_eq!(out.metadata["optimized"], true);
        assert_eq!(out.metadata["optimizationDate"], "2026-03-01T12:00:00.000Z");
        assert_eq!(
            out.metadata["optimizationOptions"],
            json!({ "quality": 8, "enableCompression": true })
        );
        // Caller's copy is untouched.
        assert_eq!(original.metadata["optimized"], false);
        assert!(!original.metadata.contains_key("optimizationDate"));
    }

    #[test]
    fn test_duration_is_preserved() {
        let (original, out) = run(json!({ "frames": ["A", "A"], "duration": 7.5 }), true);
        assert_eq!(out.duration, original.duration);
        assert_eq!(out.frames.len(), 1);
    }
}
