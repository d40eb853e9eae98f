use chrono::Utc;
use loop_optimizer::optimizer::transformer::transform_locally;
use loop_optimizer::optimizer::{Analyzer, AnimationRecord, OptimizationOptions};
use proptest::prelude::*;
use serde_json::{json, Value};

/// Frames drawn from a tiny alphabet so duplicates are common.
fn frames_strategy() -> impl Strategy<Value = Vec<Value>> {
    proptest::collection::vec(0u8..3, 0..40)
        .prop_map(|tags| tags.into_iter().map(|t| json!({ "tag": t })).collect())
}

proptest! {
    #[test]
    fn repetitive_indices_are_bounded_and_increasing(frames in frames_strategy()) {
        let report = Analyzer::default().analyze_value(&json!({ "frames": frames.clone() })).unwrap();

        if frames.len() <= 1 {
            prop_assert!(report.repetitive_frames.is_empty());
        } else {
            prop_assert!(report.repetitive_frames.len() < frames.len());
        }
        prop_assert!(report.repetitive_frames.windows(2).all(|w| w[0] < w[1]));
        for &i in &report.repetitive_frames {
            prop_assert!(i >= 1);
            prop_assert_eq!(&frames[i], &frames[i - 1]);
        }
    }

    #[test]
    fn analysis_is_pure(frames in frames_strategy()) {
        let input = json!({ "frames": frames, "metadata": { "k": "v" } });
        let analyzer = Analyzer::default();
        prop_assert_eq!(analyzer.analyze_value(&input).unwrap(), analyzer.analyze_value(&input).unwrap());
    }

    #[test]
    fn disabled_compression_keeps_frames(frames in frames_strategy()) {
        let record = AnimationRecord::from_value(&json!({ "frames": frames })).unwrap();
        let report = Analyzer::default().analyze(&record).unwrap();
        let options = OptimizationOptions { enable_compression: false, ..OptimizationOptions::default() };
        let out = transform_locally(&record, &report, &options, Utc::now()).unwrap();
        prop_assert_eq!(out.frames, record.frames);
    }

    #[test]
    fn enabled_compression_leaves_no_adjacent_repeats(frames in frames_strategy()) {
        let record = AnimationRecord::from_value(&json!({ "frames": frames })).unwrap();
        let report = Analyzer::default().analyze(&record).unwrap();
        let out = transform_locally(&record, &report, &OptimizationOptions::default(), Utc::now()).unwrap();

        prop_assert_eq!(out.frames.len(), record.frames.len() - report.repetitive_frames.len());
        prop_assert!(out.frames.windows(2).all(|w| w[0] != w[1]));
    }
}
