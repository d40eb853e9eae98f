// LoopOptimizer Data Model
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use crate::error::OptimizerError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Frame rate assumed when a record carries no explicit duration.
pub const DEFAULT_FPS: f64 = 30.0;

/// One opaque unit of animation data.
pub type Frame = Value;

/// The subject of optimization.
///
/// Frame contents are never interpreted beyond equality. Top-level keys other than
/// `frames`, `duration` and `metadata` are kept in `extra` and written back out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationRecord {
    pub frames: Vec<Frame>,
    /// Seconds, kept in the caller's numeric form (`4` stays `4`).
    pub duration: Number,
    pub metadata: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnimationRecord {
    /// Normalise loosely-shaped JSON into a record.
    ///
    /// Fails only when `value` is not a JSON object. A missing or non-array `frames`
    /// becomes empty, a missing `duration` is derived at 30 fps, and a non-object
    /// `metadata` becomes an empty map.
    pub fn from_value(value: &Value) -> Result<Self, OptimizerError> {
        let object = value.as_object().ok_or_else(|| {
            OptimizerError::invalid_input("animation data must be a JSON object")
        })?;

        let frames = match object.get("frames") {
            Some(Value::Array(frames)) => frames.clone(),
            _ => Vec::new(),
        };
        let duration = match object.get("duration") {
            Some(Value::Number(duration)) => duration.clone(),
            _ => Number::from_f64(frames.len() as f64 / DEFAULT_FPS)
                .unwrap_or_else(|| Number::from(0)),
        };
        let metadata = match object.get("metadata") {
            Some(Value::Object(metadata)) => metadata.clone(),
            _ => Map::new(),
        };
        let extra = object
            .iter()
            .filter(|(key, _)| !matches!(key.as_str(), "frames" | "duration" | "metadata"))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(Self {
            frames,
            duration,
            metadata,
            extra,
        })
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration.as_f64().unwrap_or(0.0)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Byte length of the compact JSON serialization.
    pub fn serialized_size(&self) -> Result<usize, OptimizerError> {
        Ok(serde_json::to_vec(self)?.len())
    }
}

/// Coarse size bucket for the optimization estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PotentialLevel {
    Low,
    Medium,
    High,
}

impl PotentialLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PotentialLevel::Low => "low",
            PotentialLevel::Medium => "medium",
            PotentialLevel::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationPotential {
    pub size_reduction_potential: PotentialLevel,
    pub performance_improvement_potential: String,
    /// Estimated bytes saved.
    pub estimated_size_reduction: u64,
}

/// Read-only analysis of one animation, consumed by the local transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub frame_count: usize,
    pub duration: f64,
    /// Strictly increasing indices of frames equal to their predecessor.
    pub repetitive_frames: Vec<usize>,
    /// Reserved; always empty.
    pub redundant_properties: Vec<String>,
    pub estimated_optimization_potential: OptimizationPotential,
}

/// Final pipeline output: the transformed animation plus synthetic summary fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedResult {
    #[serde(flatten)]
    pub animation: AnimationRecord,
    pub optimized: bool,
    pub optimization_level: u8,
    /// Placeholder percentage such as `"23%"`, not measured.
    pub size_reduction: String,
    pub timestamp: String,
}
