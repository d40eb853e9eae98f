// LoopOptimizer Options
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use crate::error::OptimizerError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 10;
pub const DEFAULT_QUALITY: u8 = 8;

/// Effective options for one optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationOptions {
    /// 1..=10. Recorded in the output; does not change frame removal.
    pub quality: u8,
    /// Gates repetitive-frame removal.
    pub enable_compression: bool,
    /// Unrecognized keys are carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for OptimizationOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            enable_compression: true,
            extra: Map::new(),
        }
    }
}

/// Call-supplied options. Any key that is set wins over the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_compression: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OptionOverrides {
    /// Parse loosely-typed JSON options. `null` means no overrides.
    pub fn from_value(value: &Value) -> Result<Self, OptimizerError> {
        if value.is_null() {
            return Ok(Self::default());
        }
        Self::deserialize(value)
            .map_err(|e| OptimizerError::invalid_input(format!("invalid options: {}", e)))
    }
}

impl OptimizationOptions {
    /// Layer `overrides` on top of `self`.
    pub fn merge(&self, overrides: &OptionOverrides) -> Self {
        let mut merged = self.clone();
        if let Some(quality) = overrides.quality {
            merged.quality = quality;
        }
        if let Some(enable) = overrides.enable_compression {
            merged.enable_compression = enable;
        }
        for (key, value) in &overrides.extra {
            merged.extra.insert(key.clone(), value.clone());
        }
        merged
    }

    pub fn validate(&self) -> Result<(), OptimizerError> {
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&self.quality) {
            return Err(OptimizerError::invalid_input(format!(
                "quality must be between {} and {}, got {}",
                MIN_QUALITY, MAX_QUALITY, self.quality
            )));
        }
        Ok(())
    }

    pub fn to_value(&self) -> Result<Value, OptimizerError> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_call_supplied_keys_win() {
        let defaults = OptimizationOptions::default();
        let overrides: OptionOverrides =
            serde_json::from_value(json!({ "quality": 5, "targetFps": 24 })).unwrap();

        let merged = defaults.merge(&overrides);
        assert_eq!(merged.quality, 5);
        assert!(merged.enable_compression);
        assert_eq!(merged.extra.get("targetFps"), Some(&json!(24)));
    }

    #[test]
    fn test_mistyped_overrides_are_invalid_input() {
        for bad in [
            json!({ "quality": 300 }),
            json!({ "quality": "5" }),
            json!({ "enableCompression": "no" }),
            json!(7),
        ] {
            let err = OptionOverrides::from_value(&bad).unwrap_err();
            assert!(err.is_client_error(), "{:?}", bad);
            assert!(err.to_string().contains("invalid options"));
        }
        assert_eq!(
            OptionOverrides::from_value(&Value::Null).unwrap(),
            OptionOverrides::default()
        );
    }

    #[test]
    fn test_empty_overrides_keep_defaults() {
        let defaults = OptimizationOptions {
            quality: 3,
            enable_compression: false,
            extra: Map::new(),
        };
        assert_eq!(defaults.merge(&OptionOverrides::default()), defaults);
    }

    #[test]
    fn test_quality_range() {
        let mut options = OptimizationOptions::default();
        for q in [1, 5, 10] {
            options.quality = q;
            assert!(options.validate().is_ok());
        }
        for q in [0, 11, 255] {
            options.quality = q;
            assert!(options.validate().unwrap_err().is_client_error());
        }
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = OptimizationOptions::default().to_value().unwrap();
        assert_eq!(value, json!({ "quality": 8, "enableCompression": true }));
    }
}
