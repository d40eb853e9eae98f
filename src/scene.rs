// SceneValidator Structure Checks
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Structural validation of scene descriptions. Continuity analysis through Gemini
// is not wired up; with a key present the content pass reports nothing.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::{info, warn};

const REQUIRED_FIELDS: &[&str] = &["id", "location", "time", "characters", "actions"];
const LIST_FIELDS: &[&str] = &["characters", "actions"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneIssue {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub severity: Severity,
    pub message: String,
}

impl SceneIssue {
    fn new(kind: &str, field: Option<&str>, severity: Severity, message: String) -> Self {
        Self {
            kind: kind.to_string(),
            field: field.map(str::to_string),
            severity,
            message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneValidation {
    pub valid: bool,
    pub basic_issues: Vec<SceneIssue>,
    pub content_issues: Vec<SceneIssue>,
    pub scene_id: String,
}

impl SceneValidation {
    fn failed(issue: SceneIssue) -> Self {
        Self {
            valid: false,
            basic_issues: vec![issue],
            content_issues: Vec::new(),
            scene_id: "unknown".to_string(),
        }
    }
}

pub struct SceneValidator {
    api_key: Option<String>,
}

impl SceneValidator {
    pub fn new(api_key: Option<String>) -> Self {
        let api_key = api_key.filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            warn!("[SCENE] No Gemini API key provided. Limited functionality available.");
        }
        Self { api_key }
    }

    pub fn validate_scene(&self, scene: &Value) -> SceneValidation {
        let basic_issues = validate_structure(scene);
        let content_issues = self.validate_content(scene);

        let scene_id = match scene.get("id") {
            Some(Value::String(id)) => id.clone(),
            Some(id) => id.to_string(),
            None => "unknown".to_string(),
        };

        SceneValidation {
            valid: basic_issues.is_empty() && content_issues.is_empty(),
            basic_issues,
            content_issues,
            scene_id,
        }
    }

    fn validate_content(&self, _scene: &Value) -> Vec<SceneIssue> {
        if self.api_key.is_none() {
            return vec![SceneIssue::new(
                "api_unavailable",
                None,
                Severity::Warning,
                "Content validation skipped: Gemini API key not provided".to_string(),
            )];
        }
        Vec::new()
    }
}

fn validate_structure(scene: &Value) -> Vec<SceneIssue> {
    let mut issues = Vec::new();

    for &field in REQUIRED_FIELDS {
        if scene.get(field).is_none() {
            issues.push(SceneIssue::new(
                "missing_field",
                Some(field),
                Severity::Error,
                format!("Required field '{}' is missing", field),
            ));
        }
    }

    for &field in LIST_FIELDS {
        if let Some(value) = scene.get(field) {
            if !value.is_array() {
                issues.push(SceneIssue::new(
                    "invalid_format",
                    Some(field),
                    Severity::Error,
                    format!("'{}' must be a list", field),
                ));
            }
        }
    }

    issues
}

/// Validate a scene stored as JSON on disk. Unreadable or malformed files produce
/// a failed validation instead of an error.
pub fn validate_from_file(path: &Path, api_key: Option<String>) -> SceneValidation {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("[SCENE] Could not read {:?}: {}", path, e);
            return SceneValidation::failed(SceneIssue::new(
                "file_not_found",
                None,
                Severity::Error,
                format!("File not found: {}", path.display()),
            ));
        }
    };

    let scene: Value = match serde_json::from_str(&raw) {
        Ok(scene) => scene,
        Err(e) => {
            warn!("[SCENE] Invalid JSON in {:?}: {}", path, e);
            return SceneValidation::failed(SceneIssue::new(
                "invalid_json",
                None,
                Severity::Error,
                "File contains invalid JSON".to_string(),
            ));
        }
    };

    let result = SceneValidator::new(api_key).validate_scene(&scene);
    info!(
        "[SCENE] {} -> valid={} ({} structural, {} content issues)",
        result.scene_id,
        result.valid,
        result.basic_issues.len(),
        result.content_issues.len()
    );
    result
}
