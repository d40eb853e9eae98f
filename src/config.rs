// LoopOptimizer Service Configuration
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Environment-driven settings. `.env` is loaded by the binary before this runs.

use crate::optimizer::options::{OptimizationOptions, DEFAULT_QUALITY};
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_REMOTE_DELAY_MS: u64 = 1000;
/// Request bodies above this are rejected by the HTTP layer.
pub const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    /// Defaults merged under every call's options.
    pub default_options: OptimizationOptions,
    /// Artificial latency of the simulated remote step.
    pub remote_delay: Duration,
    pub gemini_api_key: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            default_options: OptimizationOptions::default(),
            remote_delay: Duration::from_millis(DEFAULT_REMOTE_DELAY_MS),
            gemini_api_key: None,
        }
    }
}

impl ServiceConfig {
    /// Build from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparseable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = Self::default();

        let port = ["LOOP_OPTIMIZER_PORT", "PORT"]
            .into_iter()
            .find_map(|key| lookup(key).map(|raw| parse_or(key, &raw, base.port)))
            .unwrap_or(base.port);

        let mut default_options = base.default_options;
        if let Some(raw) = lookup("LOOP_OPTIMIZER_QUALITY") {
            default_options.quality = parse_or("LOOP_OPTIMIZER_QUALITY", &raw, default_options.quality);
            if let Err(e) = default_options.validate() {
                warn!("[CONFIG] Ignoring LOOP_OPTIMIZER_QUALITY={:?}: {}", raw, e);
                default_options.quality = DEFAULT_QUALITY;
            }
        }
        if let Some(raw) = lookup("LOOP_OPTIMIZER_COMPRESSION") {
            default_options.enable_compression = parse_bool(&raw).unwrap_or_else(|| {
                warn!("[CONFIG] Ignoring LOOP_OPTIMIZER_COMPRESSION={:?}", raw);
                default_options.enable_compression
            });
        }

        let remote_delay = lookup("LOOP_OPTIMIZER_REMOTE_DELAY_MS")
            .map(|raw| {
                Duration::from_millis(parse_or(
                    "LOOP_OPTIMIZER_REMOTE_DELAY_MS",
                    &raw,
                    DEFAULT_REMOTE_DELAY_MS,
                ))
            })
            .unwrap_or(base.remote_delay);

        let gemini_api_key = lookup("GEMINI_API_KEY").filter(|key| !key.trim().is_empty());

        Self {
            port,
            default_options,
            remote_delay,
            gemini_api_key,
        }
    }
}

fn parse_or<T: FromStr + Copy>(key: &str, raw: &str, fallback: T) -> T {
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!("[CONFIG] Ignoring {}={:?}, not a valid value", key, raw);
            fallback
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
