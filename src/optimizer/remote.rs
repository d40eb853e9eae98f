// LoopOptimizer Remote Processing
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// The cloud optimization step was never built. `SimulatedRemote` stands in for it
// with a fixed delay and a random size-reduction figure.

use crate::error::OptimizerError;
use crate::optimizer::model::{AnimationRecord, OptimizedResult};
use crate::optimizer::options::OptimizationOptions;
use crate::optimizer::transformer::iso_timestamp;
use chrono::{DateTime, Utc};
use rand::Rng;
use std::future::Future;
use std::ops::RangeInclusive;
use std::time::Duration;
use tracing::debug;

/// Bounds of the simulated size reduction, in percent.
pub const SIMULATED_REDUCTION_PCT: RangeInclusive<u8> = 10..=39;

/// Top-level keys owned by the finalizer.
const RESULT_KEYS: &[&str] = &["optimized", "optimizationLevel", "sizeReduction", "timestamp"];

/// Final processing step applied to a locally optimized animation.
pub trait RemoteProcessor: Send + Sync {
    fn process(
        &self,
        animation: AnimationRecord,
        options: &OptimizationOptions,
    ) -> impl Future<Output = Result<OptimizedResult, OptimizerError>> + Send;
}

/// Sleeps for `delay`, then reports a random reduction in 10..=39 percent.
#[derive(Debug, Clone)]
pub struct SimulatedRemote {
    pub delay: Duration,
}

impl SimulatedRemote {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedRemote {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl RemoteProcessor for SimulatedRemote {
    async fn process(
        &self,
        animation: AnimationRecord,
        options: &OptimizationOptions,
    ) -> Result<OptimizedResult, OptimizerError> {
        if !self.delay.is_zero() {
            debug!("[REMOTE] Simulating remote round trip ({:?})", self.delay);
            tokio::time::sleep(self.delay).await;
        }
        let pct = rand::thread_rng().gen_range(SIMULATED_REDUCTION_PCT);
        Ok(finalize(animation, options, pct, Utc::now()))
    }
}

/// Wrap `animation` with the summary fields of an optimization result.
pub fn finalize(
    mut animation: AnimationRecord,
    options: &OptimizationOptions,
    size_reduction_pct: u8,
    now: DateTime<Utc>,
) -> OptimizedResult {
    for key in RESULT_KEYS {
        animation.extra.remove(*key);
    }

    OptimizedResult {
        animation,
        optimized: true,
        optimization_level: options.quality,
        size_reduction: format!("{}%", size_reduction_pct),
        timestamp: iso_timestamp(now),
    }
}
