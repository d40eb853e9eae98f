// LoopOptimizer Pipeline Orchestrator
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Analyzer -> local transform -> remote finalize, in that fixed order.

use crate::error::OptimizerError;
use crate::optimizer::analyzer::Analyzer;
use crate::optimizer::model::{AnalysisReport, AnimationRecord, OptimizedResult};
use crate::optimizer::options::{OptimizationOptions, OptionOverrides};
use crate::optimizer::remote::{RemoteProcessor, SimulatedRemote};
use crate::optimizer::transformer::transform_locally;
use chrono::Utc;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizerState {
    Uninitialized,
    Ready,
}

/// Stateless between calls; one instance may serve concurrent requests.
pub struct LoopOptimizer<R = SimulatedRemote> {
    state: OptimizerState,
    defaults: OptimizationOptions,
    analyzer: Analyzer,
    remote: R,
}

impl<R: RemoteProcessor> LoopOptimizer<R> {
    pub fn new(defaults: OptimizationOptions, remote: R) -> Self {
        Self::with_analyzer(defaults, remote, Analyzer::default())
    }

    pub fn with_analyzer(defaults: OptimizationOptions, remote: R, analyzer: Analyzer) -> Self {
        let mut optimizer = Self {
            state: OptimizerState::Uninitialized,
            defaults,
            analyzer,
            remote,
        };
        optimizer.state = OptimizerState::Ready;
        debug!("[PIPELINE] Ready with defaults {:?}", optimizer.defaults);
        optimizer
    }

    pub fn state(&self) -> OptimizerState {
        self.state
    }

    pub fn default_options(&self) -> &OptimizationOptions {
        &self.defaults
    }

    /// Defaults with `overrides` applied, range-checked.
    pub fn effective_options(
        &self,
        overrides: Option<&OptionOverrides>,
    ) -> Result<OptimizationOptions, OptimizerError> {
        let options = match overrides {
            Some(overrides) => self.defaults.merge(overrides),
            None => self.defaults.clone(),
        };
        options.validate()?;
        Ok(options)
    }

    /// Read-only analysis without transforming anything.
    pub fn analyze(&self, animation: &Value) -> Result<AnalysisReport, OptimizerError> {
        self.ensure_ready()?;
        self.analyzer.analyze_value(animation)
    }

    /// Run the full pipeline on one animation.
    pub async fn optimize_loop(
        &self,
        animation: &Value,
        overrides: Option<&OptionOverrides>,
    ) -> Result<OptimizedResult, OptimizerError> {
        self.ensure_ready()?;
        let started = Instant::now();
        let options = self.effective_options(overrides)?;

        let record = AnimationRecord::from_value(animation)?;
        let report = self.analyzer.analyze(&record)?;
        debug!(
            "[PIPELINE] Analysis: {} frames, repetitive {:?}",
            report.frame_count, report.repetitive_frames
        );

        let local = transform_locally(&record, &report, &options, Utc::now())?;
        let removed = record.frame_count() - local.frame_count();

        let result = self.remote.process(local, &options).await?;

        info!(
            "[PIPELINE] Optimized loop: {} -> {} frames ({} removed), quality {}, in {:?}",
            record.frame_count(),
            result.animation.frame_count(),
            removed,
            options.quality,
            started.elapsed()
        );
        Ok(result)
    }

    fn ensure_ready(&self) -> Result<(), OptimizerError> {
        match self.state {
            OptimizerState::Ready => Ok(()),
            OptimizerState::Uninitialized => Err(OptimizerError::NotInitialized),
        }
    }
}

#[cfg(test)]
impl<R> LoopOptimizer<R> {
    pub(crate) fn force_state(&mut self, state: OptimizerState) {
        self.state = state;
    }
}
