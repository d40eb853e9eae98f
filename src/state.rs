// LoopOptimizer Service State
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use crate::optimizer::options::OptimizationOptions;
use crate::optimizer::pipeline::LoopOptimizer;
use crate::optimizer::remote::SimulatedRemote;
use serde::Serialize;
use std::time::Instant;

/// Shared by every request handler. Holds nothing mutable.
pub struct ServiceState<R = SimulatedRemote> {
    pub optimizer: LoopOptimizer<R>,
    pub started_at: Instant,
}

impl<R> ServiceState<R> {
    pub fn new(optimizer: LoopOptimizer<R>) -> Self {
        Self {
            optimizer,
            started_at: Instant::now(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    pub status: &'static str,
    pub uptime_secs: u64,
    pub default_options: OptimizationOptions,
}
