// LoopOptimizer Modules
// Copyright (c) 2026 Xing_The_Creator | SYNOID

pub mod analyzer;
pub mod model;
pub mod options;
pub mod pipeline;
pub mod remote;
pub mod transformer;

pub use analyzer::{Analyzer, CanonicalJsonComparator, FrameComparator};
pub use model::{AnalysisReport, AnimationRecord, OptimizationPotential, OptimizedResult, PotentialLevel};
pub use options::{OptimizationOptions, OptionOverrides};
pub use pipeline::{LoopOptimizer, OptimizerState};
pub use remote::{finalize, RemoteProcessor, SimulatedRemote};
