// LoopOptimizer Library
// Copyright (c) 2026 Xing_The_Creator | SYNOID

pub mod config;
pub mod error;
pub mod optimizer;
pub mod scene;
pub mod server;
pub mod state;

pub use error::OptimizerError;
