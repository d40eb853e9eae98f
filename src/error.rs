// LoopOptimizer Errors
// Copyright (c) 2026 Xing_The_Creator | SYNOID

/// Errors surfaced by the optimization pipeline.
#[derive(Debug, thiserror::Error)]
pub enum OptimizerError {
    /// Missing or malformed animation data, or options out of range.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The optimizer was used before setup completed.
    #[error("LoopOptimizer is not initialized")]
    NotInitialized,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failure inside the remote processing step.
    #[error("Remote processing failed: {0}")]
    Remote(String),
}

impl OptimizerError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// True when the caller sent bad data (maps to a 4xx at the HTTP boundary).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}
