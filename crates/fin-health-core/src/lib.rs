pub mod error;
pub mod types;

pub mod bankruptcy;
pub mod config;
pub mod health;
pub mod ratios;
pub mod scoring;
pub mod statements;

#[cfg(feature = "trends")]
pub mod trends;

pub use error::HealthScoreError;
pub use types::*;

/// Standard result type for all health-scoring operations
pub type HealthScoreResult<T> = Result<T, HealthScoreError>;
