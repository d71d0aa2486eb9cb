// Library interface for fitstats modules
// The binary and the integration tests both go through this crate root

pub mod adherence;
pub mod comparison;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod formulas;
pub mod hydration;
pub mod insights;
pub mod logging;
pub mod lookup;
pub mod models;
pub mod nutrition;
pub mod streak;
pub mod summary;
pub mod window;
pub mod workout;

// Re-export commonly used types for convenience
pub use models::*;
pub use config::{AppConfig, StatsConfig};
pub use engine::{compute_activity_stats, ActivityStatsEngine, StatsResult};
pub use error::{Result, StatsError};
pub use insights::{Insight, InsightGenerator, InsightKind, InsightThresholds};
pub use logging::{LogConfig, LogFormat, LogLevel};
pub use lookup::DuplicatePolicy;
pub use window::{DateSpan, DateWindow};
