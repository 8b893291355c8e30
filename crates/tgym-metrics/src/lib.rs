//! tgym-metrics
//!
//! Incremental performance metrics over realized fills.
//! - Sufficient statistics only, never raw trade history
//! - Welford running mean / sum of squared deviations for P&L and returns
//! - Reward ratios computed on demand from the current state
//! - Explicit numeric fallbacks (0.0 or NaN) instead of errors

mod engine;
mod error;
mod reward;
mod snapshot;
mod state;
mod welford;

pub use engine::MetricsEngine;
pub use error::MetricsError;
pub use reward::{compute_reward, RewardKind};
pub use snapshot::MetricsSnapshot;
pub use state::{Metric, MetricsState};
pub use welford::welford_update;
