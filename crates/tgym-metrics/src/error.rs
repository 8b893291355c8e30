use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricsError {
    /// The requested reward name is not one of [`RewardKind::ALL`](crate::RewardKind::ALL).
    #[error("unsupported metric: {0}")]
    UnsupportedMetric(String),
}
