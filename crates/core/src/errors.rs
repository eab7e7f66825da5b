//! Error types for dashboard state and widget data fetching.

use thiserror::Error;

/// Type alias for Result using [`DashboardError`].
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Errors raised by the dashboard store and its persistence layer.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Dashboard storage failed: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Dashboard document is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported dashboard export version {0}")]
    UnsupportedVersion(u32),
}
