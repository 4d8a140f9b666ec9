//! Error types for the analytics engine

use thiserror::Error;

/// Errors raised while computing analytics
///
/// `InsufficientData` is recovered inside the pipeline by falling back to the
/// formula estimate; the remaining variants are precondition failures the
/// calling layer is expected to catch first.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Insufficient data: {required} points required, {available} available")]
    InsufficientData { required: usize, available: usize },

    #[error("You need to have made at least one log entry")]
    NoLogs,

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Invalid log series: {0}")]
    InvalidLogSeries(String),
}
