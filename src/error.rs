// Error taxonomy for the metrics/alerting core

use crate::models::AlertKind;

#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// Live introspection cannot be used at all; the adapter runs synthetic-only.
    #[error("metric source unavailable: {0}")]
    SourceUnavailable(String),

    /// A single live read failed; the adapter answers that call synthetically.
    #[error("{operation} read failed: {reason}")]
    TransientReadFailure {
        operation: &'static str,
        reason: String,
    },

    /// Resolve referenced an id with no matching unresolved alert.
    #[error("alert {0} not found or already resolved")]
    NotFound(i64),

    /// Rejected at configuration load.
    #[error("invalid {kind} threshold: {reason}")]
    InvalidThreshold { kind: AlertKind, reason: String },

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl MonitorError {
    pub(crate) fn transient(operation: &'static str, reason: impl ToString) -> Self {
        MonitorError::TransientReadFailure {
            operation,
            reason: reason.to_string(),
        }
    }
}
