// Row decoding for the alerts table. Timestamps are stored as Unix milliseconds.

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::error::MonitorError;
use crate::models::{Alert, AlertKind, Severity};

pub(super) fn parse_alert_row(row: &SqliteRow) -> Result<Alert, MonitorError> {
    let id: i64 = row.try_get("id")?;
    let kind: String = row.try_get("kind")?;
    let message: String = row.try_get("message")?;
    let severity: String = row.try_get("severity")?;
    let created_at: i64 = row.try_get("created_at")?;
    let resolved: bool = row.try_get("resolved")?;
    let resolved_at: Option<i64> = row.try_get("resolved_at")?;

    Ok(Alert {
        id,
        kind: kind.parse::<AlertKind>().map_err(decode_error)?,
        message,
        severity: severity.parse::<Severity>().map_err(decode_error)?,
        created_at: from_millis(created_at)?,
        resolved,
        resolved_at: resolved_at.map(from_millis).transpose()?,
    })
}

/// Drops sub-millisecond precision so in-memory alerts match what a re-read returns.
pub(super) fn truncate_to_millis(t: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(t.timestamp_millis()).unwrap_or(t)
}

fn from_millis(ms: i64) -> Result<DateTime<Utc>, MonitorError> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| decode_error(format!("timestamp out of range: {}", ms)))
}

fn decode_error(reason: String) -> MonitorError {
    MonitorError::Database(sqlx::Error::Decode(reason.into()))
}
