// SQLite alert ledger. Alerts are created once per open kind, resolved at most once, never deleted.

mod row;

use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use tokio::sync::Mutex;
use tracing::instrument;

use crate::error::MonitorError;
use crate::models::{Alert, AlertCondition};

const ALERT_COLUMNS: &str = "id, kind, message, severity, created_at, resolved, resolved_at";

pub struct AlertRepo {
    pool: SqlitePool,
    /// Serializes "check unresolved-of-kind, then insert".
    reconcile_lock: Mutex<()>,
}

impl AlertRepo {
    pub async fn connect(path: &str, max_pool_size: u32) -> anyhow::Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5))
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_pool_size)
            .connect_with(opts)
            .await?;
        Ok(Self {
            pool,
            reconcile_lock: Mutex::new(()),
        })
    }

    pub async fn init(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS alerts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                kind TEXT NOT NULL,
                message TEXT NOT NULL,
                severity TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                resolved INTEGER NOT NULL DEFAULT 0,
                resolved_at INTEGER
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        // At most one unresolved alert per kind, enforced by the store as well.
        sqlx::query(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_alerts_open_kind ON alerts(kind) WHERE resolved = 0",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_alerts_created_at ON alerts(created_at)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Opens an alert for every condition whose kind has no unresolved alert.
    /// Returns only the alerts created by this call. Never resolves anything.
    #[instrument(skip(self, conditions), fields(repo = "alerts", operation = "reconcile", conditions_count = conditions.len()))]
    pub async fn reconcile(
        &self,
        conditions: &[AlertCondition],
    ) -> Result<Vec<Alert>, MonitorError> {
        if conditions.is_empty() {
            return Ok(Vec::new());
        }
        let _guard = self.reconcile_lock.lock().await;
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::new();

        for condition in conditions {
            let open: Option<i64> =
                sqlx::query_scalar("SELECT id FROM alerts WHERE kind = $1 AND resolved = 0 LIMIT 1")
                    .bind(condition.kind.as_str())
                    .fetch_optional(&mut *tx)
                    .await?;
            if open.is_some() {
                continue;
            }

            let created_at = Utc::now();
            let result = sqlx::query(
                "INSERT OR IGNORE INTO alerts (kind, message, severity, created_at, resolved) VALUES ($1, $2, $3, $4, 0)",
            )
            .bind(condition.kind.as_str())
            .bind(&condition.message)
            .bind(condition.severity.as_str())
            .bind(created_at.timestamp_millis())
            .execute(&mut *tx)
            .await?;
            if result.rows_affected() == 0 {
                continue;
            }

            let alert = Alert {
                id: result.last_insert_rowid(),
                kind: condition.kind,
                message: condition.message.clone(),
                severity: condition.severity,
                created_at: row::truncate_to_millis(created_at),
                resolved: false,
                resolved_at: None,
            };
            tracing::info!(
                alert_id = alert.id,
                kind = %alert.kind,
                severity = %alert.severity,
                "alert opened"
            );
            created.push(alert);
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Unresolved alerts, newest first.
    #[instrument(skip(self), fields(repo = "alerts", operation = "open_alerts"))]
    pub async fn open_alerts(&self) -> Result<Vec<Alert>, MonitorError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM alerts WHERE resolved = 0 ORDER BY created_at DESC, id DESC",
            ALERT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row::parse_alert_row).collect()
    }

    /// Marks one unresolved alert resolved. Unknown or already-resolved ids are `NotFound`
    /// and leave the record untouched.
    #[instrument(skip(self), fields(repo = "alerts", operation = "resolve"))]
    pub async fn resolve(&self, id: i64) -> Result<Alert, MonitorError> {
        let resolved_at = Utc::now().timestamp_millis();
        let result = sqlx::query(
            "UPDATE alerts SET resolved = 1, resolved_at = $1 WHERE id = $2 AND resolved = 0",
        )
        .bind(resolved_at)
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(MonitorError::NotFound(id));
        }
        tracing::info!(alert_id = id, "alert resolved");
        self.get(id).await?.ok_or(MonitorError::NotFound(id))
    }

    pub async fn get(&self, id: i64) -> Result<Option<Alert>, MonitorError> {
        let found = sqlx::query(&format!("SELECT {} FROM alerts WHERE id = $1", ALERT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        found.as_ref().map(row::parse_alert_row).transpose()
    }

    /// All alerts (resolved included), newest first.
    #[instrument(skip(self), fields(repo = "alerts", operation = "history"))]
    pub async fn history(&self, limit: u32) -> Result<Vec<Alert>, MonitorError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM alerts ORDER BY created_at DESC, id DESC LIMIT $1",
            ALERT_COLUMNS
        ))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row::parse_alert_row).collect()
    }
}
