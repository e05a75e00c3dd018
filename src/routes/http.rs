// GET/POST handlers: version, metrics, alerts, history

use axum::{
    Json,
    extract::{Path, Query, State, rejection::PathRejection},
    response::IntoResponse,
};
use serde::Deserialize;

use super::{ApiError, AppState};
use crate::history::HistorySeries;
use crate::models::{AlertRecordView, AlertView, AllMetrics, MetricKind, MetricSnapshot};

const DEFAULT_HISTORY_LIMIT: u32 = 100;
const MAX_HISTORY_LIMIT: u32 = 1_000;

/// GET /version: service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /api/status: source mode and history fill.
pub(super) async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "mode": state.monitor.source_mode(),
        "history_len": state.monitor.history_len(),
    }))
}

/// GET /api/{kind}: one snapshot.
pub(super) async fn metric_handler(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<MetricSnapshot>, ApiError> {
    let kind = kind.parse::<MetricKind>().map_err(ApiError::UnknownMetric)?;
    Ok(Json(state.monitor.snapshot(kind).await?))
}

/// GET /api/all-metrics
pub(super) async fn all_metrics_handler(
    State(state): State<AppState>,
) -> Result<Json<AllMetrics>, ApiError> {
    Ok(Json(state.monitor.all_snapshots().await?))
}

/// GET /api/alerts: reconciles, then lists open alerts newest first.
pub(super) async fn alerts_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<AlertView>>, ApiError> {
    let alerts = state.monitor.open_alerts().await?;
    Ok(Json(alerts.iter().map(AlertView::from).collect()))
}

#[derive(Debug, Deserialize)]
pub(super) struct HistoryQuery {
    limit: Option<u32>,
}

/// GET /api/alerts/history?limit=N: audit trail, resolved alerts included.
pub(super) async fn alert_history_handler(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<AlertRecordView>>, ApiError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);
    let alerts = state.monitor.alert_history(limit).await?;
    Ok(Json(alerts.iter().map(AlertRecordView::from).collect()))
}

/// GET|POST /api/resolve-alert/{id}
pub(super) async fn resolve_alert_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    state.monitor.resolve_alert(id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// GET /api/historical-data: sampled ring buffer, oldest first.
pub(super) async fn historical_data_handler(
    State(state): State<AppState>,
) -> Json<HistorySeries> {
    Json(state.monitor.history())
}
