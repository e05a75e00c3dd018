// HTTP routes: thin JSON adapter over the Monitor read API

mod error;
mod http;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::monitor::Monitor;

pub use error::ApiError;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) monitor: Arc<Monitor>,
}

pub fn app(monitor: Arc<Monitor>) -> Router {
    let state = AppState { monitor };
    Router::new()
        .route("/", get(http::version_handler)) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/status", get(http::status_handler)) // GET /api/status
        .route("/api/all-metrics", get(http::all_metrics_handler)) // GET /api/all-metrics
        .route("/api/alerts", get(http::alerts_handler)) // GET /api/alerts
        .route("/api/alerts/history", get(http::alert_history_handler)) // GET /api/alerts/history
        .route(
            "/api/resolve-alert/{id}",
            get(http::resolve_alert_handler).post(http::resolve_alert_handler),
        ) // GET|POST /api/resolve-alert/{id}
        .route("/api/historical-data", get(http::historical_data_handler)) // GET /api/historical-data
        .route("/api/{kind}", get(http::metric_handler)) // GET /api/{cpu,ram,disk,network,processes,system-info}
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
