// Background history sampler: one real sample per tick into the ring buffer.
// Alerts are not reconciled here; reconciliation stays demand-driven.

use crate::monitor::Monitor;
use std::sync::Arc;
use tokio::time::{Duration, interval};
use tracing::Instrument;

/// Sampler timing and logging config.
pub struct WorkerConfig {
    pub sample_interval_ms: u64,
    /// How often to log app stats (real seconds).
    pub stats_log_interval_secs: u64,
}

pub fn spawn(
    monitor: Arc<Monitor>,
    config: WorkerConfig,
    mut shutdown_rx: tokio::sync::oneshot::Receiver<()>,
) -> tokio::task::JoinHandle<()> {
    let WorkerConfig {
        sample_interval_ms,
        stats_log_interval_secs,
    } = config;

    tokio::spawn(async move {
        let mut tick = interval(Duration::from_millis(sample_interval_ms));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut stats_log_tick = interval(Duration::from_secs(stats_log_interval_secs));
        stats_log_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut samples_total: u64 = 0;
        let mut samples_failed: u64 = 0;

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    match monitor.sample_history().await {
                        Ok(point) => {
                            samples_total += 1;
                            tracing::trace!(
                                operation = "sample_history",
                                cpu = point.cpu,
                                ram = point.ram,
                                disk = point.disk,
                                "history sample"
                            );
                        }
                        Err(e) => {
                            samples_failed += 1;
                            tracing::warn!(
                                error = %e,
                                operation = "sample_history",
                                "history sample failed"
                            );
                        }
                    }
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!("Sampler shutting down");
                    break;
                }
                _ = stats_log_tick.tick() => {
                    tracing::info!(
                        source_mode = ?monitor.source_mode(),
                        history_len = monitor.history_len(),
                        samples_total,
                        samples_failed,
                        "app stats"
                    );
                }
            }
        }
    }
    .instrument(tracing::debug_span!("sampler", sample_interval_ms)))
}
