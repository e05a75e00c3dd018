// Read API: the handle consumers share to read snapshots and manage alerts.
// Built once at startup; every call is demand-driven.

use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;

use crate::alert_repo::AlertRepo;
use crate::alerts::{AlertThresholds, Readings, evaluate};
use crate::error::MonitorError;
use crate::history::{HistoryBuffer, HistoryPoint, HistorySeries};
use crate::metric_source::{MetricProvider, SourceMode};
use crate::models::{Alert, AllMetrics, MetricKind, MetricSnapshot};

pub struct Monitor {
    source: Arc<dyn MetricProvider>,
    thresholds: AlertThresholds,
    alerts: Arc<AlertRepo>,
    history: Arc<HistoryBuffer>,
}

impl Monitor {
    pub fn new(
        source: Arc<dyn MetricProvider>,
        thresholds: AlertThresholds,
        alerts: Arc<AlertRepo>,
        history: Arc<HistoryBuffer>,
    ) -> Self {
        Self {
            source,
            thresholds,
            alerts,
            history,
        }
    }

    /// Runs a (possibly slow) source read on the blocking pool. No lock is held meanwhile.
    async fn read<T, F>(&self, f: F) -> Result<T, MonitorError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn MetricProvider) -> T + Send + 'static,
    {
        let source = self.source.clone();
        Ok(tokio::task::spawn_blocking(move || f(source.as_ref())).await?)
    }

    pub async fn snapshot(&self, kind: MetricKind) -> Result<MetricSnapshot, MonitorError> {
        self.read(move |s| s.snapshot(kind)).await
    }

    pub async fn all_snapshots(&self) -> Result<AllMetrics, MonitorError> {
        let (cpu, ram, disk, network, processes, system_info) = tokio::try_join!(
            self.read(|s| s.cpu()),
            self.read(|s| s.memory()),
            self.read(|s| s.disk()),
            self.read(|s| s.network()),
            self.read(|s| s.processes()),
            self.read(|s| s.system_info()),
        )?;
        Ok(AllMetrics {
            cpu,
            ram,
            disk,
            network,
            processes,
            system_info,
            timestamp: Utc::now().to_rfc3339(),
        })
    }

    /// Fresh CPU, memory and disk readings for alert evaluation.
    pub async fn readings(&self) -> Result<Readings, MonitorError> {
        let (cpu, memory, disk) = tokio::try_join!(
            self.read(|s| s.cpu()),
            self.read(|s| s.memory()),
            self.read(|s| s.disk()),
        )?;
        Ok(Readings::default()
            .with_cpu(&cpu)
            .with_memory(&memory)
            .with_disk(&disk))
    }

    /// Evaluates fresh readings and opens alerts for newly breaching kinds.
    #[instrument(skip(self), fields(operation = "reconcile"))]
    pub async fn reconcile(&self) -> Result<Vec<Alert>, MonitorError> {
        let readings = self.readings().await?;
        let conditions = evaluate(&readings, &self.thresholds);
        tracing::debug!(conditions_count = conditions.len(), "evaluated readings");
        self.alerts.reconcile(&conditions).await
    }

    /// Reconciles first, then returns every unresolved alert, newest first.
    pub async fn open_alerts(&self) -> Result<Vec<Alert>, MonitorError> {
        self.reconcile().await?;
        self.alerts.open_alerts().await
    }

    pub async fn resolve_alert(&self, id: i64) -> Result<Alert, MonitorError> {
        self.alerts.resolve(id).await
    }

    pub async fn alert_history(&self, limit: u32) -> Result<Vec<Alert>, MonitorError> {
        self.alerts.history(limit).await
    }

    /// Takes one real sample and appends it to the history ring buffer.
    pub async fn sample_history(&self) -> Result<HistoryPoint, MonitorError> {
        let (cpu, ram, disk, network) = tokio::try_join!(
            self.read(|s| s.cpu()),
            self.read(|s| s.memory()),
            self.read(|s| s.disk()),
            self.read(|s| s.network()),
        )?;
        let point = HistoryPoint::from_stats(&cpu, &ram, &disk, &network);
        self.history.push(point);
        Ok(point)
    }

    pub fn history(&self) -> HistorySeries {
        self.history.series()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn source_mode(&self) -> SourceMode {
        self.source.mode()
    }

    pub fn thresholds(&self) -> &AlertThresholds {
        &self.thresholds
    }
}
