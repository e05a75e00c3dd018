// Metric source adapter: live host introspection with a two-tier synthetic fallback.
//
// Tier 1: a capability probe at construction picks Capable (live) or Degraded (synthetic only).
// Tier 2: in Capable mode, any single failing live read is answered synthetically.
// Neither tier ever surfaces an error to the caller.

mod linux;
mod live;
mod synthetic;

pub use synthetic::SyntheticSource;

use serde::Serialize;

use crate::config::MonitoringConfig;
use crate::error::MonitorError;
use crate::models::*;
use live::LiveSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    Capable,
    Degraded,
}

/// Produces one snapshot per resource kind. Implementations may block (process
/// enumeration, CPU sampling) and must not fail.
pub trait MetricProvider: Send + Sync {
    fn cpu(&self) -> CpuStats;
    fn memory(&self) -> MemoryStats;
    fn disk(&self) -> DiskStats;
    fn network(&self) -> NetworkStats;
    fn processes(&self) -> ProcessList;
    fn system_info(&self) -> SystemInfo;

    fn mode(&self) -> SourceMode {
        SourceMode::Capable
    }

    fn snapshot(&self, kind: MetricKind) -> MetricSnapshot {
        match kind {
            MetricKind::Cpu => MetricSnapshot::Cpu(self.cpu()),
            MetricKind::Memory => MetricSnapshot::Memory(self.memory()),
            MetricKind::Disk => MetricSnapshot::Disk(self.disk()),
            MetricKind::Network => MetricSnapshot::Network(self.network()),
            MetricKind::Processes => MetricSnapshot::Processes(self.processes()),
            MetricKind::SystemInfo => MetricSnapshot::SystemInfo(self.system_info()),
        }
    }
}

pub struct MetricSource {
    live: Option<LiveSource>,
    synthetic: SyntheticSource,
}

impl MetricSource {
    pub fn new(config: &MonitoringConfig) -> Self {
        let probe = if config.force_synthetic {
            Err(MonitorError::SourceUnavailable(
                "synthetic mode forced by configuration".into(),
            ))
        } else {
            LiveSource::probe(&config.disk_mount)
        };
        let live = match probe {
            Ok(live) => {
                tracing::info!(disk_mount = %config.disk_mount, "live metric source ready");
                Some(live)
            }
            Err(e) => {
                tracing::warn!(error = %e, "metric source degraded; serving synthetic data");
                None
            }
        };
        Self {
            live,
            synthetic: SyntheticSource::new(config.synthetic_seed)
                .with_disk_mount(config.disk_mount.as_str()),
        }
    }

    /// Degraded from the start, regardless of host capability.
    pub fn synthetic_only(seed: Option<u64>) -> Self {
        Self {
            live: None,
            synthetic: SyntheticSource::new(seed),
        }
    }

    fn read<T>(
        &self,
        operation: &'static str,
        live: impl FnOnce(&LiveSource) -> Result<T, MonitorError>,
        synthetic: impl FnOnce(&SyntheticSource) -> T,
    ) -> T {
        if let Some(source) = &self.live {
            match live(source) {
                Ok(value) => return value,
                Err(e) => {
                    tracing::warn!(error = %e, operation, "live read failed; serving synthetic data");
                }
            }
        }
        synthetic(&self.synthetic)
    }
}

impl MetricProvider for MetricSource {
    fn cpu(&self) -> CpuStats {
        self.read("cpu", LiveSource::cpu, SyntheticSource::cpu)
    }

    fn memory(&self) -> MemoryStats {
        self.read("memory", LiveSource::memory, SyntheticSource::memory)
    }

    fn disk(&self) -> DiskStats {
        self.read("disk", LiveSource::disk, SyntheticSource::disk)
    }

    fn network(&self) -> NetworkStats {
        self.read("network", LiveSource::network, SyntheticSource::network)
    }

    fn processes(&self) -> ProcessList {
        self.read("processes", LiveSource::processes, SyntheticSource::processes)
    }

    fn system_info(&self) -> SystemInfo {
        self.read("system_info", LiveSource::system_info, SyntheticSource::system_info)
    }

    fn mode(&self) -> SourceMode {
        if self.live.is_some() {
            SourceMode::Capable
        } else {
            SourceMode::Degraded
        }
    }
}
