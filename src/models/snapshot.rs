// Snapshot envelope: resource kinds, composite view and shared unit helpers

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{CpuStats, DiskStats, MemoryStats, NetworkStats, ProcessList, SystemInfo};

/// Wire format for human-readable timestamps (alerts, boot time).
pub const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Where a snapshot's values came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Synthetic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Cpu,
    Memory,
    Disk,
    Network,
    Processes,
    SystemInfo,
}

impl MetricKind {
    pub const ALL: [MetricKind; 6] = [
        MetricKind::Cpu,
        MetricKind::Memory,
        MetricKind::Disk,
        MetricKind::Network,
        MetricKind::Processes,
        MetricKind::SystemInfo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Cpu => "cpu",
            MetricKind::Memory => "ram",
            MetricKind::Disk => "disk",
            MetricKind::Network => "network",
            MetricKind::Processes => "processes",
            MetricKind::SystemInfo => "system-info",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = String;

    /// Accepts the API path segment (e.g. "ram", "system-info") and a few aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cpu" => Ok(MetricKind::Cpu),
            "ram" | "memory" => Ok(MetricKind::Memory),
            "disk" => Ok(MetricKind::Disk),
            "network" => Ok(MetricKind::Network),
            "processes" => Ok(MetricKind::Processes),
            "system-info" | "system_info" => Ok(MetricKind::SystemInfo),
            other => Err(format!("unknown metric kind: {}", other)),
        }
    }
}

/// One snapshot of a single resource kind; serializes as the inner value.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MetricSnapshot {
    Cpu(CpuStats),
    Memory(MemoryStats),
    Disk(DiskStats),
    Network(NetworkStats),
    Processes(ProcessList),
    SystemInfo(SystemInfo),
}

impl MetricSnapshot {
    pub fn kind(&self) -> MetricKind {
        match self {
            MetricSnapshot::Cpu(_) => MetricKind::Cpu,
            MetricSnapshot::Memory(_) => MetricKind::Memory,
            MetricSnapshot::Disk(_) => MetricKind::Disk,
            MetricSnapshot::Network(_) => MetricKind::Network,
            MetricSnapshot::Processes(_) => MetricKind::Processes,
            MetricSnapshot::SystemInfo(_) => MetricKind::SystemInfo,
        }
    }

    pub fn captured_at(&self) -> u64 {
        match self {
            MetricSnapshot::Cpu(s) => s.captured_at,
            MetricSnapshot::Memory(s) => s.captured_at,
            MetricSnapshot::Disk(s) => s.captured_at,
            MetricSnapshot::Network(s) => s.captured_at,
            MetricSnapshot::Processes(s) => s.captured_at,
            MetricSnapshot::SystemInfo(s) => s.captured_at,
        }
    }
}

/// Every resource kind at once, plus the composite capture time (RFC 3339).
#[derive(Debug, Clone, Serialize)]
pub struct AllMetrics {
    pub cpu: CpuStats,
    pub ram: MemoryStats,
    pub disk: DiskStats,
    pub network: NetworkStats,
    pub processes: ProcessList,
    pub system_info: SystemInfo,
    pub timestamp: String,
}

/// `part / total * 100`, clamped to [0, 100]; 0 when total is 0.
pub fn percent_of(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    ((part as f64 / total as f64) * 100.0).clamp(0.0, 100.0)
}

/// Current Unix time in milliseconds.
pub fn now_millis() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}

pub fn format_display_time<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    dt.format(DISPLAY_TIME_FORMAT).to_string()
}
