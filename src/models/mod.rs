// Domain models: metric snapshots, alert conditions and alert records

mod alert;
mod network;
mod process;
mod snapshot;
mod storage;
mod system;

pub use alert::{Alert, AlertCondition, AlertKind, AlertRecordView, AlertView, Severity};
pub use network::NetworkStats;
pub use process::{MAX_PROCESSES, ProcessEntry, ProcessList};
pub use snapshot::{
    AllMetrics, DISPLAY_TIME_FORMAT, DataSource, MetricKind, MetricSnapshot, format_display_time,
    now_millis, percent_of,
};
pub use storage::DiskStats;
pub use system::{CpuFrequency, CpuStats, MemoryStats, SystemInfo, format_uptime};
