// Host-wide network counters

use serde::{Deserialize, Serialize};

use super::DataSource;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkStats {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub packets_sent: u64,
    pub packets_recv: u64,
    pub connections: u32,
    /// Bytes/sec since the previous sample.
    pub upload_speed: f64,
    pub download_speed: f64,
    pub source: DataSource,
    pub captured_at: u64,
}
