// Disk usage model

use serde::{Deserialize, Serialize};

use super::{DataSource, percent_of};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiskStats {
    pub mount: String,
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub percentage: f64,
    /// Cumulative since boot; resets on reboot.
    pub read_bytes: u64,
    pub write_bytes: u64,
    pub source: DataSource,
    pub captured_at: u64,
}

impl DiskStats {
    /// `used` is derived as `total - free`, so `used + free == total` holds exactly.
    pub fn from_counts(
        mount: impl Into<String>,
        total: u64,
        free: u64,
        read_bytes: u64,
        write_bytes: u64,
        source: DataSource,
        captured_at: u64,
    ) -> Self {
        let free = free.min(total);
        let used = total - free;
        Self {
            mount: mount.into(),
            total,
            used,
            free,
            percentage: percent_of(used, total),
            read_bytes,
            write_bytes,
            source,
            captured_at,
        }
    }
}
