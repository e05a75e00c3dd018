// CPU, memory and uptime models

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use super::{DataSource, format_display_time, percent_of};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuFrequency {
    /// MHz
    pub current: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpuStats {
    pub percentage: f64,
    /// Logical CPUs.
    pub cores: u32,
    pub frequency: Option<CpuFrequency>,
    /// 1, 5 and 15 minute load averages.
    pub load_avg: Option<[f64; 3]>,
    pub source: DataSource,
    pub captured_at: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryStats {
    pub total: u64,
    pub available: u64,
    pub used: u64,
    pub percentage: f64,
    pub swap_total: u64,
    pub swap_used: u64,
    pub swap_percentage: f64,
    pub source: DataSource,
    pub captured_at: u64,
}

impl MemoryStats {
    /// Derives `used` and both percentages from raw counts so they always agree.
    pub fn from_counts(
        total: u64,
        available: u64,
        swap_total: u64,
        swap_used: u64,
        source: DataSource,
        captured_at: u64,
    ) -> Self {
        let available = available.min(total);
        let used = total - available;
        let swap_used = swap_used.min(swap_total);
        Self {
            total,
            available,
            used,
            percentage: percent_of(used, total),
            swap_total,
            swap_used,
            swap_percentage: percent_of(swap_used, swap_total),
            source,
            captured_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Unix seconds.
    pub boot_timestamp: u64,
    pub boot_time: String,
    pub uptime_seconds: u64,
    pub uptime_formatted: String,
    pub timestamp: String,
    pub source: DataSource,
    pub captured_at: u64,
}

impl SystemInfo {
    pub fn from_boot(boot_timestamp: u64, now: DateTime<Utc>, source: DataSource) -> Self {
        let now_secs = now.timestamp().max(0) as u64;
        let uptime_seconds = now_secs.saturating_sub(boot_timestamp);
        let boot_time = DateTime::<Utc>::from_timestamp(boot_timestamp as i64, 0)
            .map(|t| format_display_time(&t.with_timezone(&Local)))
            .unwrap_or_default();
        Self {
            boot_timestamp,
            boot_time,
            uptime_seconds,
            uptime_formatted: format_uptime(uptime_seconds),
            timestamp: format_display_time(&now.with_timezone(&Local)),
            source,
            captured_at: now.timestamp_millis().max(0) as u64,
        }
    }
}

/// "3d 4h 5m", "4h 5m" or "5m".
pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;
    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}
