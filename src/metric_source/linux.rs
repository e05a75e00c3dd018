// Linux-specific helpers: /proc and /sys reads that sysinfo does not cover.

/// CPU frequency bounds (min, max) in MHz from cpufreq on cpu0.
pub(super) fn read_cpu_freq_bounds_mhz() -> Option<(f64, f64)> {
    #[cfg(target_os = "linux")]
    {
        let read_khz = |file: &str| -> Option<f64> {
            let path = format!("/sys/devices/system/cpu/cpu0/cpufreq/{}", file);
            std::fs::read_to_string(path).ok()?.trim().parse::<f64>().ok()
        };
        let min = read_khz("cpuinfo_min_freq")?;
        let max = read_khz("cpuinfo_max_freq")?;
        return Some((min / 1000.0, max / 1000.0));
    }
    #[cfg(not(target_os = "linux"))]
    None
}

/// Cumulative (read, written) bytes across whole block devices since boot.
pub(super) fn read_disk_io_counters() -> Option<(u64, u64)> {
    #[cfg(target_os = "linux")]
    {
        let content = std::fs::read_to_string("/proc/diskstats").ok()?;
        return Some(parse_diskstats(&content, |name| {
            std::path::Path::new("/sys/block").join(name).exists()
        }));
    }
    #[cfg(not(target_os = "linux"))]
    None
}

/// Open inet sockets (tcp, tcp6, udp, udp6). None when no table is readable.
pub(super) fn count_inet_connections() -> Option<u32> {
    #[cfg(target_os = "linux")]
    {
        let mut total = 0u32;
        let mut any = false;
        for table in ["tcp", "tcp6", "udp", "udp6"] {
            if let Ok(content) = std::fs::read_to_string(format!("/proc/net/{}", table)) {
                any = true;
                total = total.saturating_add(count_socket_rows(&content));
            }
        }
        return any.then_some(total);
    }
    #[cfg(not(target_os = "linux"))]
    None
}

const SECTOR_SIZE: u64 = 512;

/// Sums sectors read/written (fields 6 and 10) for devices accepted by `is_whole_disk`.
/// Loop and ram devices are skipped.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_diskstats(content: &str, is_whole_disk: impl Fn(&str) -> bool) -> (u64, u64) {
    let mut read = 0u64;
    let mut written = 0u64;
    for line in content.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 10 {
            continue;
        }
        let name = fields[2];
        if name.starts_with("loop") || name.starts_with("ram") || !is_whole_disk(name) {
            continue;
        }
        let sectors_read = fields[5].parse::<u64>().unwrap_or(0);
        let sectors_written = fields[9].parse::<u64>().unwrap_or(0);
        read = read.saturating_add(sectors_read.saturating_mul(SECTOR_SIZE));
        written = written.saturating_add(sectors_written.saturating_mul(SECTOR_SIZE));
    }
    (read, written)
}

/// Rows after the header line of a /proc/net socket table.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn count_socket_rows(content: &str) -> u32 {
    content
        .lines()
        .skip(1)
        .filter(|l| !l.trim().is_empty())
        .count()
        .min(u32::MAX as usize) as u32
}
