// Live host readings via sysinfo. Every call is blocking and may fail.

use chrono::Utc;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;
use sysinfo::{Disks, Networks, ProcessStatus, ProcessesToUpdate, System};
use tracing::instrument;

use super::linux;
use crate::error::MonitorError;
use crate::models::*;

struct CpuSample {
    refreshed_at: Instant,
    usage: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default)]
struct NetworkCounters {
    bytes_sent: u64,
    bytes_recv: u64,
    packets_sent: u64,
    packets_recv: u64,
}

pub(super) struct LiveSource {
    sys: Mutex<System>,
    disks: Mutex<Disks>,
    networks: Mutex<Networks>,
    disk_mount: String,
    cpu_sample: Mutex<CpuSample>,
    last_network: Mutex<Option<(NetworkCounters, Instant)>>,
}

fn lock<'a, T>(
    m: &'a Mutex<T>,
    operation: &'static str,
) -> Result<MutexGuard<'a, T>, MonitorError> {
    m.lock()
        .map_err(|e| MonitorError::transient(operation, format!("sysinfo lock poisoned: {}", e)))
}

impl LiveSource {
    /// Capability probe: fails when the platform or host cannot report basic CPU/memory data.
    pub(super) fn probe(disk_mount: &str) -> Result<Self, MonitorError> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(MonitorError::SourceUnavailable(format!(
                "sysinfo does not support {}",
                std::env::consts::OS
            )));
        }
        let mut sys = System::new_all();
        sys.refresh_all();
        if sys.cpus().is_empty() {
            return Err(MonitorError::SourceUnavailable("no CPUs reported".into()));
        }
        if sys.total_memory() == 0 {
            return Err(MonitorError::SourceUnavailable(
                "total memory reported as 0".into(),
            ));
        }
        let disks = Disks::new_with_refreshed_list();
        let networks = Networks::new_with_refreshed_list();
        Ok(Self {
            sys: Mutex::new(sys),
            disks: Mutex::new(disks),
            networks: Mutex::new(networks),
            disk_mount: disk_mount.to_string(),
            cpu_sample: Mutex::new(CpuSample {
                refreshed_at: Instant::now(),
                usage: None,
            }),
            last_network: Mutex::new(None),
        })
    }

    /// Reuses the last usage figure when called again within sysinfo's minimum CPU update
    /// interval; otherwise refreshes (sleeping out the interval on the very first read).
    #[instrument(skip(self), fields(source = "live", operation = "cpu"))]
    pub(super) fn cpu(&self) -> Result<CpuStats, MonitorError> {
        let mut sys = lock(&self.sys, "cpu")?;
        let mut sample = lock(&self.cpu_sample, "cpu")?;

        let elapsed = sample.refreshed_at.elapsed();
        let percentage = match sample.usage {
            Some(usage) if elapsed < sysinfo::MINIMUM_CPU_UPDATE_INTERVAL => usage,
            _ => {
                if elapsed < sysinfo::MINIMUM_CPU_UPDATE_INTERVAL {
                    std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL - elapsed);
                }
                sys.refresh_cpu_all();
                let usage = (sys.global_cpu_usage() as f64).clamp(0.0, 100.0);
                *sample = CpuSample {
                    refreshed_at: Instant::now(),
                    usage: Some(usage),
                };
                usage
            }
        };

        let frequency = sys
            .cpus()
            .first()
            .map(|c| c.frequency())
            .filter(|&mhz| mhz > 0)
            .map(|mhz| {
                let (min, max) = linux::read_cpu_freq_bounds_mhz().unwrap_or((0.0, 0.0));
                CpuFrequency {
                    current: mhz as f64,
                    min,
                    max,
                }
            });

        Ok(CpuStats {
            percentage,
            cores: sys.cpus().len() as u32,
            frequency,
            load_avg: load_average(),
            source: DataSource::Live,
            captured_at: now_millis(),
        })
    }

    #[instrument(skip(self), fields(source = "live", operation = "memory"))]
    pub(super) fn memory(&self) -> Result<MemoryStats, MonitorError> {
        let mut sys = lock(&self.sys, "memory")?;
        sys.refresh_memory();
        let total = sys.total_memory();
        if total == 0 {
            return Err(MonitorError::transient("memory", "total memory reported as 0"));
        }
        Ok(MemoryStats::from_counts(
            total,
            sys.available_memory(),
            sys.total_swap(),
            sys.used_swap(),
            DataSource::Live,
            now_millis(),
        ))
    }

    #[instrument(skip(self), fields(source = "live", operation = "disk", mount = %self.disk_mount))]
    pub(super) fn disk(&self) -> Result<DiskStats, MonitorError> {
        let mut disks = lock(&self.disks, "disk")?;
        disks.refresh(false);
        let mount = Path::new(&self.disk_mount);
        let disk = disks
            .list()
            .iter()
            .find(|d| d.mount_point() == mount)
            .ok_or_else(|| {
                MonitorError::transient("disk", format!("no disk mounted at {}", self.disk_mount))
            })?;
        if disk.total_space() == 0 {
            return Err(MonitorError::transient(
                "disk",
                format!("{} reports zero capacity", self.disk_mount),
            ));
        }
        let (read_bytes, write_bytes) = linux::read_disk_io_counters().unwrap_or((0, 0));
        Ok(DiskStats::from_counts(
            self.disk_mount.clone(),
            disk.total_space(),
            disk.available_space(),
            read_bytes,
            write_bytes,
            DataSource::Live,
            now_millis(),
        ))
    }

    /// Rates are the counter delta against the previous live sample; 0 on the first one.
    #[instrument(skip(self), fields(source = "live", operation = "network"))]
    pub(super) fn network(&self) -> Result<NetworkStats, MonitorError> {
        let counters = {
            let mut networks = lock(&self.networks, "network")?;
            networks.refresh(true);
            networks
                .list()
                .values()
                .fold(NetworkCounters::default(), |acc, data| NetworkCounters {
                    bytes_sent: acc.bytes_sent.saturating_add(data.total_transmitted()),
                    bytes_recv: acc.bytes_recv.saturating_add(data.total_received()),
                    packets_sent: acc
                        .packets_sent
                        .saturating_add(data.total_packets_transmitted()),
                    packets_recv: acc
                        .packets_recv
                        .saturating_add(data.total_packets_received()),
                })
        };

        let now = Instant::now();
        let (upload_speed, download_speed) = {
            let mut last = lock(&self.last_network, "network")?;
            let rates = match *last {
                Some((prev, prev_ts)) => {
                    let dt_secs = now.duration_since(prev_ts).as_secs_f64();
                    if dt_secs > 0.0 {
                        (
                            counters.bytes_sent.saturating_sub(prev.bytes_sent) as f64 / dt_secs,
                            counters.bytes_recv.saturating_sub(prev.bytes_recv) as f64 / dt_secs,
                        )
                    } else {
                        (0.0, 0.0)
                    }
                }
                None => (0.0, 0.0),
            };
            *last = Some((counters, now));
            rates
        };

        Ok(NetworkStats {
            bytes_sent: counters.bytes_sent,
            bytes_recv: counters.bytes_recv,
            packets_sent: counters.packets_sent,
            packets_recv: counters.packets_recv,
            connections: linux::count_inet_connections().unwrap_or(0),
            upload_speed,
            download_speed,
            source: DataSource::Live,
            captured_at: now_millis(),
        })
    }

    #[instrument(skip(self), fields(source = "live", operation = "processes"))]
    pub(super) fn processes(&self) -> Result<ProcessList, MonitorError> {
        let mut sys = lock(&self.sys, "processes")?;
        sys.refresh_memory();
        sys.refresh_processes(ProcessesToUpdate::All, true);
        let total_memory = sys.total_memory();
        let entries: Vec<ProcessEntry> = sys
            .processes()
            .values()
            .map(|p| ProcessEntry {
                pid: p.pid().as_u32(),
                name: p.name().to_string_lossy().into_owned(),
                cpu_percent: p.cpu_usage() as f64,
                memory_percent: percent_of(p.memory(), total_memory),
                status: status_label(p.status()),
            })
            .collect();
        if entries.is_empty() {
            return Err(MonitorError::transient("processes", "no processes visible"));
        }
        Ok(ProcessList::top(entries, DataSource::Live, now_millis()))
    }

    #[instrument(skip(self), fields(source = "live", operation = "system_info"))]
    pub(super) fn system_info(&self) -> Result<SystemInfo, MonitorError> {
        let boot = System::boot_time();
        if boot == 0 {
            return Err(MonitorError::transient("system_info", "boot time unavailable"));
        }
        Ok(SystemInfo::from_boot(boot, Utc::now(), DataSource::Live))
    }
}

#[cfg(unix)]
fn load_average() -> Option<[f64; 3]> {
    let la = System::load_average();
    Some([la.one, la.five, la.fifteen])
}

#[cfg(not(unix))]
fn load_average() -> Option<[f64; 3]> {
    None
}

fn status_label(status: ProcessStatus) -> String {
    match status {
        ProcessStatus::Run => "running".into(),
        ProcessStatus::Sleep => "sleeping".into(),
        ProcessStatus::Idle => "idle".into(),
        ProcessStatus::Stop => "stopped".into(),
        ProcessStatus::Zombie => "zombie".into(),
        other => other.to_string().to_lowercase(),
    }
}
