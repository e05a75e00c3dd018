// Synthetic generator: plausible, bounded, internally consistent snapshots.
// Used when live introspection is unavailable or a single live read fails.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};

use super::{MetricProvider, SourceMode};
use crate::models::*;

const GIB: u64 = 1024 * 1024 * 1024;
const SECS_PER_DAY: u64 = 86_400;

const PROCESS_NAMES: [&str; 10] = [
    "chrome", "firefox", "node", "python3", "code", "sshd", "systemd", "dockerd", "mysqld", "nginx",
];
const PROCESS_STATUSES: [&str; 3] = ["running", "sleeping", "idle"];

struct SyntheticState {
    rng: StdRng,
    disk_read: u64,
    disk_written: u64,
    bytes_sent: u64,
    bytes_recv: u64,
    packets_sent: u64,
    packets_recv: u64,
    boot_timestamp: u64,
}

pub struct SyntheticSource {
    state: Mutex<SyntheticState>,
    disk_mount: String,
}

impl SyntheticSource {
    /// A fixed `seed` gives a reproducible sequence of readings.
    pub fn new(seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let now_secs = Utc::now().timestamp().max(0) as u64;
        let state = SyntheticState {
            disk_read: rng.gen_range(1_000_000_000..=5_000_000_000),
            disk_written: rng.gen_range(500_000_000..=2_000_000_000),
            bytes_sent: rng.gen_range(1_000_000_000..=10_000_000_000),
            bytes_recv: rng.gen_range(2_000_000_000..=20_000_000_000),
            packets_sent: rng.gen_range(1_000_000..=10_000_000),
            packets_recv: rng.gen_range(2_000_000..=20_000_000),
            boot_timestamp: now_secs.saturating_sub(rng.gen_range(1..=30) * SECS_PER_DAY),
            rng,
        };
        Self {
            state: Mutex::new(state),
            disk_mount: "/".into(),
        }
    }

    /// Mount point reported by synthetic disk snapshots.
    pub fn with_disk_mount(mut self, mount: impl Into<String>) -> Self {
        self.disk_mount = mount.into();
        self
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut SyntheticState) -> T) -> T {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

impl MetricProvider for SyntheticSource {
    fn cpu(&self) -> CpuStats {
        self.with_state(|s| {
            let cores = 8u32;
            let base = 30.0 + s.rng.gen_range(-10.0_f64..40.0);
            let percentage = (base + s.rng.gen_range(-5.0_f64..5.0)).clamp(0.0, 100.0);
            let load = base / 100.0 * cores as f64;
            CpuStats {
                percentage,
                cores,
                frequency: Some(CpuFrequency {
                    current: 2400.0 + s.rng.gen_range(-200.0_f64..200.0),
                    min: 800.0,
                    max: 3200.0,
                }),
                load_avg: Some([
                    load * s.rng.gen_range(0.9_f64..1.1),
                    load,
                    load * s.rng.gen_range(0.9_f64..1.1),
                ]),
                source: DataSource::Synthetic,
                captured_at: now_millis(),
            }
        })
    }

    fn memory(&self) -> MemoryStats {
        self.with_state(|s| {
            let total = 16 * GIB;
            let percentage = (40.0 + s.rng.gen_range(-15.0_f64..30.0)).clamp(0.0, 100.0);
            let used = (total as f64 * percentage / 100.0) as u64;
            MemoryStats::from_counts(
                total,
                total - used,
                4 * GIB,
                GIB / 5,
                DataSource::Synthetic,
                now_millis(),
            )
        })
    }

    fn disk(&self) -> DiskStats {
        self.with_state(|s| {
            let total = 500 * GIB;
            let percentage = (60.0 + s.rng.gen_range(-10.0_f64..20.0)).clamp(0.0, 100.0);
            let used = (total as f64 * percentage / 100.0) as u64;
            s.disk_read = s.disk_read.saturating_add(s.rng.gen_range(0..50_000_000));
            s.disk_written = s.disk_written.saturating_add(s.rng.gen_range(0..20_000_000));
            DiskStats::from_counts(
                self.disk_mount.as_str(),
                total,
                total - used,
                s.disk_read,
                s.disk_written,
                DataSource::Synthetic,
                now_millis(),
            )
        })
    }

    fn network(&self) -> NetworkStats {
        self.with_state(|s| {
            let upload_speed: f64 = s.rng.gen_range(1_000_000.0..10_000_000.0);
            let download_speed: f64 = s.rng.gen_range(2_000_000.0..20_000_000.0);
            // One second of traffic at the drawn rates, ~1.5 KB per packet.
            s.bytes_sent = s.bytes_sent.saturating_add(upload_speed as u64);
            s.bytes_recv = s.bytes_recv.saturating_add(download_speed as u64);
            s.packets_sent = s.packets_sent.saturating_add(upload_speed as u64 / 1500);
            s.packets_recv = s.packets_recv.saturating_add(download_speed as u64 / 1500);
            NetworkStats {
                bytes_sent: s.bytes_sent,
                bytes_recv: s.bytes_recv,
                packets_sent: s.packets_sent,
                packets_recv: s.packets_recv,
                connections: s.rng.gen_range(10..=50),
                upload_speed,
                download_speed,
                source: DataSource::Synthetic,
                captured_at: now_millis(),
            }
        })
    }

    fn processes(&self) -> ProcessList {
        self.with_state(|s| {
            let mut names = PROCESS_NAMES.to_vec();
            names.shuffle(&mut s.rng);
            let pids = rand::seq::index::sample(&mut s.rng, 9_000, names.len());
            let entries = names
                .into_iter()
                .zip(pids.into_iter())
                .map(|(name, pid)| ProcessEntry {
                    pid: 1_000 + pid as u32,
                    name: name.to_string(),
                    cpu_percent: s.rng.gen_range(0.1..25.0),
                    memory_percent: s.rng.gen_range(0.1..15.0),
                    status: PROCESS_STATUSES
                        .choose(&mut s.rng)
                        .copied()
                        .unwrap_or("running")
                        .to_string(),
                })
                .collect();
            ProcessList::top(entries, DataSource::Synthetic, now_millis())
        })
    }

    fn system_info(&self) -> SystemInfo {
        let boot = self.with_state(|s| s.boot_timestamp);
        SystemInfo::from_boot(boot, Utc::now(), DataSource::Synthetic)
    }

    fn mode(&self) -> SourceMode {
        SourceMode::Degraded
    }
}
