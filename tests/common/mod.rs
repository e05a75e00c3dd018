// Shared test helpers: a fixed-reading metric provider and a temp-file alert ledger
#![allow(dead_code)]

use hostwatch::alert_repo::AlertRepo;
use hostwatch::alerts::AlertThresholds;
use hostwatch::history::HistoryBuffer;
use hostwatch::metric_source::{MetricProvider, SourceMode};
use hostwatch::models::*;
use hostwatch::monitor::Monitor;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const GB: u64 = 1_000_000_000;

/// Raw counts the fixed provider reports. Percentages are derived from them.
#[derive(Debug, Clone, Copy)]
pub struct Levels {
    pub cpu: f64,
    pub memory_total: u64,
    pub memory_available: u64,
    pub disk_total: u64,
    pub disk_free: u64,
}

impl Levels {
    /// 10% CPU, 25% memory, 20% disk: below every default threshold.
    pub fn idle() -> Self {
        Self {
            cpu: 10.0,
            memory_total: 16 * GB,
            memory_available: 12 * GB,
            disk_total: 500 * GB,
            disk_free: 400 * GB,
        }
    }
}

pub struct FixedProvider {
    levels: Mutex<Levels>,
}

impl FixedProvider {
    pub fn new(levels: Levels) -> Self {
        Self {
            levels: Mutex::new(levels),
        }
    }

    pub fn set(&self, f: impl FnOnce(&mut Levels)) {
        let mut levels = self.levels.lock().unwrap();
        f(&mut *levels);
    }

    fn levels(&self) -> Levels {
        *self.levels.lock().unwrap()
    }
}

impl MetricProvider for FixedProvider {
    fn cpu(&self) -> CpuStats {
        CpuStats {
            percentage: self.levels().cpu,
            cores: 4,
            frequency: None,
            load_avg: None,
            source: DataSource::Live,
            captured_at: now_millis(),
        }
    }

    fn memory(&self) -> MemoryStats {
        let l = self.levels();
        MemoryStats::from_counts(
            l.memory_total,
            l.memory_available,
            0,
            0,
            DataSource::Live,
            now_millis(),
        )
    }

    fn disk(&self) -> DiskStats {
        let l = self.levels();
        DiskStats::from_counts("/", l.disk_total, l.disk_free, 0, 0, DataSource::Live, now_millis())
    }

    fn network(&self) -> NetworkStats {
        NetworkStats {
            bytes_sent: 1_000,
            bytes_recv: 2_000,
            packets_sent: 10,
            packets_recv: 20,
            connections: 3,
            upload_speed: 100.0,
            download_speed: 200.0,
            source: DataSource::Live,
            captured_at: now_millis(),
        }
    }

    fn processes(&self) -> ProcessList {
        let entries = (0..3)
            .map(|i| ProcessEntry {
                pid: 100 + i,
                name: format!("proc{}", i),
                cpu_percent: i as f64 * 10.0,
                memory_percent: 1.0,
                status: "running".into(),
            })
            .collect();
        ProcessList::top(entries, DataSource::Live, now_millis())
    }

    fn system_info(&self) -> SystemInfo {
        let now = chrono::Utc::now();
        SystemInfo::from_boot(
            (now.timestamp() - 3_600) as u64,
            now,
            DataSource::Live,
        )
    }

    fn mode(&self) -> SourceMode {
        SourceMode::Capable
    }
}

/// Opens an initialised ledger in a fresh temp dir. Keep the `TempDir` alive.
pub async fn temp_repo() -> (Arc<AlertRepo>, TempDir) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("alerts.db");
    let repo = AlertRepo::connect(path.to_str().unwrap(), 4).await.unwrap();
    repo.init().await.unwrap();
    (Arc::new(repo), dir)
}

pub async fn test_monitor(provider: Arc<FixedProvider>) -> (Arc<Monitor>, TempDir) {
    let (repo, dir) = temp_repo().await;
    let source: Arc<dyn MetricProvider> = provider;
    let monitor = Monitor::new(
        source,
        AlertThresholds::default(),
        repo,
        Arc::new(HistoryBuffer::new(16)),
    );
    (Arc::new(monitor), dir)
}
