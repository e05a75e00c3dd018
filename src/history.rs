// Bounded in-memory history of real samples, oldest evicted first.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use crate::models::{CpuStats, DiskStats, MemoryStats, NetworkStats};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryPoint {
    /// Unix ms.
    pub timestamp: u64,
    pub cpu: f64,
    pub ram: f64,
    pub disk: f64,
    pub upload: f64,
    pub download: f64,
}

impl HistoryPoint {
    pub fn from_stats(
        cpu: &CpuStats,
        ram: &MemoryStats,
        disk: &DiskStats,
        network: &NetworkStats,
    ) -> Self {
        Self {
            timestamp: cpu.captured_at,
            cpu: cpu.percentage,
            ram: ram.percentage,
            disk: disk.percentage,
            upload: network.upload_speed,
            download: network.download_speed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuePoint {
    pub timestamp: u64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatePoint {
    pub timestamp: u64,
    pub upload: f64,
    pub download: f64,
}

/// Chart-ready series, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySeries {
    pub cpu: Vec<ValuePoint>,
    pub ram: Vec<ValuePoint>,
    pub disk: Vec<ValuePoint>,
    pub network: Vec<RatePoint>,
}

pub struct HistoryBuffer {
    capacity: usize,
    points: Mutex<VecDeque<HistoryPoint>>,
}

impl HistoryBuffer {
    /// `capacity` is raised to 1 if 0.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            points: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn push(&self, point: HistoryPoint) {
        let mut points = self.points.lock().unwrap_or_else(PoisonError::into_inner);
        while points.len() >= self.capacity {
            points.pop_front();
        }
        points.push_back(point);
    }

    pub fn len(&self) -> usize {
        self.points
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn points(&self) -> Vec<HistoryPoint> {
        self.points
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .copied()
            .collect()
    }

    pub fn series(&self) -> HistorySeries {
        let points = self.points();
        let values = |f: fn(&HistoryPoint) -> f64| -> Vec<ValuePoint> {
            points
                .iter()
                .map(|p| ValuePoint {
                    timestamp: p.timestamp,
                    value: f(p),
                })
                .collect()
        };
        HistorySeries {
            cpu: values(|p| p.cpu),
            ram: values(|p| p.ram),
            disk: values(|p| p.disk),
            network: points
                .iter()
                .map(|p| RatePoint {
                    timestamp: p.timestamp,
                    upload: p.upload,
                    download: p.download,
                })
                .collect(),
        }
    }
}
