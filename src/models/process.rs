// Top processes by CPU

use serde::{Deserialize, Serialize, Serializer};

use super::DataSource;

pub const MAX_PROCESSES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessEntry {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub status: String,
}

/// Serializes as the bare entry array; provenance stays in-process.
#[derive(Debug, Clone)]
pub struct ProcessList {
    pub processes: Vec<ProcessEntry>,
    pub source: DataSource,
    pub captured_at: u64,
}

impl ProcessList {
    /// Sorts by descending CPU, keeps the top [`MAX_PROCESSES`] and clamps percentages.
    pub fn top(mut entries: Vec<ProcessEntry>, source: DataSource, captured_at: u64) -> Self {
        for e in &mut entries {
            e.cpu_percent = e.cpu_percent.clamp(0.0, 100.0);
            e.memory_percent = e.memory_percent.clamp(0.0, 100.0);
        }
        entries.sort_by(|a, b| b.cpu_percent.total_cmp(&a.cpu_percent));
        entries.truncate(MAX_PROCESSES);
        Self {
            processes: entries,
            source,
            captured_at,
        }
    }
}

impl Serialize for ProcessList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.processes.serialize(serializer)
    }
}
