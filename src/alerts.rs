// Threshold evaluation: readings -> alert conditions. Pure; no state between calls.

use serde::Deserialize;

use crate::error::MonitorError;
use crate::models::{AlertCondition, AlertKind, CpuStats, DiskStats, MemoryStats, Severity};

/// Breach levels for one kind, in percent. A reading breaches when strictly above.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold {
    pub warning: f64,
    pub critical: f64,
}

impl Threshold {
    pub const fn new(warning: f64, critical: f64) -> Self {
        Self { warning, critical }
    }

    pub fn validate(&self, kind: AlertKind) -> Result<(), MonitorError> {
        for (name, value) in [("warning", self.warning), ("critical", self.critical)] {
            if !(0.0..=100.0).contains(&value) {
                return Err(MonitorError::InvalidThreshold {
                    kind,
                    reason: format!("{} must be within [0, 100], got {}", name, value),
                });
            }
        }
        if self.warning >= self.critical {
            return Err(MonitorError::InvalidThreshold {
                kind,
                reason: format!(
                    "warning ({}) must be below critical ({})",
                    self.warning, self.critical
                ),
            });
        }
        Ok(())
    }

    /// Highest severity breached by `percentage`, if any.
    pub fn classify(&self, percentage: f64) -> Option<Severity> {
        if percentage > self.critical {
            Some(Severity::Critical)
        } else if percentage > self.warning {
            Some(Severity::Warning)
        } else {
            None
        }
    }
}

/// Canonical threshold table. `[alerts.<kind>]` overrides either level of any kind;
/// a level left out keeps that kind's default.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "ThresholdOverrides")]
pub struct AlertThresholds {
    pub cpu: Threshold,
    pub memory: Threshold,
    pub disk: Threshold,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            cpu: Threshold::new(60.0, 85.0),
            memory: Threshold::new(70.0, 90.0),
            disk: Threshold::new(80.0, 95.0),
        }
    }
}

impl AlertThresholds {
    pub fn for_kind(&self, kind: AlertKind) -> Threshold {
        match kind {
            AlertKind::Cpu => self.cpu,
            AlertKind::Memory => self.memory,
            AlertKind::Disk => self.disk,
        }
    }

    pub fn validate(&self) -> Result<(), MonitorError> {
        AlertKind::ALL
            .iter()
            .try_for_each(|&kind| self.for_kind(kind).validate(kind))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct LevelOverride {
    warning: Option<f64>,
    critical: Option<f64>,
}

impl LevelOverride {
    fn apply(&self, base: Threshold) -> Threshold {
        Threshold::new(
            self.warning.unwrap_or(base.warning),
            self.critical.unwrap_or(base.critical),
        )
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ThresholdOverrides {
    cpu: LevelOverride,
    memory: LevelOverride,
    disk: LevelOverride,
}

impl From<ThresholdOverrides> for AlertThresholds {
    fn from(overrides: ThresholdOverrides) -> Self {
        let defaults = AlertThresholds::default();
        Self {
            cpu: overrides.cpu.apply(defaults.cpu),
            memory: overrides.memory.apply(defaults.memory),
            disk: overrides.disk.apply(defaults.disk),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub percentage: f64,
    pub captured_at: u64,
}

/// Usage percentages to evaluate. Kinds left empty are skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Readings {
    pub cpu: Option<Reading>,
    pub memory: Option<Reading>,
    pub disk: Option<Reading>,
}

impl Readings {
    pub fn with_cpu(mut self, cpu: &CpuStats) -> Self {
        self.cpu = Some(Reading {
            percentage: cpu.percentage,
            captured_at: cpu.captured_at,
        });
        self
    }

    pub fn with_memory(mut self, memory: &MemoryStats) -> Self {
        self.memory = Some(Reading {
            percentage: memory.percentage,
            captured_at: memory.captured_at,
        });
        self
    }

    pub fn with_disk(mut self, disk: &DiskStats) -> Self {
        self.disk = Some(Reading {
            percentage: disk.percentage,
            captured_at: disk.captured_at,
        });
        self
    }

    pub fn get(&self, kind: AlertKind) -> Option<Reading> {
        match kind {
            AlertKind::Cpu => self.cpu,
            AlertKind::Memory => self.memory,
            AlertKind::Disk => self.disk,
        }
    }
}

/// At most one condition per kind; critical takes precedence over warning.
pub fn evaluate(readings: &Readings, thresholds: &AlertThresholds) -> Vec<AlertCondition> {
    AlertKind::ALL
        .iter()
        .filter_map(|&kind| {
            let reading = readings.get(kind)?;
            let severity = thresholds.for_kind(kind).classify(reading.percentage)?;
            Some(AlertCondition {
                kind,
                message: message(kind, severity, reading.percentage),
                severity,
                detected_at: reading.captured_at,
            })
        })
        .collect()
}

fn message(kind: AlertKind, severity: Severity, percentage: f64) -> String {
    let critical = severity == Severity::Critical;
    match kind {
        AlertKind::Cpu if critical => format!("High CPU usage: {:.1}%", percentage),
        AlertKind::Cpu => format!("Moderate CPU usage: {:.1}%", percentage),
        AlertKind::Memory if critical => format!("High memory usage: {:.1}%", percentage),
        AlertKind::Memory => format!("Moderate memory usage: {:.1}%", percentage),
        AlertKind::Disk if critical => format!("Low disk space: {:.1}% used", percentage),
        AlertKind::Disk => format!("Disk space getting low: {:.1}% used", percentage),
    }
}
