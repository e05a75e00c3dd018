// Alert conditions (transient) and alert records (persisted)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::format_display_time;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Cpu,
    Memory,
    Disk,
}

impl AlertKind {
    pub const ALL: [AlertKind; 3] = [AlertKind::Cpu, AlertKind::Memory, AlertKind::Disk];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Cpu => "cpu",
            AlertKind::Memory => "memory",
            AlertKind::Disk => "disk",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cpu" => Ok(AlertKind::Cpu),
            "memory" => Ok(AlertKind::Memory),
            "disk" => Ok(AlertKind::Disk),
            other => Err(format!("unknown alert kind: {}", other)),
        }
    }
}

/// Ordered by urgency: `Info < Warning < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Severity::Info),
            "warning" => Ok(Severity::Warning),
            "critical" => Ok(Severity::Critical),
            other => Err(format!("unknown severity: {}", other)),
        }
    }
}

/// A threshold breach found by one evaluation. Never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertCondition {
    pub kind: AlertKind,
    pub message: String,
    pub severity: Severity,
    /// Capture time (Unix ms) of the reading that breached.
    pub detected_at: u64,
}

/// Durable alert record owned by the alert ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: i64,
    pub kind: AlertKind,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
    pub resolved: bool,
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Open-alert wire shape: `{id, type, message, severity, created_at}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertView {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: String,
    pub severity: Severity,
    pub created_at: String,
}

impl From<&Alert> for AlertView {
    fn from(a: &Alert) -> Self {
        Self {
            id: a.id,
            kind: a.kind,
            message: a.message.clone(),
            severity: a.severity,
            created_at: format_display_time(&a.created_at),
        }
    }
}

/// Audit wire shape, including resolution state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRecordView {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: String,
    pub severity: Severity,
    pub created_at: String,
    pub resolved: bool,
    pub resolved_at: Option<String>,
}

impl From<&Alert> for AlertRecordView {
    fn from(a: &Alert) -> Self {
        Self {
            id: a.id,
            kind: a.kind,
            message: a.message.clone(),
            severity: a.severity,
            created_at: format_display_time(&a.created_at),
            resolved: a.resolved,
            resolved_at: a.resolved_at.as_ref().map(format_display_time),
        }
    }
}
