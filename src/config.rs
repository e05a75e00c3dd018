use serde::Deserialize;

use crate::alerts::AlertThresholds;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub monitoring: MonitoringConfig,
    #[serde(default)]
    pub alerts: AlertThresholds,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file holding the alert ledger.
    pub path: String,
    pub max_pool_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    /// Interval of the history sampler.
    pub sample_interval_ms: u64,
    /// How often to log app stats (history size, source mode) at INFO level.
    pub stats_log_interval_secs: u64,
    /// Max points kept in the in-memory history ring buffer.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    /// Mount point reported by the disk snapshot.
    #[serde(default = "default_disk_mount")]
    pub disk_mount: String,
    /// Skip the live probe and serve synthetic data only.
    #[serde(default)]
    pub force_synthetic: bool,
    /// Seed for the synthetic generator; random when unset.
    #[serde(default)]
    pub synthetic_seed: Option<u64>,
}

fn default_history_capacity() -> usize {
    360
}

fn default_disk_mount() -> String {
    "/".into()
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: 5_000,
            stats_log_interval_secs: 300,
            history_capacity: default_history_capacity(),
            disk_mount: default_disk_mount(),
            force_synthetic: false,
            synthetic_seed: None,
        }
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("read config {}: {}", path, e))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.database.path.is_empty(),
            "database.path must be non-empty"
        );
        anyhow::ensure!(
            self.database.max_pool_size > 0,
            "database.max_pool_size must be > 0, got {}",
            self.database.max_pool_size
        );
        anyhow::ensure!(
            self.monitoring.sample_interval_ms > 0,
            "monitoring.sample_interval_ms must be > 0, got {}",
            self.monitoring.sample_interval_ms
        );
        anyhow::ensure!(
            self.monitoring.stats_log_interval_secs > 0,
            "monitoring.stats_log_interval_secs must be > 0, got {}",
            self.monitoring.stats_log_interval_secs
        );
        anyhow::ensure!(
            self.monitoring.history_capacity > 0,
            "monitoring.history_capacity must be > 0, got {}",
            self.monitoring.history_capacity
        );
        anyhow::ensure!(
            !self.monitoring.disk_mount.is_empty(),
            "monitoring.disk_mount must be non-empty"
        );
        self.alerts.validate()?;
        Ok(())
    }
}
