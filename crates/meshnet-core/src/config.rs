//! Configuration loading and management.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Full meshnet configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MeshConfig {
    /// Route search settings.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Where the topology snapshot is read from.
    #[serde(default)]
    pub snapshot: SnapshotConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How the shortest-path search picks the next vertex to settle.
///
/// Both strategies settle vertices in the same order (lowest tentative
/// cost, then lowest node id) and return identical routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStrategy {
    /// Linear scan over unsettled vertices, O(V²).
    #[default]
    Scan,
    /// Binary heap with lazy deletion, O((V + E) log V).
    Heap,
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStrategy::Scan => write!(f, "scan"),
            SearchStrategy::Heap => write!(f, "heap"),
        }
    }
}

impl FromStr for SearchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "scan" => Ok(SearchStrategy::Scan),
            "heap" => Ok(SearchStrategy::Heap),
            other => Err(format!("unknown search strategy: {other} (expected scan or heap)")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RoutingConfig {
    /// Search strategy for shortest paths.
    #[serde(default)]
    pub strategy: SearchStrategy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Path to the JSON topology snapshot.
    #[serde(default = "default_snapshot_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("topology.json")
}
fn default_log_level() -> String {
    "info".into()
}
fn default_log_format() -> String {
    "text".into()
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: default_snapshot_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl MeshConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: MeshConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save the current config to a TOML file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Snapshot path resolved against the directory holding the config file.
    pub fn snapshot_path(&self, config_path: &Path) -> PathBuf {
        if self.snapshot.path.is_absolute() {
            return self.snapshot.path.clone();
        }
        match config_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.join(&self.snapshot.path),
            _ => self.snapshot.path.clone(),
        }
    }

    pub fn json_logs(&self) -> bool {
        self.logging.format.eq_ignore_ascii_case("json")
    }
}
