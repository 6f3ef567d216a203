//! Shared state for every subcommand: resolved config and snapshot path.

use anyhow::Context as _;
use meshnet_core::{MeshConfig, Snapshot};
use meshnet_routing::{Router, RouterConfig, Topology};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

pub struct Context {
    pub config: MeshConfig,
    pub snapshot_path: PathBuf,
    pub json: bool,
}

impl Context {
    /// Load the config file (defaults if absent) and resolve the snapshot
    /// path relative to it.
    pub fn load(config_path: &Path) -> anyhow::Result<Self> {
        let config = MeshConfig::load(config_path)
            .with_context(|| format!("loading config {}", config_path.display()))?;
        let snapshot_path = config.snapshot_path(config_path);
        Ok(Self {
            config,
            snapshot_path,
            json: false,
        })
    }

    pub fn snapshot(&self) -> anyhow::Result<Snapshot> {
        let snapshot = Snapshot::load(&self.snapshot_path)
            .with_context(|| format!("loading snapshot {}", self.snapshot_path.display()))?;
        tracing::info!(
            nodes = snapshot.nodes.len(),
            links = snapshot.links.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }

    pub fn topology(&self) -> anyhow::Result<Topology> {
        Ok(Topology::from_snapshot(&self.snapshot()?))
    }

    pub fn router(&self) -> Router {
        Router::new(RouterConfig {
            strategy: self.config.routing.strategy,
        })
    }

    pub fn print_json<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

/// Install the global tracing subscriber. `RUST_LOG` overrides `level`.
/// Logs go to stderr so command output on stdout stays clean.
pub fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
