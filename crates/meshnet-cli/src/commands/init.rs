//! `meshnet init`: Write a default configuration and an example snapshot.

use clap::Args;
use meshnet_core::{Link, MeshConfig, Node, Snapshot};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (defaults to current directory).
    #[arg(default_value = ".")]
    pub dir: PathBuf,
}

/// Four relays around a harbour; the east link is down.
fn example_snapshot() -> Snapshot {
    Snapshot::new(
        vec![
            Node::new("n1").with_name("Harbour").at(43.6532, -79.3832),
            Node::new("n2").with_name("Lighthouse").at(43.6205, -79.3790),
            Node::new("n3").with_name("Ridge").at(43.6780, -79.4100),
            Node::new("n4").with_name("Market").at(43.6480, -79.3600),
        ],
        vec![
            Link::new("n1-n2", "n1", "n2", 1.2, 40.0),
            Link::new("n2-n3", "n2", "n3", 2.5, 85.0),
            Link::new("n1-n3", "n1", "n3", 4.1, 120.0),
            Link::new("n3-n4", "n3", "n4", 1.8, 60.0),
            Link::new("n1-n4", "n1", "n4", 0.9, 30.0).inactive(),
        ],
    )
}

pub fn run(args: &InitArgs) -> anyhow::Result<()> {
    let config_path = args.dir.join("meshnet.toml");

    if config_path.exists() {
        anyhow::bail!("configuration file already exists at {}", config_path.display());
    }

    std::fs::create_dir_all(&args.dir)?;

    let config = MeshConfig::default();
    config.save(&config_path)?;

    let snapshot_path = config.snapshot_path(&config_path);
    if snapshot_path.exists() {
        tracing::warn!(path = %snapshot_path.display(), "snapshot exists, leaving it untouched");
    } else {
        example_snapshot().save(&snapshot_path)?;
    }

    println!("Initialized meshnet at {}", config_path.display());
    println!("Edit {} to describe your mesh.", snapshot_path.display());
    println!("Run 'meshnet route n1 n4' to compute a route.");

    Ok(())
}
