//! Meshnet CLI: route queries over a topology snapshot.
//!
//! Subcommands: init, route, paths, broadcast, send.

mod commands;
mod context;

use clap::{Parser, Subcommand};
use meshnet_core::SearchStrategy;
use std::path::PathBuf;

use context::Context;

/// Meshnet: route planning over a mesh of communication nodes.
#[derive(Parser, Debug)]
#[command(name = "meshnet", version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, global = true, default_value = "meshnet.toml")]
    config: PathBuf,

    /// Override the topology snapshot path.
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    /// Override the search strategy (scan, heap).
    #[arg(long, global = true)]
    strategy: Option<SearchStrategy>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default configuration and an example snapshot.
    Init(commands::init::InitArgs),
    /// Lowest-cost route between two nodes.
    Route(commands::route::RouteArgs),
    /// Lowest-cost routes from one node to every reachable node.
    Paths(commands::paths::PathsArgs),
    /// Flood visiting order from one node.
    Broadcast(commands::broadcast::BroadcastArgs),
    /// Plan delivery of a direct or SOS message.
    Send(commands::send::SendArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut ctx = Context::load(&cli.config)?;
    if let Some(path) = cli.snapshot {
        ctx.snapshot_path = path;
    }
    if let Some(strategy) = cli.strategy {
        ctx.config.routing.strategy = strategy;
    }
    if let Some(level) = cli.log_level {
        ctx.config.logging.level = level;
    }
    ctx.json = cli.json;

    context::init_tracing(&ctx.config.logging.level, ctx.config.json_logs());
    tracing::debug!(
        config = %cli.config.display(),
        snapshot = %ctx.snapshot_path.display(),
        strategy = %ctx.config.routing.strategy,
        "configuration loaded"
    );

    match &cli.command {
        Commands::Init(args) => commands::init::run(args),
        Commands::Route(args) => commands::route::run(&ctx, args),
        Commands::Paths(args) => commands::paths::run(&ctx, args),
        Commands::Broadcast(args) => commands::broadcast::run(&ctx, args),
        Commands::Send(args) => commands::send::run(&ctx, args),
    }
}
