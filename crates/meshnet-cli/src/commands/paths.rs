//! `meshnet paths`: Lowest-cost routes from one node to every reachable node.

use clap::Args;

use crate::commands::describe;
use crate::context::Context;

#[derive(Args, Debug)]
pub struct PathsArgs {
    /// Source node id.
    pub from: String,
}

pub fn run(ctx: &Context, args: &PathsArgs) -> anyhow::Result<()> {
    let topology = ctx.topology()?;
    let routes = ctx.router().all_shortest_paths(&topology, &args.from);

    if ctx.json {
        return ctx.print_json(&routes);
    }

    if routes.is_empty() {
        println!("Nothing reachable from {}", args.from);
        return Ok(());
    }

    println!("Routes from {}:", args.from);
    for (destination, route) in &routes {
        println!("  {:<12} {}", destination, describe(route));
    }
    let unreachable: Vec<&str> = topology
        .nodes()
        .filter(|n| *n != args.from && !routes.contains_key(*n))
        .collect();
    if !unreachable.is_empty() {
        println!("Unreachable: {}", unreachable.join(", "));
    }
    Ok(())
}
