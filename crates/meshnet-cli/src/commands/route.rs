//! `meshnet route`: Lowest-cost route between two nodes.

use clap::Args;

use crate::commands::describe;
use crate::context::Context;

#[derive(Args, Debug)]
pub struct RouteArgs {
    /// Source node id.
    pub from: String,
    /// Destination node id.
    pub to: String,
}

pub fn run(ctx: &Context, args: &RouteArgs) -> anyhow::Result<()> {
    let topology = ctx.topology()?;
    let route = ctx.router().shortest_path(&topology, &args.from, &args.to);

    if ctx.json {
        return ctx.print_json(&route);
    }

    match route {
        Some(route) => println!("{}", describe(&route)),
        None => println!("No route from {} to {}", args.from, args.to),
    }
    Ok(())
}
