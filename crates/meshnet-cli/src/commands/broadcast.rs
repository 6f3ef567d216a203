//! `meshnet broadcast`: Flood visiting order from one node.

use clap::Args;
use meshnet_routing::hop_distances;
use serde::Serialize;

use crate::context::Context;

#[derive(Args, Debug)]
pub struct BroadcastArgs {
    /// Source node id.
    pub from: String,
}

#[derive(Serialize)]
struct Visit<'a> {
    node: &'a str,
    hop: usize,
}

pub fn run(ctx: &Context, args: &BroadcastArgs) -> anyhow::Result<()> {
    let topology = ctx.topology()?;
    let order = ctx.router().broadcast_order(&topology, &args.from);
    let hops = hop_distances(&topology, &args.from);

    let visits: Vec<Visit<'_>> = order
        .iter()
        .map(|id| Visit {
            node: id,
            hop: hops.get(id).copied().unwrap_or_default(),
        })
        .collect();

    if ctx.json {
        return ctx.print_json(&visits);
    }

    if visits.is_empty() {
        println!("{} is not in the topology", args.from);
        return Ok(());
    }

    println!("Flood from {}:", args.from);
    for (i, visit) in visits.iter().enumerate() {
        println!("  {:>3}. {:<12} hop {}", i + 1, visit.node, visit.hop);
    }
    Ok(())
}
