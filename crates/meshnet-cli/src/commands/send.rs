//! `meshnet send`: Plan delivery of a direct or SOS message.

use clap::Args;
use meshnet_core::Message;
use meshnet_routing::{DeliveryMode, Dispatcher};

use crate::context::Context;

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Sender node id.
    #[arg(short, long)]
    pub from: String,

    /// Recipient node id. Required unless --sos is set.
    #[arg(short, long, required_unless_present = "sos", conflicts_with = "sos")]
    pub to: Option<String>,

    /// Emergency broadcast to every online node.
    #[arg(long)]
    pub sos: bool,

    /// Message body.
    #[arg(short, long, default_value = "")]
    pub body: String,
}

pub fn run(ctx: &Context, args: &SendArgs) -> anyhow::Result<()> {
    let snapshot = ctx.snapshot()?;
    let dispatcher = Dispatcher::new(&snapshot, ctx.router());

    let message = match (&args.to, args.sos) {
        (_, true) => Message::sos(&args.from, &args.body),
        (Some(to), false) => Message::direct(&args.from, to, &args.body),
        (None, false) => anyhow::bail!("a recipient is required for non-SOS messages"),
    };

    let plan = dispatcher.plan(&message)?;

    if ctx.json {
        return ctx.print_json(&plan);
    }

    let mode = match plan.mode {
        DeliveryMode::Direct => "direct",
        DeliveryMode::Emergency => "SOS",
    };
    println!("Message {} ({})", plan.message_id, mode);
    for delivery in &plan.deliveries {
        println!(
            "  to {:<12} via {}  ({} hop{})",
            delivery.recipient,
            delivery.path.join(" -> "),
            delivery.hops,
            if delivery.hops == 1 { "" } else { "s" }
        );
    }
    Ok(())
}
