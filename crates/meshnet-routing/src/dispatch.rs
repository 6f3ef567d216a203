//! Turning messages into deliveries.
//!
//! Point-to-point messages are stamped with the lowest-cost route from the
//! sender to the recipient. SOS messages skip routing altogether and are
//! handed to every online node except the sender as an independent one-hop
//! delivery. The SOS fan-out does not look at links and is unrelated to
//! [`crate::broadcast::flood_order`].

use meshnet_core::{Message, Snapshot};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::RoutingError;
use crate::route::Route;
use crate::router::Router;
use crate::topology::Topology;

/// How a message leaves the sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// Along the shortest path to a single recipient.
    Direct,
    /// One hop to every online node.
    Emergency,
}

/// One copy of a message on its way to one recipient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    pub recipient: String,
    /// Node ids from sender to recipient.
    pub path: Vec<String>,
    pub hops: usize,
    pub cost: f64,
}

impl Delivery {
    fn along(recipient: &str, route: Route) -> Self {
        Self {
            recipient: recipient.to_string(),
            path: route.path().to_vec(),
            hops: route.hops,
            cost: route.cost,
        }
    }

    fn one_hop(sender: &str, recipient: &str) -> Self {
        Self {
            recipient: recipient.to_string(),
            path: vec![sender.to_string(), recipient.to_string()],
            hops: 1,
            cost: 0.0,
        }
    }
}

/// Every delivery produced for one message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchPlan {
    pub message_id: Uuid,
    pub mode: DeliveryMode,
    pub deliveries: Vec<Delivery>,
}

/// Plans message delivery against one snapshot of the network.
pub struct Dispatcher<'a> {
    snapshot: &'a Snapshot,
    topology: Topology,
    router: Router,
}

impl<'a> Dispatcher<'a> {
    /// Build the topology for `snapshot` once; every plan reuses it.
    pub fn new(snapshot: &'a Snapshot, router: Router) -> Self {
        Self {
            snapshot,
            topology: Topology::from_snapshot(snapshot),
            router,
        }
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Work out who receives `message` and along which path.
    pub fn plan(&self, message: &Message) -> Result<DispatchPlan, RoutingError> {
        if self.snapshot.node(&message.sender).is_none() {
            return Err(RoutingError::UnknownSender(message.sender.clone()));
        }

        let plan = if message.sos {
            self.plan_emergency(message)?
        } else {
            self.plan_direct(message)?
        };

        info!(
            message = %plan.message_id,
            sender = %message.sender,
            mode = ?plan.mode,
            deliveries = plan.deliveries.len(),
            "message planned"
        );
        Ok(plan)
    }

    fn plan_direct(&self, message: &Message) -> Result<DispatchPlan, RoutingError> {
        let recipient = message
            .recipient
            .as_deref()
            .ok_or(RoutingError::MissingRecipient)?;

        let route = self
            .router
            .shortest_path(&self.topology, &message.sender, recipient)
            .ok_or_else(|| RoutingError::NoRouteFound {
                from: message.sender.clone(),
                to: recipient.to_string(),
            })?;

        Ok(DispatchPlan {
            message_id: message.id,
            mode: DeliveryMode::Direct,
            deliveries: vec![Delivery::along(recipient, route)],
        })
    }

    fn plan_emergency(&self, message: &Message) -> Result<DispatchPlan, RoutingError> {
        let mut recipients: Vec<&str> = self
            .snapshot
            .online_nodes()
            .map(|n| n.id.as_str())
            .filter(|id| *id != message.sender)
            .collect();
        // Snapshots loaded from disk keep file order.
        recipients.sort_unstable();
        recipients.dedup();
        let deliveries: Vec<Delivery> = recipients
            .into_iter()
            .map(|id| Delivery::one_hop(&message.sender, id))
            .collect();

        if deliveries.is_empty() {
            return Err(RoutingError::NoOnlineRecipients {
                sender: message.sender.clone(),
            });
        }
        debug!(sender = %message.sender, recipients = deliveries.len(), "sos fan-out");

        Ok(DispatchPlan {
            message_id: message.id,
            mode: DeliveryMode::Emergency,
            deliveries,
        })
    }
}
