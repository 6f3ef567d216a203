//! Meshnet Routing: route computation over a snapshot of the mesh.
//!
//! This crate provides:
//! - [`Topology`]: the undirected weighted graph of active links.
//! - [`Router`]: lowest-cost routes (to one node or to all nodes) and
//!   flood visiting order.
//! - [`Route`]: an ordered path with its cost and hop count.
//! - [`Dispatcher`]: turns direct and SOS messages into deliveries.

pub mod broadcast;
pub mod dispatch;
pub mod error;
pub mod route;
pub mod router;
pub mod topology;

// Re-exports for convenience.
pub use broadcast::{flood_order, hop_distances};
pub use dispatch::{Delivery, DeliveryMode, DispatchPlan, Dispatcher};
pub use error::RoutingError;
pub use route::Route;
pub use router::{Router, RouterConfig};
pub use topology::Topology;
