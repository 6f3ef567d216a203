//! Meshnet Core: node and link records, the live state owner, and
//! configuration shared by the routing engine and the CLI.

pub mod config;
pub mod error;
pub mod message;
pub mod state;
pub mod types;

pub use config::{LoggingConfig, MeshConfig, RoutingConfig, SearchStrategy, SnapshotConfig};
pub use error::CoreError;
pub use message::Message;
pub use state::NetworkState;
pub use types::{edge_weight, Link, Node, Snapshot};
