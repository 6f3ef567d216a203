use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::CoreError;

/// Routing cost of a link: `distance * 10 + latency / 10`.
///
/// This is the only metric the router compares. It is derived from the
/// link's two measurements every time a topology is built and never stored.
pub fn edge_weight(distance: f64, latency: f64) -> f64 {
    distance * 10.0 + latency / 10.0
}

fn default_true() -> bool {
    true
}

fn default_signal_strength() -> u8 {
    100
}

/// A communication node in the mesh.
///
/// Only `id` matters for routing. The remaining fields are display data
/// carried through for consumers, except `online`, which the emergency
/// fan-out reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique node identifier.
    pub id: String,
    /// Human readable name.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    /// Whether the node is currently reachable by the radio layer.
    #[serde(default = "default_true")]
    pub online: bool,
    /// Last reported signal strength in percent (0-100). Full until a
    /// reading says otherwise.
    #[serde(default = "default_signal_strength")]
    pub signal_strength: u8,
}

impl Node {
    /// Create an online node named after its id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            latitude: 0.0,
            longitude: 0.0,
            online: true,
            signal_strength: 100,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn at(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }

    pub fn offline(mut self) -> Self {
        self.online = false;
        self
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() || self.name == self.id {
            write!(f, "{}", self.id)
        } else {
            write!(f, "{} ({})", self.name, self.id)
        }
    }
}

/// An undirected point-to-point connection between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Unique link identifier.
    pub id: String,
    /// One endpoint. Direction carries no meaning.
    pub from: String,
    /// The other endpoint.
    pub to: String,
    /// Physical distance, non-negative.
    pub distance: f64,
    /// Observed latency, non-negative.
    pub latency: f64,
    /// Inactive links are left out of the topology entirely.
    #[serde(default = "default_true")]
    pub active: bool,
}

impl Link {
    /// Create an active link.
    pub fn new(
        id: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        distance: f64,
        latency: f64,
    ) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            distance,
            latency,
            active: true,
        }
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// The routing cost of this link. See [`edge_weight`].
    pub fn weight(&self) -> f64 {
        edge_weight(self.distance, self.latency)
    }

    /// Returns true if `node_id` is one of the two endpoints.
    pub fn touches(&self, node_id: &str) -> bool {
        self.from == node_id || self.to == node_id
    }

    /// Validate that the measurements can be used as a shortest-path cost.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.from.is_empty() || self.to.is_empty() {
            return Err(CoreError::InvalidLink {
                id: self.id.clone(),
                reason: "endpoint id is empty".into(),
            });
        }
        if !self.distance.is_finite() || self.distance < 0.0 {
            return Err(CoreError::InvalidLink {
                id: self.id.clone(),
                reason: format!("distance must be finite and non-negative: {}", self.distance),
            });
        }
        if !self.latency.is_finite() || self.latency < 0.0 {
            return Err(CoreError::InvalidLink {
                id: self.id.clone(),
                reason: format!("latency must be finite and non-negative: {}", self.latency),
            });
        }
        Ok(())
    }
}

/// An immutable copy of the node and link records at one instant.
///
/// Every topology is built from a snapshot; the snapshot never observes
/// later mutation of the store it was taken from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Snapshot {
    pub fn new(nodes: Vec<Node>, links: Vec<Link>) -> Self {
        Self { nodes, links }
    }

    /// Decode a snapshot from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a JSON snapshot from disk.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Write the snapshot to disk as JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), CoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Nodes whose `online` flag is set, in snapshot order. Callers that
    /// need a stable order sort by id themselves.
    pub fn online_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.online)
    }
}
