use serde::{Deserialize, Serialize};

use crate::topology::Topology;

/// A complete route from source to destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RouteRecord")]
pub struct Route {
    /// Node ids from source to destination, both inclusive.
    path: Vec<String>,
    /// Sum of edge weights along the path.
    pub cost: f64,
    /// Number of links traversed (`path.len() - 1`).
    pub hops: usize,
}

/// Wire form of a [`Route`], checked before it becomes one.
#[derive(Deserialize)]
struct RouteRecord {
    path: Vec<String>,
    cost: f64,
    hops: usize,
}

impl TryFrom<RouteRecord> for Route {
    type Error = String;

    fn try_from(record: RouteRecord) -> Result<Self, Self::Error> {
        if record.path.is_empty() {
            return Err("route path is empty".to_string());
        }
        if record.hops != record.path.len() - 1 {
            return Err(format!(
                "route has {} hops but a path of {} nodes",
                record.hops,
                record.path.len()
            ));
        }
        Ok(Self {
            path: record.path,
            cost: record.cost,
            hops: record.hops,
        })
    }
}

impl Route {
    /// Create a route from an ordered, non-empty path and its total cost.
    pub fn new(path: Vec<String>, cost: f64) -> Self {
        let hops = path.len().saturating_sub(1);
        Self { path, cost, hops }
    }

    /// The zero-length route from a node to itself.
    pub fn to_self(id: impl Into<String>) -> Self {
        Self {
            path: vec![id.into()],
            cost: 0.0,
            hops: 0,
        }
    }

    /// The ordered node ids.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn source(&self) -> Option<&str> {
        self.path.first().map(String::as_str)
    }

    pub fn destination(&self) -> Option<&str> {
        self.path.last().map(String::as_str)
    }

    /// Number of hops in this route.
    pub fn hop_count(&self) -> usize {
        self.hops
    }

    /// Consecutive `(from, to)` pairs along the path.
    pub fn legs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.path
            .windows(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }

    /// Recompute the cost of this path against `topology`.
    ///
    /// Returns `None` if any leg is not an edge of the topology.
    pub fn cost_in(&self, topology: &Topology) -> Option<f64> {
        self.legs()
            .map(|(a, b)| topology.weight(a, b))
            .sum::<Option<f64>>()
    }
}
