//! Flood traversal over the topology.
//!
//! A flood ignores link weights: every active link costs one hop. The order
//! produced here is a diagnostic view of how a broadcast would spread. It is
//! not what the dispatcher sends for emergency messages, which is a flat
//! one-hop fan-out (see [`crate::dispatch`]).

use std::collections::{BTreeMap, HashSet, VecDeque};

use tracing::debug;

use crate::topology::Topology;

/// Breadth-first visiting order from `source`.
///
/// Each reachable node appears exactly once, in non-decreasing hop distance
/// from the source. Nodes at the same distance appear in the order their
/// parents were visited, and siblings in ascending id order. An unknown
/// source yields an empty sequence.
pub fn flood_order(topology: &Topology, source: &str) -> Vec<String> {
    if !topology.contains(source) {
        debug!(source, "flood source is not in the topology");
        return Vec::new();
    }

    let mut visited: HashSet<&str> = HashSet::with_capacity(topology.node_count());
    let mut order: Vec<String> = Vec::with_capacity(topology.node_count());
    let mut frontier: VecDeque<&str> = VecDeque::new();
    frontier.push_back(source);

    while let Some(current) = frontier.pop_front() {
        // A node can be queued by several parents before it is visited.
        if !visited.insert(current) {
            continue;
        }
        order.push(current.to_string());

        for neighbor in topology.neighbors(current) {
            if !visited.contains(neighbor) {
                frontier.push_back(neighbor);
            }
        }
    }

    order
}

/// Hop distance from `source` to every reachable node, source included at 0.
pub fn hop_distances(topology: &Topology, source: &str) -> BTreeMap<String, usize> {
    let mut distances: BTreeMap<String, usize> = BTreeMap::new();
    if !topology.contains(source) {
        return distances;
    }

    let mut frontier: VecDeque<(&str, usize)> = VecDeque::new();
    distances.insert(source.to_string(), 0);
    frontier.push_back((source, 0));

    while let Some((current, depth)) = frontier.pop_front() {
        for neighbor in topology.neighbors(current) {
            if !distances.contains_key(neighbor) {
                distances.insert(neighbor.to_string(), depth + 1);
                frontier.push_back((neighbor, depth + 1));
            }
        }
    }

    distances
}
