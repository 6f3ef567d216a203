use std::collections::BTreeMap;

use meshnet_core::{Link, Node, Snapshot};
use tracing::{debug, warn};

/// Undirected weighted graph of the active mesh.
///
/// Maps every node id to its neighbors and the cost of the link to each.
/// Both maps are ordered by id, so neighbor iteration (and therefore flood
/// order and shortest-path tie-breaking) is reproducible across runs.
///
/// A topology is an immutable snapshot: it is built once from node and link
/// records and never changes afterwards. It is safe to share between
/// threads and query concurrently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Topology {
    adjacency: BTreeMap<String, BTreeMap<String, f64>>,
}

impl Topology {
    /// An empty topology with no vertices.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the adjacency structure from node and link records.
    ///
    /// Every node becomes a vertex, even without links. Only active links
    /// are inserted, in both directions with the same weight. When a link
    /// names an unknown node, only the insertion for that missing side is
    /// skipped: the known endpoint still lists it as a neighbor, but it
    /// never becomes a vertex. Self-loops and links with unusable
    /// measurements are skipped. Construction never fails. When two active
    /// links join the same pair, the cheaper one wins.
    pub fn build(nodes: &[Node], links: &[Link]) -> Self {
        let mut adjacency: BTreeMap<String, BTreeMap<String, f64>> = nodes
            .iter()
            .map(|n| (n.id.clone(), BTreeMap::new()))
            .collect();

        for link in links.iter().filter(|l| l.active) {
            if link.from == link.to {
                debug!(link = %link.id, "skipping self-loop");
                continue;
            }
            if let Err(e) = link.validate() {
                warn!(link = %link.id, error = %e, "skipping invalid link");
                continue;
            }

            for missing in [&link.from, &link.to]
                .into_iter()
                .filter(|id| !adjacency.contains_key(id.as_str()))
            {
                warn!(link = %link.id, node = %missing, "link endpoint is not a known node");
            }

            let weight = link.weight();
            Self::insert_edge(&mut adjacency, &link.from, &link.to, weight);
            Self::insert_edge(&mut adjacency, &link.to, &link.from, weight);
        }

        let topology = Self { adjacency };
        debug!(
            nodes = topology.node_count(),
            edges = topology.edge_count(),
            "topology built"
        );
        topology
    }

    /// Build from a snapshot of the live state.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self::build(&snapshot.nodes, &snapshot.links)
    }

    fn insert_edge(
        adjacency: &mut BTreeMap<String, BTreeMap<String, f64>>,
        from: &str,
        to: &str,
        weight: f64,
    ) {
        if let Some(neighbors) = adjacency.get_mut(from) {
            neighbors
                .entry(to.to_string())
                .and_modify(|w| *w = w.min(weight))
                .or_insert(weight);
        }
    }

    /// Returns true if `id` is a vertex.
    pub fn contains(&self, id: &str) -> bool {
        self.adjacency.contains_key(id)
    }

    /// The topology's own copy of `id`, if it is a vertex.
    pub fn node_id(&self, id: &str) -> Option<&str> {
        self.adjacency.get_key_value(id).map(|(k, _)| k.as_str())
    }

    /// Neighbor ids of `id` in ascending order. Empty when the node is
    /// isolated or unknown. May include ids that are not vertices (see
    /// [`Topology::build`]).
    pub fn neighbors(&self, id: &str) -> Vec<&str> {
        self.adjacency
            .get(id)
            .map(|n| n.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Neighbors of `id` paired with the weight of the connecting edge.
    pub fn edges_from<'a>(&'a self, id: &str) -> impl Iterator<Item = (&'a str, f64)> + 'a {
        self.adjacency
            .get(id)
            .into_iter()
            .flat_map(|n| n.iter().map(|(k, w)| (k.as_str(), *w)))
    }

    /// Weight of the edge between `a` and `b`, if they are adjacent.
    pub fn weight(&self, a: &str, b: &str) -> Option<f64> {
        self.adjacency.get(a).and_then(|n| n.get(b)).copied()
    }

    /// All vertex ids in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges. A half-edge to an unknown node counts
    /// once.
    pub fn edge_count(&self) -> usize {
        self.adjacency
            .iter()
            .flat_map(|(a, n)| n.keys().map(move |b| (a, b)))
            .filter(|(a, b)| a < b || !self.adjacency.contains_key(*b))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

impl From<&Snapshot> for Topology {
    fn from(snapshot: &Snapshot) -> Self {
        Self::from_snapshot(snapshot)
    }
}
