use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet};

use meshnet_core::SearchStrategy;
use tracing::{debug, trace};

use crate::broadcast;
use crate::route::Route;
use crate::topology::Topology;

/// Configuration for the Router.
#[derive(Debug, Clone, Default)]
pub struct RouterConfig {
    /// How the next vertex to settle is selected.
    pub strategy: SearchStrategy,
}

/// Answers route queries over a [`Topology`].
///
/// The router keeps no state between calls. Every query borrows the
/// topology immutably, so one topology can serve many concurrent queries.
#[derive(Debug, Clone, Default)]
pub struct Router {
    config: RouterConfig,
}

/// Distance and predecessor maps left behind by a least-cost search.
struct SearchTree<'t> {
    distances: HashMap<&'t str, f64>,
    predecessors: HashMap<&'t str, &'t str>,
}

impl<'t> SearchTree<'t> {
    fn new(topology: &'t Topology, source: &'t str) -> Self {
        let mut distances: HashMap<&'t str, f64> =
            topology.nodes().map(|n| (n, f64::INFINITY)).collect();
        distances.insert(source, 0.0);
        Self {
            distances,
            predecessors: HashMap::new(),
        }
    }

    fn distance(&self, id: &str) -> f64 {
        self.distances.get(id).copied().unwrap_or(f64::INFINITY)
    }

    /// Relax every edge out of `current`. Returns the neighbors whose
    /// tentative distance improved.
    fn relax(&mut self, topology: &'t Topology, current: &'t str) -> Vec<(&'t str, f64)> {
        let base = self.distance(current);
        let mut improved = Vec::new();
        for (neighbor, weight) in topology.edges_from(current) {
            let candidate = base + weight;
            if candidate < self.distance(neighbor) {
                self.distances.insert(neighbor, candidate);
                self.predecessors.insert(neighbor, current);
                improved.push((neighbor, candidate));
            }
        }
        improved
    }

    /// Walk predecessors back from `destination`. `None` if the walk does
    /// not end at `source`.
    fn route_to(&self, source: &str, destination: &str) -> Option<Route> {
        let cost = self.distance(destination);
        if !cost.is_finite() {
            return None;
        }

        let mut path = vec![destination.to_string()];
        let mut current = destination;
        while let Some(&previous) = self.predecessors.get(current) {
            path.push(previous.to_string());
            current = previous;
        }
        if current != source {
            return None;
        }

        path.reverse();
        Some(Route::new(path, cost))
    }
}

/// Heap entry for the heap strategy. Ordered so that `BinaryHeap` (a
/// max-heap) pops the lowest cost first and, among equal costs, the lowest
/// node id, matching the scan strategy's settle order.
#[derive(Debug)]
struct Frontier<'t> {
    cost: f64,
    node: &'t str,
}

impl PartialEq for Frontier<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier<'_> {}

impl PartialOrd for Frontier<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(self.node))
    }
}

impl Router {
    /// Create a new Router with the given configuration.
    pub fn new(config: RouterConfig) -> Self {
        Self { config }
    }

    /// Create a Router with default configuration.
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Create a Router using the given search strategy.
    pub fn with_strategy(strategy: SearchStrategy) -> Self {
        Self::new(RouterConfig { strategy })
    }

    pub fn strategy(&self) -> SearchStrategy {
        self.config.strategy
    }

    /// Lowest-cost route from `source` to `destination`.
    ///
    /// Returns `None` when either endpoint is not in the topology or no
    /// path connects them. A node always reaches itself with an empty walk,
    /// even when it has no links.
    ///
    /// When several unsettled vertices share the minimum tentative cost,
    /// the one with the smallest id is settled first.
    pub fn shortest_path(
        &self,
        topology: &Topology,
        source: &str,
        destination: &str,
    ) -> Option<Route> {
        if !topology.contains(source) || !topology.contains(destination) {
            debug!(source, destination, "route endpoint not in topology");
            return None;
        }
        if source == destination {
            return Some(Route::to_self(source));
        }

        let (source, destination) = Self::intern(topology, source, destination)?;
        let tree = self.search(topology, source, Some(destination));
        let route = tree.route_to(source, destination);
        match &route {
            Some(r) => debug!(source, destination, cost = r.cost, hops = r.hops, "route found"),
            None => debug!(source, destination, "destination unreachable"),
        }
        route
    }

    /// Lowest-cost routes from `source` to every other reachable node.
    ///
    /// Runs one search to exhaustion and derives every route from the
    /// resulting tree. Unreachable nodes are absent from the map, as is the
    /// source itself. An unknown source yields an empty map.
    pub fn all_shortest_paths(&self, topology: &Topology, source: &str) -> BTreeMap<String, Route> {
        let mut routes = BTreeMap::new();
        let Some((source, _)) = Self::intern(topology, source, source) else {
            return routes;
        };

        let tree = self.search(topology, source, None);
        for destination in topology.nodes().filter(|n| *n != source) {
            if let Some(route) = tree.route_to(source, destination) {
                routes.insert(destination.to_string(), route);
            }
        }
        debug!(source, reachable = routes.len(), "computed all routes");
        routes
    }

    /// Flood visiting order from `source`. See [`broadcast::flood_order`].
    pub fn broadcast_order(&self, topology: &Topology, source: &str) -> Vec<String> {
        broadcast::flood_order(topology, source)
    }

    /// Re-borrow endpoint ids from the topology so the search maps can be
    /// keyed by topology-owned strings.
    fn intern<'t>(
        topology: &'t Topology,
        source: &str,
        destination: &str,
    ) -> Option<(&'t str, &'t str)> {
        Some((topology.node_id(source)?, topology.node_id(destination)?))
    }

    fn search<'t>(
        &self,
        topology: &'t Topology,
        source: &'t str,
        target: Option<&'t str>,
    ) -> SearchTree<'t> {
        match self.config.strategy {
            SearchStrategy::Scan => Self::search_scan(topology, source, target),
            SearchStrategy::Heap => Self::search_heap(topology, source, target),
        }
    }

    /// Selection-based search: each round scans every unsettled vertex for
    /// the minimum finite tentative cost. O(V²).
    fn search_scan<'t>(
        topology: &'t Topology,
        source: &'t str,
        target: Option<&'t str>,
    ) -> SearchTree<'t> {
        let mut tree = SearchTree::new(topology, source);
        let mut unsettled: BTreeSet<&'t str> = topology.nodes().collect();

        loop {
            // Ascending id order with a strict comparison keeps the first
            // (smallest) id among equal costs.
            let mut next: Option<(&'t str, f64)> = None;
            for &candidate in &unsettled {
                let cost = tree.distance(candidate);
                if !cost.is_finite() {
                    continue;
                }
                if next.map_or(true, |(_, best)| cost < best) {
                    next = Some((candidate, cost));
                }
            }

            let Some((current, cost)) = next else {
                break;
            };
            unsettled.remove(current);
            trace!(node = current, cost, "settled");
            if target == Some(current) {
                break;
            }
            tree.relax(topology, current);
        }

        tree
    }

    /// Priority-queue search with lazy deletion of stale entries.
    /// O((V + E) log V), same settle order as [`Self::search_scan`].
    fn search_heap<'t>(
        topology: &'t Topology,
        source: &'t str,
        target: Option<&'t str>,
    ) -> SearchTree<'t> {
        let mut tree = SearchTree::new(topology, source);
        let mut settled: HashSet<&'t str> = HashSet::with_capacity(topology.node_count());
        let mut heap: BinaryHeap<Frontier<'t>> = BinaryHeap::new();
        heap.push(Frontier {
            cost: 0.0,
            node: source,
        });

        while let Some(Frontier { cost, node }) = heap.pop() {
            if !settled.insert(node) {
                continue;
            }
            trace!(node, cost, "settled");
            if target == Some(node) {
                break;
            }
            for (neighbor, cost) in tree.relax(topology, node) {
                heap.push(Frontier {
                    cost,
                    node: neighbor,
                });
            }
        }

        tree
    }
}
