//! Integration test: route queries over snapshots taken from the live state.
//!
//! Exercises NetworkState from meshnet-core together with Topology and
//! Router from meshnet-routing.

use std::collections::HashSet;
use std::sync::Arc;

use meshnet_core::{edge_weight, SearchStrategy, Snapshot};
use meshnet_integration_tests::{chain_state, random_snapshot};
use meshnet_routing::{hop_distances, Route, Router, Topology};

fn path(route: &Route) -> Vec<&str> {
    route.path().iter().map(String::as_str).collect()
}

/// Cheapest active link weight between `a` and `b`, straight from the
/// snapshot's link records.
fn link_weight(snapshot: &Snapshot, a: &str, b: &str) -> Option<f64> {
    snapshot
        .links
        .iter()
        .filter(|l| l.active)
        .filter(|l| (l.from == a && l.to == b) || (l.from == b && l.to == a))
        .map(|l| edge_weight(l.distance, l.latency))
        .reduce(f64::min)
}

const SEEDS: [u64; 4] = [7, 42, 1234, 99_991];

// =========================================================================
// Chain A - B - C with isolated D
// =========================================================================

#[test]
fn test_chain_route_then_disable_link() {
    let state = chain_state();
    let router = Router::with_defaults();

    let topology = Topology::from_snapshot(&state.snapshot());
    let route = router.shortest_path(&topology, "A", "C").unwrap();
    assert_eq!(path(&route), vec!["A", "B", "C"]);
    assert!((route.cost - 22.0).abs() < 1e-9);
    assert_eq!(route.hops, 2);

    // Disabling a link only affects topologies built afterwards.
    state.set_link_active("B-C", false).unwrap();
    assert!(router.shortest_path(&topology, "A", "C").is_some());

    let topology = Topology::from_snapshot(&state.snapshot());
    assert!(router.shortest_path(&topology, "A", "C").is_none());
    assert!(router.shortest_path(&topology, "A", "B").is_some());
}

#[test]
fn test_chain_broadcast_order() {
    let state = chain_state();
    let topology = Topology::from_snapshot(&state.snapshot());
    let router = Router::with_defaults();
    assert_eq!(router.broadcast_order(&topology, "A"), vec!["A", "B", "C"]);
}

#[test]
fn test_isolated_node() {
    let state = chain_state();
    let topology = Topology::from_snapshot(&state.snapshot());
    let router = Router::with_defaults();

    for other in ["A", "B", "C"] {
        assert!(router.shortest_path(&topology, "D", other).is_none());
        assert!(router.shortest_path(&topology, other, "D").is_none());
    }
    let own = router.shortest_path(&topology, "D", "D").unwrap();
    assert_eq!(path(&own), vec!["D"]);
    assert_eq!(own.cost, 0.0);
    assert_eq!(own.hops, 0);
    assert_eq!(router.broadcast_order(&topology, "D"), vec!["D"]);
    assert!(router.all_shortest_paths(&topology, "D").is_empty());
}

#[test]
fn test_reenabling_restores_route() {
    let state = chain_state();
    let router = Router::with_defaults();

    state.set_link_active("A-B", false).unwrap();
    let down = Topology::from_snapshot(&state.snapshot());
    assert!(router.shortest_path(&down, "A", "C").is_none());

    state.set_link_active("A-B", true).unwrap();
    let up = Topology::from_snapshot(&state.snapshot());
    assert_eq!(router.shortest_path(&up, "A", "C").unwrap().hops, 2);
}

// =========================================================================
// Properties over random meshes
// =========================================================================

#[test]
fn test_self_routes_everywhere() {
    for seed in SEEDS {
        let topology = Topology::from_snapshot(&random_snapshot(seed, 25, 0.15));
        let router = Router::with_defaults();
        for node in topology.nodes() {
            let route = router.shortest_path(&topology, node, node).unwrap();
            assert_eq!(path(&route), vec![node]);
            assert_eq!(route.cost, 0.0);
            assert_eq!(route.hops, 0);
        }
    }
}

#[test]
fn test_unknown_ids_are_not_found() {
    let snapshot = random_snapshot(3, 10, 0.5);
    let topology = Topology::from_snapshot(&snapshot);
    let router = Router::with_defaults();

    // Ghost links reference ids that are not nodes.
    assert!(!topology.contains("ghost0"));
    assert!(router.shortest_path(&topology, "n000", "ghost0").is_none());
    assert!(router.shortest_path(&topology, "ghost0", "n000").is_none());
    assert!(router.shortest_path(&topology, "ghost0", "ghost0").is_none());
    assert!(router.broadcast_order(&topology, "ghost0").is_empty());

    // The known end of a ghost link keeps its half of the edge.
    assert!(topology.neighbors("n000").contains(&"ghost0"));
    assert!(router
        .broadcast_order(&topology, "n000")
        .contains(&"ghost0".to_string()));
    assert!(!router.all_shortest_paths(&topology, "n000").contains_key("ghost0"));
}

#[test]
fn test_weights_are_symmetric_and_derived() {
    for seed in SEEDS {
        let snapshot = random_snapshot(seed, 20, 0.3);
        let topology = Topology::from_snapshot(&snapshot);
        for a in topology.nodes() {
            for b in topology.neighbors(a).into_iter().filter(|b| topology.contains(b)) {
                let expected = link_weight(&snapshot, a, b).unwrap();
                assert_eq!(topology.weight(a, b), Some(expected));
                assert_eq!(topology.weight(b, a), Some(expected));
            }
        }
    }
}

#[test]
fn test_cost_matches_link_records() {
    for seed in SEEDS {
        let snapshot = random_snapshot(seed, 30, 0.12);
        let topology = Topology::from_snapshot(&snapshot);
        let router = Router::with_defaults();

        for source in ["n000", "n011", "n029"] {
            for (destination, route) in router.all_shortest_paths(&topology, source) {
                assert_eq!(route.source(), Some(source));
                assert_eq!(route.destination(), Some(destination.as_str()));
                assert_eq!(route.hops, route.path().len() - 1);

                let recomputed: f64 = route
                    .legs()
                    .map(|(a, b)| link_weight(&snapshot, a, b).expect("leg is an active link"))
                    .sum();
                assert!(
                    (recomputed - route.cost).abs() < 1e-6,
                    "cost {} != recomputed {}",
                    route.cost,
                    recomputed
                );
            }
        }
    }
}

#[test]
fn test_all_paths_match_single_queries() {
    for seed in SEEDS {
        let topology = Topology::from_snapshot(&random_snapshot(seed, 25, 0.12));
        let router = Router::with_defaults();
        let source = "n004";
        let all = router.all_shortest_paths(&topology, source);

        for destination in topology.nodes().filter(|n| *n != source) {
            let single = router.shortest_path(&topology, source, destination);
            assert_eq!(all.get(destination), single.as_ref(), "destination {destination}");
        }
    }
}

#[test]
fn test_disabling_cheapest_leg_never_lowers_cost() {
    for seed in SEEDS {
        let mut snapshot = random_snapshot(seed, 20, 0.25);
        let router = Router::with_defaults();
        let topology = Topology::from_snapshot(&snapshot);

        let Some((destination, before)) = router
            .all_shortest_paths(&topology, "n000")
            .into_iter()
            .max_by_key(|(_, r)| r.hops)
        else {
            continue;
        };

        // Cheapest leg on the current best path.
        let (a, b) = before
            .legs()
            .min_by(|x, y| {
                let wx = topology.weight(x.0, x.1).unwrap_or(f64::INFINITY);
                let wy = topology.weight(y.0, y.1).unwrap_or(f64::INFINITY);
                wx.total_cmp(&wy)
            })
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .unwrap();

        for link in snapshot.links.iter_mut() {
            if (link.from == a && link.to == b) || (link.from == b && link.to == a) {
                link.active = false;
            }
        }

        let after = Topology::from_snapshot(&snapshot);
        if let Some(route) = router.shortest_path(&after, "n000", &destination) {
            assert!(
                route.cost >= before.cost - 1e-9,
                "cost dropped from {} to {}",
                before.cost,
                route.cost
            );
            assert!(route.legs().all(|leg| leg != (a.as_str(), b.as_str())));
        }
    }
}

#[test]
fn test_broadcast_layering() {
    for seed in SEEDS {
        let topology = Topology::from_snapshot(&random_snapshot(seed, 30, 0.1));
        let router = Router::with_defaults();
        let source = "n000";

        let order = router.broadcast_order(&topology, source);
        let hops = hop_distances(&topology, source);

        assert_eq!(order.first().map(String::as_str), Some(source));
        let unique: HashSet<&String> = order.iter().collect();
        assert_eq!(unique.len(), order.len(), "a node was visited twice");

        // Exactly the nodes with a route, plus the source. Ghost ids that
        // hang off a reached node are visited too but are never routable.
        let reachable = router.all_shortest_paths(&topology, source);
        let vertices: Vec<&String> = order.iter().filter(|id| topology.contains(id)).collect();
        assert_eq!(vertices.len(), reachable.len() + 1);
        for id in &vertices[1..] {
            assert!(reachable.contains_key(*id));
        }

        let layers: Vec<usize> = order.iter().map(|id| hops[id]).collect();
        assert!(layers.windows(2).all(|w| w[0] <= w[1]), "layers {layers:?}");

        // Every node after the source is a neighbor of one visited before it.
        for (i, id) in order.iter().enumerate().skip(1) {
            assert!(order[..i]
                .iter()
                .any(|earlier| topology.neighbors(earlier).contains(&id.as_str())));
        }
    }
}

#[test]
fn test_strategies_agree() {
    let scan = Router::with_strategy(SearchStrategy::Scan);
    let heap = Router::with_strategy(SearchStrategy::Heap);
    for seed in SEEDS {
        let topology = Topology::from_snapshot(&random_snapshot(seed, 40, 0.08));
        for source in ["n000", "n020", "n039"] {
            assert_eq!(
                scan.all_shortest_paths(&topology, source),
                heap.all_shortest_paths(&topology, source)
            );
            for destination in ["n001", "n017", "n033"] {
                assert_eq!(
                    scan.shortest_path(&topology, source, destination),
                    heap.shortest_path(&topology, source, destination)
                );
            }
        }
    }
}

#[test]
fn test_shared_topology_across_threads() {
    let topology = Arc::new(Topology::from_snapshot(&random_snapshot(11, 30, 0.15)));
    let expected = Router::with_defaults().all_shortest_paths(&topology, "n000");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let topology = Arc::clone(&topology);
            std::thread::spawn(move || Router::with_defaults().all_shortest_paths(&topology, "n000"))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("thread panicked"), expected);
    }
}
