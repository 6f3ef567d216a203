//! Shared fixtures for the meshnet integration tests.

use meshnet_core::{Link, NetworkState, Node, Snapshot};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A live store holding the chain `A - B - C`, each link distance 1 and
/// latency 10 (weight 11), plus the isolated node `D`.
pub fn chain_state() -> NetworkState {
    let state = NetworkState::new();
    for id in ["A", "B", "C", "D"] {
        state.upsert_node(Node::new(id));
    }
    state
        .upsert_link(Link::new("A-B", "A", "B", 1.0, 10.0))
        .expect("valid link");
    state
        .upsert_link(Link::new("B-C", "B", "C", 1.0, 10.0))
        .expect("valid link");
    state
}

/// A reproducible random mesh of `nodes` nodes where each pair is linked
/// with probability `density`. Roughly one link in five is inactive and a
/// few links point at nodes that do not exist.
pub fn random_snapshot(seed: u64, nodes: usize, density: f64) -> Snapshot {
    let mut rng = StdRng::seed_from_u64(seed);
    let ids: Vec<String> = (0..nodes).map(|i| format!("n{i:03}")).collect();

    let mut links = Vec::new();
    for (i, a) in ids.iter().enumerate() {
        for b in ids.iter().skip(i + 1) {
            if !rng.gen_bool(density) {
                continue;
            }
            let mut link = Link::new(
                format!("{a}-{b}"),
                a.as_str(),
                b.as_str(),
                rng.gen_range(0.0..20.0),
                rng.gen_range(0.0..500.0),
            );
            link.active = rng.gen_bool(0.8);
            links.push(link);
        }
    }
    for i in 0..3 {
        links.push(Link::new(
            format!("ghost-{i}"),
            ids[i % nodes].as_str(),
            format!("ghost{i}"),
            1.0,
            1.0,
        ));
    }

    Snapshot::new(ids.into_iter().map(Node::new).collect(), links)
}
