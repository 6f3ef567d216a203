pub mod broadcast;
pub mod init;
pub mod paths;
pub mod route;
pub mod send;

use meshnet_routing::Route;

/// `A -> B -> C  (cost 22.00, 2 hops)`
pub(crate) fn describe(route: &Route) -> String {
    format!(
        "{}  (cost {:.2}, {} hop{})",
        route.path().join(" -> "),
        route.cost,
        route.hops,
        if route.hops == 1 { "" } else { "s" }
    )
}
