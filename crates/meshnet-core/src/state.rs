use dashmap::DashMap;
use tracing::debug;

use crate::error::CoreError;
use crate::types::{Link, Node, Snapshot};

/// Owner of the live node and link records.
///
/// This is the only place online flags, signal strength and link activity
/// are mutated. Route computation never reads it directly: callers take a
/// [`Snapshot`] first so a query cannot observe a half-applied change.
pub struct NetworkState {
    nodes: DashMap<String, Node>,
    links: DashMap<String, Link>,
}

impl NetworkState {
    /// Create an empty state store.
    pub fn new() -> Self {
        Self {
            nodes: DashMap::new(),
            links: DashMap::new(),
        }
    }

    /// Seed a store from an existing snapshot. Invalid links are rejected.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, CoreError> {
        let state = Self::new();
        for node in &snapshot.nodes {
            state.upsert_node(node.clone());
        }
        for link in &snapshot.links {
            state.upsert_link(link.clone())?;
        }
        Ok(state)
    }

    /// Insert or replace a node. Returns the previous record, if any.
    pub fn upsert_node(&self, node: Node) -> Option<Node> {
        self.nodes.insert(node.id.clone(), node)
    }

    /// Remove a node and every link touching it.
    pub fn remove_node(&self, id: &str) -> Option<Node> {
        let removed = self.nodes.remove(id).map(|(_k, v)| v);
        if removed.is_some() {
            let before = self.links.len();
            self.links.retain(|_id, link| !link.touches(id));
            debug!(
                node = id,
                dropped_links = before.saturating_sub(self.links.len()),
                "node removed"
            );
        }
        removed
    }

    /// Insert or replace a link after validating its measurements.
    ///
    /// Endpoints are not required to exist yet; topology construction
    /// skips links whose endpoints are missing from the snapshot.
    pub fn upsert_link(&self, link: Link) -> Result<Option<Link>, CoreError> {
        link.validate()?;
        Ok(self.links.insert(link.id.clone(), link))
    }

    pub fn remove_link(&self, id: &str) -> Option<Link> {
        self.links.remove(id).map(|(_k, v)| v)
    }

    /// Flip a node's online flag.
    pub fn set_online(&self, id: &str, online: bool) -> Result<(), CoreError> {
        let mut node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| CoreError::UnknownNode(id.to_string()))?;
        node.online = online;
        debug!(node = id, online, "node online state changed");
        Ok(())
    }

    /// Record a new signal strength reading, clamped to 100.
    pub fn set_signal_strength(&self, id: &str, strength: u8) -> Result<(), CoreError> {
        let mut node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| CoreError::UnknownNode(id.to_string()))?;
        node.signal_strength = strength.min(100);
        Ok(())
    }

    /// Enable or disable a link. Only affects topologies built afterwards.
    pub fn set_link_active(&self, id: &str, active: bool) -> Result<(), CoreError> {
        let mut link = self
            .links
            .get_mut(id)
            .ok_or_else(|| CoreError::UnknownLink(id.to_string()))?;
        link.active = active;
        debug!(link = id, active, "link state changed");
        Ok(())
    }

    pub fn node(&self, id: &str) -> Option<Node> {
        self.nodes.get(id).map(|n| n.clone())
    }

    pub fn link(&self, id: &str) -> Option<Link> {
        self.links.get(id).map(|l| l.clone())
    }

    /// All online nodes, sorted by id.
    pub fn online_nodes(&self) -> Vec<Node> {
        let mut nodes: Vec<Node> = self
            .nodes
            .iter()
            .filter(|r| r.value().online)
            .map(|r| r.value().clone())
            .collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));
        nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Copy every record out of the store, sorted by id.
    pub fn snapshot(&self) -> Snapshot {
        let mut nodes: Vec<Node> = self.nodes.iter().map(|r| r.value().clone()).collect();
        let mut links: Vec<Link> = self.links.iter().map(|r| r.value().clone()).collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));
        links.sort_by(|a, b| a.id.cmp(&b.id));
        Snapshot { nodes, links }
    }
}

impl Default for NetworkState {
    fn default() -> Self {
        Self::new()
    }
}
