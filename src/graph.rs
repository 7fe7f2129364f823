//! The canonical graph model and its mutation primitives.
//!
//! Every mutation either applies cleanly or degrades to a no-op; the
//! graph never ends up with dangling links or duplicate edges. Unknown
//! ids are tolerated rather than fatal, since the interaction layer only
//! hands out ids from the current node set.

use rand::Rng;

use crate::types::{GraphSnapshot, Link, LinkKind, Node, NodeId, NodeKind};

/// Base canvas position for freshly added nodes.
const SPAWN_X: f64 = 120.0;
/// Base canvas y for freshly added nodes.
const SPAWN_Y: f64 = 120.0;
/// Half-width of the jitter window applied to spawn positions, so that
/// successively added nodes do not stack at the exact same point.
const SPAWN_JITTER: f64 = 24.0;

/// The live node/link state of one canvas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
    links: Vec<Link>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from parts, dropping any link whose endpoints are
    /// not both present. Used when replacing the graph wholesale
    /// (loading a saved model, undo/redo replay, tests).
    pub fn from_parts(nodes: Vec<Node>, links: Vec<Link>) -> Self {
        let mut graph = Self { nodes, links };
        graph.retain_valid_links();
        graph
    }

    /// The node sequence, in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The link sequence, in insertion order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Look up a link by position.
    pub fn link_at(&self, index: usize) -> Option<&Link> {
        self.links.get(index)
    }

    /// Deep-copy the current state for the history stack.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot::capture(&self.nodes, &self.links)
    }

    /// Replace the whole graph from a snapshot.
    pub fn restore(&mut self, snapshot: GraphSnapshot) {
        let (nodes, links) = snapshot.into_parts();
        self.nodes = nodes;
        self.links = links;
        self.retain_valid_links();
    }

    /// Add a new node with a generated id and a jittered spawn position.
    ///
    /// Returns the new node's id.
    pub fn add_node(&mut self, label: impl Into<String>, kind: NodeKind) -> NodeId {
        let mut rng = rand::thread_rng();
        let x = SPAWN_X + rng.gen_range(-SPAWN_JITTER..SPAWN_JITTER);
        let y = SPAWN_Y + rng.gen_range(-SPAWN_JITTER..SPAWN_JITTER);
        let id = NodeId::generate();
        self.nodes.push(Node::new(id, label, kind, x, y));
        id
    }

    /// Insert a fully specified node. No-op if the id is already taken.
    pub fn insert_node(&mut self, node: Node) {
        if self.node(node.id).is_none() {
            self.nodes.push(node);
        }
    }

    /// Remove a node and every link incident to it. No-op on unknown id.
    pub fn remove_node(&mut self, id: NodeId) {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.id != id);
        if self.nodes.len() == before {
            return;
        }
        self.links.retain(|l| !l.touches(id));
    }

    /// Attempt to add a link.
    ///
    /// Returns `false` (and leaves the graph untouched) on a self-link,
    /// an unknown endpoint, or a duplicate per the edge policy: directed
    /// links are unique per ordered (source, target); covariance links
    /// are unique per unordered pair.
    pub fn add_link(&mut self, source: NodeId, target: NodeId, kind: LinkKind) -> bool {
        if source == target {
            return false;
        }
        if self.node(source).is_none() || self.node(target).is_none() {
            return false;
        }
        if self.links.iter().any(|l| l.blocks(source, target, kind)) {
            return false;
        }
        self.links.push(Link::new(source, target, kind));
        true
    }

    /// Remove the link at `index`. No-op when out of range.
    pub fn remove_link_at(&mut self, index: usize) {
        if index < self.links.len() {
            self.links.remove(index);
        }
    }

    /// Move a node to a new position. No-op on unknown id.
    pub fn move_node(&mut self, id: NodeId, x: f64, y: f64) {
        if let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) {
            node.x = x;
            node.y = y;
        }
    }

    /// Drop links whose endpoints no longer exist.
    pub fn retain_valid_links(&mut self) {
        let nodes = &self.nodes;
        self.links
            .retain(|l| nodes.iter().any(|n| n.id == l.source) && nodes.iter().any(|n| n.id == l.target));
    }

    /// True when the graph has no nodes and no links.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn id(n: u128) -> NodeId {
        NodeId::new(Uuid::from_u128(n))
    }

    fn latent(n: u128) -> Node {
        Node::new(id(n), format!("f{n}"), NodeKind::Latent, 0.0, 0.0)
    }

    fn two_node_graph() -> Graph {
        Graph::from_parts(vec![latent(1), latent(2)], vec![])
    }

    #[test]
    fn add_node_assigns_distinct_ids_and_positions() {
        let mut graph = Graph::new();
        let a = graph.add_node("stress", NodeKind::Latent);
        let b = graph.add_node("coping", NodeKind::Latent);
        assert_ne!(a, b);
        assert_eq!(graph.nodes().len(), 2);
        // Jitter keeps spawn positions inside the window around the base.
        for node in graph.nodes() {
            assert!((node.x - SPAWN_X).abs() < SPAWN_JITTER);
            assert!((node.y - SPAWN_Y).abs() < SPAWN_JITTER);
        }
    }

    #[test]
    fn duplicate_directed_link_is_rejected() {
        let mut graph = two_node_graph();
        assert!(graph.add_link(id(1), id(2), LinkKind::Directed));
        assert!(!graph.add_link(id(1), id(2), LinkKind::Directed));
        assert_eq!(graph.links().len(), 1);
    }

    #[test]
    fn reversed_directed_link_is_allowed() {
        let mut graph = two_node_graph();
        assert!(graph.add_link(id(1), id(2), LinkKind::Directed));
        assert!(graph.add_link(id(2), id(1), LinkKind::Directed));
        assert_eq!(graph.links().len(), 2);
    }

    #[test]
    fn covariance_duplicate_is_rejected_in_either_order() {
        let mut graph = two_node_graph();
        assert!(graph.add_link(id(1), id(2), LinkKind::Covariance));
        assert!(!graph.add_link(id(2), id(1), LinkKind::Covariance));
        assert_eq!(graph.links().len(), 1);
    }

    #[test]
    fn self_link_is_rejected() {
        let mut graph = two_node_graph();
        assert!(!graph.add_link(id(1), id(1), LinkKind::Directed));
        assert!(graph.links().is_empty());
    }

    #[test]
    fn link_to_unknown_node_is_rejected() {
        let mut graph = two_node_graph();
        assert!(!graph.add_link(id(1), id(9), LinkKind::Directed));
        assert!(graph.links().is_empty());
    }

    #[test]
    fn remove_node_cascades_to_incident_links() {
        let mut graph = Graph::from_parts(
            vec![latent(1), latent(2), latent(3)],
            vec![
                Link::directed(id(1), id(2)),
                Link::covariance(id(3), id(1)),
                Link::directed(id(2), id(3)),
            ],
        );
        graph.remove_node(id(1));
        assert_eq!(graph.nodes().len(), 2);
        assert_eq!(graph.links().len(), 1);
        assert!(graph.links().iter().all(|l| !l.touches(id(1))));
    }

    #[test]
    fn remove_unknown_node_is_noop() {
        let mut graph = two_node_graph();
        graph.remove_node(id(9));
        assert_eq!(graph.nodes().len(), 2);
    }

    #[test]
    fn move_node_updates_position_only() {
        let mut graph = two_node_graph();
        graph.move_node(id(1), 300.0, 400.0);
        let node = graph.node(id(1)).unwrap();
        assert_eq!((node.x, node.y), (300.0, 400.0));
        graph.move_node(id(9), 1.0, 1.0); // unknown id, no-op
        assert_eq!(graph.nodes().len(), 2);
    }

    #[test]
    fn remove_link_at_out_of_range_is_noop() {
        let mut graph = two_node_graph();
        graph.add_link(id(1), id(2), LinkKind::Directed);
        graph.remove_link_at(5);
        assert_eq!(graph.links().len(), 1);
        graph.remove_link_at(0);
        assert!(graph.links().is_empty());
    }

    #[test]
    fn from_parts_drops_dangling_links() {
        let graph = Graph::from_parts(
            vec![latent(1)],
            vec![Link::directed(id(1), id(2)), Link::directed(id(9), id(1))],
        );
        assert!(graph.links().is_empty());
        assert_eq!(graph.nodes().len(), 1);
    }

    #[test]
    fn snapshot_restore_round_trips() {
        let mut graph = two_node_graph();
        graph.add_link(id(1), id(2), LinkKind::Directed);
        let snap = graph.snapshot();

        graph.remove_node(id(1));
        assert_ne!(graph.snapshot(), snap);

        graph.restore(snap.clone());
        assert_eq!(graph.snapshot(), snap);
    }
}
