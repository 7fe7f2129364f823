//! Deterministic auto-layout from graph topology.
//!
//! Latents split into an exogenous left column and an endogenous right
//! column; each latent's observed variables line up in a centered row
//! beneath it. The function is pure: it reads only topology and node
//! order, so running it twice yields identical positions.

use std::collections::{HashMap, HashSet};

use crate::types::{Link, LinkKind, Node, NodeId, NodeKind};

/// Horizontal offset of the exogenous column.
pub const EXO_COLUMN_X: f64 = 80.0;
/// Top offset of both latent columns.
pub const COLUMN_TOP_Y: f64 = 60.0;
/// Vertical spacing between latents in a column.
pub const ROW_GAP: f64 = 160.0;
/// Horizontal gap between the exogenous and endogenous columns.
pub const LAYER_GAP: f64 = 300.0;
/// Horizontal spacing between observed variables in a row.
pub const OBSERVED_GAP: f64 = 140.0;
/// Vertical drop from a latent to its observed row.
pub const OBSERVED_DROP: f64 = 110.0;

/// Compute new positions for `nodes` from graph topology.
///
/// Returns a full replacement node array. Nodes the rules cannot place
/// (isolated observed variables) keep their prior positions; a partial
/// layout is preferable to a misplaced one.
pub fn layout(nodes: &[Node], links: &[Link]) -> Vec<Node> {
    if nodes.is_empty() {
        return Vec::new();
    }

    let latent_ids: HashSet<NodeId> = nodes
        .iter()
        .filter(|n| n.kind == NodeKind::Latent)
        .map(|n| n.id)
        .collect();
    let observed_ids: HashSet<NodeId> = nodes
        .iter()
        .filter(|n| n.kind == NodeKind::Observed)
        .map(|n| n.id)
        .collect();

    // A latent is endogenous when a directed link from another latent
    // targets it. Index targets once instead of scanning links per latent.
    let endogenous_ids: HashSet<NodeId> = links
        .iter()
        .filter(|l| {
            l.kind == LinkKind::Directed
                && latent_ids.contains(&l.source)
                && latent_ids.contains(&l.target)
        })
        .map(|l| l.target)
        .collect();

    // Column membership in node order, for stable stacking.
    let exogenous: Vec<NodeId> = nodes
        .iter()
        .filter(|n| latent_ids.contains(&n.id) && !endogenous_ids.contains(&n.id))
        .map(|n| n.id)
        .collect();
    let endogenous: Vec<NodeId> = nodes
        .iter()
        .filter(|n| endogenous_ids.contains(&n.id))
        .map(|n| n.id)
        .collect();

    let mut placed: HashMap<NodeId, (f64, f64)> = HashMap::new();

    for (i, id) in exogenous.iter().enumerate() {
        placed.insert(*id, (EXO_COLUMN_X, COLUMN_TOP_Y + i as f64 * ROW_GAP));
    }

    // Center the shorter endogenous column against the exogenous one.
    let endo_top = if endogenous.len() < exogenous.len() {
        COLUMN_TOP_Y + (exogenous.len() - endogenous.len()) as f64 * ROW_GAP / 2.0
    } else {
        COLUMN_TOP_Y
    };
    for (i, id) in endogenous.iter().enumerate() {
        placed.insert(*id, (EXO_COLUMN_X + LAYER_GAP, endo_top + i as f64 * ROW_GAP));
    }

    // Observed row under each latent: every observed node linked to it by
    // any link in either direction, deduplicated, in link order.
    for latent in exogenous.iter().chain(endogenous.iter()) {
        let (lx, ly) = placed[latent];
        let mut seen: HashSet<NodeId> = HashSet::new();
        let row: Vec<NodeId> = links
            .iter()
            .filter_map(|l| l.other_end(*latent))
            .filter(|other| observed_ids.contains(other) && seen.insert(*other))
            .collect();
        if row.is_empty() {
            continue;
        }
        let row_start = lx - (row.len() - 1) as f64 * OBSERVED_GAP / 2.0;
        for (i, id) in row.iter().enumerate() {
            placed.insert(*id, (row_start + i as f64 * OBSERVED_GAP, ly + OBSERVED_DROP));
        }
    }

    nodes
        .iter()
        .map(|n| match placed.get(&n.id) {
            Some(&(x, y)) => n.clone().at(x, y),
            None => n.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn id(n: u128) -> NodeId {
        NodeId::new(Uuid::from_u128(n))
    }

    fn latent(n: u128) -> Node {
        Node::new(id(n), format!("f{n}"), NodeKind::Latent, 500.0, 500.0)
    }

    fn observed(n: u128) -> Node {
        Node::new(id(n), format!("x{n}"), NodeKind::Observed, 500.0, 500.0)
    }

    fn pos(nodes: &[Node], target: NodeId) -> (f64, f64) {
        let n = nodes.iter().find(|n| n.id == target).unwrap();
        (n.x, n.y)
    }

    #[test]
    fn classifies_exogenous_and_endogenous_columns() {
        // a -> b (both latent), a -> c (observed)
        let nodes = vec![latent(1), latent(2), observed(3)];
        let links = vec![Link::directed(id(1), id(2)), Link::directed(id(1), id(3))];

        let out = layout(&nodes, &links);

        let (ax, ay) = pos(&out, id(1));
        let (bx, _) = pos(&out, id(2));
        let (cx, cy) = pos(&out, id(3));

        assert_eq!(ax, EXO_COLUMN_X);
        assert_eq!(bx, EXO_COLUMN_X + LAYER_GAP);
        // Single observed child sits centered directly under its latent.
        assert_eq!(cx, ax);
        assert_eq!(cy, ay + OBSERVED_DROP);
    }

    #[test]
    fn covariance_links_do_not_make_a_latent_endogenous() {
        let nodes = vec![latent(1), latent(2)];
        let links = vec![Link::covariance(id(1), id(2))];

        let out = layout(&nodes, &links);
        assert_eq!(pos(&out, id(1)).0, EXO_COLUMN_X);
        assert_eq!(pos(&out, id(2)).0, EXO_COLUMN_X);
    }

    #[test]
    fn observed_row_is_centered_under_latent() {
        let nodes = vec![latent(1), observed(2), observed(3), observed(4)];
        let links = vec![
            Link::directed(id(1), id(2)),
            Link::directed(id(1), id(3)),
            // Reverse direction still counts as attachment.
            Link::directed(id(4), id(1)),
        ];

        let out = layout(&nodes, &links);
        let (lx, ly) = pos(&out, id(1));
        let xs: Vec<f64> = [id(2), id(3), id(4)].iter().map(|n| pos(&out, *n).0).collect();

        assert_eq!(xs[0], lx - OBSERVED_GAP);
        assert_eq!(xs[1], lx);
        assert_eq!(xs[2], lx + OBSERVED_GAP);
        for n in [id(2), id(3), id(4)] {
            assert_eq!(pos(&out, n).1, ly + OBSERVED_DROP);
        }
    }

    #[test]
    fn shorter_endogenous_column_is_vertically_centered() {
        // Three exogenous latents all pointing at one endogenous latent.
        let nodes = vec![latent(1), latent(2), latent(3), latent(4)];
        let links = vec![
            Link::directed(id(1), id(4)),
            Link::directed(id(2), id(4)),
            Link::directed(id(3), id(4)),
        ];

        let out = layout(&nodes, &links);
        let (_, endo_y) = pos(&out, id(4));
        assert_eq!(endo_y, COLUMN_TOP_Y + ROW_GAP);
    }

    #[test]
    fn isolated_observed_node_keeps_prior_position() {
        let nodes = vec![latent(1), observed(2)];
        let out = layout(&nodes, &[]);
        assert_eq!(pos(&out, id(2)), (500.0, 500.0));
        // The latent is still placed.
        assert_eq!(pos(&out, id(1)), (EXO_COLUMN_X, COLUMN_TOP_Y));
    }

    #[test]
    fn layout_is_idempotent() {
        let nodes = vec![latent(1), latent(2), observed(3), observed(4)];
        let links = vec![
            Link::directed(id(1), id(3)),
            Link::directed(id(2), id(4)),
            Link::covariance(id(1), id(2)),
        ];

        let once = layout(&nodes, &links);
        let twice = layout(&once, &links);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_graph_is_a_noop() {
        assert!(layout(&[], &[]).is_empty());
    }

    #[test]
    fn observed_shared_by_two_latents_is_placed_once_per_run() {
        let nodes = vec![latent(1), latent(2), observed(3)];
        let links = vec![Link::directed(id(1), id(3)), Link::directed(id(2), id(3))];

        let out = layout(&nodes, &links);
        // The later latent's row wins; the result is still deterministic.
        let (x2, y2) = pos(&out, id(2));
        assert_eq!(pos(&out, id(3)), (x2, y2 + OBSERVED_DROP));
        assert_eq!(layout(&out, &links), out);
    }
}
