use eframe::egui::Vec2;

use super::super::{RenderEdge, RenderNode};

/// Target inter-node spacing for the current canvas area and population.
/// Denser graphs get tighter spacing rather than smaller nodes.
pub(super) fn ideal_spacing(bounds: Vec2, node_count: usize) -> f32 {
    ((bounds.x * bounds.y) / node_count.max(1) as f32).sqrt()
}

/// Pairwise repulsion `k² / d` over every unordered node pair. Distance is
/// floored at 1 to avoid a division blow-up when two nodes coincide.
/// Deliberately O(n²): the intended population is tens to low hundreds of
/// extracted entities, not a general large-graph layout engine.
pub(super) fn accumulate_repulsion(nodes: &mut [RenderNode], spacing: f32) {
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            let delta = nodes[j].world_pos - nodes[i].world_pos;
            let distance = delta.length().max(1.0);
            let force = (spacing * spacing) / distance;
            let push = delta * (force / distance);

            nodes[i].velocity -= push;
            nodes[j].velocity += push;
        }
    }
}

/// Spring attraction `d² / k` along every resolved edge. Working-copy edges
/// always reference live node indices; dangling endpoints were dropped when
/// the copy was built.
pub(super) fn accumulate_attraction(nodes: &mut [RenderNode], edges: &[RenderEdge], spacing: f32) {
    for edge in edges {
        if edge.source >= nodes.len() || edge.target >= nodes.len() || edge.source == edge.target {
            continue;
        }

        let delta = nodes[edge.target].world_pos - nodes[edge.source].world_pos;
        let distance = delta.length().max(1.0);
        let force = (distance * distance) / spacing;
        let pull = delta * (force / distance);

        nodes[edge.source].velocity += pull;
        nodes[edge.target].velocity -= pull;
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::super::test_support::{render_edge, render_node_at};
    use super::*;

    #[test]
    fn ideal_spacing_shrinks_with_population() {
        let bounds = vec2(800.0, 600.0);
        let sparse = ideal_spacing(bounds, 4);
        let dense = ideal_spacing(bounds, 100);
        assert!(sparse > dense);
        assert!((ideal_spacing(bounds, 1) - (800.0_f32 * 600.0).sqrt()).abs() < 1e-3);
    }

    #[test]
    fn repulsion_pushes_pairs_apart_symmetrically() {
        let mut nodes = vec![
            render_node_at(1, vec2(-10.0, 0.0)),
            render_node_at(2, vec2(10.0, 0.0)),
        ];
        accumulate_repulsion(&mut nodes, 100.0);

        assert!(nodes[0].velocity.x < 0.0);
        assert!(nodes[1].velocity.x > 0.0);
        assert!((nodes[0].velocity.x + nodes[1].velocity.x).abs() < 1e-3);
        assert!(nodes[0].velocity.y.abs() < 1e-3);
    }

    #[test]
    fn coincident_nodes_do_not_blow_up() {
        let mut nodes = vec![
            render_node_at(1, vec2(5.0, 5.0)),
            render_node_at(2, vec2(5.0, 5.0)),
        ];
        accumulate_repulsion(&mut nodes, 100.0);

        for node in &nodes {
            assert!(node.velocity.x.is_finite());
            assert!(node.velocity.y.is_finite());
        }
    }

    #[test]
    fn attraction_pulls_connected_endpoints_together() {
        let mut nodes = vec![
            render_node_at(1, vec2(-50.0, 0.0)),
            render_node_at(2, vec2(50.0, 0.0)),
        ];
        let edges = vec![render_edge(10, 0, 1)];
        accumulate_attraction(&mut nodes, &edges, 100.0);

        assert!(nodes[0].velocity.x > 0.0);
        assert!(nodes[1].velocity.x < 0.0);
    }

    #[test]
    fn self_edges_are_ignored() {
        let mut nodes = vec![render_node_at(1, vec2(0.0, 0.0))];
        let edges = vec![render_edge(10, 0, 0)];
        accumulate_attraction(&mut nodes, &edges, 100.0);
        assert_eq!(nodes[0].velocity, Vec2::ZERO);
    }
}
