use eframe::egui::{self, Rect, Ui, Vec2};

use super::super::RenderGraph;
use super::super::ViewModel;
use super::super::render_utils::screen_to_world;

/// World-space pick radius around each node center.
pub(in crate::app) const PICK_RADIUS: f32 = 30.0;

/// Resolves a pointer position (already mapped into world space) to the FIRST
/// node within the pick radius, in insertion order rather than by nearest
/// distance, so overlapping nodes resolve the same way every frame.
pub(in crate::app) fn hit_test(cache: &RenderGraph, world: Vec2) -> Option<usize> {
    cache
        .nodes
        .iter()
        .position(|node| (node.world_pos - world).length() < PICK_RADIUS)
}

impl ViewModel {
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let world_before = screen_to_world(rect, self.pan, self.zoom, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(0.05, 6.0);
        self.pan = pointer - rect.center() - (world_before * self.zoom);
    }

    pub(in crate::app) fn handle_graph_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.pan += response.drag_delta();
        }
    }

    /// The registered click action: select the hit node, do nothing on a miss.
    pub(in crate::app) fn on_node_click(&mut self, node_id: u64) {
        self.set_selected(Some(node_id));
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::super::super::physics::test_support::{render_graph, render_node_at};
    use super::*;

    #[test]
    fn overlapping_nodes_resolve_by_insertion_order() {
        let cache = render_graph(
            vec![
                render_node_at(7, vec2(0.0, 0.0)),
                render_node_at(8, vec2(4.0, 0.0)),
            ],
            Vec::new(),
        );

        // The pointer sits nearer to node 8; insertion order still wins.
        let hit = hit_test(&cache, vec2(3.0, 0.0));
        assert_eq!(hit, Some(0));
        assert_eq!(cache.node_id(0), Some(7));
    }

    #[test]
    fn hits_require_the_pick_radius() {
        let cache = render_graph(vec![render_node_at(1, vec2(0.0, 0.0))], Vec::new());

        assert_eq!(hit_test(&cache, vec2(29.9, 0.0)), Some(0));
        assert_eq!(hit_test(&cache, vec2(30.0, 0.0)), None);
        assert_eq!(hit_test(&cache, vec2(0.0, -31.0)), None);
    }

    #[test]
    fn empty_graph_never_hits() {
        let cache = render_graph(Vec::new(), Vec::new());
        assert_eq!(hit_test(&cache, vec2(0.0, 0.0)), None);
    }
}
