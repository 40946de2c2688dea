use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui, vec2};

use crate::util::truncate_label;

use super::super::physics::step_layout;
use super::super::render_utils::{
    draw_background, edge_stroke, node_fill, node_radius, node_ring, screen_to_world,
    world_to_screen,
};
use super::super::{LayoutPhase, ViewModel};
use super::interaction::hit_test;

const NODE_LABEL_CHARS: usize = 15;
const EDGE_LABEL_CHARS: usize = 12;

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        if self.graph_dirty {
            self.rebuild_render_graph();
        }

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect, self.pan, self.zoom);

        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pan(&response);

        // Canvas resize renews the frame budget; it is not a node-set change,
        // so accumulated positions survive.
        if (rect.size() - self.layout_bounds).length() > f32::EPSILON {
            self.layout_bounds = rect.size();
            self.restart_layout();
        }

        let pan = self.pan;
        let zoom = self.zoom;
        let bounds = self.layout_bounds;

        let Some(cache) = self.graph_cache.as_mut() else {
            return;
        };

        if cache.nodes.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No entities matched the current filters.",
                FontId::proportional(14.0),
                Color32::from_gray(120),
            );
            return;
        }

        if step_layout(cache, bounds) {
            ui.ctx().request_repaint();
        }

        let pointer_world = ui
            .input(|input| input.pointer.hover_pos())
            .filter(|pointer| rect.contains(*pointer))
            .map(|pointer| screen_to_world(rect, pan, zoom, pointer));
        let hovered_index = pointer_world.and_then(|world| hit_test(cache, world));
        self.hovered = hovered_index.and_then(|index| cache.node_id(index));

        if self.hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        let pending_click = if response.clicked_by(egui::PointerButton::Primary) {
            hovered_index.and_then(|index| cache.node_id(index))
        } else {
            None
        };

        let zoom_sqrt = zoom.sqrt();

        // Edges first so nodes stay clickable on top of edge strokes.
        for edge in &cache.edges {
            let (Some(source), Some(target)) =
                (cache.nodes.get(edge.source), cache.nodes.get(edge.target))
            else {
                continue;
            };

            let start = world_to_screen(rect, pan, zoom, source.world_pos);
            let end = world_to_screen(rect, pan, zoom, target.world_pos);

            let on_path = self.highlight.is_path_edge(edge.id);
            let touches_highlight = self.highlight.is_highlighted_node(source.id)
                || self.highlight.is_highlighted_node(target.id);

            let base = edge_stroke(edge.confidence, on_path, touches_highlight);
            let stroke = Stroke::new((base.width * zoom_sqrt).clamp(0.4, 6.0), base.color);
            painter.line_segment([start, end], stroke);

            if zoom > 0.45 {
                let mid = start + (end - start) * 0.5;
                painter.text(
                    mid + vec2(0.0, -5.0),
                    Align2::CENTER_BOTTOM,
                    truncate_label(&edge.label, EDGE_LABEL_CHARS),
                    FontId::proportional(10.0),
                    Color32::from_gray(102),
                );
            }
        }

        // Nodes next, labels over each fill.
        for (index, node) in cache.nodes.iter().enumerate() {
            let on_path = self.highlight.is_path_node(node.id);
            let emphasized = on_path || self.highlight.is_highlighted_node(node.id);

            let position = world_to_screen(rect, pan, zoom, node.world_pos);
            let radius = node_radius(node.confidence, emphasized) * zoom;

            painter.circle_filled(position, radius, node_fill(node.node_type, on_path));

            let ring = node_ring(emphasized);
            let ring = Stroke::new((ring.width * zoom_sqrt).clamp(0.4, 5.0), ring.color);
            painter.circle_stroke(position, radius, ring);

            if hovered_index == Some(index) {
                painter.circle_stroke(
                    position,
                    radius + 3.0,
                    Stroke::new(1.2, Color32::from_rgba_unmultiplied(60, 60, 60, 140)),
                );
            }

            if zoom > 0.35 {
                painter.text(
                    position,
                    Align2::CENTER_CENTER,
                    truncate_label(&node.label, NODE_LABEL_CHARS),
                    FontId::proportional((11.0 * zoom_sqrt).clamp(8.0, 16.0)),
                    Color32::BLACK,
                );
                painter.text(
                    position + vec2(0.0, 15.0 * zoom_sqrt.max(0.8)),
                    Align2::CENTER_CENTER,
                    node.node_type.label(),
                    FontId::proportional((9.0 * zoom_sqrt).clamp(7.0, 13.0)),
                    Color32::from_gray(102),
                );
            }
        }

        if let Some(selected_id) = self.selected
            && let Some(&index) = cache.index_by_id.get(&selected_id)
            && let Some(node) = cache.nodes.get(index)
        {
            let emphasized = self.highlight.is_path_node(node.id)
                || self.highlight.is_highlighted_node(node.id);
            let position = world_to_screen(rect, pan, zoom, node.world_pos);
            let radius = node_radius(node.confidence, emphasized) * zoom;
            painter.circle_stroke(
                position,
                radius + 4.0,
                Stroke::new(2.0, Color32::from_rgb(245, 166, 35)),
            );
        }

        if let Some(hovered_id) = self.hovered
            && let Some(node) = self.graph.find_node(hovered_id)
        {
            let overlay = format!(
                "{}  |  {}  |  confidence {}",
                node.label,
                node.node_type.label(),
                node.confidence
            );
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                overlay,
                FontId::proportional(13.0),
                Color32::from_gray(60),
            );
        }

        if let Some(phase_text) = phase_label(cache.phase) {
            painter.text(
                rect.left_bottom() + vec2(10.0, -10.0),
                Align2::LEFT_BOTTOM,
                phase_text,
                FontId::proportional(11.0),
                Color32::from_gray(130),
            );
        }

        if let Some(node_id) = pending_click {
            self.on_node_click(node_id);
        }
    }
}

fn phase_label(phase: LayoutPhase) -> Option<String> {
    match phase {
        LayoutPhase::Idle => None,
        LayoutPhase::Simulating(frame) => Some(format!(
            "layout: simulating {}/{}",
            frame,
            super::super::physics::FRAME_BUDGET
        )),
        LayoutPhase::Settled => Some("layout: settled".to_owned()),
    }
}
