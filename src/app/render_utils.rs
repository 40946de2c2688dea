use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2};

use crate::kg::NodeType;

pub(super) const BASE_NODE_RADIUS: f32 = 25.0;
pub(super) const CONFIDENCE_RADIUS_BOOST: f32 = 15.0;
pub(super) const EMPHASIS_RADIUS_BOOST: f32 = 10.0;

const PATH_COLOR: Color32 = Color32::from_rgb(255, 99, 71);
const HIGHLIGHT_COLOR: Color32 = Color32::from_rgb(255, 107, 107);
const ORDINARY_EDGE_COLOR: Color32 = Color32::from_rgb(200, 200, 200);
const NODE_RING_COLOR: Color32 = Color32::from_rgb(153, 153, 153);

pub(super) fn type_color(node_type: NodeType) -> Color32 {
    match node_type {
        NodeType::Person => Color32::from_rgb(0xff, 0x6b, 0x6b),
        NodeType::Organization => Color32::from_rgb(0x4e, 0xcd, 0xc4),
        NodeType::Location => Color32::from_rgb(0x45, 0xb7, 0xd1),
        NodeType::Concept => Color32::from_rgb(0xff, 0xa0, 0x7a),
        NodeType::Event => Color32::from_rgb(0x98, 0xd8, 0xc8),
        NodeType::Product => Color32::from_rgb(0xf7, 0xdc, 0x6f),
        NodeType::Other => Color32::from_rgb(0xbd, 0xc3, 0xc7),
    }
}

fn with_alpha(color: Color32, alpha: f32) -> Color32 {
    let alpha = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

/// Stroke for one edge, in descending priority: traversal-path edges keep a
/// strong stroke with a fixed opacity floor so the path stays visible even at
/// low confidence; edges touching a highlighted node get medium emphasis;
/// everything else is faint and further dimmed. Widths are world-space base
/// values, scaled by zoom at paint time.
pub(super) fn edge_stroke(confidence: u8, on_path: bool, touches_highlight: bool) -> Stroke {
    let opacity = confidence as f32 / 100.0;

    if on_path {
        Stroke::new(3.0, with_alpha(PATH_COLOR, opacity.max(0.6)))
    } else if touches_highlight {
        Stroke::new(2.0, with_alpha(HIGHLIGHT_COLOR, opacity))
    } else {
        Stroke::new(1.0, with_alpha(ORDINARY_EDGE_COLOR, opacity * 0.5))
    }
}

/// Node radius encodes extraction confidence, plus a fixed increment when the
/// node is highlighted or on the path. Salience for "the model is sure" and
/// "this mattered to the answer" stacks additively.
pub(super) fn node_radius(confidence: u8, emphasized: bool) -> f32 {
    let boost = (confidence as f32 / 100.0) * CONFIDENCE_RADIUS_BOOST;
    let emphasis = if emphasized { EMPHASIS_RADIUS_BOOST } else { 0.0 };
    BASE_NODE_RADIUS + boost + emphasis
}

/// Fill is keyed by semantic type; path membership overrides the type color.
/// Confidence never changes hue, only size and ring weight.
pub(super) fn node_fill(node_type: NodeType, on_path: bool) -> Color32 {
    if on_path {
        PATH_COLOR
    } else {
        type_color(node_type)
    }
}

pub(super) fn node_ring(emphasized: bool) -> Stroke {
    if emphasized {
        Stroke::new(3.0, HIGHLIGHT_COLOR)
    } else {
        Stroke::new(1.5, NODE_RING_COLOR)
    }
}

pub(super) fn draw_background(painter: &Painter, rect: Rect, pan: Vec2, zoom: f32) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(250, 250, 250));

    let step = (56.0 * zoom.clamp(0.6, 1.8)).max(20.0);
    let origin = rect.center() + pan;
    let grid_stroke = Stroke::new(1.0, Color32::from_rgba_unmultiplied(205, 210, 216, 90));

    let mut x = origin.x.rem_euclid(step) + rect.left();
    while x < rect.right() {
        painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], grid_stroke);
        x += step;
    }

    let mut y = origin.y.rem_euclid(step) + rect.top();
    while y < rect.bottom() {
        painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], grid_stroke);
        y += step;
    }
}

pub(super) fn world_to_screen(rect: Rect, pan: Vec2, zoom: f32, world: Vec2) -> Pos2 {
    rect.center() + pan + world * zoom
}

pub(super) fn screen_to_world(rect: Rect, pan: Vec2, zoom: f32, screen: Pos2) -> Vec2 {
    (screen - rect.center() - pan) / zoom
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::*;

    #[test]
    fn path_style_outranks_highlight_style() {
        let path = edge_stroke(80, true, true);
        let highlight = edge_stroke(80, false, true);
        let ordinary = edge_stroke(80, false, false);

        assert_eq!(path.width, 3.0);
        assert_eq!(highlight.width, 2.0);
        assert_eq!(ordinary.width, 1.0);
        assert_eq!(path.color.r(), 255);
        assert_eq!(path.color.b(), 71);
    }

    #[test]
    fn path_edges_keep_a_minimum_opacity() {
        let faint = edge_stroke(10, true, false);
        assert_eq!(faint.color.a(), (0.6_f32 * 255.0).round() as u8);

        let confident = edge_stroke(90, true, false);
        assert_eq!(confident.color.a(), (0.9_f32 * 255.0).round() as u8);
    }

    #[test]
    fn ordinary_edges_dim_with_confidence() {
        let stroke = edge_stroke(40, false, false);
        assert_eq!(stroke.color.a(), (0.4_f32 * 0.5 * 255.0).round() as u8);
    }

    #[test]
    fn radius_stacks_confidence_and_emphasis() {
        assert_eq!(node_radius(0, false), 25.0);
        assert_eq!(node_radius(100, false), 40.0);
        assert_eq!(node_radius(100, true), 50.0);
        assert_eq!(node_radius(60, true) - node_radius(60, false), 10.0);
    }

    #[test]
    fn path_fill_overrides_type_color() {
        assert_eq!(node_fill(NodeType::Person, false), type_color(NodeType::Person));
        assert_eq!(node_fill(NodeType::Person, true), Color32::from_rgb(255, 99, 71));
        assert_ne!(node_fill(NodeType::Person, true), type_color(NodeType::Person));
    }

    #[test]
    fn confidence_does_not_change_fill_hue() {
        // Fill takes no confidence input at all; the ring only changes with
        // emphasis, never confidence.
        assert_eq!(node_ring(false).width, 1.5);
        assert_eq!(node_ring(true).width, 3.0);
    }

    #[test]
    fn screen_world_transforms_round_trip() {
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(800.0, 600.0));
        let pan = vec2(12.0, -30.0);
        let zoom = 1.7;

        let world = vec2(120.0, -45.0);
        let screen = world_to_screen(rect, pan, zoom, world);
        let back = screen_to_world(rect, pan, zoom, screen);
        assert!((back - world).length() < 1e-3);
    }

    #[test]
    fn screen_center_maps_to_world_origin_without_pan() {
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(800.0, 600.0));
        let world = screen_to_world(rect, Vec2::ZERO, 1.0, rect.center());
        assert!(world.length() < 1e-6);
    }
}
