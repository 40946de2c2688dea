use std::collections::VecDeque;
use std::path::Path;

use eframe::egui::{self, Align, Context, Layout, Vec2, vec2};

use crate::kg::KnowledgeGraph;

use super::super::ViewModel;
use super::super::highlight::HighlightState;

impl ViewModel {
    pub(in crate::app) const RANKING_ROWS: usize = 12;

    pub(in crate::app) fn new(graph: KnowledgeGraph) -> Self {
        let top_confidence = graph.top_by_confidence(Self::RANKING_ROWS);
        let top_degree = graph.top_by_degree(Self::RANKING_ROWS);

        Self {
            graph,
            min_confidence: 0,
            max_nodes: 400,
            search: String::new(),
            path_input: String::new(),
            selected: None,
            hovered: None,
            pan: Vec2::ZERO,
            zoom: 1.0,
            highlight: HighlightState::default(),
            graph_dirty: true,
            graph_cache: None,
            layout_bounds: vec2(800.0, 600.0),
            top_confidence,
            top_degree,
            show_fps_bar: true,
            fps_current: 0.0,
            fps_samples: VecDeque::new(),
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        snapshot_path: &Path,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        self.update_fps_counter(ctx);
        if self.graph_dirty {
            self.rebuild_render_graph();
        }

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("entity-atlas");
                    ui.separator();
                    ui.label(format!("snapshot: {}", snapshot_path.display()));
                    ui.label(format!("entities: {}", self.graph.node_count()));
                    ui.label(format!("relations: {}", self.graph.edge_count()));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload snapshot"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(fps_text) = self.fps_display_text() {
                            ui.label(fps_text);
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(330.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Reloading knowledge-graph snapshot...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            } else {
                self.draw_graph(ui);
            }
        });
    }

    pub(in crate::app) fn set_selected(&mut self, selected: Option<u64>) {
        if self.selected != selected {
            self.selected = selected;
        }
    }

    /// Replaces the caller-side relevance set and renews the frame budget.
    pub(in crate::app) fn apply_highlights(&mut self, node_ids: Vec<u64>) {
        self.highlight.set_highlights(node_ids);
        self.restart_layout();
    }

    /// Applies a traversal-path node sequence; the edge path is derived
    /// internally before the layout restart.
    pub(in crate::app) fn apply_path(&mut self, path_node_ids: Vec<u64>) {
        self.highlight.set_path(&self.graph, path_node_ids);
        self.restart_layout();
    }

    pub(in crate::app) fn clear_highlights(&mut self) {
        if self.highlight.highlighted_count() > 0 {
            self.highlight.clear_highlights();
            self.restart_layout();
        }
    }

    pub(in crate::app) fn clear_path(&mut self) {
        if !self.highlight.path_nodes().is_empty() {
            self.highlight.clear_path();
            self.restart_layout();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::LayoutPhase;
    use super::super::super::physics::step_layout;
    use super::*;
    use crate::kg::{EntityNode, NodeType, RelationEdge};

    fn model() -> ViewModel {
        let nodes = (1..=4)
            .map(|id| EntityNode {
                id,
                label: format!("n{id}"),
                node_type: NodeType::Concept,
                confidence: 70,
                description: None,
            })
            .collect();
        let edges = vec![RelationEdge {
            id: 10,
            source: 1,
            target: 2,
            label: "links".to_owned(),
            confidence: 50,
        }];
        let mut model = ViewModel::new(KnowledgeGraph::load(nodes, edges).unwrap());
        model.rebuild_render_graph();
        model
    }

    fn settle(model: &mut ViewModel) {
        let bounds = model.layout_bounds;
        let cache = model.graph_cache.as_mut().unwrap();
        while step_layout(cache, bounds) {}
        assert_eq!(cache.phase, LayoutPhase::Settled);
    }

    #[test]
    fn highlight_change_restarts_without_moving_positions() {
        let mut model = model();
        settle(&mut model);

        let before = model
            .graph_cache
            .as_ref()
            .unwrap()
            .nodes
            .iter()
            .map(|node| node.world_pos)
            .collect::<Vec<_>>();

        model.apply_highlights(vec![1, 3]);

        let cache = model.graph_cache.as_ref().unwrap();
        assert_eq!(cache.phase, LayoutPhase::Simulating(0));
        let after = cache.nodes.iter().map(|node| node.world_pos).collect::<Vec<_>>();
        assert_eq!(before, after);
    }

    #[test]
    fn path_change_restarts_and_derives_edges() {
        let mut model = model();
        settle(&mut model);

        model.apply_path(vec![1, 2, 4]);

        assert_eq!(model.highlight.path_edges(), &[10]);
        assert_eq!(
            model.graph_cache.as_ref().unwrap().phase,
            LayoutPhase::Simulating(0)
        );
    }

    #[test]
    fn clearing_state_also_renews_the_budget() {
        let mut model = model();
        model.apply_highlights(vec![2]);
        settle(&mut model);

        model.clear_highlights();
        assert_eq!(
            model.graph_cache.as_ref().unwrap().phase,
            LayoutPhase::Simulating(0)
        );
        assert_eq!(model.highlight.highlighted_count(), 0);
    }
}
