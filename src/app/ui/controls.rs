use eframe::egui::{self, RichText, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::super::ViewModel;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

/// Comma/whitespace separated id list, as pasted from a query result.
/// Anything unparseable is dropped silently.
pub(in crate::app) fn parse_id_list(raw: &str) -> Vec<u64> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .filter_map(|part| part.parse::<u64>().ok())
        .collect()
}

impl ViewModel {
    fn search_matches(&self, limit: usize) -> Vec<u64> {
        let query = self.search.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let matcher = SkimMatcherV2::default();
        let mut scored = self
            .graph
            .nodes()
            .iter()
            .filter_map(|node| {
                fuzzy_match_score(&matcher, &node.label, query).map(|score| (score, node.id))
            })
            .collect::<Vec<_>>();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        scored.truncate(limit);
        scored.into_iter().map(|(_, id)| id).collect()
    }

    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Graph Controls");
        ui.separator();
        ui.add_space(4.0);

        ui.label("Search entities")
            .on_hover_text("Fuzzy match against entity labels.");
        ui.text_edit_singleline(&mut self.search);

        let matches = self.search_matches(12);
        if !matches.is_empty() {
            let mut clicked = None;
            for id in &matches {
                if let Some(node) = self.graph.find_node(*id) {
                    let text = format!("{}  ({})", node.label, node.node_type.label());
                    if ui.link(text).clicked() {
                        clicked = Some(*id);
                    }
                }
            }
            if clicked.is_some() {
                self.set_selected(clicked);
            }
            ui.horizontal(|ui| {
                if ui.button("Highlight matches").clicked() {
                    self.apply_highlights(matches.clone());
                }
                if ui.button("Clear highlights").clicked() {
                    self.clear_highlights();
                }
            });
        } else if self.highlight.highlighted_count() > 0 {
            ui.label(format!(
                "{} entities highlighted",
                self.highlight.highlighted_count()
            ));
            if ui.button("Clear highlights").clicked() {
                self.clear_highlights();
            }
        }

        ui.separator();

        ui.label("Traversal path (entity ids, comma separated)")
            .on_hover_text("Paste the node sequence from a query answer to trace it on the graph.");
        ui.text_edit_singleline(&mut self.path_input);
        ui.horizontal(|ui| {
            if ui.button("Apply path").clicked() {
                let path = parse_id_list(&self.path_input);
                self.apply_path(path);
            }
            if ui.button("Clear path").clicked() {
                self.clear_path();
            }
        });
        if !self.highlight.path_nodes().is_empty() {
            ui.label(format!(
                "path: {} nodes, {} hops resolved",
                self.highlight.path_nodes().len(),
                self.highlight.path_edges().len()
            ));
        }

        ui.separator();

        let mut filters_changed = false;
        let mut min_confidence = self.min_confidence as u32;
        let confidence_slider = ui
            .add(egui::Slider::new(&mut min_confidence, 0..=100).text("Min confidence"))
            .on_hover_text("Hide entities the extractor was less sure about.");
        if confidence_slider.changed() {
            self.min_confidence = min_confidence as u8;
            filters_changed = true;
        }

        let node_cap_limit = self.graph.node_count().max(2);
        let max_nodes_slider = ui
            .add(
                egui::Slider::new(&mut self.max_nodes, 2..=node_cap_limit)
                    .text("Max rendered entities"),
            )
            .on_hover_text("Cap the population to keep the quadratic layout pass responsive.");
        filters_changed |= max_nodes_slider.changed();

        if filters_changed {
            // Filter edits change the node set, so this is a full rebuild
            // with re-initialized positions rather than a budget renewal.
            self.graph_dirty = true;
        }

        ui.separator();

        ui.horizontal(|ui| {
            if ui.button("Re-run layout").clicked() {
                self.graph_dirty = true;
            }
            if ui.button("Reset view").clicked() {
                self.pan = egui::Vec2::ZERO;
                self.zoom = 1.0;
            }
        });
        ui.checkbox(&mut self.show_fps_bar, "FPS display");

        ui.separator();

        ui.label(RichText::new("Most confident entities").strong());
        let mut clicked = None;
        for id in &self.top_confidence {
            if let Some(node) = self.graph.find_node(*id) {
                let text = format!("{}  ({})", node.label, node.confidence);
                if ui.link(text).clicked() {
                    clicked = Some(*id);
                }
            }
        }

        ui.add_space(6.0);
        ui.label(RichText::new("Most connected entities").strong());
        for id in &self.top_degree {
            if let Some(node) = self.graph.find_node(*id) {
                let degree = self.graph.neighbors_of(*id).count();
                let text = format!("{}  ({} relations)", node.label, degree);
                if ui.link(text).clicked() {
                    clicked = Some(*id);
                }
            }
        }

        if clicked.is_some() {
            self.set_selected(clicked);
        }
    }
}
