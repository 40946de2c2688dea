use eframe::egui::{self, RichText, Ui};

use super::super::ViewModel;

struct RelationRow {
    edge_label: String,
    edge_confidence: u8,
    outgoing: bool,
    other_id: u64,
    other_label: String,
}

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Entity Details");
        ui.add_space(6.0);

        let Some(selected_id) = self.selected else {
            ui.label("Click an entity in the graph, search results, or rankings.");
            return;
        };

        let Some(node) = self.graph.find_node(selected_id) else {
            ui.label("Selected entity no longer exists in the loaded snapshot.");
            return;
        };

        let label = node.label.clone();
        let type_label = node.node_type.label();
        let confidence = node.confidence;
        let description = node.description.clone();

        let relations = self
            .graph
            .neighbors_of(selected_id)
            .map(|edge| {
                let other_id = edge.other_endpoint(selected_id);
                RelationRow {
                    edge_label: edge.label.clone(),
                    edge_confidence: edge.confidence,
                    outgoing: edge.source == selected_id,
                    other_id,
                    other_label: self
                        .graph
                        .find_node(other_id)
                        .map(|other| other.label.clone())
                        .unwrap_or_else(|| format!("#{other_id}")),
                }
            })
            .collect::<Vec<_>>();

        ui.label(RichText::new(label).strong());
        ui.small(format!("id {selected_id}"));
        ui.add_space(6.0);

        ui.label(format!("Type: {type_label}"));
        ui.label(format!("Extraction confidence: {confidence}/100"));
        if let Some(description) = description {
            ui.add_space(4.0);
            ui.label(description);
        }

        ui.separator();
        ui.label(RichText::new("Relations").strong());

        if relations.is_empty() {
            ui.label("No resolved relations touch this entity.");
        } else {
            let neighbor_ids = relations
                .iter()
                .map(|row| row.other_id)
                .collect::<Vec<_>>();

            let mut clicked = None;
            egui::ScrollArea::vertical()
                .id_salt("relations_scroll")
                .max_height(320.0)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for row in &relations {
                        let arrow = if row.outgoing { "->" } else { "<-" };
                        let text = format!(
                            "{} {} {}  ({})",
                            row.edge_label, arrow, row.other_label, row.edge_confidence
                        );
                        if ui.link(text).on_hover_text(format!("id {}", row.other_id)).clicked()
                        {
                            clicked = Some(row.other_id);
                        }
                    }
                });

            if clicked.is_some() {
                self.set_selected(clicked);
            }

            if ui.button("Highlight neighbors").clicked() {
                self.apply_highlights(neighbor_ids);
            }
        }

        ui.separator();
        if ui.button("Clear selection").clicked() {
            self.set_selected(None);
        }
    }
}
