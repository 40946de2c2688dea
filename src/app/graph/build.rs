use std::collections::{HashMap, HashSet};

use eframe::egui::{Vec2, vec2};

use crate::kg::KnowledgeGraph;
use crate::util::stable_pair;

use super::super::{LayoutPhase, RenderEdge, RenderGraph, RenderNode, ViewModel};

/// Node ids that survive the confidence floor and node cap, strongest first.
/// The current selection is always kept so it cannot be filtered out from
/// under the details panel.
fn filtered_node_ids(
    graph: &KnowledgeGraph,
    min_confidence: u8,
    max_nodes: usize,
    selected: Option<u64>,
) -> Vec<u64> {
    let mut ranked = graph
        .nodes()
        .iter()
        .filter(|node| node.confidence >= min_confidence || selected == Some(node.id))
        .map(|node| (node.confidence, node.id))
        .collect::<Vec<_>>();
    ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

    let target_nodes = max_nodes.max(1);
    let mut kept = HashSet::new();
    let mut ids = Vec::new();

    if let Some(selected_id) = selected
        && graph.contains_node(selected_id)
        && kept.insert(selected_id)
    {
        ids.push(selected_id);
    }

    for (_confidence, id) in ranked {
        if ids.len() >= target_nodes {
            break;
        }
        if kept.insert(id) {
            ids.push(id);
        }
    }

    ids
}

/// Scatters a node over the canvas box deterministically by id. A fixed
/// arrangement (grid, single point) can leave a symmetric graph at a
/// zero-net-force configuration; per-id jitter covers the box without that
/// failure mode and keeps layouts reproducible.
fn initial_position(id: u64, bounds: Vec2) -> Vec2 {
    let (jx, jy) = stable_pair(id);
    vec2(jx * bounds.x * 0.5, jy * bounds.y * 0.5)
}

/// Builds a fresh working copy: canonical nodes copied with newly initialized
/// position/velocity, edges re-resolved to indices with dangling endpoints
/// dropped. Starts a new simulation run.
pub(in crate::app) fn build_render_graph(
    graph: &KnowledgeGraph,
    min_confidence: u8,
    max_nodes: usize,
    selected: Option<u64>,
    bounds: Vec2,
) -> RenderGraph {
    let ids = filtered_node_ids(graph, min_confidence, max_nodes, selected);

    let mut index_by_id = HashMap::with_capacity(ids.len());
    let mut nodes = Vec::with_capacity(ids.len());
    for id in ids {
        let Some(node) = graph.find_node(id) else {
            continue;
        };
        index_by_id.insert(id, nodes.len());
        nodes.push(RenderNode {
            id,
            label: node.label.clone(),
            node_type: node.node_type,
            confidence: node.confidence,
            world_pos: initial_position(id, bounds),
            velocity: Vec2::ZERO,
        });
    }

    let edges = graph
        .edges()
        .iter()
        .filter_map(|edge| {
            let source = index_by_id.get(&edge.source).copied()?;
            let target = index_by_id.get(&edge.target).copied()?;
            Some(RenderEdge {
                id: edge.id,
                source,
                target,
                label: edge.label.clone(),
                confidence: edge.confidence,
            })
        })
        .collect::<Vec<_>>();

    let phase = if nodes.is_empty() {
        LayoutPhase::Idle
    } else {
        LayoutPhase::Simulating(0)
    };

    RenderGraph {
        nodes,
        edges,
        index_by_id,
        phase,
    }
}

impl ViewModel {
    /// Node-set change: the working copy is rebuilt wholesale and every
    /// position/velocity re-initialized, unlike highlight or canvas changes
    /// which only renew the frame budget.
    pub(in crate::app) fn rebuild_render_graph(&mut self) {
        self.graph_cache = Some(build_render_graph(
            &self.graph,
            self.min_confidence,
            self.max_nodes,
            self.selected,
            self.layout_bounds,
        ));
        self.graph_dirty = false;
    }

    /// Renews the frame budget in place, keeping accumulated positions.
    pub(in crate::app) fn restart_layout(&mut self) {
        if let Some(cache) = self.graph_cache.as_mut() {
            cache.phase = LayoutPhase::Simulating(0);
        }
    }
}
