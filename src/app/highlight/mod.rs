use std::collections::HashSet;

use crate::kg::KnowledgeGraph;

mod paths;

pub(super) use paths::derive_path_edges;

/// Highlight and traversal-path state, by id. Lives independently of the
/// layout working copy: replacing it restarts simulation but never disturbs
/// accumulated positions, pan, or zoom.
#[derive(Debug, Default)]
pub(super) struct HighlightState {
    highlighted_nodes: HashSet<u64>,
    path_nodes: Vec<u64>,
    path_node_set: HashSet<u64>,
    path_edges: Vec<u64>,
    path_edge_set: HashSet<u64>,
}

impl HighlightState {
    /// Replaces the caller-supplied relevance set (e.g. the nodes the last
    /// answer leaned on). Independent of the traversal path.
    pub(super) fn set_highlights(&mut self, node_ids: impl IntoIterator<Item = u64>) {
        self.highlighted_nodes = node_ids.into_iter().collect();
    }

    /// Replaces the traversal path. The edge path is always derived here from
    /// the node sequence and the current edge set; callers never supply edge
    /// ids as independent truth.
    pub(super) fn set_path(&mut self, graph: &KnowledgeGraph, path_node_ids: Vec<u64>) {
        self.path_edges = derive_path_edges(graph, &path_node_ids);
        self.path_edge_set = self.path_edges.iter().copied().collect();
        self.path_node_set = path_node_ids.iter().copied().collect();
        self.path_nodes = path_node_ids;
    }

    pub(super) fn clear_highlights(&mut self) {
        self.highlighted_nodes.clear();
    }

    pub(super) fn clear_path(&mut self) {
        self.path_nodes.clear();
        self.path_node_set.clear();
        self.path_edges.clear();
        self.path_edge_set.clear();
    }

    pub(super) fn is_highlighted_node(&self, id: u64) -> bool {
        self.highlighted_nodes.contains(&id)
    }

    pub(super) fn is_path_node(&self, id: u64) -> bool {
        self.path_node_set.contains(&id)
    }

    pub(super) fn is_path_edge(&self, id: u64) -> bool {
        self.path_edge_set.contains(&id)
    }

    pub(super) fn path_nodes(&self) -> &[u64] {
        &self.path_nodes
    }

    pub(super) fn path_edges(&self) -> &[u64] {
        &self.path_edges
    }

    pub(super) fn highlighted_count(&self) -> usize {
        self.highlighted_nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kg::{EntityNode, NodeType, RelationEdge};

    fn graph() -> KnowledgeGraph {
        let nodes = (1..=3)
            .map(|id| EntityNode {
                id,
                label: format!("n{id}"),
                node_type: NodeType::Concept,
                confidence: 50,
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
        KnowledgeGraph::load(nodes, edges).unwrap()
    }

    #[test]
    fn set_path_derives_edges_internally() {
        let mut state = HighlightState::default();
        state.set_path(&graph(), vec![1, 2, 3]);

        assert_eq!(state.path_nodes(), &[1, 2, 3]);
        assert_eq!(state.path_edges(), &[10]);
        assert!(state.is_path_edge(10));
        assert!(state.is_path_node(2));
    }

    #[test]
    fn highlights_and_path_are_independent() {
        let mut state = HighlightState::default();
        state.set_highlights([3]);
        state.set_path(&graph(), vec![1, 2]);

        state.clear_path();
        assert!(state.is_highlighted_node(3));
        assert!(state.path_nodes().is_empty());
        assert!(state.path_edges().is_empty());

        state.clear_highlights();
        assert_eq!(state.highlighted_count(), 0);
    }
}
