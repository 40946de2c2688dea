use std::collections::{HashMap, HashSet};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("duplicate node id {0} in snapshot")]
    DuplicateNodeId(u64),
    #[error("duplicate edge id {0} in snapshot")]
    DuplicateEdgeId(u64),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NodeType {
    Person,
    Organization,
    Location,
    Concept,
    Event,
    Product,
    #[default]
    Other,
}

impl NodeType {
    /// Extraction emits free-form type strings; anything unrecognized lands
    /// in `Other` rather than failing the load.
    pub fn from_label(raw: &str) -> Self {
        match raw {
            "Person" => Self::Person,
            "Organization" => Self::Organization,
            "Location" => Self::Location,
            "Concept" => Self::Concept,
            "Event" => Self::Event,
            "Product" => Self::Product,
            _ => Self::Other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Person => "Person",
            Self::Organization => "Organization",
            Self::Location => "Location",
            Self::Concept => "Concept",
            Self::Event => "Event",
            Self::Product => "Product",
            Self::Other => "Other",
        }
    }
}

#[derive(Clone, Debug)]
pub struct EntityNode {
    pub id: u64,
    pub label: String,
    pub node_type: NodeType,
    pub confidence: u8,
    pub description: Option<String>,
}

#[derive(Clone, Debug)]
pub struct RelationEdge {
    pub id: u64,
    pub source: u64,
    pub target: u64,
    pub label: String,
    pub confidence: u8,
}

impl RelationEdge {
    pub fn touches(&self, node_id: u64) -> bool {
        self.source == node_id || self.target == node_id
    }

    pub fn other_endpoint(&self, node_id: u64) -> u64 {
        if self.source == node_id {
            self.target
        } else {
            self.source
        }
    }
}

/// Canonical node/edge lists for one render session. Immutable once loaded;
/// a new snapshot replaces the whole graph. Runtime layout state lives on the
/// working copy in `app`, never here.
#[derive(Clone, Debug, Default)]
pub struct KnowledgeGraph {
    nodes: Vec<EntityNode>,
    edges: Vec<RelationEdge>,
    index_by_id: HashMap<u64, usize>,
}

impl KnowledgeGraph {
    /// Validates id uniqueness per collection and builds the id index.
    /// Returns the graph or the first duplicate found; on `Err` the caller's
    /// previous graph is untouched.
    pub fn load(nodes: Vec<EntityNode>, edges: Vec<RelationEdge>) -> Result<Self, ValidationError> {
        let mut index_by_id = HashMap::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            if index_by_id.insert(node.id, index).is_some() {
                return Err(ValidationError::DuplicateNodeId(node.id));
            }
        }

        let mut seen_edge_ids = HashSet::with_capacity(edges.len());
        for edge in &edges {
            if !seen_edge_ids.insert(edge.id) {
                return Err(ValidationError::DuplicateEdgeId(edge.id));
            }
        }

        Ok(Self {
            nodes,
            edges,
            index_by_id,
        })
    }

    pub fn nodes(&self) -> &[EntityNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[RelationEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_node(&self, id: u64) -> bool {
        self.index_by_id.contains_key(&id)
    }

    pub fn find_node(&self, id: u64) -> Option<&EntityNode> {
        self.index_by_id.get(&id).map(|&index| &self.nodes[index])
    }

    /// Edges touching `id` as either endpoint. Adjacency is undirected even
    /// though edges carry a semantic direction. Edges whose opposite endpoint
    /// is missing from the node set are dangling and excluded.
    pub fn neighbors_of(&self, id: u64) -> impl Iterator<Item = &RelationEdge> {
        self.edges
            .iter()
            .filter(move |edge| edge.touches(id) && self.contains_node(edge.other_endpoint(id)))
    }

    /// Entity ids ranked by extraction confidence, strongest first.
    pub fn top_by_confidence(&self, limit: usize) -> Vec<u64> {
        let mut ranked = self
            .nodes
            .iter()
            .map(|node| (node.confidence, node.id))
            .collect::<Vec<_>>();
        ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        ranked.truncate(limit);
        ranked.into_iter().map(|(_, id)| id).collect()
    }

    /// Entity ids ranked by relation count (undirected degree), busiest first.
    pub fn top_by_degree(&self, limit: usize) -> Vec<u64> {
        let mut degrees: HashMap<u64, usize> = HashMap::with_capacity(self.nodes.len());
        for edge in &self.edges {
            if self.contains_node(edge.source) && self.contains_node(edge.target) {
                *degrees.entry(edge.source).or_default() += 1;
                *degrees.entry(edge.target).or_default() += 1;
            }
        }

        let mut ranked = self
            .nodes
            .iter()
            .map(|node| (degrees.get(&node.id).copied().unwrap_or(0), node.id))
            .collect::<Vec<_>>();
        ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        ranked.truncate(limit);
        ranked.into_iter().map(|(_, id)| id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: u64, label: &str) -> EntityNode {
        EntityNode {
            id,
            label: label.to_owned(),
            node_type: NodeType::Concept,
            confidence: 80,
            description: None,
        }
    }

    fn edge(id: u64, source: u64, target: u64) -> RelationEdge {
        RelationEdge {
            id,
            source,
            target,
            label: "relates_to".to_owned(),
            confidence: 70,
        }
    }

    #[test]
    fn load_rejects_duplicate_node_ids() {
        let result = KnowledgeGraph::load(vec![node(7, "a"), node(7, "b")], Vec::new());
        assert_eq!(result.unwrap_err(), ValidationError::DuplicateNodeId(7));
    }

    #[test]
    fn load_rejects_duplicate_edge_ids() {
        let result = KnowledgeGraph::load(
            vec![node(1, "a"), node(2, "b")],
            vec![edge(3, 1, 2), edge(3, 2, 1)],
        );
        assert_eq!(result.unwrap_err(), ValidationError::DuplicateEdgeId(3));
    }

    #[test]
    fn failed_load_leaves_previous_graph_intact() {
        let graph = KnowledgeGraph::load(vec![node(1, "a")], Vec::new()).unwrap();
        let attempt = KnowledgeGraph::load(vec![node(7, "x"), node(7, "y")], Vec::new());
        assert!(attempt.is_err());
        assert_eq!(graph.node_count(), 1);
        assert!(graph.find_node(1).is_some());
    }

    #[test]
    fn node_and_edge_ids_are_independent_namespaces() {
        let graph = KnowledgeGraph::load(vec![node(5, "a"), node(6, "b")], vec![edge(5, 5, 6)]);
        assert!(graph.is_ok());
    }

    #[test]
    fn find_node_returns_none_for_missing_id() {
        let graph = KnowledgeGraph::load(vec![node(1, "a")], Vec::new()).unwrap();
        assert!(graph.find_node(1).is_some());
        assert!(graph.find_node(99).is_none());
    }

    #[test]
    fn neighbors_of_is_undirected() {
        let graph = KnowledgeGraph::load(
            vec![node(1, "a"), node(2, "b"), node(3, "c")],
            vec![edge(10, 1, 2), edge(11, 3, 1)],
        )
        .unwrap();

        let touching: Vec<u64> = graph.neighbors_of(1).map(|edge| edge.id).collect();
        assert_eq!(touching, vec![10, 11]);
    }

    #[test]
    fn neighbors_of_skips_dangling_edges() {
        let graph = KnowledgeGraph::load(
            vec![node(1, "a"), node(2, "b")],
            vec![edge(10, 1, 2), edge(11, 1, 42)],
        )
        .unwrap();

        let touching: Vec<u64> = graph.neighbors_of(1).map(|edge| edge.id).collect();
        assert_eq!(touching, vec![10]);
    }

    #[test]
    fn degree_ranking_ignores_dangling_edges() {
        let graph = KnowledgeGraph::load(
            vec![node(1, "a"), node(2, "b"), node(3, "c")],
            vec![edge(10, 1, 2), edge(11, 2, 3), edge(12, 3, 99)],
        )
        .unwrap();

        assert_eq!(graph.top_by_degree(1), vec![2]);
    }
}
