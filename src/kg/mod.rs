mod graph;
mod load;
mod parse;

pub use graph::{EntityNode, KnowledgeGraph, NodeType, RelationEdge, ValidationError};
pub use load::load_snapshot;
