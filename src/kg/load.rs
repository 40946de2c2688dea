use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::graph::KnowledgeGraph;
use super::parse::parse_snapshot;

/// Reads and validates an exported `{nodes, edges}` snapshot file. Fatal on
/// unreadable files, malformed JSON, or duplicate ids; dangling edge
/// endpoints are kept in the model and tolerated downstream.
pub fn load_snapshot(path: &Path) -> Result<KnowledgeGraph> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot file {}", path.display()))?;
    let (nodes, edges) = parse_snapshot(&raw)?;

    let graph = KnowledgeGraph::load(nodes, edges)
        .with_context(|| format!("snapshot {} failed validation", path.display()))?;

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        snapshot = %path.display(),
        "loaded knowledge-graph snapshot"
    );

    Ok(graph)
}
