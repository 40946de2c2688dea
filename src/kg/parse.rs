use anyhow::{Context, Result};
use serde::Deserialize;

use super::graph::{EntityNode, NodeType, RelationEdge};

#[derive(Clone, Debug, Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    nodes: Vec<RawNode>,
    #[serde(default)]
    edges: Vec<RawEdge>,
}

#[derive(Clone, Debug, Deserialize)]
struct RawNode {
    id: u64,
    label: String,
    #[serde(rename = "type", default)]
    node_type: String,
    #[serde(default)]
    confidence: u8,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct RawEdge {
    id: u64,
    source: u64,
    target: u64,
    #[serde(default)]
    label: String,
    #[serde(default)]
    confidence: u8,
}

pub(super) fn parse_snapshot(raw: &str) -> Result<(Vec<EntityNode>, Vec<RelationEdge>)> {
    let snapshot: RawSnapshot =
        serde_json::from_str(raw).context("invalid knowledge-graph snapshot JSON")?;

    let nodes = snapshot
        .nodes
        .into_iter()
        .map(|raw| EntityNode {
            id: raw.id,
            label: raw.label,
            node_type: NodeType::from_label(&raw.node_type),
            confidence: raw.confidence.min(100),
            description: raw.description,
        })
        .collect();

    let edges = snapshot
        .edges
        .into_iter()
        .map(|raw| RelationEdge {
            id: raw.id,
            source: raw.source,
            target: raw.target,
            label: raw.label,
            confidence: raw.confidence.min(100),
        })
        .collect();

    Ok((nodes, edges))
}
