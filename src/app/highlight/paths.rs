use crate::kg::KnowledgeGraph;

/// Projects an ordered node-id sequence (the reasoning chain behind a query
/// answer) onto the edge set: each consecutive pair contributes the id of the
/// first edge connecting it in either direction. Hops with no connecting edge
/// are skipped silently, since the upstream extraction is noisy and a
/// sequence is not guaranteed to be graph-consistent. The output never
/// exceeds one edge id per hop and a malformed sequence is never an error.
pub(in crate::app) fn derive_path_edges(graph: &KnowledgeGraph, path_node_ids: &[u64]) -> Vec<u64> {
    let mut edge_ids = Vec::new();

    for hop in path_node_ids.windows(2) {
        let [a, b] = hop else {
            continue;
        };

        let matched = graph.edges().iter().find(|edge| {
            (edge.source == *a && edge.target == *b) || (edge.source == *b && edge.target == *a)
        });

        if let Some(edge) = matched {
            edge_ids.push(edge.id);
        }
    }

    edge_ids
}
