use netrob_core::NodeId;
use tracing::debug;

use crate::graph::Graph;

/// Node count every dataset graph is normalized to unless configured otherwise.
pub const DEFAULT_TARGET_NODES: usize = 50;

/// Returns a copy of `graph` with exactly `target` nodes where possible.
///
/// Graphs that already have `target` nodes are copied unchanged. Otherwise
/// nodes are relabelled to `0..k` in ascending order and the induced subgraph
/// on the first `target` labels is kept; edges into the discarded tail vanish.
/// A graph with fewer than `target` nodes is only relabelled.
pub fn normalize_node_count(graph: &Graph, target: usize) -> Graph {
    if graph.node_count() == target {
        return graph.clone();
    }
    let relabelled = graph.relabel_contiguous();
    let keep: Vec<NodeId> = relabelled.nodes().take(target).collect();
    let normalized = relabelled.induced_subgraph(&keep);
    debug!(
        raw_nodes = graph.node_count(),
        nodes = normalized.node_count(),
        dropped_edges = graph.edge_count() - normalized.edge_count(),
        "normalized node count"
    );
    normalized
}
