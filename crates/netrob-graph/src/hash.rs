use sha2::{Digest, Sha256};

use crate::graph::Graph;

/// Computes the canonical hash of a graph's structure and attributes.
///
/// Two graphs hash equal exactly when they have the same nodes, the same
/// edges and bit-identical `pos` and `weight` values.
pub fn canonical_hash(graph: &Graph) -> String {
    let mut hasher = Sha256::new();

    hasher.update((graph.node_count() as u64).to_le_bytes());
    for node in graph.nodes() {
        hasher.update(node.as_raw().to_le_bytes());
    }

    hasher.update((graph.edge_count() as u64).to_le_bytes());
    for edge in graph.edges() {
        let (lo, hi) = edge.as_raw();
        hasher.update(lo.to_le_bytes());
        hasher.update(hi.to_le_bytes());
    }

    match graph.positions() {
        None => hasher.update(b"pos:none"),
        Some(positions) => {
            hasher.update(b"pos:some");
            for (node, pos) in positions {
                hasher.update(node.as_raw().to_le_bytes());
                hasher.update(pos[0].to_bits().to_le_bytes());
                hasher.update(pos[1].to_bits().to_le_bytes());
            }
        }
    }

    match graph.weights() {
        None => hasher.update(b"weight:none"),
        Some(weights) => {
            hasher.update(b"weight:some");
            for (edge, weight) in weights {
                let (lo, hi) = edge.as_raw();
                hasher.update(lo.to_le_bytes());
                hasher.update(hi.to_le_bytes());
                hasher.update(weight.to_bits().to_le_bytes());
            }
        }
    }

    format!("{:x}", hasher.finalize())
}
