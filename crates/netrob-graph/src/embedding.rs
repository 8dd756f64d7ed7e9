use std::collections::BTreeMap;

use netrob_core::errors::NetError;
use netrob_core::rng::RngHandle;
use netrob_core::NodeId;
use rand::Rng;

use crate::graph::{EdgeKey, Graph, Position};

/// Places nodes uniformly in the unit square and derives edge weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometricEmbedding {
    /// Use Euclidean distances as weights; otherwise every edge weighs `1.0`.
    pub weighted: bool,
}

impl Default for GeometricEmbedding {
    fn default() -> Self {
        Self { weighted: true }
    }
}

impl GeometricEmbedding {
    /// Creates an embedding pass.
    pub fn new(weighted: bool) -> Self {
        Self { weighted }
    }

    /// Returns an embedded copy of `graph`.
    pub fn embed(&self, graph: &Graph, rng: &mut RngHandle) -> Result<Graph, NetError> {
        let mut embedded = graph.clone();
        self.apply(&mut embedded, rng)?;
        Ok(embedded)
    }

    /// Assigns fresh positions to every node, then a weight to every edge.
    pub fn apply(&self, graph: &mut Graph, rng: &mut RngHandle) -> Result<(), NetError> {
        graph.set_positions(random_positions(graph, rng))?;
        let weights = if self.weighted {
            euclidean_weights(graph)
        } else {
            graph.edges().map(|key| (key, 1.0)).collect()
        };
        graph.set_weights(weights)
    }
}

/// Draws an independent uniform coordinate in `[0, 1)²` for every node,
/// visiting nodes in ascending order.
pub fn random_positions(graph: &Graph, rng: &mut RngHandle) -> BTreeMap<NodeId, Position> {
    graph
        .nodes()
        .map(|node| (node, [rng.gen::<f64>(), rng.gen::<f64>()]))
        .collect()
}

/// Euclidean edge lengths under the graph's current positions. Edges with an
/// unpositioned endpoint are skipped.
pub fn euclidean_weights(graph: &Graph) -> BTreeMap<EdgeKey, f64> {
    graph
        .edges()
        .filter_map(|key| {
            let a = graph.position(key.lo())?;
            let b = graph.position(key.hi())?;
            Some((key, euclidean(a, b)))
        })
        .collect()
}

/// Distance between two points in the plane.
pub fn euclidean(a: Position, b: Position) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    (dx * dx + dy * dy).sqrt()
}
