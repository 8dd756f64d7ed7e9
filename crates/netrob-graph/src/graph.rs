use std::collections::{BTreeMap, BTreeSet};

use netrob_core::errors::{ErrorInfo, NetError};
use netrob_core::NodeId;
use serde::{Deserialize, Serialize};

/// Two-dimensional coordinate stored in the `pos` node attribute.
pub type Position = [f64; 2];

/// Unordered edge endpoints stored with the smaller identifier first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeKey {
    lo: NodeId,
    hi: NodeId,
}

impl EdgeKey {
    /// Builds the canonical key for the pair, regardless of argument order.
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    /// Smaller endpoint.
    pub fn lo(&self) -> NodeId {
        self.lo
    }

    /// Larger endpoint.
    pub fn hi(&self) -> NodeId {
        self.hi
    }

    /// Returns both endpoints as raw integers.
    pub fn as_raw(&self) -> (u64, u64) {
        (self.lo.as_raw(), self.hi.as_raw())
    }

    /// Returns true when `node` is one of the endpoints.
    pub fn touches(&self, node: NodeId) -> bool {
        self.lo == node || self.hi == node
    }
}

/// Undirected simple graph with optional `pos` and `weight` attributes.
///
/// Nodes iterate in ascending identifier order and edges in lexicographic
/// `(lo, hi)` order. Attribute maps are either absent or total: once present
/// they hold exactly one entry per node (or edge). Growing an attributed graph
/// is refused; removing nodes or edges drops the matching entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    adjacency: BTreeMap<NodeId, BTreeSet<NodeId>>,
    edge_count: usize,
    positions: Option<BTreeMap<NodeId, Position>>,
    weights: Option<BTreeMap<EdgeKey, f64>>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph with nodes `0..n` and no edges.
    pub fn with_nodes(n: usize) -> Self {
        let adjacency = (0..n as u64)
            .map(|raw| (NodeId::from_raw(raw), BTreeSet::new()))
            .collect();
        Self {
            adjacency,
            ..Self::default()
        }
    }

    /// Creates the complete graph on nodes `0..n`.
    pub fn complete(n: usize) -> Self {
        let mut adjacency = BTreeMap::new();
        for raw in 0..n as u64 {
            let neighbours = (0..n as u64)
                .filter(|other| *other != raw)
                .map(NodeId::from_raw)
                .collect();
            adjacency.insert(NodeId::from_raw(raw), neighbours);
        }
        Self {
            adjacency,
            edge_count: n * n.saturating_sub(1) / 2,
            ..Self::default()
        }
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Iterates node identifiers in ascending order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        self.adjacency.keys().copied()
    }

    /// Iterates every edge exactly once in `(lo, hi)` order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.adjacency.iter().flat_map(|(node, neighbours)| {
            neighbours
                .range((std::ops::Bound::Excluded(*node), std::ops::Bound::Unbounded))
                .map(move |other| EdgeKey::new(*node, *other))
        })
    }

    /// Returns true when the node exists.
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    /// Returns true when an edge joins `a` and `b`.
    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.adjacency
            .get(&a)
            .map(|neighbours| neighbours.contains(&b))
            .unwrap_or(false)
    }

    /// Returns the degree of the node.
    pub fn degree(&self, node: NodeId) -> Result<usize, NetError> {
        Ok(self.neighbour_set(node)?.len())
    }

    /// Returns the neighbours of the node in ascending order.
    pub fn neighbors(&self, node: NodeId) -> Result<impl Iterator<Item = NodeId> + '_, NetError> {
        Ok(self.neighbour_set(node)?.iter().copied())
    }

    /// Adds a node. Returns `false` when it was already present.
    pub fn add_node(&mut self, node: NodeId) -> Result<bool, NetError> {
        if self.contains_node(node) {
            return Ok(false);
        }
        self.ensure_unattributed("add-node")?;
        self.adjacency.insert(node, BTreeSet::new());
        Ok(true)
    }

    /// Adds an undirected edge between two existing nodes. Returns `false`
    /// when the edge was already present.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> Result<bool, NetError> {
        if a == b {
            return Err(NetError::Graph(
                ErrorInfo::new("self-loop", "simple graphs cannot hold self-loops")
                    .with_context("node", a.to_string()),
            ));
        }
        self.neighbour_set(a)?;
        self.neighbour_set(b)?;
        if self.has_edge(a, b) {
            return Ok(false);
        }
        self.ensure_unattributed("add-edge")?;
        self.link(a, b);
        Ok(true)
    }

    /// Removes the edge between `a` and `b`.
    pub fn remove_edge(&mut self, a: NodeId, b: NodeId) -> Result<(), NetError> {
        if !self.has_edge(a, b) {
            return Err(NetError::Graph(
                ErrorInfo::new("unknown-edge", "edge does not exist")
                    .with_context("lo", EdgeKey::new(a, b).lo().to_string())
                    .with_context("hi", EdgeKey::new(a, b).hi().to_string()),
            ));
        }
        self.unlink(a, b);
        if let Some(weights) = self.weights.as_mut() {
            weights.remove(&EdgeKey::new(a, b));
        }
        Ok(())
    }

    /// Removes a node together with its incident edges and attributes.
    pub fn remove_node(&mut self, node: NodeId) -> Result<(), NetError> {
        let neighbours: Vec<NodeId> = self.neighbour_set(node)?.iter().copied().collect();
        for other in neighbours {
            self.remove_edge(node, other)?;
        }
        self.adjacency.remove(&node);
        if let Some(positions) = self.positions.as_mut() {
            positions.remove(&node);
        }
        Ok(())
    }

    /// Returns the `pos` attribute map when embedding has run.
    pub fn positions(&self) -> Option<&BTreeMap<NodeId, Position>> {
        self.positions.as_ref()
    }

    /// Returns the `pos` attribute of a single node.
    pub fn position(&self, node: NodeId) -> Option<Position> {
        self.positions
            .as_ref()
            .and_then(|positions| positions.get(&node).copied())
    }

    /// Installs a total `pos` assignment.
    pub fn set_positions(&mut self, positions: BTreeMap<NodeId, Position>) -> Result<(), NetError> {
        if positions.len() != self.adjacency.len()
            || !positions.keys().all(|node| self.adjacency.contains_key(node))
        {
            return Err(NetError::Graph(
                ErrorInfo::new("partial-positions", "pos must be assigned to every node")
                    .with_context("nodes", self.adjacency.len().to_string())
                    .with_context("assigned", positions.len().to_string()),
            ));
        }
        self.positions = Some(positions);
        Ok(())
    }

    /// Returns the `weight` attribute map when weighting has run.
    pub fn weights(&self) -> Option<&BTreeMap<EdgeKey, f64>> {
        self.weights.as_ref()
    }

    /// Returns the `weight` attribute of a single edge.
    pub fn weight(&self, a: NodeId, b: NodeId) -> Option<f64> {
        self.weights
            .as_ref()
            .and_then(|weights| weights.get(&EdgeKey::new(a, b)).copied())
    }

    /// Installs a total `weight` assignment.
    pub fn set_weights(&mut self, weights: BTreeMap<EdgeKey, f64>) -> Result<(), NetError> {
        if weights.len() != self.edge_count
            || !weights
                .keys()
                .all(|key| self.has_edge(key.lo(), key.hi()))
        {
            return Err(NetError::Graph(
                ErrorInfo::new("partial-weights", "weight must be assigned to every edge")
                    .with_context("edges", self.edge_count.to_string())
                    .with_context("assigned", weights.len().to_string()),
            ));
        }
        if let Some((key, weight)) = weights.iter().find(|(_, weight)| weight.is_nan() || **weight < 0.0) {
            return Err(NetError::Graph(
                ErrorInfo::new("negative-weight", "edge weights must be non-negative")
                    .with_context("edge", format!("{}-{}", key.lo(), key.hi()))
                    .with_context("weight", weight.to_string()),
            ));
        }
        self.weights = Some(weights);
        Ok(())
    }

    /// Returns true when either attribute map is present.
    pub fn is_attributed(&self) -> bool {
        self.positions.is_some() || self.weights.is_some()
    }

    /// Returns the induced subgraph on `keep`, copying the attributes of the
    /// surviving nodes and edges. Unknown identifiers are ignored.
    pub fn induced_subgraph(&self, keep: &[NodeId]) -> Graph {
        let kept: BTreeSet<NodeId> = keep
            .iter()
            .copied()
            .filter(|node| self.contains_node(*node))
            .collect();
        let mut adjacency = BTreeMap::new();
        let mut degree_sum = 0usize;
        for node in &kept {
            let neighbours: BTreeSet<NodeId> = self.adjacency[node]
                .iter()
                .copied()
                .filter(|other| kept.contains(other))
                .collect();
            degree_sum += neighbours.len();
            adjacency.insert(*node, neighbours);
        }
        let positions = self.positions.as_ref().map(|positions| {
            positions
                .iter()
                .filter(|(node, _)| kept.contains(node))
                .map(|(node, pos)| (*node, *pos))
                .collect()
        });
        let weights = self.weights.as_ref().map(|weights| {
            weights
                .iter()
                .filter(|(key, _)| kept.contains(&key.lo()) && kept.contains(&key.hi()))
                .map(|(key, weight)| (*key, *weight))
                .collect()
        });
        Graph {
            adjacency,
            edge_count: degree_sum / 2,
            positions,
            weights,
        }
    }

    /// Returns a copy whose nodes are renamed to `0..k` in ascending order of
    /// their current identifiers. Attributes follow their nodes.
    pub fn relabel_contiguous(&self) -> Graph {
        let mapping: BTreeMap<NodeId, NodeId> = self
            .nodes()
            .enumerate()
            .map(|(idx, node)| (node, NodeId::from_raw(idx as u64)))
            .collect();
        let adjacency = self
            .adjacency
            .iter()
            .map(|(node, neighbours)| {
                (
                    mapping[node],
                    neighbours.iter().map(|other| mapping[other]).collect(),
                )
            })
            .collect();
        let positions = self.positions.as_ref().map(|positions| {
            positions
                .iter()
                .map(|(node, pos)| (mapping[node], *pos))
                .collect()
        });
        let weights = self.weights.as_ref().map(|weights| {
            weights
                .iter()
                .map(|(key, weight)| (EdgeKey::new(mapping[&key.lo()], mapping[&key.hi()]), *weight))
                .collect()
        });
        Graph {
            adjacency,
            edge_count: self.edge_count,
            positions,
            weights,
        }
    }

    fn neighbour_set(&self, node: NodeId) -> Result<&BTreeSet<NodeId>, NetError> {
        self.adjacency.get(&node).ok_or_else(|| {
            NetError::Graph(
                ErrorInfo::new("unknown-node", "node does not exist")
                    .with_context("node", node.to_string()),
            )
        })
    }

    fn ensure_unattributed(&self, operation: &str) -> Result<(), NetError> {
        if self.is_attributed() {
            return Err(NetError::Graph(
                ErrorInfo::new(
                    "attributed-graph",
                    "cannot grow a graph whose attributes are already assigned",
                )
                .with_context("operation", operation)
                .with_hint("add structure before embedding"),
            ));
        }
        Ok(())
    }

    fn link(&mut self, a: NodeId, b: NodeId) {
        if let Some(neighbours) = self.adjacency.get_mut(&a) {
            neighbours.insert(b);
        }
        if let Some(neighbours) = self.adjacency.get_mut(&b) {
            neighbours.insert(a);
        }
        self.edge_count += 1;
    }

    fn unlink(&mut self, a: NodeId, b: NodeId) {
        if let Some(neighbours) = self.adjacency.get_mut(&a) {
            neighbours.remove(&b);
        }
        if let Some(neighbours) = self.adjacency.get_mut(&b) {
            neighbours.remove(&a);
        }
        self.edge_count -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u64) -> NodeId {
        NodeId::from_raw(raw)
    }

    #[test]
    fn edges_are_reported_once() {
        let mut graph = Graph::with_nodes(4);
        graph.add_edge(id(2), id(0)).unwrap();
        graph.add_edge(id(1), id(3)).unwrap();
        assert!(!graph.add_edge(id(0), id(2)).unwrap());
        let edges: Vec<_> = graph.edges().map(|key| key.as_raw()).collect();
        assert_eq!(edges, vec![(0, 2), (1, 3)]);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn complete_graph_counts_edges() {
        let graph = Graph::complete(5);
        assert_eq!(graph.edge_count(), 10);
        assert_eq!(graph.edges().count(), 10);
        assert_eq!(Graph::complete(0).edge_count(), 0);
        assert_eq!(Graph::complete(1).node_count(), 1);
    }

    #[test]
    fn self_loops_and_unknown_nodes_are_rejected() {
        let mut graph = Graph::with_nodes(2);
        assert_eq!(graph.add_edge(id(1), id(1)).unwrap_err().code(), "self-loop");
        assert_eq!(graph.add_edge(id(0), id(9)).unwrap_err().code(), "unknown-node");
    }

    #[test]
    fn attributed_graphs_refuse_growth_but_allow_removal() {
        let mut graph = Graph::with_nodes(3);
        graph.add_edge(id(0), id(1)).unwrap();
        let positions = graph.nodes().map(|node| (node, [0.5, 0.5])).collect();
        graph.set_positions(positions).unwrap();
        assert_eq!(graph.add_node(id(7)).unwrap_err().code(), "attributed-graph");
        assert_eq!(graph.add_edge(id(1), id(2)).unwrap_err().code(), "attributed-graph");

        graph.remove_node(id(0)).unwrap();
        assert_eq!(graph.positions().unwrap().len(), 2);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn partial_positions_are_rejected() {
        let mut graph = Graph::with_nodes(3);
        let mut positions = BTreeMap::new();
        positions.insert(id(0), [0.1, 0.2]);
        assert_eq!(
            graph.set_positions(positions).unwrap_err().code(),
            "partial-positions"
        );
        assert!(graph.positions().is_none());
    }
}
