use std::fmt;
use std::path::Path;
use std::str::FromStr;

use netrob_core::errors::{ErrorInfo, NetError};
use netrob_core::provenance::SchemaVersion;
use netrob_core::NodeId;
use serde::{Deserialize, Serialize};

use crate::graph::{EdgeKey, Graph};

/// Schema version written with every serialized graph.
pub const GRAPH_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// Serializes the graph to a compact binary representation using `bincode`.
pub fn graph_to_bytes(graph: &Graph) -> Result<Vec<u8>, NetError> {
    let serializable = SerializableGraph::from_graph(graph);
    bincode::serialize(&serializable)
        .map_err(|err| NetError::Serde(ErrorInfo::new("serialize-bytes", err.to_string())))
}

/// Restores a graph from its binary representation.
pub fn graph_from_bytes(bytes: &[u8]) -> Result<Graph, NetError> {
    let serializable: SerializableGraph = bincode::deserialize(bytes)
        .map_err(|err| NetError::Serde(ErrorInfo::new("deserialize-bytes", err.to_string())))?;
    serializable.into_graph()
}

/// Serializes the graph to a JSON string.
pub fn graph_to_json(graph: &Graph) -> Result<String, NetError> {
    let serializable = SerializableGraph::from_graph(graph);
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| NetError::Serde(ErrorInfo::new("serialize-json", err.to_string())))
}

/// Restores a graph from a JSON string.
pub fn graph_from_json(json: &str) -> Result<Graph, NetError> {
    let serializable: SerializableGraph = serde_json::from_str(json)
        .map_err(|err| NetError::Serde(ErrorInfo::new("deserialize-json", err.to_string())))?;
    serializable.into_graph()
}

/// On-disk encoding of a persisted graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphFormat {
    /// `bincode` payload with the `.bin` extension.
    #[default]
    Bincode,
    /// Pretty-printed JSON with the `.json` extension.
    Json,
}

impl GraphFormat {
    /// File extension used for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            GraphFormat::Bincode => "bin",
            GraphFormat::Json => "json",
        }
    }

    /// Infers the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, NetError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("bin") => Ok(GraphFormat::Bincode),
            Some("json") => Ok(GraphFormat::Json),
            _ => Err(NetError::Config(
                ErrorInfo::new("unknown-format", "cannot infer graph format from extension")
                    .with_context("path", path.display().to_string())
                    .with_hint("use a .bin or .json file"),
            )),
        }
    }

    /// Encodes a graph in this format.
    pub fn encode(&self, graph: &Graph) -> Result<Vec<u8>, NetError> {
        match self {
            GraphFormat::Bincode => graph_to_bytes(graph),
            GraphFormat::Json => graph_to_json(graph).map(String::into_bytes),
        }
    }

    /// Decodes a graph stored in this format.
    pub fn decode(&self, bytes: &[u8]) -> Result<Graph, NetError> {
        match self {
            GraphFormat::Bincode => graph_from_bytes(bytes),
            GraphFormat::Json => {
                let text = std::str::from_utf8(bytes).map_err(|err| {
                    NetError::Serde(ErrorInfo::new("invalid-utf8", err.to_string()))
                })?;
                graph_from_json(text)
            }
        }
    }
}

impl fmt::Display for GraphFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphFormat::Bincode => f.write_str("bincode"),
            GraphFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for GraphFormat {
    type Err = NetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bincode" | "bin" => Ok(GraphFormat::Bincode),
            "json" => Ok(GraphFormat::Json),
            other => Err(NetError::Config(
                ErrorInfo::new("unknown-format", format!("unknown graph format {other}"))
                    .with_hint("expected `bincode` or `json`"),
            )),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableGraph {
    schema_version: SchemaVersion,
    nodes: Vec<u64>,
    edges: Vec<(u64, u64)>,
    positions: Option<Vec<(u64, [f64; 2])>>,
    weights: Option<Vec<(u64, u64, f64)>>,
}

impl SerializableGraph {
    fn from_graph(graph: &Graph) -> Self {
        Self {
            schema_version: GRAPH_SCHEMA,
            nodes: graph.nodes().map(|node| node.as_raw()).collect(),
            edges: graph.edges().map(|edge| edge.as_raw()).collect(),
            positions: graph.positions().map(|positions| {
                positions
                    .iter()
                    .map(|(node, pos)| (node.as_raw(), *pos))
                    .collect()
            }),
            weights: graph.weights().map(|weights| {
                weights
                    .iter()
                    .map(|(edge, weight)| {
                        let (lo, hi) = edge.as_raw();
                        (lo, hi, *weight)
                    })
                    .collect()
            }),
        }
    }

    fn into_graph(self) -> Result<Graph, NetError> {
        if !GRAPH_SCHEMA.is_compatible_with(&self.schema_version) {
            return Err(NetError::Serde(
                ErrorInfo::new("schema-mismatch", "unsupported graph schema version")
                    .with_context("found", self.schema_version.to_string())
                    .with_context("supported", GRAPH_SCHEMA.to_string()),
            ));
        }
        let mut graph = Graph::new();
        for raw in self.nodes {
            graph.add_node(NodeId::from_raw(raw))?;
        }
        for (lo, hi) in self.edges {
            graph.add_edge(NodeId::from_raw(lo), NodeId::from_raw(hi))?;
        }
        if let Some(positions) = self.positions {
            graph.set_positions(
                positions
                    .into_iter()
                    .map(|(node, pos)| (NodeId::from_raw(node), pos))
                    .collect(),
            )?;
        }
        if let Some(weights) = self.weights {
            graph.set_weights(
                weights
                    .into_iter()
                    .map(|(lo, hi, weight)| {
                        (EdgeKey::new(NodeId::from_raw(lo), NodeId::from_raw(hi)), weight)
                    })
                    .collect(),
            )?;
        }
        Ok(graph)
    }
}
