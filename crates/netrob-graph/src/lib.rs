#![deny(missing_docs)]

//! Undirected simple graphs for robustness studies: in-process random graph
//! models, geometric embedding, node-count normalization, node-removal
//! attacks, canonical hashing and serialization.

mod attack;
mod embedding;
mod generators;
mod graph;
mod hash;
mod normalize;
mod serialization;

pub use attack::{
    attack_with_report, removal_count, select_targets, simulate_attack, simulate_attack_named,
    AttackOutcome, AttackSimulator, AttackStrategy,
};
pub use embedding::{euclidean, euclidean_weights, random_positions, GeometricEmbedding};
pub use generators::{
    ensure_probability, gen_barabasi_albert, gen_erdos_renyi, gen_powerlaw_cluster,
    gen_watts_strogatz,
};
pub use graph::{EdgeKey, Graph, Position};
pub use hash::canonical_hash;
pub use normalize::{normalize_node_count, DEFAULT_TARGET_NODES};
pub use serialization::{
    graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json, GraphFormat, GRAPH_SCHEMA,
};
