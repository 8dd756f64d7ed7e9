//! Build a graph, attack it, keep both.

use netrob_core::errors::NetError;
use netrob_core::rng::RngHandle;
use netrob_core::NodeId;
use netrob_graph::{
    ensure_probability, gen_erdos_renyi, AttackSimulator, AttackStrategy, GeometricEmbedding,
    Graph, GraphFormat,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::sink::GraphSink;

/// Key of the unperturbed graph.
pub const ORIGINAL_KEY: &str = "original_graph";
/// Key of the attacked graph.
pub const ATTACKED_KEY: &str = "attacked_graph";

/// Parameters of a robustness run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobustnessConfig {
    #[serde(default = "RobustnessConfig::default_num_nodes")]
    pub num_nodes: usize,
    #[serde(default = "RobustnessConfig::default_edge_prob")]
    pub edge_prob: f64,
    #[serde(default = "RobustnessConfig::default_fraction")]
    pub fraction: f64,
    #[serde(default = "RobustnessConfig::default_strategy")]
    pub strategy: AttackStrategy,
    #[serde(default = "RobustnessConfig::default_weighted")]
    pub weighted: bool,
    #[serde(default)]
    pub format: GraphFormat,
}

impl RobustnessConfig {
    const fn default_num_nodes() -> usize {
        50
    }

    const fn default_edge_prob() -> f64 {
        0.1
    }

    const fn default_fraction() -> f64 {
        0.2
    }

    const fn default_strategy() -> AttackStrategy {
        AttackStrategy::HighDegree
    }

    const fn default_weighted() -> bool {
        true
    }
}

impl Default for RobustnessConfig {
    fn default() -> Self {
        Self {
            num_nodes: Self::default_num_nodes(),
            edge_prob: Self::default_edge_prob(),
            fraction: Self::default_fraction(),
            strategy: Self::default_strategy(),
            weighted: Self::default_weighted(),
            format: GraphFormat::default(),
        }
    }
}

/// Graphs and locations produced by [`RobustnessExperiment::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct RobustnessOutcome {
    pub original: Graph,
    pub attacked: Graph,
    pub removed: Vec<NodeId>,
    pub original_location: String,
    pub attacked_location: String,
}

/// Embedded G(n, p) graph followed by a node-removal attack.
#[derive(Debug, Clone)]
pub struct RobustnessExperiment {
    config: RobustnessConfig,
    simulator: AttackSimulator,
}

impl RobustnessExperiment {
    /// Validates the edge probability and attack fraction.
    pub fn new(config: RobustnessConfig) -> Result<Self, NetError> {
        ensure_probability("edge_prob", config.edge_prob)?;
        let simulator = AttackSimulator::new(config.fraction, config.strategy)?;
        Ok(Self { config, simulator })
    }

    pub fn config(&self) -> &RobustnessConfig {
        &self.config
    }

    /// Runs the experiment and persists both graphs through `sink`.
    ///
    /// Graph construction and the attack draw from separate substreams of
    /// `seed`.
    #[instrument(
        skip(self, sink),
        fields(nodes = self.config.num_nodes, strategy = %self.config.strategy)
    )]
    pub fn run(&self, seed: u64, sink: &mut dyn GraphSink) -> Result<RobustnessOutcome, NetError> {
        let mut build_rng = RngHandle::for_substream(seed, 0);
        let mut original =
            gen_erdos_renyi(self.config.num_nodes, self.config.edge_prob, &mut build_rng)?;
        GeometricEmbedding::new(self.config.weighted).apply(&mut original, &mut build_rng)?;

        let mut attack_rng = RngHandle::for_substream(seed, 1);
        let outcome = self.simulator.run(&original, &mut attack_rng)?;

        let original_location = sink.persist(ORIGINAL_KEY, &original)?;
        let attacked_location = sink.persist(ATTACKED_KEY, &outcome.graph)?;
        info!(
            original_nodes = original.node_count(),
            attacked_nodes = outcome.graph.node_count(),
            removed = outcome.removed.len(),
            "robustness experiment complete"
        );
        Ok(RobustnessOutcome {
            original,
            attacked: outcome.graph,
            removed: outcome.removed,
            original_location,
            attacked_location,
        })
    }
}
