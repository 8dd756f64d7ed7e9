use std::fmt;
use std::str::FromStr;

use netrob_core::errors::{ErrorInfo, NetError};
use netrob_core::rng::RngHandle;
use netrob_core::NodeId;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::graph::Graph;

/// Rule used to pick the nodes an attack removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttackStrategy {
    /// Highest degree first, ties broken by ascending node id.
    HighDegree,
    /// Uniform sample without replacement.
    Random,
}

impl AttackStrategy {
    /// Stable textual name of the strategy.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttackStrategy::HighDegree => "high-degree",
            AttackStrategy::Random => "random",
        }
    }
}

impl fmt::Display for AttackStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttackStrategy {
    type Err = NetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high-degree" => Ok(AttackStrategy::HighDegree),
            "random" => Ok(AttackStrategy::Random),
            other => Err(NetError::Config(
                ErrorInfo::new("unknown-strategy", format!("Unknown strategy: {other}"))
                    .with_context("strategy", other)
                    .with_hint("expected `high-degree` or `random`"),
            )),
        }
    }
}

/// Result of an attack: the perturbed copy and the nodes taken out of it.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackOutcome {
    /// Graph with the removed nodes and their incident edges gone.
    pub graph: Graph,
    /// Removed nodes in removal order.
    pub removed: Vec<NodeId>,
}

/// Removes a fixed fraction of nodes from graphs by a fixed strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackSimulator {
    fraction: f64,
    strategy: AttackStrategy,
}

impl AttackSimulator {
    /// Creates a simulator after checking that `fraction` lies in `[0, 1]`.
    pub fn new(fraction: f64, strategy: AttackStrategy) -> Result<Self, NetError> {
        ensure_fraction(fraction)?;
        Ok(Self { fraction, strategy })
    }

    /// Fraction of nodes removed per attack.
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    /// Strategy used to select the removed nodes.
    pub fn strategy(&self) -> AttackStrategy {
        self.strategy
    }

    /// Attacks a copy of `graph`; the input is left untouched.
    #[instrument(level = "debug", skip(self, graph, rng), fields(strategy = %self.strategy, fraction = self.fraction))]
    pub fn run(&self, graph: &Graph, rng: &mut RngHandle) -> Result<AttackOutcome, NetError> {
        let count = removal_count(graph.node_count(), self.fraction);
        let removed = select_targets(graph, count, self.strategy, rng)?;
        let mut attacked = graph.clone();
        for node in &removed {
            attacked.remove_node(*node)?;
        }
        debug!(
            removed = removed.len(),
            nodes = attacked.node_count(),
            edges = attacked.edge_count(),
            "attack applied"
        );
        Ok(AttackOutcome {
            graph: attacked,
            removed,
        })
    }
}

/// `floor(fraction * node_count)`, capped at `node_count`.
pub fn removal_count(node_count: usize, fraction: f64) -> usize {
    ((fraction * node_count as f64).floor() as usize).min(node_count)
}

/// Picks `count` nodes of `graph` according to `strategy`.
pub fn select_targets(
    graph: &Graph,
    count: usize,
    strategy: AttackStrategy,
    rng: &mut RngHandle,
) -> Result<Vec<NodeId>, NetError> {
    match strategy {
        AttackStrategy::HighDegree => {
            let mut ranked = graph
                .nodes()
                .map(|node| Ok((node, graph.degree(node)?)))
                .collect::<Result<Vec<_>, NetError>>()?;
            // node order is ascending, so a stable sort keeps ties by id
            ranked.sort_by(|a, b| b.1.cmp(&a.1));
            Ok(ranked.into_iter().take(count).map(|(node, _)| node).collect())
        }
        AttackStrategy::Random => {
            let nodes: Vec<NodeId> = graph.nodes().collect();
            Ok(nodes.choose_multiple(rng, count).copied().collect())
        }
    }
}

/// Attacks a copy of `graph` and reports which nodes were removed.
pub fn attack_with_report(
    graph: &Graph,
    fraction: f64,
    strategy: AttackStrategy,
    rng: &mut RngHandle,
) -> Result<AttackOutcome, NetError> {
    AttackSimulator::new(fraction, strategy)?.run(graph, rng)
}

/// Returns a copy of `graph` with `floor(fraction * |V|)` nodes removed.
pub fn simulate_attack(
    graph: &Graph,
    fraction: f64,
    strategy: AttackStrategy,
    rng: &mut RngHandle,
) -> Result<Graph, NetError> {
    Ok(attack_with_report(graph, fraction, strategy, rng)?.graph)
}

/// Same as [`simulate_attack`] with the strategy given by name.
pub fn simulate_attack_named(
    graph: &Graph,
    fraction: f64,
    strategy: &str,
    rng: &mut RngHandle,
) -> Result<Graph, NetError> {
    let strategy: AttackStrategy = strategy.parse()?;
    simulate_attack(graph, fraction, strategy, rng)
}

fn ensure_fraction(fraction: f64) -> Result<(), NetError> {
    if !(0.0..=1.0).contains(&fraction) {
        return Err(NetError::Config(
            ErrorInfo::new("fraction-out-of-range", "attack fraction must lie in [0, 1]")
                .with_context("fraction", fraction.to_string()),
        ));
    }
    Ok(())
}
