//! In-process random graph models.
//!
//! Every generator returns a graph on exactly `n` nodes labelled `0..n`.

use std::collections::BTreeSet;

use netrob_core::errors::{ErrorInfo, NetError};
use netrob_core::rng::RngHandle;
use netrob_core::NodeId;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::graph::Graph;

/// Samples a G(n, p) graph: every pair `i < j` is kept with probability `p`.
pub fn gen_erdos_renyi(n: usize, p: f64, rng: &mut RngHandle) -> Result<Graph, NetError> {
    ensure_probability("p", p)?;
    if p >= 1.0 {
        return Ok(Graph::complete(n));
    }
    let mut graph = Graph::with_nodes(n);
    if p <= 0.0 {
        return Ok(graph);
    }
    for u in 0..n as u64 {
        for v in (u + 1)..n as u64 {
            if rng.gen::<f64>() < p {
                graph.add_edge(NodeId::from_raw(u), NodeId::from_raw(v))?;
            }
        }
    }
    Ok(graph)
}

/// Samples a Barabási–Albert preferential attachment graph.
///
/// Growth starts from a star on nodes `0..=m`. When `m >= n` there is no room
/// for a seed star and the saturated limit, the complete graph, is returned.
pub fn gen_barabasi_albert(n: usize, m: usize, rng: &mut RngHandle) -> Result<Graph, NetError> {
    ensure_attachment(m)?;
    if m >= n {
        return Ok(Graph::complete(n));
    }
    let mut graph = Graph::with_nodes(n);
    let hub = NodeId::from_raw(0);
    // one entry per unit of degree
    let mut repeated: Vec<NodeId> = Vec::with_capacity(2 * n * m);
    for leaf in 1..=m as u64 {
        graph.add_edge(hub, NodeId::from_raw(leaf))?;
        repeated.push(hub);
        repeated.push(NodeId::from_raw(leaf));
    }
    for raw in (m + 1) as u64..n as u64 {
        let source = NodeId::from_raw(raw);
        let targets = random_subset(&repeated, m, rng);
        for target in &targets {
            graph.add_edge(source, *target)?;
        }
        repeated.extend(targets);
        repeated.extend(std::iter::repeat(source).take(m));
    }
    Ok(graph)
}

/// Samples a Holme–Kim power-law graph with tunable clustering.
///
/// After each preferential attachment step the new node closes a triangle
/// with probability `p` by linking to a neighbour of its last target.
pub fn gen_powerlaw_cluster(
    n: usize,
    m: usize,
    p: f64,
    rng: &mut RngHandle,
) -> Result<Graph, NetError> {
    ensure_attachment(m)?;
    ensure_probability("p", p)?;
    if m > n {
        return Err(NetError::Config(
            ErrorInfo::new("attachment-exceeds-nodes", "attachment count exceeds node count")
                .with_context("m", m.to_string())
                .with_context("n", n.to_string())
                .with_hint("clamp m to the node count"),
        ));
    }
    let mut graph = Graph::with_nodes(n);
    let mut repeated: Vec<NodeId> = (0..m as u64).map(NodeId::from_raw).collect();
    for raw in m as u64..n as u64 {
        let source = NodeId::from_raw(raw);
        let mut candidates = random_subset(&repeated, m, rng).into_iter();
        let Some(mut target) = candidates.next() else {
            break;
        };
        graph.add_edge(source, target)?;
        repeated.push(target);
        let mut count = 1;
        while count < m {
            if rng.gen::<f64>() < p {
                let neighbourhood: Vec<NodeId> = graph
                    .neighbors(target)?
                    .filter(|nbr| *nbr != source && !graph.has_edge(source, *nbr))
                    .collect();
                if let Some(&nbr) = neighbourhood.choose(rng) {
                    graph.add_edge(source, nbr)?;
                    repeated.push(nbr);
                    count += 1;
                    continue;
                }
            }
            let Some(next) = candidates.next() else {
                break;
            };
            target = next;
            graph.add_edge(source, target)?;
            repeated.push(target);
            count += 1;
        }
        repeated.extend(std::iter::repeat(source).take(m));
    }
    Ok(graph)
}

/// Samples a Watts–Strogatz small-world graph.
///
/// Builds a ring lattice where each node links to its `k / 2` nearest
/// successors, then rewires each lattice edge with probability `p`.
pub fn gen_watts_strogatz(
    n: usize,
    k: usize,
    p: f64,
    rng: &mut RngHandle,
) -> Result<Graph, NetError> {
    ensure_probability("p", p)?;
    if k > n {
        return Err(NetError::Config(
            ErrorInfo::new("ring-degree-exceeds-nodes", "ring degree must not exceed node count")
                .with_context("k", k.to_string())
                .with_context("n", n.to_string()),
        ));
    }
    if k == n {
        return Ok(Graph::complete(n));
    }
    let mut graph = Graph::with_nodes(n);
    let nodes: Vec<NodeId> = graph.nodes().collect();
    let half = k / 2;
    for j in 1..=half {
        for (idx, u) in nodes.iter().enumerate() {
            graph.add_edge(*u, nodes[(idx + j) % n])?;
        }
    }
    for j in 1..=half {
        for (idx, u) in nodes.iter().enumerate() {
            if rng.gen::<f64>() >= p {
                continue;
            }
            let v = nodes[(idx + j) % n];
            if let Some(w) = pick_rewire_target(&graph, *u, &nodes, rng)? {
                graph.remove_edge(*u, v)?;
                graph.add_edge(*u, w)?;
            }
        }
    }
    Ok(graph)
}

/// Draws a new endpoint for `u` that is neither `u` nor a current neighbour.
/// Gives up once `u` is adjacent to every other node.
fn pick_rewire_target(
    graph: &Graph,
    u: NodeId,
    nodes: &[NodeId],
    rng: &mut RngHandle,
) -> Result<Option<NodeId>, NetError> {
    let Some(mut w) = nodes.choose(rng).copied() else {
        return Ok(None);
    };
    while w == u || graph.has_edge(u, w) {
        if let Some(next) = nodes.choose(rng) {
            w = *next;
        }
        if graph.degree(u)? >= nodes.len() - 1 {
            return Ok(None);
        }
    }
    Ok(Some(w))
}

/// Draws `count` distinct values from `pool` by repeated uniform choice, so
/// values that repeat in the pool are proportionally more likely.
fn random_subset(pool: &[NodeId], count: usize, rng: &mut RngHandle) -> BTreeSet<NodeId> {
    let distinct = pool.iter().collect::<BTreeSet<_>>().len();
    let wanted = count.min(distinct);
    let mut targets = BTreeSet::new();
    while targets.len() < wanted {
        if let Some(choice) = pool.choose(rng) {
            targets.insert(*choice);
        }
    }
    targets
}

fn ensure_attachment(m: usize) -> Result<(), NetError> {
    if m == 0 {
        return Err(NetError::Config(ErrorInfo::new(
            "zero-attachment",
            "attachment count must be at least one",
        )));
    }
    Ok(())
}

/// Rejects probabilities outside `[0, 1]` (including NaN) with a config error.
pub fn ensure_probability(name: &str, value: f64) -> Result<(), NetError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(NetError::Config(
            ErrorInfo::new("probability-out-of-range", "probability must lie in [0, 1]")
                .with_context("parameter", name)
                .with_context("value", value.to_string()),
        ));
    }
    Ok(())
}
