//! Random graph models behind a common sampling interface.

use std::fmt;

use netrob_core::errors::{ErrorInfo, NetError};
use netrob_core::format_param;
use netrob_core::rng::RngHandle;
use netrob_graph::{
    ensure_probability, gen_barabasi_albert, gen_erdos_renyi, gen_powerlaw_cluster,
    gen_watts_strogatz, Graph,
};
use netrob_hrg::{ExternalGeneratorAdapter, HrgOutput, HrgParams};
use rand::Rng;
use tracing::debug;

/// A random graph model with fixed parameters.
///
/// The `Display` form is the canonical name of the sampler: it encodes the
/// model and every parameter, so equal configurations print equal names.
pub trait GraphSampler: fmt::Display + fmt::Debug + Send + Sync {
    /// Draws one graph. Every call draws its own node count.
    fn generate_graph(&self, rng: &mut RngHandle) -> Result<Graph, NetError>;

    /// Canonical name used to key persisted samples.
    fn name(&self) -> String {
        self.to_string()
    }
}

/// Inclusive range the node count of every sample is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeRange {
    min_n: usize,
    max_n: usize,
}

impl NodeRange {
    /// Creates the range `[min_n, max_n]`.
    pub fn new(min_n: usize, max_n: usize) -> Result<Self, NetError> {
        if min_n > max_n {
            return Err(NetError::Config(
                ErrorInfo::new("empty-node-range", "min_n must not exceed max_n")
                    .with_context("min_n", min_n.to_string())
                    .with_context("max_n", max_n.to_string()),
            ));
        }
        Ok(Self { min_n, max_n })
    }

    /// Lower bound.
    pub fn min_n(&self) -> usize {
        self.min_n
    }

    /// Upper bound.
    pub fn max_n(&self) -> usize {
        self.max_n
    }

    /// Draws a node count uniformly from the range.
    pub fn draw(&self, rng: &mut RngHandle) -> usize {
        rng.gen_range(self.min_n..=self.max_n)
    }
}

impl fmt::Display for NodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.min_n, self.max_n)
    }
}

fn ensure_attachment(name: &str, value: usize) -> Result<(), NetError> {
    if value == 0 {
        return Err(NetError::Config(
            ErrorInfo::new("zero-attachment", "attachment count must be at least one")
                .with_context("parameter", name),
        ));
    }
    Ok(())
}

/// Erdős–Rényi G(n, p).
#[derive(Debug, Clone, PartialEq)]
pub struct UniformRandom {
    range: NodeRange,
    p: f64,
}

impl UniformRandom {
    /// Validates the parameters.
    pub fn new(min_n: usize, max_n: usize, p: f64) -> Result<Self, NetError> {
        ensure_probability("p", p)?;
        Ok(Self {
            range: NodeRange::new(min_n, max_n)?,
            p,
        })
    }

    /// Node count range.
    pub fn range(&self) -> NodeRange {
        self.range
    }
}

impl GraphSampler for UniformRandom {
    fn generate_graph(&self, rng: &mut RngHandle) -> Result<Graph, NetError> {
        let n = self.range.draw(rng);
        debug!(sampler = %self, n, "sampling uniform random graph");
        gen_erdos_renyi(n, self.p, rng)
    }
}

impl fmt::Display for UniformRandom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ER_{}_{}", self.range, format_param(self.p))
    }
}

/// Barabási–Albert preferential attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferentialAttachment {
    range: NodeRange,
    m: usize,
}

impl PreferentialAttachment {
    /// Validates the parameters. `m` larger than a drawn node count is
    /// clamped at generation time.
    pub fn new(min_n: usize, max_n: usize, m: usize) -> Result<Self, NetError> {
        ensure_attachment("m", m)?;
        Ok(Self {
            range: NodeRange::new(min_n, max_n)?,
            m,
        })
    }

    /// Node count range.
    pub fn range(&self) -> NodeRange {
        self.range
    }
}

impl GraphSampler for PreferentialAttachment {
    fn generate_graph(&self, rng: &mut RngHandle) -> Result<Graph, NetError> {
        let n = self.range.draw(rng);
        let m = self.m.min(n);
        debug!(sampler = %self, n, m, "sampling preferential attachment graph");
        if m == 0 {
            return Ok(Graph::new());
        }
        gen_barabasi_albert(n, m, rng)
    }
}

impl fmt::Display for PreferentialAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BA_{}_{}", self.range, self.m)
    }
}

/// Holme–Kim power-law graph with triad formation.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerLawClustering {
    range: NodeRange,
    m: usize,
    p: f64,
}

impl PowerLawClustering {
    /// Validates the parameters.
    pub fn new(min_n: usize, max_n: usize, m: usize, p: f64) -> Result<Self, NetError> {
        ensure_attachment("m", m)?;
        ensure_probability("p", p)?;
        Ok(Self {
            range: NodeRange::new(min_n, max_n)?,
            m,
            p,
        })
    }

    /// Node count range.
    pub fn range(&self) -> NodeRange {
        self.range
    }
}

impl GraphSampler for PowerLawClustering {
    fn generate_graph(&self, rng: &mut RngHandle) -> Result<Graph, NetError> {
        let n = self.range.draw(rng);
        let m = self.m.min(n);
        debug!(sampler = %self, n, m, "sampling power-law cluster graph");
        if m == 0 {
            return Ok(Graph::new());
        }
        gen_powerlaw_cluster(n, m, self.p, rng)
    }
}

impl fmt::Display for PowerLawClustering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HK_{}_{}_{}", self.range, self.m, format_param(self.p))
    }
}

/// Watts–Strogatz small world.
#[derive(Debug, Clone, PartialEq)]
pub struct SmallWorld {
    range: NodeRange,
    k: usize,
    p: f64,
}

impl SmallWorld {
    /// Validates the parameters. A ring degree above the drawn node count
    /// fails at generation time.
    pub fn new(min_n: usize, max_n: usize, k: usize, p: f64) -> Result<Self, NetError> {
        ensure_probability("p", p)?;
        Ok(Self {
            range: NodeRange::new(min_n, max_n)?,
            k,
            p,
        })
    }

    /// Node count range.
    pub fn range(&self) -> NodeRange {
        self.range
    }
}

impl GraphSampler for SmallWorld {
    fn generate_graph(&self, rng: &mut RngHandle) -> Result<Graph, NetError> {
        let n = self.range.draw(rng);
        debug!(sampler = %self, n, "sampling small-world graph");
        gen_watts_strogatz(n, self.k, self.p, rng)
    }
}

impl fmt::Display for SmallWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WS_{}_{}_{}", self.range, self.k, format_param(self.p))
    }
}

/// Hyperbolic random graph produced by the external generator.
///
/// The generator decides the final node count; the requested count is
/// available through [`HyperbolicRandomGraph::generate_with_request`].
#[derive(Debug, Clone)]
pub struct HyperbolicRandomGraph {
    range: NodeRange,
    params: HrgParams,
    adapter: ExternalGeneratorAdapter,
}

impl HyperbolicRandomGraph {
    /// Creates a sampler driving `adapter`.
    pub fn new(
        min_n: usize,
        max_n: usize,
        params: HrgParams,
        adapter: ExternalGeneratorAdapter,
    ) -> Result<Self, NetError> {
        Ok(Self {
            range: NodeRange::new(min_n, max_n)?,
            params,
            adapter,
        })
    }

    /// Node count range.
    pub fn range(&self) -> NodeRange {
        self.range
    }

    /// Model parameters forwarded to the generator.
    pub fn params(&self) -> HrgParams {
        self.params
    }

    /// Draws a graph and returns it with the request that produced it.
    pub fn generate_with_request(&self, rng: &mut RngHandle) -> Result<HrgOutput, NetError> {
        let n = self.range.draw(rng);
        debug!(sampler = %self, n, "requesting hyperbolic random graph");
        self.adapter.generate(n, self.params)
    }
}

impl GraphSampler for HyperbolicRandomGraph {
    fn generate_graph(&self, rng: &mut RngHandle) -> Result<Graph, NetError> {
        self.generate_with_request(rng).map(|output| output.graph)
    }
}

impl fmt::Display for HyperbolicRandomGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HRG_{}_{}_{}_{}",
            self.range,
            format_param(self.params.alpha),
            format_param(self.params.temperature),
            format_param(self.params.degree)
        )
    }
}
