use std::path::Path;

use netrob_core::errors::NetError;
use netrob_graph::{GraphFormat, DEFAULT_TARGET_NODES};
use netrob_hrg::{AdapterConfig, ExternalGeneratorAdapter, HrgParams};
use serde::{Deserialize, Serialize};

use crate::builder::GraphDatasetBuilder;
use crate::json::from_yaml_slice;
use crate::sampler::{
    GraphSampler, HyperbolicRandomGraph, PowerLawClustering, PreferentialAttachment, SmallWorld,
    UniformRandom,
};

/// Declarative description of any sampler, tagged by `model` in plans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "kebab-case")]
pub enum SamplerSpec {
    /// Erdős–Rényi G(n, p).
    UniformRandom {
        /// Smallest node count.
        min_n: usize,
        /// Largest node count.
        max_n: usize,
        /// Edge probability.
        p: f64,
    },
    /// Barabási–Albert.
    PreferentialAttachment {
        /// Smallest node count.
        min_n: usize,
        /// Largest node count.
        max_n: usize,
        /// Edges attached per new node.
        m: usize,
    },
    /// Holme–Kim.
    PowerLawClustering {
        /// Smallest node count.
        min_n: usize,
        /// Largest node count.
        max_n: usize,
        /// Edges attached per new node.
        m: usize,
        /// Probability of a triad-formation step.
        p: f64,
    },
    /// Watts–Strogatz.
    SmallWorld {
        /// Smallest node count.
        min_n: usize,
        /// Largest node count.
        max_n: usize,
        /// Ring lattice degree.
        k: usize,
        /// Rewiring probability.
        p: f64,
    },
    /// Hyperbolic random graph from the external generator.
    Hyperbolic {
        /// Smallest requested node count.
        min_n: usize,
        /// Largest requested node count.
        max_n: usize,
        /// Model parameters.
        #[serde(flatten)]
        params: HrgParams,
    },
}

impl SamplerSpec {
    /// Builds the described sampler. `adapter` is only consulted by the
    /// hyperbolic model.
    pub fn build(&self, adapter: &AdapterConfig) -> Result<Box<dyn GraphSampler>, NetError> {
        let sampler: Box<dyn GraphSampler> = match *self {
            SamplerSpec::UniformRandom { min_n, max_n, p } => {
                Box::new(UniformRandom::new(min_n, max_n, p)?)
            }
            SamplerSpec::PreferentialAttachment { min_n, max_n, m } => {
                Box::new(PreferentialAttachment::new(min_n, max_n, m)?)
            }
            SamplerSpec::PowerLawClustering { min_n, max_n, m, p } => {
                Box::new(PowerLawClustering::new(min_n, max_n, m, p)?)
            }
            SamplerSpec::SmallWorld { min_n, max_n, k, p } => {
                Box::new(SmallWorld::new(min_n, max_n, k, p)?)
            }
            SamplerSpec::Hyperbolic {
                min_n,
                max_n,
                params,
            } => Box::new(HyperbolicRandomGraph::new(
                min_n,
                max_n,
                params,
                ExternalGeneratorAdapter::new(adapter.clone()),
            )?),
        };
        Ok(sampler)
    }
}

/// A dataset run as read from a YAML plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetPlan {
    pub sampler: SamplerSpec,
    #[serde(default = "DatasetPlan::default_num_graphs")]
    pub num_graphs: usize,
    #[serde(default = "DatasetPlan::default_target_nodes")]
    pub target_nodes: usize,
    #[serde(default = "DatasetPlan::default_weighted")]
    pub weighted: bool,
    #[serde(default)]
    pub format: GraphFormat,
    /// External generator settings for hyperbolic samplers.
    #[serde(default)]
    pub hrg: Option<AdapterConfig>,
}

impl DatasetPlan {
    const fn default_num_graphs() -> usize {
        1
    }

    const fn default_target_nodes() -> usize {
        DEFAULT_TARGET_NODES
    }

    const fn default_weighted() -> bool {
        true
    }

    /// Parses a plan from YAML bytes.
    pub fn from_yaml(bytes: &[u8]) -> Result<Self, NetError> {
        from_yaml_slice(bytes)
    }

    /// Reads and parses a plan file.
    pub fn load(path: &Path) -> Result<Self, NetError> {
        let bytes = std::fs::read(path).map_err(|err| NetError::io("read-plan", path, &err))?;
        Self::from_yaml(&bytes)
    }

    /// Builds the sampler and wraps it in a dataset builder seeded with `seed`.
    pub fn builder(&self, seed: u64) -> Result<GraphDatasetBuilder, NetError> {
        let adapter = self.hrg.clone().unwrap_or_default();
        let sampler = self.sampler.build(&adapter)?;
        Ok(GraphDatasetBuilder::new(sampler, seed)
            .with_num_graphs(self.num_graphs)
            .with_target_nodes(self.target_nodes)
            .with_weighted(self.weighted))
    }
}
