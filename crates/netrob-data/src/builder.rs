//! Sample, normalize, embed and persist a dataset of graphs.

use netrob_core::errors::NetError;
use netrob_core::rng::RngHandle;
use netrob_graph::{
    canonical_hash, normalize_node_count, GeometricEmbedding, Graph, DEFAULT_TARGET_NODES,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::sampler::GraphSampler;
use crate::sink::GraphSink;

/// One persisted sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub index: usize,
    pub key: String,
    pub location: String,
    pub nodes: usize,
    pub edges: usize,
    pub hash: String,
}

/// Everything a dataset run persisted, in index order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetReport {
    pub sampler: String,
    pub seed: u64,
    pub samples: Vec<SampleRecord>,
}

/// Drives a sampler to produce `num_graphs` normalized, embedded graphs.
///
/// Sample `i` draws from its own RNG substream of the master seed, so any
/// sample can be regenerated alone with [`GraphDatasetBuilder::sample`].
#[derive(Debug)]
pub struct GraphDatasetBuilder {
    sampler: Box<dyn GraphSampler>,
    seed: u64,
    num_graphs: usize,
    target_nodes: usize,
    embedding: GeometricEmbedding,
}

impl GraphDatasetBuilder {
    /// One weighted graph of [`DEFAULT_TARGET_NODES`] nodes unless configured.
    pub fn new(sampler: Box<dyn GraphSampler>, seed: u64) -> Self {
        Self {
            sampler,
            seed,
            num_graphs: 1,
            target_nodes: DEFAULT_TARGET_NODES,
            embedding: GeometricEmbedding::default(),
        }
    }

    pub fn with_num_graphs(mut self, num_graphs: usize) -> Self {
        self.num_graphs = num_graphs;
        self
    }

    pub fn with_target_nodes(mut self, target_nodes: usize) -> Self {
        self.target_nodes = target_nodes;
        self
    }

    pub fn with_weighted(mut self, weighted: bool) -> Self {
        self.embedding = GeometricEmbedding::new(weighted);
        self
    }

    pub fn sampler(&self) -> &dyn GraphSampler {
        self.sampler.as_ref()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn num_graphs(&self) -> usize {
        self.num_graphs
    }

    /// Key sample `index` is persisted under.
    pub fn key(&self, index: usize) -> String {
        format!("{}_{index}", self.sampler.name())
    }

    /// Produces sample `index` without persisting it.
    pub fn sample(&self, index: usize) -> Result<Graph, NetError> {
        let mut rng = RngHandle::for_substream(self.seed, index as u64);
        let raw = self.sampler.generate_graph(&mut rng)?;
        let mut graph = normalize_node_count(&raw, self.target_nodes);
        self.embedding.apply(&mut graph, &mut rng)?;
        Ok(graph)
    }

    /// Produces and persists every sample. The first failure aborts the run;
    /// samples persisted before it stay on the sink.
    #[instrument(skip(self, sink), fields(sampler = %self.sampler, seed = self.seed))]
    pub fn build(&self, sink: &mut dyn GraphSink) -> Result<DatasetReport, NetError> {
        let mut samples = Vec::with_capacity(self.num_graphs);
        for index in 0..self.num_graphs {
            let graph = self.sample(index)?;
            let key = self.key(index);
            let location = sink.persist(&key, &graph)?;
            info!(
                index,
                key = %key,
                nodes = graph.node_count(),
                edges = graph.edge_count(),
                "persisted sample {}/{}",
                index + 1,
                self.num_graphs
            );
            samples.push(SampleRecord {
                index,
                key,
                location,
                nodes: graph.node_count(),
                edges: graph.edge_count(),
                hash: canonical_hash(&graph),
            });
        }
        Ok(DatasetReport {
            sampler: self.sampler.name(),
            seed: self.seed,
            samples,
        })
    }
}
