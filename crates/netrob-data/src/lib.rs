//! Dataset generation for network robustness studies.
//!
//! A [`GraphSampler`] draws raw graphs from a random graph model;
//! [`GraphDatasetBuilder`] normalizes, embeds and persists them through a
//! [`GraphSink`]. [`RobustnessExperiment`] pairs a generated graph with an
//! attacked copy.

mod builder;
mod json;
mod plan;
mod robustness;
mod sampler;
mod sink;

pub use builder::{DatasetReport, GraphDatasetBuilder, SampleRecord};
pub use json::{from_json_slice, from_yaml_slice, to_canonical_json_bytes};
pub use plan::{DatasetPlan, SamplerSpec};
pub use robustness::{
    RobustnessConfig, RobustnessExperiment, RobustnessOutcome, ATTACKED_KEY, ORIGINAL_KEY,
};
pub use sampler::{
    GraphSampler, HyperbolicRandomGraph, NodeRange, PowerLawClustering, PreferentialAttachment,
    SmallWorld, UniformRandom,
};
pub use sink::{load_graph, FileSink, GraphSink, MemorySink};
