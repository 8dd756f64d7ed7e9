use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use netrob_core::provenance::RunProvenance;
use netrob_core::NodeId;
use netrob_data::{
    FileSink, GraphSampler, RobustnessConfig, RobustnessExperiment, UniformRandom,
};
use netrob_graph::{AttackStrategy, GraphFormat};
use serde::Serialize;

use super::{provenance, write_manifest};

#[derive(Args, Debug)]
pub struct RobustnessArgs {
    /// Directory receiving both graphs and `manifest.json`.
    #[arg(long)]
    pub out: PathBuf,
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
    #[arg(long, default_value_t = 50)]
    pub nodes: usize,
    #[arg(long, default_value_t = 0.1)]
    pub edge_prob: f64,
    /// Fraction of nodes removed by the attack.
    #[arg(long, default_value_t = 0.2)]
    pub fraction: f64,
    /// `high-degree` or `random`.
    #[arg(long, default_value = "high-degree")]
    pub strategy: AttackStrategy,
    /// Use unit edge weights instead of Euclidean distances.
    #[arg(long)]
    pub unweighted: bool,
    /// `bincode` or `json`.
    #[arg(long, default_value = "bincode")]
    pub format: GraphFormat,
}

#[derive(Debug, Serialize)]
struct RobustnessManifest<'a> {
    provenance: RunProvenance,
    config: &'a RobustnessConfig,
    removed: Vec<u64>,
    original: String,
    attacked: String,
}

pub fn run(args: &RobustnessArgs) -> Result<(), Box<dyn Error>> {
    let config = RobustnessConfig {
        num_nodes: args.nodes,
        edge_prob: args.edge_prob,
        fraction: args.fraction,
        strategy: args.strategy,
        weighted: !args.unweighted,
        format: args.format,
    };
    let experiment = RobustnessExperiment::new(config)?;
    fs::create_dir_all(&args.out)?;
    let mut sink = FileSink::new(&args.out, args.format);
    let outcome = experiment.run(args.seed, &mut sink)?;
    let name = UniformRandom::new(args.nodes, args.nodes, args.edge_prob)?.name();
    let manifest = RobustnessManifest {
        provenance: provenance(name, args.seed),
        config: experiment.config(),
        removed: outcome.removed.iter().map(NodeId::as_raw).collect(),
        original: outcome.original_location,
        attacked: outcome.attacked_location,
    };
    write_manifest(&args.out, &manifest)
}
