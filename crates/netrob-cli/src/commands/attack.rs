use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use netrob_core::rng::RngHandle;
use netrob_data::load_graph;
use netrob_graph::{AttackSimulator, AttackStrategy, GraphFormat};
use tracing::info;

#[derive(Args, Debug)]
pub struct AttackArgs {
    /// Graph written by `generate` or `robustness` (`.bin` or `.json`).
    #[arg(long)]
    pub input: PathBuf,
    /// Destination; the format follows its extension.
    #[arg(long)]
    pub out: PathBuf,
    #[arg(long, default_value_t = 0.2)]
    pub fraction: f64,
    #[arg(long, default_value = "high-degree")]
    pub strategy: AttackStrategy,
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

pub fn run(args: &AttackArgs) -> Result<(), Box<dyn Error>> {
    let simulator = AttackSimulator::new(args.fraction, args.strategy)?;
    let format = GraphFormat::from_path(&args.out)?;
    let graph = load_graph(&args.input)?;
    let mut rng = RngHandle::from_seed(args.seed);
    let outcome = simulator.run(&graph, &mut rng)?;
    if let Some(parent) = args.out.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&args.out, format.encode(&outcome.graph)?)?;
    info!(
        input = %args.input.display(),
        out = %args.out.display(),
        removed = ?outcome.removed,
        "attacked graph written"
    );
    Ok(())
}
