use std::error::Error;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use netrob_core::errors::NetError;
use tracing::{error, field};

use commands::{
    attack::{self, AttackArgs},
    generate::{self, GenerateArgs},
    robustness::{self, RobustnessArgs},
};

mod commands;
mod logging;

#[derive(Parser, Debug)]
#[command(name = "netrob", about = "Random graph datasets for network robustness studies")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sample, normalize and persist a dataset described by a YAML plan.
    Generate(GenerateArgs),
    /// Build an embedded G(n, p) graph and persist it with an attacked copy.
    Robustness(RobustnessArgs),
    /// Remove a fraction of the nodes of a persisted graph.
    Attack(AttackArgs),
}

fn dispatch(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Command::Generate(args) => generate::run(&args),
        Command::Robustness(args) => robustness::run(&args),
        Command::Attack(args) => attack::run(&args),
    }
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        eprintln!("netrob: {err}");
        return ExitCode::FAILURE;
    }

    let cli = Cli::parse();
    if let Err(err) = dispatch(cli) {
        let code = err
            .downcast_ref::<NetError>()
            .map(|net| field::display(net.code().to_string()));
        error!(error = %err, code, "command failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
