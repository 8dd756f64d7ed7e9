#![deny(missing_docs)]

//! Hyperbolic random graphs produced by the external `genhrg` executable.
//!
//! The adapter works in three stages that can be exercised on their own:
//! [`Provisioner`] builds the executable once, [`invoke`] runs it for a
//! [`HrgRequest`], and [`read_edge_file`] / [`build_graph`] turn its output
//! into a [`Graph`].

mod invoke;
mod parse;
mod process;
mod provision;

use std::path::PathBuf;
use std::time::Duration;

use netrob_core::errors::NetError;
use netrob_graph::Graph;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use invoke::{invoke, HrgParams, HrgRequest};
pub use parse::{build_graph, parse_edge_list, read_edge_file, HEADER_LINES};
pub use provision::{
    Provisioner, ToolchainSpec, DEFAULT_COMMIT, DEFAULT_REPOSITORY, DEFAULT_TARGET,
};

/// Settings of the external generator shared by every hyperbolic sampler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// Checkout directory; temporary output files are written here too.
    #[serde(default = "AdapterConfig::default_workdir")]
    pub workdir: PathBuf,
    /// Use this executable instead of provisioning one.
    #[serde(default)]
    pub binary: Option<PathBuf>,
    /// Source and build target of the generator.
    #[serde(default)]
    pub toolchain: ToolchainSpec,
    /// Upper bound for a single generator run, in seconds.
    #[serde(default = "AdapterConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl AdapterConfig {
    fn default_workdir() -> PathBuf {
        PathBuf::from("girgs")
    }

    const fn default_timeout_secs() -> u64 {
        600
    }
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            workdir: Self::default_workdir(),
            binary: None,
            toolchain: ToolchainSpec::default(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

/// Graph returned by the generator together with the request that made it.
#[derive(Debug, Clone)]
pub struct HrgOutput {
    /// Parsed graph; its node count may differ from `request.n`.
    pub graph: Graph,
    /// The run that produced the graph.
    pub request: HrgRequest,
}

/// Provision, invoke and parse, wired together.
#[derive(Debug, Clone)]
pub struct ExternalGeneratorAdapter {
    config: AdapterConfig,
    provisioner: Provisioner,
}

impl ExternalGeneratorAdapter {
    /// Creates an adapter; nothing is built until the first [`Self::generate`].
    pub fn new(config: AdapterConfig) -> Self {
        let provisioner = Provisioner::new(config.workdir.clone(), config.toolchain.clone());
        Self {
            config,
            provisioner,
        }
    }

    /// Adapter settings.
    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Returns the executable to launch, provisioning it if needed.
    pub fn binary(&self) -> Result<PathBuf, NetError> {
        match &self.config.binary {
            Some(binary) => Ok(binary.clone()),
            None => self.provisioner.ensure_built(),
        }
    }

    /// Runs the generator for `n` nodes and parses its output.
    pub fn generate(&self, n: usize, params: HrgParams) -> Result<HrgOutput, NetError> {
        let binary = self.binary()?;
        std::fs::create_dir_all(&self.config.workdir)
            .map_err(|err| NetError::io("create-workdir", &self.config.workdir, &err))?;
        let request = HrgRequest::new(n, params, &self.config.workdir);
        let output = invoke(
            &binary,
            &request,
            Duration::from_secs(self.config.timeout_secs),
        )?;
        let edges = read_edge_file(&output)?;
        let graph = build_graph(n, &edges)?;
        debug!(
            requested = n,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "generated hyperbolic random graph"
        );
        Ok(HrgOutput { graph, request })
    }
}
