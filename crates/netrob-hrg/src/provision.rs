//! One-time, filesystem-guarded build of the external generator.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Mutex;
use std::time::Duration;

use netrob_core::errors::{ErrorInfo, NetError};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::process::run_streaming;

/// Upstream repository of the girgs generators.
pub const DEFAULT_REPOSITORY: &str = "https://github.com/chistopher/girgs";
/// Revision the adapter's output contract was written against.
pub const DEFAULT_COMMIT: &str = "c38e4118f02cffae51b1eaf7a1c1f9314a6a89c8";
/// Executable target built from the checkout.
pub const DEFAULT_TARGET: &str = "genhrg";

static PROVISION_LOCK: Mutex<()> = Mutex::new(());

/// Where the generator's sources come from and which target to build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolchainSpec {
    /// Git repository cloned into the working directory.
    #[serde(default = "ToolchainSpec::default_repository")]
    pub repository: String,
    /// Pinned commit checked out after cloning.
    #[serde(default = "ToolchainSpec::default_commit")]
    pub commit: String,
    /// Build target producing the executable.
    #[serde(default = "ToolchainSpec::default_target")]
    pub target: String,
    /// Upper bound for each provisioning step, in seconds.
    #[serde(default = "ToolchainSpec::default_step_timeout_secs")]
    pub step_timeout_secs: u64,
}

impl ToolchainSpec {
    fn default_repository() -> String {
        DEFAULT_REPOSITORY.to_string()
    }

    fn default_commit() -> String {
        DEFAULT_COMMIT.to_string()
    }

    fn default_target() -> String {
        DEFAULT_TARGET.to_string()
    }

    const fn default_step_timeout_secs() -> u64 {
        1_800
    }
}

impl Default for ToolchainSpec {
    fn default() -> Self {
        Self {
            repository: Self::default_repository(),
            commit: Self::default_commit(),
            target: Self::default_target(),
            step_timeout_secs: Self::default_step_timeout_secs(),
        }
    }
}

/// Clones and builds the generator into a working directory on first use.
///
/// Existence of the working directory is the only guard: a directory left
/// behind by an interrupted or failed build is never provisioned again. In
/// that case [`Provisioner::ensure_built`] reports `binary-missing` so the
/// directory can be removed by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provisioner {
    workdir: PathBuf,
    spec: ToolchainSpec,
}

impl Provisioner {
    /// Creates a provisioner rooted at `workdir`.
    pub fn new(workdir: impl Into<PathBuf>, spec: ToolchainSpec) -> Self {
        Self {
            workdir: workdir.into(),
            spec,
        }
    }

    /// Checkout directory of the generator.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Location of the built executable.
    pub fn binary_path(&self) -> PathBuf {
        self.workdir.join("build").join(&self.spec.target)
    }

    /// Provisions the generator unless the working directory already exists,
    /// then returns the executable's path.
    #[instrument(level = "debug", skip(self), fields(workdir = %self.workdir.display()))]
    pub fn ensure_built(&self) -> Result<PathBuf, NetError> {
        let _guard = PROVISION_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if !self.workdir.exists() {
            self.provision()?;
        }
        let binary = self.binary_path();
        if !binary.is_file() {
            return Err(NetError::Provision(
                ErrorInfo::new("binary-missing", "generator executable not found")
                    .with_context("binary", binary.display().to_string())
                    .with_hint("remove the working directory to rebuild the generator"),
            ));
        }
        Ok(binary)
    }

    fn provision(&self) -> Result<(), NetError> {
        info!(
            repository = %self.spec.repository,
            commit = %self.spec.commit,
            "provisioning external generator"
        );
        let parent = match self.workdir.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(|err| step_io_error("prepare", &parent, &err))?;

        let mut clone = Command::new("git");
        clone
            .arg("clone")
            .arg(&self.spec.repository)
            .arg(&self.workdir);
        self.run_step("clone", &mut clone)?;

        let mut checkout = Command::new("git");
        checkout
            .args(["checkout", self.spec.commit.as_str()])
            .current_dir(&self.workdir);
        self.run_step("checkout", &mut checkout)?;

        let build_dir = self.workdir.join("build");
        fs::create_dir(&build_dir).map_err(|err| step_io_error("mkdir", &build_dir, &err))?;

        let mut configure = Command::new("cmake");
        configure.arg("..").current_dir(&build_dir);
        self.run_step("configure", &mut configure)?;

        let mut build = Command::new("make");
        build.arg(&self.spec.target).current_dir(&build_dir);
        self.run_step("build", &mut build)?;

        info!(binary = %self.binary_path().display(), "external generator built");
        Ok(())
    }

    fn run_step(&self, step: &str, command: &mut Command) -> Result<(), NetError> {
        let program = command.get_program().to_string_lossy().into_owned();
        let timeout = Duration::from_secs(self.spec.step_timeout_secs);
        let status = run_streaming(command, &program, timeout).map_err(|failure| {
            NetError::Provision(
                ErrorInfo::new(format!("{step}-failed"), failure.describe())
                    .with_context("step", step)
                    .with_context("program", program.clone()),
            )
        })?;
        if !status.success() {
            return Err(NetError::Provision(
                ErrorInfo::new(
                    format!("{step}-failed"),
                    format!("{program} exited with {status}"),
                )
                .with_context("step", step)
                .with_context("workdir", self.workdir.display().to_string()),
            ));
        }
        Ok(())
    }
}

fn step_io_error(step: &str, path: &Path, err: &std::io::Error) -> NetError {
    NetError::Provision(
        ErrorInfo::new(format!("{step}-failed"), err.to_string())
            .with_context("step", step)
            .with_context("path", path.display().to_string()),
    )
}
