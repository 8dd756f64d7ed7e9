//! Command line contract of the `genhrg` executable.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use netrob_core::errors::{ErrorInfo, NetError};
use netrob_core::format_param;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::process::{run_streaming, RunFailure};

/// Value of the `-edge` flag selecting plain edge-list output.
const EDGE_FORMAT: &str = "1";

static STEM_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Model parameters forwarded to the generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HrgParams {
    /// Power-law exponent of the radial distribution.
    pub alpha: f64,
    /// Temperature; `0` gives the threshold model.
    pub temperature: f64,
    /// Target average degree.
    pub degree: f64,
    /// Worker threads used by the generator itself.
    #[serde(default = "HrgParams::default_threads")]
    pub threads: usize,
}

impl HrgParams {
    const fn default_threads() -> usize {
        1
    }
}

/// A single generator run: requested size, parameters and output stem.
#[derive(Debug, Clone, PartialEq)]
pub struct HrgRequest {
    /// Node count requested from the generator.
    pub n: usize,
    /// Model parameters.
    pub params: HrgParams,
    /// Output stem; the generator appends `.txt`.
    pub stem: PathBuf,
}

impl HrgRequest {
    /// Creates a request writing below `dir` under a stem unique to this
    /// process and call.
    pub fn new(n: usize, params: HrgParams, dir: &Path) -> Self {
        let serial = STEM_COUNTER.fetch_add(1, Ordering::Relaxed);
        let stem = dir.join(format!("tmp_{}_{serial}", std::process::id()));
        Self { n, params, stem }
    }

    /// Arguments passed to the executable.
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = [
            "-n".to_string(),
            self.n.to_string(),
            "-alpha".to_string(),
            format_param(self.params.alpha),
            "-t".to_string(),
            format_param(self.params.temperature),
            "-deg".to_string(),
            format_param(self.params.degree),
            "-threads".to_string(),
            self.params.threads.to_string(),
            "-edge".to_string(),
            EDGE_FORMAT.to_string(),
            "-file".to_string(),
        ]
        .into_iter()
        .map(OsString::from)
        .collect();
        args.push(self.stem.clone().into_os_string());
        args
    }

    /// File the generator writes its edge list to.
    pub fn output_path(&self) -> PathBuf {
        let mut path = self.stem.clone().into_os_string();
        path.push(".txt");
        PathBuf::from(path)
    }
}

/// Launches the executable for a request and waits for it to finish.
#[instrument(level = "debug", skip(binary, request), fields(n = request.n))]
pub fn invoke(binary: &Path, request: &HrgRequest, timeout: Duration) -> Result<PathBuf, NetError> {
    let label = binary
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| binary.display().to_string());
    let mut command = Command::new(binary);
    command.args(request.args());
    let status = run_streaming(&mut command, &label, timeout).map_err(|failure| {
        let code = match failure {
            RunFailure::Spawn(_) => "spawn-failed",
            RunFailure::Wait(_) => "wait-failed",
            RunFailure::Timeout(_) => "timeout",
        };
        NetError::Process(
            ErrorInfo::new(code, failure.describe())
                .with_context("binary", binary.display().to_string())
                .with_context("n", request.n.to_string()),
        )
    })?;
    if !status.success() {
        return Err(NetError::Process(
            ErrorInfo::new("non-zero-exit", format!("{label} exited with {status}"))
                .with_context("binary", binary.display().to_string())
                .with_context("n", request.n.to_string()),
        ));
    }
    Ok(request.output_path())
}
