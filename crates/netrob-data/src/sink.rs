//! Destinations for generated graphs.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use netrob_core::errors::NetError;
use netrob_graph::{Graph, GraphFormat};
use tracing::debug;

/// Stores a graph under a key and reports where it went.
pub trait GraphSink {
    /// Persists `graph` under `key`, returning the artifact location.
    fn persist(&mut self, key: &str, graph: &Graph) -> Result<String, NetError>;
}

/// Writes every graph to `<dir>/<key>.<ext>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSink {
    dir: PathBuf,
    format: GraphFormat,
}

impl FileSink {
    /// Creates a sink below `dir`; the directory is created on first use.
    pub fn new(dir: impl Into<PathBuf>, format: GraphFormat) -> Self {
        Self {
            dir: dir.into(),
            format,
        }
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Encoding used for new artifacts.
    pub fn format(&self) -> GraphFormat {
        self.format
    }

    /// Path an artifact with `key` is written to.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{}", self.format.extension()))
    }
}

impl GraphSink for FileSink {
    fn persist(&mut self, key: &str, graph: &Graph) -> Result<String, NetError> {
        let payload = self.format.encode(graph)?;
        fs::create_dir_all(&self.dir)
            .map_err(|err| NetError::io("create-output-dir", &self.dir, &err))?;
        let path = self.path_for(key);
        // never leave a truncated artifact under the final name
        let mut staging = path.clone().into_os_string();
        staging.push(".partial");
        let staging = PathBuf::from(staging);
        fs::write(&staging, &payload).map_err(|err| NetError::io("write-graph", &staging, &err))?;
        fs::rename(&staging, &path).map_err(|err| NetError::io("write-graph", &path, &err))?;
        debug!(key, path = %path.display(), bytes = payload.len(), "persisted graph");
        Ok(path.display().to_string())
    }
}

/// Reads a graph written by a [`FileSink`], inferring the format from the
/// file extension.
pub fn load_graph(path: &Path) -> Result<Graph, NetError> {
    let format = GraphFormat::from_path(path)?;
    let bytes = fs::read(path).map_err(|err| NetError::io("read-graph", path, &err))?;
    format.decode(&bytes)
}

/// Keeps graphs in memory, keyed like a [`FileSink`].
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    graphs: BTreeMap<String, Graph>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Graph> {
        self.graphs.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.graphs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    pub fn into_graphs(self) -> BTreeMap<String, Graph> {
        self.graphs
    }
}

impl GraphSink for MemorySink {
    fn persist(&mut self, key: &str, graph: &Graph) -> Result<String, NetError> {
        self.graphs.insert(key.to_string(), graph.clone());
        Ok(format!("memory://{key}"))
    }
}
