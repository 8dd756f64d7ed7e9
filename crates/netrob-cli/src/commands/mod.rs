pub mod attack;
pub mod generate;
pub mod robustness;

use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use netrob_core::provenance::RunProvenance;
use netrob_graph::GRAPH_SCHEMA;
use serde::Serialize;

/// File written next to every run's artifacts.
pub const MANIFEST_FILE: &str = "manifest.json";

pub fn provenance(sampler: String, seed: u64) -> RunProvenance {
    let mut tool_versions = BTreeMap::new();
    tool_versions.insert("netrob".to_string(), env!("CARGO_PKG_VERSION").to_string());
    RunProvenance {
        sampler,
        seed,
        schema_version: GRAPH_SCHEMA,
        tool_versions,
    }
}

pub fn write_manifest<T: Serialize>(out: &Path, manifest: &T) -> Result<(), Box<dyn Error>> {
    let bytes = netrob_data::to_canonical_json_bytes(manifest)?;
    fs::write(out.join(MANIFEST_FILE), bytes)?;
    Ok(())
}
