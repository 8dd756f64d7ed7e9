//! Provenance and schema descriptors attached to persisted graphs and manifests.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Version of the on-disk graph layout. Readers accept any payload with the
/// same major version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Bumped when older readers can no longer decode a payload.
    pub major: u32,
    /// Bumped for additive fields.
    pub minor: u32,
    /// Bumped for fixes that leave the layout unchanged.
    pub patch: u32,
}

impl SchemaVersion {
    /// Builds a version triple.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl SchemaVersion {
    /// Whether a payload written under `other` can be read by this version.
    pub fn is_compatible_with(&self, other: &SchemaVersion) -> bool {
        self.major == other.major
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Provenance information written next to every dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RunProvenance {
    /// Canonical name of the sampler that produced the graphs.
    pub sampler: String,
    /// Master seed every sample substream is derived from.
    pub seed: u64,
    /// Schema version of the persisted graphs.
    pub schema_version: SchemaVersion,
    /// Crate and tool versions that produced the run, keyed by name.
    pub tool_versions: BTreeMap<String, String>,
}
