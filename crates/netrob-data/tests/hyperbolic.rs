#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::sync::Mutex;

use netrob_core::rng::RngHandle;
use netrob_core::NodeId;
use netrob_data::{GraphDatasetBuilder, GraphSampler, HyperbolicRandomGraph, MemorySink};
use netrob_hrg::{AdapterConfig, ExternalGeneratorAdapter, HrgParams};

static SCRIPTS: Mutex<()> = Mutex::new(());

// Emits a star centred on node 0 with as many nodes as requested.
const STAR_GENERATOR: &str = r#"#!/bin/sh
while [ $# -gt 0 ]; do
  case "$1" in
    -n) n="$2"; shift ;;
    -file) out="$2"; shift ;;
  esac
  shift
done
{
  echo "$n"
  echo "header"
  i=1
  while [ "$i" -lt "$n" ]; do
    echo "0 $i"
    i=$((i + 1))
  done
  echo ""
} > "$out.txt"
"#;

fn sampler(dir: &std::path::Path, min_n: usize, max_n: usize) -> HyperbolicRandomGraph {
    let binary = dir.join("genhrg");
    fs::write(&binary, STAR_GENERATOR).unwrap();
    fs::set_permissions(&binary, fs::Permissions::from_mode(0o755)).unwrap();
    let adapter = ExternalGeneratorAdapter::new(AdapterConfig {
        workdir: dir.join("work"),
        binary: Some(binary),
        timeout_secs: 30,
        ..AdapterConfig::default()
    });
    let params = HrgParams {
        alpha: 0.75,
        temperature: 0.0,
        degree: 10.0,
        threads: 1,
    };
    HyperbolicRandomGraph::new(min_n, max_n, params, adapter).unwrap()
}

#[test]
fn requested_node_count_is_drawn_from_the_range() {
    let _lock = SCRIPTS.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let dir = tempfile::tempdir().unwrap();
    let sampler = sampler(dir.path(), 20, 35);
    let mut rng = RngHandle::from_seed(4);
    for _ in 0..5 {
        let output = sampler.generate_with_request(&mut rng).unwrap();
        assert!((20..=35).contains(&output.request.n));
        assert_eq!(output.graph.node_count(), output.request.n);
        assert_eq!(output.graph.degree(NodeId::from_raw(0)).unwrap(), output.request.n - 1);
    }
    assert_eq!(sampler.name(), "HRG_20_35_0.75_0.0_10.0");
}

#[test]
fn hyperbolic_samples_flow_through_the_builder() {
    let _lock = SCRIPTS.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let dir = tempfile::tempdir().unwrap();
    let builder = GraphDatasetBuilder::new(Box::new(sampler(dir.path(), 60, 70)), 2)
        .with_num_graphs(2);
    let mut sink = MemorySink::new();
    let report = builder.build(&mut sink).unwrap();
    assert!(report.samples.iter().all(|record| record.nodes == 50));
    assert!(report.samples.iter().all(|record| record.edges == 49));
    assert_eq!(fs::read_dir(dir.path().join("work")).unwrap().count(), 0);
}
