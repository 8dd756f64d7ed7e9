use netrob_core::rng::RngHandle;
use netrob_graph::{
    canonical_hash, gen_barabasi_albert, graph_from_bytes, graph_from_json, graph_to_bytes,
    graph_to_json, GeometricEmbedding, Graph, GraphFormat,
};

fn embedded_sample() -> Graph {
    let mut rng = RngHandle::from_seed(31);
    let graph = gen_barabasi_albert(25, 2, &mut rng).unwrap();
    GeometricEmbedding::new(true).embed(&graph, &mut rng).unwrap()
}

#[test]
fn bincode_preserves_structure_and_attributes() {
    let graph = embedded_sample();
    let restored = graph_from_bytes(&graph_to_bytes(&graph).unwrap()).unwrap();
    assert_eq!(restored, graph);
    assert_eq!(canonical_hash(&restored), canonical_hash(&graph));
}

#[test]
fn json_preserves_structure_and_attributes() {
    let graph = embedded_sample();
    let restored = graph_from_json(&graph_to_json(&graph).unwrap()).unwrap();
    assert_eq!(restored, graph);
}

#[test]
fn unembedded_graphs_stay_unembedded() {
    let mut rng = RngHandle::from_seed(1);
    let graph = gen_barabasi_albert(10, 1, &mut rng).unwrap();
    let restored = GraphFormat::Json
        .decode(&GraphFormat::Json.encode(&graph).unwrap())
        .unwrap();
    assert!(restored.positions().is_none());
    assert!(restored.weights().is_none());
    assert_eq!(restored, graph);
}

#[test]
fn schema_mismatch_is_reported() {
    let json = r#"{"schema_version":{"major":9,"minor":0,"patch":0},"nodes":[0],"edges":[],"positions":null,"weights":null}"#;
    assert_eq!(graph_from_json(json).unwrap_err().code(), "schema-mismatch");
}

#[test]
fn corrupt_payloads_are_serde_errors() {
    assert_eq!(graph_from_bytes(&[1, 2, 3]).unwrap_err().code(), "deserialize-bytes");
    assert_eq!(graph_from_json("{").unwrap_err().code(), "deserialize-json");
}

#[test]
fn format_is_inferred_from_extension() {
    use std::path::Path;
    assert_eq!(GraphFormat::from_path(Path::new("a/ER_1_2_0.1_0.bin")).unwrap(), GraphFormat::Bincode);
    assert_eq!(GraphFormat::from_path(Path::new("graph.json")).unwrap(), GraphFormat::Json);
    assert!(GraphFormat::from_path(Path::new("graph.gpickle")).is_err());
    assert_eq!("json".parse::<GraphFormat>().unwrap().extension(), "json");
}
