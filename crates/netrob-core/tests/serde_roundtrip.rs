use netrob_core::errors::{ErrorInfo, NetError};
use netrob_core::provenance::{RunProvenance, SchemaVersion};

#[test]
fn provenance_round_trip_json() {
    let provenance = RunProvenance {
        sampler: "ER_40_60_0.1".into(),
        seed: 99,
        schema_version: SchemaVersion::new(1, 0, 0),
        tool_versions: [("netrob-core".into(), "0.1.0".into())].into_iter().collect(),
    };

    let json = serde_json::to_string_pretty(&provenance).expect("serialize");
    let decoded: RunProvenance = serde_json::from_str(&json).expect("deserialize");

    assert_eq!(decoded, provenance);
}

#[test]
fn errors_serialize_with_family_tag() {
    let err = NetError::Process(ErrorInfo::new("timeout", "generator timed out"));
    let value = serde_json::to_value(&err).expect("serialize");
    assert_eq!(value["family"], "Process");
    assert_eq!(value["detail"]["code"], "timeout");
    let decoded: NetError = serde_json::from_value(value).expect("deserialize");
    assert_eq!(decoded, err);
}

#[test]
fn schema_versions_print_and_compare_by_major() {
    let current = SchemaVersion::default();
    assert_eq!(current.to_string(), "1.0.0");
    assert!(current.is_compatible_with(&SchemaVersion::new(1, 4, 2)));
    assert!(!current.is_compatible_with(&SchemaVersion::new(2, 0, 0)));
}
