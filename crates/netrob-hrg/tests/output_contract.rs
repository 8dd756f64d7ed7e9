use std::fs;

use netrob_core::errors::NetError;
use netrob_core::NodeId;
use netrob_hrg::{build_graph, parse_edge_list, read_edge_file};

#[test]
fn headers_and_trailing_blank_line_are_discarded() {
    let edges = parse_edge_list("header1\nheader2\n0 1\n1 2\n\n").unwrap();
    assert_eq!(edges, vec![(0, 1), (1, 2)]);
}

#[test]
fn last_edge_survives_without_trailing_blank_line() {
    let edges = parse_edge_list("header1\nheader2\n0 1\n1 2\n").unwrap();
    assert_eq!(edges, vec![(0, 1), (1, 2)]);
}

#[test]
fn header_only_output_has_no_edges() {
    assert!(parse_edge_list("n=5\nm=0\n\n").unwrap().is_empty());
    assert!(parse_edge_list("n=5\nm=0\n").unwrap().is_empty());
}

#[test]
fn output_without_header_is_rejected() {
    assert_eq!(parse_edge_list("0 1").unwrap_err().code(), "truncated-output");
}

#[test]
fn lines_with_three_fields_are_malformed() {
    let err = parse_edge_list("h1\nh2\n0 1 2\n\n").unwrap_err();
    match err {
        NetError::Output(info) => {
            assert_eq!(info.code, "malformed-line");
            assert_eq!(info.context.get("line"), Some(&"3".to_string()));
            assert_eq!(info.context.get("content"), Some(&"0 1 2".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn non_numeric_lines_are_malformed() {
    let err = parse_edge_list("h1\nh2\nabc\n\n").unwrap_err();
    assert!(matches!(err, NetError::Output(ref info) if info.code == "malformed-line"));
    let err = parse_edge_list("h1\nh2\n0 x\n").unwrap_err();
    assert_eq!(err.code(), "malformed-line");
    let err = parse_edge_list("h1\nh2\n-1 2\n").unwrap_err();
    assert_eq!(err.code(), "malformed-line");
}

#[test]
fn interior_blank_lines_are_malformed() {
    let err = parse_edge_list("h1\nh2\n0 1\n\n1 2\n\n").unwrap_err();
    assert_eq!(err.info().context.get("line"), Some(&"4".to_string()));
}

#[test]
fn parsed_files_are_deleted_and_bad_files_kept() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.txt");
    fs::write(&good, "h1\nh2\n0 1\n\n").unwrap();
    assert_eq!(read_edge_file(&good).unwrap(), vec![(0, 1)]);
    assert!(!good.exists());

    let bad = dir.path().join("bad.txt");
    fs::write(&bad, "h1\nh2\nabc\n\n").unwrap();
    assert_eq!(read_edge_file(&bad).unwrap_err().code(), "malformed-line");
    assert!(bad.exists());

    let missing = dir.path().join("missing.txt");
    assert_eq!(read_edge_file(&missing).unwrap_err().code(), "unreadable-output");
}

#[test]
fn isolated_nodes_stay_in_the_graph() {
    let graph = build_graph(5, &[(0, 1), (1, 2), (1, 0)]).unwrap();
    assert_eq!(graph.node_count(), 5);
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.degree(NodeId::from_raw(4)).unwrap(), 0);
}

#[test]
fn endpoints_beyond_the_request_extend_the_graph() {
    let graph = build_graph(3, &[(0, 7)]).unwrap();
    assert_eq!(graph.node_count(), 4);
    assert!(graph.has_edge(NodeId::from_raw(7), NodeId::from_raw(0)));
}

#[test]
fn self_loops_are_rejected() {
    assert_eq!(build_graph(3, &[(2, 2)]).unwrap_err().code(), "self-loop");
}
