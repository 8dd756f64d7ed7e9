use std::fs;

use netrob_core::errors::NetError;
use netrob_hrg::{Provisioner, ToolchainSpec};

#[test]
fn existing_workdir_is_not_provisioned_again() {
    let dir = tempfile::tempdir().unwrap();
    let workdir = dir.path().join("girgs");
    fs::create_dir_all(workdir.join("build")).unwrap();
    fs::write(workdir.join("build").join("genhrg"), "").unwrap();

    let spec = ToolchainSpec {
        repository: "file:///nonexistent/repository".into(),
        ..ToolchainSpec::default()
    };
    let provisioner = Provisioner::new(&workdir, spec);
    let binary = provisioner.ensure_built().unwrap();
    assert_eq!(binary, workdir.join("build").join("genhrg"));
}

#[test]
fn stale_workdir_without_binary_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let workdir = dir.path().join("girgs");
    fs::create_dir_all(&workdir).unwrap();

    let err = Provisioner::new(&workdir, ToolchainSpec::default())
        .ensure_built()
        .unwrap_err();
    match err {
        NetError::Provision(info) => {
            assert_eq!(info.code, "binary-missing");
            assert!(info.hint.is_some());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn failed_clone_is_a_provision_error() {
    let dir = tempfile::tempdir().unwrap();
    let workdir = dir.path().join("girgs");
    let spec = ToolchainSpec {
        repository: dir.path().join("no-such-repo").display().to_string(),
        step_timeout_secs: 60,
        ..ToolchainSpec::default()
    };
    let err = Provisioner::new(&workdir, spec).ensure_built().unwrap_err();
    assert!(matches!(err, NetError::Provision(_)));
    assert_eq!(err.code(), "clone-failed");
}

#[test]
fn defaults_pin_the_upstream_revision() {
    let spec = ToolchainSpec::default();
    assert_eq!(spec.repository, "https://github.com/chistopher/girgs");
    assert_eq!(spec.commit, "c38e4118f02cffae51b1eaf7a1c1f9314a6a89c8");
    assert_eq!(spec.target, "genhrg");
}
