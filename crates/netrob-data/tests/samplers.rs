use netrob_core::errors::NetError;
use netrob_core::rng::RngHandle;
use netrob_data::{
    GraphSampler, PowerLawClustering, PreferentialAttachment, SamplerSpec, SmallWorld,
    UniformRandom,
};
use netrob_hrg::AdapterConfig;
use proptest::prelude::*;

fn assert_simple(sampler: &dyn GraphSampler, seed: u64) -> usize {
    let mut rng = RngHandle::from_seed(seed);
    let graph = sampler.generate_graph(&mut rng).unwrap();
    for edge in graph.edges() {
        assert!(edge.lo() < edge.hi());
        assert!(graph.contains_node(edge.lo()) && graph.contains_node(edge.hi()));
    }
    graph.node_count()
}

proptest! {
    #[test]
    fn in_process_samplers_respect_the_node_range(
        min_n in 1usize..30,
        span in 0usize..30,
        seed in any::<u64>(),
    ) {
        let max_n = min_n + span;
        let samplers: Vec<Box<dyn GraphSampler>> = vec![
            Box::new(UniformRandom::new(min_n, max_n, 0.3).unwrap()),
            Box::new(PreferentialAttachment::new(min_n, max_n, 3).unwrap()),
            Box::new(PowerLawClustering::new(min_n, max_n, 2, 0.5).unwrap()),
            Box::new(SmallWorld::new(min_n, max_n, 0, 0.2).unwrap()),
        ];
        for sampler in &samplers {
            let n = assert_simple(sampler.as_ref(), seed);
            prop_assert!((min_n..=max_n).contains(&n), "{sampler} drew {n}");
        }
    }
}

#[test]
fn attachment_beyond_node_count_does_not_fail() {
    let ba = PreferentialAttachment::new(3, 3, 10).unwrap();
    let graph = ba.generate_graph(&mut RngHandle::from_seed(1)).unwrap();
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 3);

    let hk = PowerLawClustering::new(4, 4, 10, 0.5).unwrap();
    let graph = hk.generate_graph(&mut RngHandle::from_seed(1)).unwrap();
    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn empty_node_range_yields_empty_graphs() {
    let ba = PreferentialAttachment::new(0, 0, 2).unwrap();
    let graph = ba.generate_graph(&mut RngHandle::from_seed(1)).unwrap();
    assert_eq!(graph.node_count(), 0);
}

#[test]
fn ring_degree_above_node_count_fails_at_generation() {
    let ws = SmallWorld::new(4, 4, 6, 0.1).unwrap();
    let err = ws.generate_graph(&mut RngHandle::from_seed(2)).unwrap_err();
    assert!(matches!(err, NetError::Config(_)));

    let saturated = SmallWorld::new(5, 5, 5, 0.1).unwrap();
    let graph = saturated.generate_graph(&mut RngHandle::from_seed(2)).unwrap();
    assert_eq!(graph.edge_count(), 10);
}

#[test]
fn constructors_reject_invalid_parameters() {
    assert_eq!(
        UniformRandom::new(10, 5, 0.1).unwrap_err().code(),
        "empty-node-range"
    );
    assert_eq!(
        UniformRandom::new(5, 10, 1.5).unwrap_err().code(),
        "probability-out-of-range"
    );
    assert_eq!(
        PreferentialAttachment::new(5, 10, 0).unwrap_err().code(),
        "zero-attachment"
    );
    assert_eq!(
        PowerLawClustering::new(5, 10, 2, f64::NAN).unwrap_err().code(),
        "probability-out-of-range"
    );
    assert!(matches!(
        SmallWorld::new(5, 10, 2, -0.1),
        Err(NetError::Config(_))
    ));
}

#[test]
fn canonical_names_encode_every_parameter() {
    assert_eq!(
        UniformRandom::new(20, 40, 0.1).unwrap().to_string(),
        "ER_20_40_0.1"
    );
    assert_eq!(
        PreferentialAttachment::new(20, 40, 3).unwrap().to_string(),
        "BA_20_40_3"
    );
    assert_eq!(
        PowerLawClustering::new(20, 40, 3, 1.0).unwrap().to_string(),
        "HK_20_40_3_1.0"
    );
    assert_eq!(
        SmallWorld::new(20, 40, 4, 0.25).unwrap().name(),
        "WS_20_40_4_0.25"
    );
}

#[test]
fn equal_specs_build_equally_named_samplers() {
    let spec = SamplerSpec::PowerLawClustering {
        min_n: 10,
        max_n: 30,
        m: 2,
        p: 0.5,
    };
    let adapter = AdapterConfig::default();
    let a = spec.build(&adapter).unwrap();
    let b = spec.clone().build(&adapter).unwrap();
    assert_eq!(a.name(), b.name());
    assert_ne!(
        a.name(),
        SamplerSpec::PowerLawClustering {
            min_n: 10,
            max_n: 30,
            m: 3,
            p: 0.5,
        }
        .build(&adapter)
        .unwrap()
        .name()
    );
}

#[test]
fn hyperbolic_name_leaves_out_the_thread_count() {
    let yaml = "model: hyperbolic\nmin_n: 40\nmax_n: 60\nalpha: 0.75\ntemperature: 0\ndegree: 10\nthreads: 8\n";
    let spec: SamplerSpec = serde_yaml::from_str(yaml).unwrap();
    let sampler = spec.build(&AdapterConfig::default()).unwrap();
    assert_eq!(sampler.name(), "HRG_40_60_0.75_0.0_10.0");
}

#[test]
fn same_seed_reproduces_the_same_graph() {
    let sampler = PowerLawClustering::new(20, 40, 2, 0.4).unwrap();
    let a = sampler.generate_graph(&mut RngHandle::from_seed(99)).unwrap();
    let b = sampler.generate_graph(&mut RngHandle::from_seed(99)).unwrap();
    assert_eq!(a, b);
}
