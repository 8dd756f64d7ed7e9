use netrob_core::rng::RngHandle;
use netrob_graph::{euclidean, gen_watts_strogatz, GeometricEmbedding};

#[test]
fn positions_cover_every_node_inside_unit_square() {
    let mut rng = RngHandle::from_seed(12);
    let graph = gen_watts_strogatz(40, 4, 0.2, &mut rng).unwrap();
    let embedded = GeometricEmbedding::new(true).embed(&graph, &mut rng).unwrap();

    let positions = embedded.positions().expect("positions assigned");
    assert_eq!(positions.len(), embedded.node_count());
    for node in embedded.nodes() {
        let [x, y] = embedded.position(node).unwrap();
        assert!((0.0..1.0).contains(&x) && (0.0..1.0).contains(&y));
    }
    assert!(graph.positions().is_none(), "input must stay unembedded");
}

#[test]
fn weighted_edges_use_euclidean_distance() {
    let mut rng = RngHandle::from_seed(13);
    let graph = gen_watts_strogatz(30, 4, 0.3, &mut rng).unwrap();
    let embedded = GeometricEmbedding::new(true).embed(&graph, &mut rng).unwrap();

    assert_eq!(embedded.weights().unwrap().len(), embedded.edge_count());
    for edge in embedded.edges() {
        let a = embedded.position(edge.lo()).unwrap();
        let b = embedded.position(edge.hi()).unwrap();
        let expected = ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)).sqrt();
        let weight = embedded.weight(edge.lo(), edge.hi()).unwrap();
        assert!((weight - expected).abs() < 1e-12);
        assert!(weight >= 0.0);
    }
}

#[test]
fn unweighted_edges_weigh_exactly_one() {
    let mut rng = RngHandle::from_seed(14);
    let graph = gen_watts_strogatz(20, 2, 0.1, &mut rng).unwrap();
    let embedded = GeometricEmbedding::new(false).embed(&graph, &mut rng).unwrap();
    assert!(embedded.positions().is_some());
    for edge in embedded.edges() {
        assert_eq!(embedded.weight(edge.lo(), edge.hi()), Some(1.0));
    }
}

#[test]
fn euclidean_matches_pythagoras() {
    assert_eq!(euclidean([0.0, 0.0], [3.0, 4.0]), 5.0);
    assert_eq!(euclidean([0.2, 0.2], [0.2, 0.2]), 0.0);
}
