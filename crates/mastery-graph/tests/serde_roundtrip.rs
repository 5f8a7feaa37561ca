use mastery_core::{ConceptId, RngHandle};
use mastery_graph::{
    canonical_hash, gen_layered_prerequisites, graph_from_bytes, graph_from_json, graph_to_bytes,
    graph_to_json, ConceptGraph,
};

#[test]
fn json_and_bytes_preserve_structure() {
    let mut rng = RngHandle::from_seed(11);
    let graph = gen_layered_prerequisites(3, 4, 2, &mut rng).unwrap();

    let restored = graph_from_json(&graph_to_json(&graph).unwrap()).unwrap();
    assert_eq!(restored, graph);
    assert_eq!(canonical_hash(&restored), canonical_hash(&graph));

    let restored = graph_from_bytes(&graph_to_bytes(&graph).unwrap()).unwrap();
    assert_eq!(restored, graph);
}

#[test]
fn hash_ignores_assembly_order() {
    let id = ConceptId::from_raw;
    let first = ConceptGraph::new(
        vec![id(1), id(2), id(3)],
        vec![(id(1), id(2)), (id(1), id(3))],
        vec![id(1)],
    )
    .unwrap();
    let second = ConceptGraph::new(
        vec![id(3), id(2), id(1)],
        vec![(id(1), id(3)), (id(1), id(2))],
        vec![id(1)],
    )
    .unwrap();
    assert_eq!(canonical_hash(&first), canonical_hash(&second));

    let rootless = ConceptGraph::new(
        vec![id(1), id(2), id(3)],
        vec![(id(1), id(2)), (id(1), id(3))],
        vec![],
    )
    .unwrap();
    assert_ne!(canonical_hash(&first), canonical_hash(&rootless));
}

#[test]
fn json_decoding_validates_invariants() {
    let json = r#"{"nodes":[1,2],"edges":[{"parent":1,"child":5}],"roots":[1]}"#;
    let err = graph_from_json(json).unwrap_err();
    assert_eq!(err.code(), "unknown-endpoint");
}

#[test]
fn newer_major_schema_is_rejected() {
    let json = r#"{"schema_version":{"major":2,"minor":0,"patch":0},"nodes":[1],"roots":[1]}"#;
    let err = graph_from_json(json).unwrap_err();
    assert_eq!(err.code(), "schema-mismatch");
}

#[test]
fn generator_is_deterministic_per_seed() {
    let a = gen_layered_prerequisites(4, 3, 2, &mut RngHandle::from_seed(5)).unwrap();
    let b = gen_layered_prerequisites(4, 3, 2, &mut RngHandle::from_seed(5)).unwrap();
    assert_eq!(canonical_hash(&a), canonical_hash(&b));
    assert_eq!(a.roots().len(), 3);
    assert!(gen_layered_prerequisites(0, 3, 2, &mut RngHandle::from_seed(5)).is_err());
}
