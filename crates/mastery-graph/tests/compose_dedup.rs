use std::collections::BTreeMap;

use mastery_core::ConceptId;
use mastery_graph::{compose, Concept, DEFAULT_SEPARATOR};

fn id(raw: u64) -> ConceptId {
    ConceptId::from_raw(raw)
}

fn concepts() -> Vec<Concept> {
    vec![
        Concept::new(id(1), "derivative").with_similar([id(2), id(3)]),
        Concept::new(id(2), "rate of change"),
        Concept::new(id(3), "slope of tangent").with_similar([id(1)]),
        Concept::new(id(4), "limit"),
    ]
}

#[test]
fn similar_concept_listed_directly_is_not_repeated() {
    let prompts = compose(
        &[id(1), id(2), id(4), id(3)],
        DEFAULT_SEPARATOR,
        &concepts(),
        &BTreeMap::new(),
    );
    assert_eq!(
        prompts,
        vec![
            "derivative OR rate of change OR slope of tangent".to_string(),
            "limit".to_string(),
        ]
    );
}

#[test]
fn earlier_direct_concept_is_left_out_of_later_join() {
    let prompts = compose(&[id(4), id(3), id(1)], DEFAULT_SEPARATOR, &concepts(), &BTreeMap::new());
    assert_eq!(prompts, vec!["limit".to_string(), "slope of tangent OR derivative".to_string()]);
}

#[test]
fn no_text_is_emitted_twice() {
    let order = [id(3), id(2), id(1), id(4), id(2)];
    let prompts = compose(&order, DEFAULT_SEPARATOR, &concepts(), &BTreeMap::new());
    let pieces: Vec<&str> = prompts
        .iter()
        .flat_map(|prompt| prompt.split(DEFAULT_SEPARATOR))
        .collect();
    let mut unique = pieces.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), pieces.len());
}

#[test]
fn duplicate_ids_collapse_to_first_occurrence() {
    let prompts = compose(&[id(4), id(4)], ", ", &concepts(), &BTreeMap::new());
    assert_eq!(prompts, vec!["limit".to_string()]);
}
