//! End-to-end detection over Turtle fixtures.
//!
//! Each fixture is parsed with the graph loader and run through the detector
//! exactly as the `znato find-duplicates` command does.

use znato_dedup::{
    extract_classes, find_duplicates, Detector, DetectorConfig, DuplicateCandidate, Reason,
};
use znato_graph::{loader, vocab, Graph, Node};

fn fixture(text: &str) -> Graph {
    loader::load_str(text).unwrap()
}

fn pair(candidate: &DuplicateCandidate) -> (&str, &str) {
    (candidate.first.as_str(), candidate.second.as_str())
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn car_and_automobile_are_not_similar() {
    let graph = fixture(include_str!("fixtures/car_automobile.ttl"));
    let report = find_duplicates(&graph, 0.8).unwrap();
    assert_eq!(report.classes, 2);
    assert!(report.is_empty());
}

#[test]
fn declared_equivalence_is_reported() {
    let graph = fixture(include_str!("fixtures/car_automobile_equivalent.ttl"));
    let report = find_duplicates(&graph, 0.8).unwrap();
    assert_eq!(report.len(), 1);
    let candidate = &report.candidates[0];
    assert_eq!(
        pair(candidate),
        (
            "http://example.org/vehicles#Automobile",
            "http://example.org/vehicles#Car"
        )
    );
    assert_eq!(candidate.reason, Reason::ExplicitEquivalent);
    assert_eq!(candidate.reason.to_string(), "explicit-equivalent");
}

#[test]
fn person_and_persons_match_on_local_names() {
    let graph = fixture(include_str!("fixtures/person_persons.ttl"));
    let report = find_duplicates(&graph, 0.8).unwrap();
    assert_eq!(report.len(), 1);
    let candidate = &report.candidates[0];
    assert_eq!(
        pair(candidate),
        (
            "http://example.org/people#Person",
            "http://example.org/people#Persons"
        )
    );
    assert_eq!(candidate.reason, Reason::LabelSimilarity(12.0 / 13.0));
    assert_eq!(candidate.reason.to_string(), "label similarity 0.92");
}

#[test]
fn single_class_yields_no_pairs() {
    let graph = fixture(include_str!("fixtures/single_class.ttl"));
    assert_eq!(extract_classes(&graph).len(), 1);
    let report = find_duplicates(&graph, 0.8).unwrap();
    assert_eq!(report.classes, 1);
    assert_eq!(report.pairs, 0);
    assert!(report.is_empty());
}

#[test]
fn empty_graph_yields_empty_report() {
    let report = find_duplicates(&Graph::new(), 0.8).unwrap();
    assert_eq!(report.classes, 0);
    assert!(report.is_empty());
}

// =============================================================================
// Invariants
// =============================================================================

#[test]
fn explicit_equivalence_takes_precedence_over_similarity() {
    let mut graph = fixture(include_str!("fixtures/person_persons.ttl"));
    graph.add(
        Node::iri("http://example.org/people#Persons"),
        Node::iri(vocab::OWL_EQUIVALENT_CLASS),
        Node::iri("http://example.org/people#Person"),
    );
    let report = find_duplicates(&graph, 0.8).unwrap();
    assert_eq!(report.len(), 1);
    assert_eq!(report.candidates[0].reason, Reason::ExplicitEquivalent);
}

#[test]
fn mixed_ontology_reports_each_pair_once_in_visit_order() {
    let graph = fixture(include_str!("fixtures/mixed.ttl"));
    let report = find_duplicates(&graph, 0.8).unwrap();

    // Client, Customer, Invoice, Order, Product, Products; the restriction
    // superclass of Order is a blank node and does not count.
    assert_eq!(report.classes, 6);
    assert_eq!(report.pairs, 15);

    let found: Vec<_> = report.candidates.iter().map(pair).collect();
    assert_eq!(
        found,
        vec![
            ("http://example.org/shop#Client", "http://example.org/shop#Customer"),
            ("http://example.org/shop#Product", "http://example.org/shop#Products"),
        ]
    );
    let shown = report.candidates[0].reason.to_string();
    assert_eq!(shown, "label similarity 0.94");
    assert_eq!(report.candidates[1].reason, Reason::ExplicitEquivalent);
    assert_eq!(report.explicit_count(), 1);
    assert_eq!(report.similarity_count(), 1);

    for candidate in &report.candidates {
        assert!(candidate.first < candidate.second);
    }
}

#[test]
fn threshold_is_inclusive() {
    let graph = fixture(include_str!("fixtures/person_persons.ttl"));
    assert_eq!(find_duplicates(&graph, 12.0 / 13.0).unwrap().len(), 1);
    assert!(find_duplicates(&graph, 0.93).unwrap().is_empty());
}

#[test]
fn parallel_scan_matches_sequential_scan() {
    let graph = fixture(include_str!("fixtures/mixed.ttl"));
    for threshold in [0.3, 0.5, 0.8, 1.0] {
        let sequential = Detector::new(DetectorConfig {
            threshold,
            parallel: false,
        })
        .unwrap()
        .detect(&graph);
        let parallel = Detector::new(DetectorConfig {
            threshold,
            parallel: true,
        })
        .unwrap()
        .detect(&graph);
        assert_eq!(sequential, parallel, "threshold {threshold}");
    }
}

#[test]
fn invalid_threshold_is_rejected() {
    assert!(find_duplicates(&Graph::new(), 0.0).is_err());
    assert!(find_duplicates(&Graph::new(), 1.5).is_err());
}
