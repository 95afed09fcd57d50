//! Label resolution.
//!
//! A class is displayed by its `rdfs:label`, falling back to the local name of
//! its IRI. When several labels exist the lexicographically smallest literal
//! wins, so the result never depends on store iteration order.

use znato_graph::{vocab, Node, TripleStore};

use crate::classes::ClassEntity;

/// Returns the display label of a class.
///
/// Only literal `rdfs:label` objects are considered. Never fails: an IRI with
/// no usable local name is returned unchanged.
#[must_use]
pub fn resolve_label<S: TripleStore + ?Sized>(store: &S, entity: &ClassEntity) -> String {
    let subject = entity.node();
    let label = Node::iri(vocab::RDFS_LABEL);
    store
        .matching(Some(&subject), Some(&label), None)
        .filter_map(|t| store.literal_value(t.object))
        .min()
        .map_or_else(|| local_name(entity.as_str()).to_owned(), str::to_owned)
}

/// Returns the lower-cased label used for similarity comparison.
#[must_use]
pub fn comparison_key<S: TripleStore + ?Sized>(store: &S, entity: &ClassEntity) -> String {
    resolve_label(store, entity).to_lowercase()
}

/// Returns the part of an IRI after its last `#` or `/`.
///
/// Returns the whole IRI when it has no separator or ends with one.
#[must_use]
pub fn local_name(iri: &str) -> &str {
    match iri.rfind(['#', '/']) {
        Some(idx) if idx + 1 < iri.len() => &iri[idx + 1..],
        _ => iri,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use znato_graph::{Graph, Literal};

    fn car() -> ClassEntity {
        ClassEntity::new("http://example.org/vehicles#Car")
    }

    #[test]
    fn local_name_splits_on_last_hash_or_slash() {
        assert_eq!(local_name("http://example.org/vehicles#Car"), "Car");
        assert_eq!(local_name("http://example.org/vehicles/Car"), "Car");
        assert_eq!(local_name("http://example.org/a#b/c"), "c");
        assert_eq!(local_name("urn:isbn:0451450523"), "urn:isbn:0451450523");
        assert_eq!(local_name("http://example.org/"), "http://example.org/");
    }

    #[test]
    fn falls_back_to_local_name_without_labels() {
        assert_eq!(resolve_label(&Graph::new(), &car()), "Car");
    }

    #[test]
    fn smallest_label_wins() {
        let mut graph = Graph::new();
        let label = Node::iri(vocab::RDFS_LABEL);
        graph.add(car().node(), label.clone(), Node::literal("Motorcar"));
        let auto = Node::Literal(Literal::lang("Auto", "de"));
        graph.add(car().node(), label.clone(), auto);
        graph.add(car().node(), label, Node::literal("Car"));
        assert_eq!(resolve_label(&graph, &car()), "Auto");
    }

    #[test]
    fn non_literal_labels_are_ignored() {
        let mut graph = Graph::new();
        graph.add(
            car().node(),
            Node::iri(vocab::RDFS_LABEL),
            Node::iri("http://example.org/labels#A"),
        );
        assert_eq!(resolve_label(&graph, &car()), "Car");
    }

    #[test]
    fn comparison_key_is_lowercase() {
        let mut graph = Graph::new();
        let label = Node::iri(vocab::RDFS_LABEL);
        graph.add(car().node(), label, Node::literal("Sports CAR"));
        assert_eq!(comparison_key(&graph, &car()), "sports car");
    }
}
