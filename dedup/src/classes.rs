//! Class extraction.
//!
//! A class entity is any IRI that is typed `owl:Class` or `rdfs:Class`, or that
//! appears on either side of an `rdfs:subClassOf` triple. Blank nodes (such as
//! anonymous `owl:Restriction` superclasses) and literals are not entities.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use znato_graph::{vocab, Node, TripleStore};

/// A named class, identified by its IRI. Ordered by IRI text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ClassEntity(String);

impl ClassEntity {
    /// Wraps a class IRI.
    #[must_use]
    pub fn new(iri: impl Into<String>) -> Self {
        Self(iri.into())
    }

    /// Returns the IRI text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the IRI as a graph node.
    #[must_use]
    pub fn node(&self) -> Node {
        Node::iri(self.0.as_str())
    }
}

impl fmt::Display for ClassEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Collects the distinct class entities of a graph, sorted by IRI.
///
/// An empty graph yields an empty set.
#[must_use]
pub fn extract_classes<S: TripleStore + ?Sized>(store: &S) -> BTreeSet<ClassEntity> {
    let rdf_type = Node::iri(vocab::RDF_TYPE);
    let subclass_of = Node::iri(vocab::RDFS_SUBCLASS_OF);
    let mut classes = BTreeSet::new();

    for class_type in [vocab::OWL_CLASS, vocab::RDFS_CLASS] {
        let class_type = Node::iri(class_type);
        for triple in store.matching(None, Some(&rdf_type), Some(&class_type)) {
            insert_named(&mut classes, triple.subject);
        }
    }

    for triple in store.matching(None, Some(&subclass_of), None) {
        insert_named(&mut classes, triple.subject);
        insert_named(&mut classes, triple.object);
    }

    classes
}

fn insert_named(classes: &mut BTreeSet<ClassEntity>, node: &Node) {
    if let Some(iri) = node.as_iri() {
        classes.insert(ClassEntity::new(iri));
    }
}
