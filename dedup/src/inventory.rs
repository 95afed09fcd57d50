//! Ontology inventory: the classes and properties an operator sees first.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use znato_graph::{vocab, Node, TripleStore};

use crate::classes::{extract_classes, ClassEntity};
use crate::labels::resolve_label;

/// How a property was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyKind {
    /// `owl:ObjectProperty`
    Object,
    /// `owl:DatatypeProperty`
    Datatype,
    /// `rdf:Property`
    Rdf,
}

impl PropertyKind {
    /// All kinds with their type IRI, in report order.
    pub const ALL: [(PropertyKind, &'static str); 3] = [
        (PropertyKind::Object, vocab::OWL_OBJECT_PROPERTY),
        (PropertyKind::Datatype, vocab::OWL_DATATYPE_PROPERTY),
        (PropertyKind::Rdf, vocab::RDF_PROPERTY),
    ];

    /// Returns the prefixed name of the declaring type.
    #[must_use]
    pub fn type_name(self) -> &'static str {
        match self {
            PropertyKind::Object => "owl:ObjectProperty",
            PropertyKind::Datatype => "owl:DatatypeProperty",
            PropertyKind::Rdf => "rdf:Property",
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A class with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassSummary {
    /// Class IRI.
    pub iri: String,
    /// Resolved label.
    pub label: String,
}

/// A declared property with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertySummary {
    /// Property IRI.
    pub iri: String,
    /// Resolved label.
    pub label: String,
    /// Declaring type.
    pub kind: PropertyKind,
}

/// Classes and properties of one graph, each list sorted by IRI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Inventory {
    /// Class entities, as found by [`extract_classes`].
    pub classes: Vec<ClassSummary>,
    /// IRIs typed as a property. A property declared under several types is
    /// listed once per type.
    pub properties: Vec<PropertySummary>,
}

impl Inventory {
    /// Scans a store.
    #[must_use]
    pub fn collect<S: TripleStore + ?Sized>(store: &S) -> Self {
        let classes = extract_classes(store)
            .into_iter()
            .map(|entity| ClassSummary {
                label: resolve_label(store, &entity),
                iri: entity.as_str().to_owned(),
            })
            .collect();

        let rdf_type = Node::iri(vocab::RDF_TYPE);
        let mut declared = BTreeSet::new();
        for (kind, type_iri) in PropertyKind::ALL {
            let type_node = Node::iri(type_iri);
            for triple in store.matching(None, Some(&rdf_type), Some(&type_node)) {
                if let Some(iri) = triple.subject.as_iri() {
                    declared.insert((iri.to_owned(), kind));
                }
            }
        }
        let properties = declared
            .into_iter()
            .map(|(iri, kind)| {
                let entity = ClassEntity::new(iri);
                PropertySummary {
                    label: resolve_label(store, &entity),
                    iri: entity.as_str().to_owned(),
                    kind,
                }
            })
            .collect();

        Self {
            classes,
            properties,
        }
    }
}
