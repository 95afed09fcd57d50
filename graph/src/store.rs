//! Read-only triple store interface and its in-memory implementation.
//!
//! Consumers such as the duplicate detector depend only on [`TripleStore`]:
//! pattern iteration, membership, and literal extraction. [`Graph`] is the
//! in-memory store produced by the loader.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::{Literal, Node, Triple, TripleRef};

/// Boxed iterator over borrowed triples.
pub type Triples<'a> = Box<dyn Iterator<Item = TripleRef<'a>> + 'a>;

type PredicateIndex = BTreeMap<Node, BTreeSet<Node>>;
type SubjectEntries<'a> = Box<dyn Iterator<Item = (&'a Node, &'a PredicateIndex)> + 'a>;
type PredicateEntries<'a> = Box<dyn Iterator<Item = (&'a Node, &'a BTreeSet<Node>)> + 'a>;

/// The three read operations an ontology consumer needs.
pub trait TripleStore {
    /// Iterates the triples matching a pattern. `None` matches any term.
    fn matching<'a>(
        &'a self,
        subject: Option<&'a Node>,
        predicate: Option<&'a Node>,
        object: Option<&'a Node>,
    ) -> Triples<'a>;

    /// Returns true if the exact triple is present.
    fn contains(&self, subject: &Node, predicate: &Node, object: &Node) -> bool;

    /// Returns the string value of a literal node; `None` for IRIs and blank nodes.
    fn literal_value<'n>(&self, node: &'n Node) -> Option<&'n str> {
        node.as_literal().map(Literal::lexical)
    }
}

/// In-memory triple set with RDF set semantics.
///
/// Triples are indexed subject → predicate → objects in ordered maps, so
/// iteration is sorted by (subject, predicate, object).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    index: BTreeMap<Node, PredicateIndex>,
    len: usize,
}

impl Graph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a triple. Returns `false` if it was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        self.add(triple.subject, triple.predicate, triple.object)
    }

    /// Inserts a triple given as its three terms.
    pub fn add(&mut self, subject: Node, predicate: Node, object: Node) -> bool {
        let inserted = self
            .index
            .entry(subject)
            .or_default()
            .entry(predicate)
            .or_default()
            .insert(object);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Number of distinct triples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the graph holds no triples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates every triple in (subject, predicate, object) order.
    pub fn iter(&self) -> impl Iterator<Item = TripleRef<'_>> {
        self.index.iter().flat_map(|(subject, predicates)| {
            predicates.iter().flat_map(move |(predicate, objects)| {
                objects.iter().map(move |object| TripleRef {
                    subject,
                    predicate,
                    object,
                })
            })
        })
    }
}

impl TripleStore for Graph {
    fn matching<'a>(
        &'a self,
        subject: Option<&'a Node>,
        predicate: Option<&'a Node>,
        object: Option<&'a Node>,
    ) -> Triples<'a> {
        let subjects: SubjectEntries<'a> = match subject {
            Some(s) => Box::new(self.index.get_key_value(s).into_iter()),
            None => Box::new(self.index.iter()),
        };

        Box::new(subjects.flat_map(move |(s, predicates)| {
            let predicates: PredicateEntries<'a> = match predicate {
                Some(p) => Box::new(predicates.get_key_value(p).into_iter()),
                None => Box::new(predicates.iter()),
            };
            predicates.flat_map(move |(p, objects)| {
                let objects: Box<dyn Iterator<Item = &'a Node>> = match object {
                    Some(o) => Box::new(objects.get(o).into_iter()),
                    None => Box::new(objects.iter()),
                };
                objects.map(move |o| TripleRef {
                    subject: s,
                    predicate: p,
                    object: o,
                })
            })
        }))
    }

    fn contains(&self, subject: &Node, predicate: &Node, object: &Node) -> bool {
        self.index
            .get(subject)
            .and_then(|predicates| predicates.get(predicate))
            .is_some_and(|objects| objects.contains(object))
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        let mut graph = Graph::new();
        graph.extend(iter);
        graph
    }
}

impl Extend<Triple> for Graph {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        for triple in iter {
            self.insert(triple);
        }
    }
}
