//! Triple model for the znato ontology tools.
//!
//! The `znato-graph` crate holds an ontology as an immutable set of
//! subject/predicate/object triples and exposes it through the read-only
//! [`TripleStore`] interface that the duplicate detector consumes. It also
//! provides the Turtle loader, Turtle and N-Triples serializers, and the
//! conversion from an extracted meta-graph into an RDFS ontology.
//!
//! # Entry Point
//!
//! ```
//! use znato_graph::{loader, vocab, Node, TripleStore};
//!
//! let graph = loader::load_str(
//!     "@prefix owl: <http://www.w3.org/2002/07/owl#> .\n\
//!      <http://example.org/Car> a owl:Class .",
//! )
//! .expect("valid turtle");
//! let rdf_type = Node::iri(vocab::RDF_TYPE);
//! assert_eq!(graph.matching(None, Some(&rdf_type), None).count(), 1);
//! ```
//!
//! # Serialization
//!
//! ```
//! use znato_graph::serializer::{ntriples, turtle};
//! use znato_graph::Graph;
//!
//! let graph = Graph::new();
//! let ttl = turtle::to_turtle(&graph, &[]);
//! let nt = ntriples::to_ntriples(&graph);
//! assert!(ttl.contains("@prefix rdfs:"));
//! assert!(nt.is_empty());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod loader;
pub mod metagraph;
pub mod model;
pub mod serializer;
pub mod store;
pub mod vocab;

pub use loader::LoadError;
pub use metagraph::{Concept, MetaGraph, MetaGraphError, Relationship};
pub use model::{Literal, Node, Triple, TripleRef};
pub use store::{Graph, TripleStore};
