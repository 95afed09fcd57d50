//! Turtle loader.
//!
//! Parses a Turtle 1.1 document with `sophia_turtle` and copies every triple
//! into an owned [`Graph`]. Only IRIs, blank nodes and literals are accepted;
//! RDF-star quoted triples and variables are rejected.

use std::path::{Path, PathBuf};

use sophia_api::source::{StreamError, TripleSource};
use sophia_api::term::{Term, TermKind};
use sophia_api::triple::Triple as _;
use sophia_turtle::parser::turtle;
use thiserror::Error;
use tracing::debug;

use crate::model::{Literal, Node, Triple};
use crate::store::Graph;
use crate::vocab;

/// Errors raised while loading an ontology document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The document could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The document is not valid Turtle.
    #[error("failed to parse {origin} as Turtle: {message}")]
    Parse {
        /// File path, or `<string>` for in-memory input.
        origin: String,
        /// Parser diagnostic.
        message: String,
    },
    /// A term kind with no counterpart in the triple model was encountered.
    #[error("unsupported term in {origin}: only IRIs, blank nodes and literals are accepted")]
    UnsupportedTerm {
        /// File path, or `<string>` for in-memory input.
        origin: String,
    },
}

/// Reads and parses a Turtle file.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read and
/// [`LoadError::Parse`] or [`LoadError::UnsupportedTerm`] if it is not a
/// plain RDF 1.1 Turtle document.
pub fn load_path(path: &Path) -> Result<Graph, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content, &path.display().to_string())
}

/// Parses Turtle text held in memory.
///
/// # Errors
///
/// Returns [`LoadError::Parse`] or [`LoadError::UnsupportedTerm`] if the text
/// is not a plain RDF 1.1 Turtle document.
pub fn load_str(content: &str) -> Result<Graph, LoadError> {
    parse(content, "<string>")
}

fn parse(content: &str, origin: &str) -> Result<Graph, LoadError> {
    let mut graph = Graph::new();
    turtle::parse_str(content)
        .try_for_each_triple(|t| -> Result<(), LoadError> {
            let triple = Triple::new(
                to_node(t.s(), origin)?,
                to_node(t.p(), origin)?,
                to_node(t.o(), origin)?,
            );
            graph.insert(triple);
            Ok(())
        })
        .map_err(|err| match err {
            StreamError::SourceError(source) => LoadError::Parse {
                origin: origin.to_owned(),
                message: source.to_string(),
            },
            StreamError::SinkError(sink) => sink,
        })?;

    debug!(origin, triples = graph.len(), "loaded ontology graph");
    Ok(graph)
}

fn to_node<T: Term>(term: T, origin: &str) -> Result<Node, LoadError> {
    let node = match term.kind() {
        TermKind::Iri => term.iri().map(|iri| Node::iri(iri.as_str())),
        TermKind::BlankNode => term.bnode_id().map(|id| Node::blank(id.as_str())),
        TermKind::Literal => term.lexical_form().map(|lexical| {
            let lexical: &str = &lexical;
            if let Some(tag) = term.language_tag() {
                Node::Literal(Literal::lang(lexical, tag.as_str()))
            } else {
                match term.datatype() {
                    Some(dt) if dt.as_str() != vocab::XSD_STRING => {
                        Node::Literal(Literal::typed(lexical, dt.as_str()))
                    }
                    _ => Node::literal(lexical),
                }
            }
        }),
        _ => None,
    };
    node.ok_or_else(|| LoadError::UnsupportedTerm {
        origin: origin.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TripleStore;
    use std::io::Write;

    const VEHICLES: &str = r#"
@prefix ex:   <http://example.org/> .
@prefix owl:  <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix xsd:  <http://www.w3.org/2001/XMLSchema#> .

ex:Car a owl:Class ;
    rdfs:label "Car" , "Auto"@de ;
    rdfs:subClassOf [ a owl:Restriction ] .

ex:Wheels rdfs:comment "4"^^xsd:integer .
"#;

    #[test]
    fn parses_iris_literals_and_blank_nodes() {
        let graph = load_str(VEHICLES).unwrap();
        assert_eq!(graph.len(), 6);

        let car = Node::iri("http://example.org/Car");
        let label = Node::iri(vocab::RDFS_LABEL);
        let labels: Vec<_> = graph
            .matching(Some(&car), Some(&label), None)
            .map(|t| t.object.clone())
            .collect();
        assert!(labels.contains(&Node::literal("Car")));
        assert!(labels.contains(&Node::Literal(Literal::lang("Auto", "de"))));

        let sub = Node::iri(vocab::RDFS_SUBCLASS_OF);
        let parent = graph
            .matching(Some(&car), Some(&sub), None)
            .next()
            .map(|t| t.object.clone())
            .unwrap();
        assert!(parent.is_blank());
    }

    #[test]
    fn keeps_non_string_datatypes() {
        let graph = load_str(VEHICLES).unwrap();
        let wheels = Node::iri("http://example.org/Wheels");
        let object = graph
            .matching(Some(&wheels), None, None)
            .next()
            .map(|t| t.object.clone())
            .unwrap();
        let literal = object.as_literal().unwrap();
        assert_eq!(literal.lexical(), "4");
        assert_eq!(
            literal.datatype(),
            Some("http://www.w3.org/2001/XMLSchema#integer")
        );
    }

    #[test]
    fn empty_document_yields_empty_graph() {
        assert!(load_str("").unwrap().is_empty());
    }

    #[test]
    fn syntax_errors_are_reported_as_parse_errors() {
        let err = load_str("<http://example.org/a> <http://example.org/b> .").unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }), "got {err:?}");
    }

    #[test]
    fn loads_from_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(VEHICLES.as_bytes()).unwrap();
        file.flush().unwrap();
        let graph = load_path(file.path()).unwrap();
        assert_eq!(graph.len(), 6);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_path(Path::new("/nonexistent/ontology.ttl")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
