//! Meta-graph to ontology conversion.
//!
//! A meta-graph is the JSON shape produced by concept extraction: abstract
//! concepts plus typed relationships between them. Converting it yields an RDFS
//! ontology where concepts become `rdfs:Class` resources and relationship types
//! become `rdf:Property` resources with `rdfs:domain`/`rdfs:range`.
//!
//! ```json
//! {
//!   "concepts": [{ "id": "Vehicle" }, { "id": "Driver" }],
//!   "relationships": [{ "source": "Driver", "target": "Vehicle", "type": "OPERATES" }]
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use unicode_normalization::UnicodeNormalization;

use crate::model::Node;
use crate::store::Graph;
use crate::vocab;

/// Namespace used for generated resources when none is configured.
pub const DEFAULT_BASE_IRI: &str = "http://example.org/ontology#";

/// An abstract concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    /// Concept name as extracted, e.g. `"Vehicle"`.
    pub id: String,
}

/// A typed, directed relationship between two concepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// Name of the source concept (becomes the property domain).
    pub source: String,
    /// Name of the target concept (becomes the property range).
    pub target: String,
    /// Relationship type, e.g. `"DEPENDS_ON"`.
    #[serde(rename = "type")]
    pub kind: String,
}

/// Concepts plus relationships, as read from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaGraph {
    /// Extracted concepts.
    #[serde(default)]
    pub concepts: Vec<Concept>,
    /// Extracted relationships.
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

/// Errors raised while reading a meta-graph.
#[derive(Debug, Error)]
pub enum MetaGraphError {
    /// The input is not a valid meta-graph JSON document.
    #[error("invalid meta-graph JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The base IRI cannot prefix generated resources.
    #[error("invalid base IRI {0:?}: needs a scheme and no spaces or reserved characters")]
    InvalidBaseIri(String),
}

/// Characters that may not appear in an IRI reference.
const FORBIDDEN_IRI_CHARS: &[char] = &['<', '>', '"', '{', '}', '|', '^', '`', '\\'];

/// Checks that `base` can prefix generated local names.
///
/// The base must carry a scheme (`http:`, `urn:`, ...) and contain no
/// whitespace, control characters, or characters excluded from IRIs.
///
/// # Errors
///
/// Returns [`MetaGraphError::InvalidBaseIri`] when either check fails.
pub fn validate_base_iri(base: &str) -> Result<(), MetaGraphError> {
    if has_scheme(base) && base.chars().all(is_iri_char) {
        Ok(())
    } else {
        Err(MetaGraphError::InvalidBaseIri(base.to_owned()))
    }
}

fn has_scheme(iri: &str) -> bool {
    let Some((scheme, _)) = iri.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn is_iri_char(c: char) -> bool {
    !(c.is_whitespace() || c.is_control() || FORBIDDEN_IRI_CHARS.contains(&c))
}

impl MetaGraph {
    /// Parses a meta-graph JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`MetaGraphError::Json`] if the text is not valid JSON or does
    /// not have the meta-graph shape.
    pub fn from_json(text: &str) -> Result<Self, MetaGraphError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Builds the RDFS ontology for this meta-graph under `base_iri`.
    ///
    /// Names are slugged with [`slug`]; a name whose slug is empty is skipped.
    /// Repeated concepts and relationships collapse under set semantics.
    ///
    /// # Errors
    ///
    /// Returns [`MetaGraphError::InvalidBaseIri`] if `base_iri` fails
    /// [`validate_base_iri`].
    pub fn to_graph(&self, base_iri: &str) -> Result<Graph, MetaGraphError> {
        validate_base_iri(base_iri)?;
        let mut graph = Graph::new();
        let rdf_type = Node::iri(vocab::RDF_TYPE);
        let resource = |name: &str| -> Option<Node> {
            let local = slug(name);
            if local.is_empty() {
                warn!(name, "skipping meta-graph name with an empty slug");
                None
            } else {
                Some(Node::iri(format!("{base_iri}{local}")))
            }
        };

        for concept in &self.concepts {
            if let Some(class) = resource(&concept.id) {
                graph.add(class, rdf_type.clone(), Node::iri(vocab::RDFS_CLASS));
            }
        }

        for rel in &self.relationships {
            let (Some(source), Some(target), Some(property)) = (
                resource(&rel.source),
                resource(&rel.target),
                resource(&rel.kind),
            ) else {
                continue;
            };
            let kind = Node::iri(vocab::RDF_PROPERTY);
            graph.add(property.clone(), rdf_type.clone(), kind);
            graph.add(property.clone(), Node::iri(vocab::RDFS_DOMAIN), source);
            graph.add(property, Node::iri(vocab::RDFS_RANGE), target);
        }

        Ok(graph)
    }
}

/// Turns a free-text name into an IRI-safe local name.
///
/// Accents are stripped via NFKD decomposition, other non-ASCII characters and
/// apostrophes are dropped, the rest is lower-cased, and every run of
/// non-alphanumeric characters becomes a single `_`.
#[must_use]
pub fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_separator = false;
    for c in text.nfkd().filter(char::is_ascii).filter(|c| *c != '\'') {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('_');
            }
            pending_separator = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }
    out
}
