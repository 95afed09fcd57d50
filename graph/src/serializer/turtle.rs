//! Turtle 1.1 serializer.
//!
//! Produces a Turtle document with one block per subject: predicates separated
//! by `;`, objects of the same predicate separated by `,`. IRIs under a declared
//! namespace are written in prefixed form when the local part is a plain name.

use crate::model::{escape_string, Node};
use crate::store::Graph;
use crate::vocab;

/// Serializes a graph to a Turtle string.
///
/// `prefixes` are declared after the standard `owl`, `rdf`, `rdfs` and `xsd`
/// prefixes and used for compaction.
///
/// # Errors
///
/// This function is infallible; it always returns a valid Turtle string.
#[must_use]
pub fn to_turtle(graph: &Graph, prefixes: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(64 * graph.len() + 256);

    let declared: Vec<(&str, &str)> = vocab::STANDARD_PREFIXES
        .iter()
        .chain(prefixes.iter())
        .copied()
        .collect();

    // Prefix declarations
    for (prefix, iri) in &declared {
        out.push_str(&format!("@prefix {}: <{}> .\n", prefix, iri));
    }

    let mut current: Option<&Node> = None;
    let mut last_predicate: Option<&Node> = None;

    for triple in graph.iter() {
        if current != Some(triple.subject) {
            if current.is_some() {
                out.push_str(" .\n");
            }
            out.push('\n');
            out.push_str(&term(triple.subject, &declared));
            out.push_str("\n  ");
            current = Some(triple.subject);
        } else if last_predicate == Some(triple.predicate) {
            out.push_str(" , ");
            out.push_str(&term(triple.object, &declared));
            continue;
        } else {
            out.push_str(" ;\n  ");
        }

        out.push_str(&predicate(triple.predicate, &declared));
        out.push(' ');
        out.push_str(&term(triple.object, &declared));
        last_predicate = Some(triple.predicate);
    }

    if current.is_some() {
        out.push_str(" .\n");
    }

    out
}

fn predicate(node: &Node, prefixes: &[(&str, &str)]) -> String {
    if node.as_iri() == Some(vocab::RDF_TYPE) {
        "a".to_owned()
    } else {
        term(node, prefixes)
    }
}

fn term(node: &Node, prefixes: &[(&str, &str)]) -> String {
    match node {
        Node::Iri(iri) => compact(iri, prefixes),
        Node::Blank(label) => format!("_:{}", label),
        Node::Literal(lit) => {
            let mut s = format!("\"{}\"", escape_string(lit.lexical()));
            if let Some(lang) = lit.language() {
                s.push('@');
                s.push_str(lang);
            } else if let Some(datatype) = lit.datatype() {
                s.push_str("^^");
                s.push_str(&compact(datatype, prefixes));
            }
            s
        }
    }
}

/// Writes `prefix:local` for the longest matching namespace, `<iri>` otherwise.
fn compact(iri: &str, prefixes: &[(&str, &str)]) -> String {
    prefixes
        .iter()
        .filter_map(|(prefix, ns)| {
            iri.strip_prefix(ns)
                .filter(|local| is_plain_local(local))
                .map(|local| (ns.len(), prefix, local))
        })
        .max_by_key(|(len, _, _)| *len)
        .map_or_else(
            || format!("<{}>", iri),
            |(_, prefix, local)| format!("{}:{}", prefix, local),
        )
}

fn is_plain_local(local: &str) -> bool {
    let mut chars = local.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
