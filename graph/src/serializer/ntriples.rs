//! N-Triples serializer.
//!
//! One triple per line with absolute IRIs, in the graph's sorted order, which
//! keeps the output diff-friendly.

use crate::store::Graph;

/// Serializes a graph to an N-Triples string.
///
/// # Errors
///
/// This function is infallible; it always returns a valid N-Triples string.
#[must_use]
pub fn to_ntriples(graph: &Graph) -> String {
    let mut out = String::with_capacity(96 * graph.len());
    for triple in graph.iter() {
        out.push_str(&format!(
            "{} {} {} .\n",
            triple.subject, triple.predicate, triple.object
        ));
    }
    out
}
