//! Serializers for ontology graphs.
//!
//! Two formats are supported:
//! - **Turtle** ([`turtle`]): prefixed, grouped by subject; the default output
//!   of `znato build-ontology`
//! - **N-Triples** ([`ntriples`]): one absolute triple per line, for streaming and diffing

pub mod ntriples;
pub mod turtle;
