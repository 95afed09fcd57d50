//! Duplicate-class detection for ontology graphs.
//!
//! Given any [`TripleStore`](znato_graph::TripleStore), the detector collects
//! the class entities, visits every unordered pair once in IRI order, and
//! reports pairs that are either declared `owl:equivalentClass` or whose
//! lower-cased labels are similar enough under the Ratcliff/Obershelp ratio.
//!
//! # Entry Point
//!
//! ```
//! use znato_dedup::{Detector, DetectorConfig, Reason};
//! use znato_graph::loader;
//!
//! let graph = loader::load_str(
//!     "@prefix owl: <http://www.w3.org/2002/07/owl#> .\n\
//!      @prefix ex: <http://example.org/> .\n\
//!      ex:Person a owl:Class .\n\
//!      ex:Persons a owl:Class .",
//! )
//! .expect("valid turtle");
//!
//! let detector = Detector::new(DetectorConfig::default()).expect("valid threshold");
//! let report = detector.detect(&graph);
//! assert_eq!(report.len(), 1);
//! assert_eq!(report.candidates[0].reason.to_string(), "label similarity 0.92");
//! assert!(matches!(report.candidates[0].reason, Reason::LabelSimilarity(_)));
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod classes;
pub mod inventory;
pub mod labels;
pub mod report;
pub mod scan;
pub mod similarity;

pub use classes::{extract_classes, ClassEntity};
pub use inventory::{ClassSummary, Inventory, PropertyKind, PropertySummary};
pub use labels::{local_name, resolve_label};
pub use report::{DetectionReport, DuplicateCandidate, Reason};
pub use scan::{find_duplicates, DetectError, Detector, DetectorConfig, DEFAULT_THRESHOLD};
