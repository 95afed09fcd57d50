//! Pairwise duplicate scan.
//!
//! Every unordered pair of distinct classes is visited once, in the order of
//! the sorted class set: `(0, 1), (0, 2), .., (1, 2), ..`. A pair linked by
//! `owl:equivalentClass` in either direction is reported as explicit and never
//! scored; otherwise the lower-cased labels are compared with
//! [`similarity::ratio`] and the pair is kept when the ratio reaches the
//! threshold (inclusive).

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};
use znato_graph::{vocab, Node, TripleStore};

use crate::classes::{extract_classes, ClassEntity};
use crate::labels::comparison_key;
use crate::report::{DetectionReport, DuplicateCandidate, Reason};
use crate::similarity;

/// Threshold used when none is supplied.
pub const DEFAULT_THRESHOLD: f64 = 0.8;

/// Errors raised when configuring a detector.
#[derive(Debug, Error, PartialEq)]
pub enum DetectError {
    /// The threshold is not a finite number in `(0, 1]`.
    #[error("similarity threshold must be in (0, 1], got {0}")]
    InvalidThreshold(f64),
}

/// Detector settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorConfig {
    /// Minimum label similarity for a candidate, inclusive.
    pub threshold: f64,
    /// Scan pairs on the rayon thread pool.
    pub parallel: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            parallel: false,
        }
    }
}

impl DetectorConfig {
    /// Returns a sequential config with the given threshold.
    #[must_use]
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }
}

/// A validated duplicate detector.
#[derive(Debug, Clone, Copy)]
pub struct Detector {
    config: DetectorConfig,
}

impl Detector {
    /// Creates a detector.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::InvalidThreshold`] if the threshold is NaN,
    /// infinite, not positive, or greater than 1.
    pub fn new(config: DetectorConfig) -> Result<Self, DetectError> {
        let t = config.threshold;
        if !t.is_finite() || t <= 0.0 || t > 1.0 {
            return Err(DetectError::InvalidThreshold(t));
        }
        Ok(Self { config })
    }

    /// Runs one detection pass over `store`, on the rayon pool when the
    /// config asks for it.
    ///
    /// Candidates come back in visitation order either way.
    #[must_use]
    pub fn detect<S: TripleStore + Sync + ?Sized>(&self, store: &S) -> DetectionReport {
        if self.config.parallel {
            self.detect_parallel(store)
        } else {
            self.detect_sequential(store)
        }
    }

    /// Runs one detection pass on the calling thread, ignoring `parallel`.
    #[must_use]
    pub fn detect_sequential<S: TripleStore + ?Sized>(&self, store: &S) -> DetectionReport {
        let classes: Vec<ClassEntity> = extract_classes(store).into_iter().collect();
        let scan = &PairScan::new(store, &classes, self.config.threshold);
        let n = classes.len();
        let candidates = (0..n)
            .flat_map(|i| (i + 1..n).filter_map(move |j| scan.compare(i, j)))
            .collect();
        self.finish(n, candidates)
    }

    /// Runs one detection pass on the rayon pool, ignoring `parallel`.
    #[must_use]
    pub fn detect_parallel<S: TripleStore + Sync + ?Sized>(&self, store: &S) -> DetectionReport {
        let classes: Vec<ClassEntity> = extract_classes(store).into_iter().collect();
        let scan = &PairScan::new(store, &classes, self.config.threshold);
        let n = classes.len();
        let candidates = (0..n)
            .into_par_iter()
            .flat_map_iter(|i| (i + 1..n).filter_map(move |j| scan.compare(i, j)))
            .collect();
        self.finish(n, candidates)
    }

    fn finish(&self, classes: usize, candidates: Vec<DuplicateCandidate>) -> DetectionReport {
        let report = DetectionReport {
            classes,
            pairs: classes * classes.saturating_sub(1) / 2,
            threshold: self.config.threshold,
            candidates,
        };
        info!(
            classes = report.classes,
            pairs = report.pairs,
            candidates = report.len(),
            explicit = report.explicit_count(),
            "duplicate scan finished"
        );
        report
    }
}

/// Runs a sequential detection with the given threshold.
///
/// # Errors
///
/// Returns [`DetectError::InvalidThreshold`] for a threshold outside `(0, 1]`.
pub fn find_duplicates<S: TripleStore + ?Sized>(
    store: &S,
    threshold: f64,
) -> Result<DetectionReport, DetectError> {
    let detector = Detector::new(DetectorConfig::with_threshold(threshold))?;
    Ok(detector.detect_sequential(store))
}

/// Per-run state shared by every pair comparison.
struct PairScan<'a, S: ?Sized> {
    store: &'a S,
    classes: &'a [ClassEntity],
    nodes: Vec<Node>,
    keys: Vec<String>,
    equivalent_class: Node,
    threshold: f64,
}

impl<'a, S: TripleStore + ?Sized> PairScan<'a, S> {
    fn new(store: &'a S, classes: &'a [ClassEntity], threshold: f64) -> Self {
        Self {
            store,
            classes,
            nodes: classes.iter().map(ClassEntity::node).collect(),
            keys: classes.iter().map(|c| comparison_key(store, c)).collect(),
            equivalent_class: Node::iri(vocab::OWL_EQUIVALENT_CLASS),
            threshold,
        }
    }

    fn declared_equivalent(&self, i: usize, j: usize) -> bool {
        let (a, b) = (&self.nodes[i], &self.nodes[j]);
        self.store.contains(a, &self.equivalent_class, b)
            || self.store.contains(b, &self.equivalent_class, a)
    }

    fn compare(&self, i: usize, j: usize) -> Option<DuplicateCandidate> {
        let reason = if self.declared_equivalent(i, j) {
            Reason::ExplicitEquivalent
        } else {
            let score = similarity::ratio(&self.keys[i], &self.keys[j]);
            if score < self.threshold {
                return None;
            }
            Reason::LabelSimilarity(score)
        };
        let candidate = DuplicateCandidate {
            first: self.classes[i].clone(),
            second: self.classes[j].clone(),
            reason,
        };
        debug!(
            first = %candidate.first,
            second = %candidate.second,
            reason = %candidate.reason,
            "duplicate candidate"
        );
        Some(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use znato_graph::store::Triples;
    use znato_graph::Graph;

    fn ex(local: &str) -> Node {
        Node::iri(format!("http://example.org/{local}"))
    }

    fn class(graph: &mut Graph, local: &str, label: &str) {
        let owl_class = Node::iri(vocab::OWL_CLASS);
        graph.add(ex(local), Node::iri(vocab::RDF_TYPE), owl_class);
        let rdfs_label = Node::iri(vocab::RDFS_LABEL);
        graph.add(ex(local), rdfs_label, Node::literal(label));
    }

    /// A store that counts lookups through a `Cell`, so it is not `Sync`.
    struct CountingStore {
        graph: Graph,
        lookups: Cell<usize>,
    }

    impl TripleStore for CountingStore {
        fn matching<'a>(
            &'a self,
            subject: Option<&'a Node>,
            predicate: Option<&'a Node>,
            object: Option<&'a Node>,
        ) -> Triples<'a> {
            self.lookups.set(self.lookups.get() + 1);
            self.graph.matching(subject, predicate, object)
        }

        fn contains(&self, subject: &Node, predicate: &Node, object: &Node) -> bool {
            self.lookups.set(self.lookups.get() + 1);
            self.graph.contains(subject, predicate, object)
        }
    }

    #[test]
    fn rejects_thresholds_outside_unit_interval() {
        for t in [0.0, -0.1, 1.01, f64::NAN, f64::INFINITY] {
            let config = DetectorConfig::with_threshold(t);
            assert!(Detector::new(config).is_err(), "{t}");
        }
        assert!(Detector::new(DetectorConfig::with_threshold(1.0)).is_ok());
        assert!(Detector::new(DetectorConfig::default()).is_ok());
    }

    #[test]
    fn default_threshold_is_point_eight() {
        assert_eq!(DetectorConfig::default().threshold, 0.8);
        assert!(!DetectorConfig::default().parallel);
    }

    #[test]
    fn counts_pairs_visited() {
        let mut graph = Graph::new();
        for name in ["A", "B", "C", "D"] {
            class(&mut graph, name, name);
        }
        let report = find_duplicates(&graph, 0.8).unwrap();
        assert_eq!(report.classes, 4);
        assert_eq!(report.pairs, 6);
        assert!(report.is_empty());
    }

    #[test]
    fn candidates_follow_visitation_order() {
        let mut graph = Graph::new();
        class(&mut graph, "A", "vehicle");
        class(&mut graph, "B", "truck");
        class(&mut graph, "C", "vehicles");
        class(&mut graph, "D", "trucks");
        let report = find_duplicates(&graph, 0.8).unwrap();
        let pairs: Vec<_> = report
            .candidates
            .iter()
            .map(|c| (c.first.as_str(), c.second.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("http://example.org/A", "http://example.org/C"),
                ("http://example.org/B", "http://example.org/D"),
            ]
        );
    }

    #[test]
    fn labels_compare_case_insensitively() {
        let mut graph = Graph::new();
        class(&mut graph, "A", "PERSON");
        class(&mut graph, "B", "person");
        let report = find_duplicates(&graph, 1.0).unwrap();
        assert_eq!(report.candidates[0].reason, Reason::LabelSimilarity(1.0));
    }

    #[test]
    fn sequential_scan_accepts_stores_that_are_not_sync() {
        let mut graph = Graph::new();
        class(&mut graph, "A", "vehicle");
        class(&mut graph, "B", "vehicles");
        let store = CountingStore {
            graph,
            lookups: Cell::new(0),
        };
        let report = find_duplicates(&store, 0.8).unwrap();
        assert_eq!(report.len(), 1);
        assert!(store.lookups.get() > 0);
    }

    #[test]
    fn parallel_and_sequential_passes_agree() {
        let mut graph = Graph::new();
        for (local, label) in [("A", "vehicle"), ("B", "truck"), ("C", "vehicles")] {
            class(&mut graph, local, label);
        }
        let config = DetectorConfig {
            threshold: 0.8,
            parallel: true,
        };
        let detector = Detector::new(config).unwrap();
        assert_eq!(detector.detect(&graph), detector.detect_sequential(&graph));
    }
}
