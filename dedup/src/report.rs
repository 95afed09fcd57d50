//! Detection report types: reasons, candidates, and the per-run report.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::classes::ClassEntity;

/// Why two classes were reported as duplicates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reason {
    /// An `owl:equivalentClass` triple links the pair, in either direction.
    ExplicitEquivalent,
    /// The lower-cased labels reached the similarity threshold; carries the ratio.
    LabelSimilarity(f64),
}

impl Reason {
    /// Returns the bare reason tag: `explicit-equivalent` or `label-similarity`.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Reason::ExplicitEquivalent => "explicit-equivalent",
            Reason::LabelSimilarity(_) => "label-similarity",
        }
    }

    /// Returns the similarity ratio for label matches.
    #[must_use]
    pub fn score(&self) -> Option<f64> {
        match self {
            Reason::ExplicitEquivalent => None,
            Reason::LabelSimilarity(score) => Some(*score),
        }
    }
}

/// `explicit-equivalent`, or `label similarity 0.85` with two decimals.
impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::ExplicitEquivalent => f.write_str("explicit-equivalent"),
            Reason::LabelSimilarity(score) => write!(f, "label similarity {:.2}", score),
        }
    }
}

/// An unordered pair of distinct classes, stored with `first < second`.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateCandidate {
    /// The class that sorts first.
    pub first: ClassEntity,
    /// The class that sorts second.
    pub second: ClassEntity,
    /// Evidence for the match.
    pub reason: Reason,
}

impl Serialize for DuplicateCandidate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("DuplicateCandidate", 5)?;
        s.serialize_field("first", self.first.as_str())?;
        s.serialize_field("second", self.second.as_str())?;
        s.serialize_field("tag", self.reason.tag())?;
        s.serialize_field("score", &self.reason.score())?;
        s.serialize_field("reason", &self.reason.to_string())?;
        s.end()
    }
}

/// Result of one detection run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionReport {
    /// Number of distinct class entities found in the graph.
    pub classes: usize,
    /// Number of unordered pairs compared.
    pub pairs: usize,
    /// Similarity threshold used for the run.
    pub threshold: f64,
    /// Candidates in visitation order.
    pub candidates: Vec<DuplicateCandidate>,
}

impl DetectionReport {
    /// Returns the number of candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns true if no duplicates were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Returns the count of pairs linked by `owl:equivalentClass`.
    #[must_use]
    pub fn explicit_count(&self) -> usize {
        self.candidates
            .iter()
            .filter(|c| c.reason == Reason::ExplicitEquivalent)
            .count()
    }

    /// Returns the count of pairs matched on label similarity.
    #[must_use]
    pub fn similarity_count(&self) -> usize {
        self.len() - self.explicit_count()
    }
}
