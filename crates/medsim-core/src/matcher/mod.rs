//! # Fuzzy Matcher
//!
//! Resolves a possibly misspelled query to the closest candidate name.
//! Matching is literal: no case folding, trimming or whitespace collapsing is
//! applied to either side.

pub mod metric;
pub mod sequence;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

pub use metric::{Metric, PreparedQuery};
pub use sequence::{IndexedSequence, MatchingBlock, SequenceMatcher};

/// Minimum score for a fuzzy match to be accepted.
pub const DEFAULT_CUTOFF: f64 = 0.5;

/// A candidate accepted by the matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyMatch {
    /// Position of the candidate in the candidate list.
    pub position: usize,
    pub name: String,
    pub score: f64,
}

/// Fuzzy matcher configuration: which metric, and how good is good enough.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatcher {
    metric: Metric,
    cutoff: f64,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self {
            metric: Metric::default(),
            cutoff: DEFAULT_CUTOFF,
        }
    }
}

impl FuzzyMatcher {
    #[must_use]
    pub fn new(metric: Metric, cutoff: f64) -> Self {
        Self { metric, cutoff }
    }

    #[must_use]
    pub fn metric(&self) -> Metric {
        self.metric
    }

    #[must_use]
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Best candidate scoring at least the cutoff; ties go to the earliest.
    pub fn find_closest<'a, S: AsRef<str>>(
        &self,
        query: &str,
        candidates: &'a [S],
    ) -> Option<(usize, &'a str, f64)> {
        let prepared = self.metric.prepare(query);
        let mut best: Option<(usize, &'a str, f64)> = None;

        for (position, candidate) in candidates.iter().enumerate() {
            let candidate = candidate.as_ref();
            let Some(score) = prepared.score_at_least(candidate, self.cutoff) else {
                continue;
            };
            if best.is_none_or(|(_, _, top)| score > top) {
                best = Some((position, candidate, score));
                if score >= 1.0 {
                    // Nothing later can beat a perfect score under first-wins ties.
                    break;
                }
            }
        }

        best
    }

    /// Up to `n` candidates scoring at least the cutoff, best first; equal
    /// scores keep candidate order.
    pub fn closest_matches<S: AsRef<str>>(
        &self,
        query: &str,
        candidates: &[S],
        n: usize,
    ) -> Vec<FuzzyMatch> {
        if n == 0 {
            return Vec::new();
        }

        let prepared = self.metric.prepare(query);
        let mut matches: Vec<FuzzyMatch> = candidates
            .iter()
            .enumerate()
            .filter_map(|(position, candidate)| {
                let name = candidate.as_ref();
                prepared
                    .score_at_least(name, self.cutoff)
                    .map(|score| FuzzyMatch {
                        position,
                        name: name.to_string(),
                        score,
                    })
            })
            .collect();

        matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        matches.truncate(n);
        matches
    }
}

/// Returns the candidate closest to `query` with the default metric, or
/// `None` if nothing scores at least `cutoff` (including when `candidates`
/// is empty).
pub fn find_closest<'a, S: AsRef<str>>(
    query: &str,
    candidates: &'a [S],
    cutoff: f64,
) -> Option<&'a str> {
    FuzzyMatcher::new(Metric::default(), cutoff)
        .find_closest(query, candidates)
        .map(|(_, name, _)| name)
}

/// Returns up to `n` close matches with the default metric.
pub fn closest_matches<S: AsRef<str>>(
    query: &str,
    candidates: &[S],
    n: usize,
    cutoff: f64,
) -> Vec<FuzzyMatch> {
    FuzzyMatcher::new(Metric::default(), cutoff).closest_matches(query, candidates, n)
}
