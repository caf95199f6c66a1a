use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::sequence::{self, IndexedSequence, SequenceMatcher};

/// String similarity metric used to score a query against catalog names.
///
/// Every metric yields a score in `[0.0, 1.0]` where an exact match is `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Ratcliff/Obershelp matching-blocks ratio.
    #[default]
    SequenceRatio,
    /// `1 - levenshtein / max_len`.
    NormalizedLevenshtein,
    /// Jaro-Winkler with the standard prefix bonus.
    JaroWinkler,
    /// Sørensen-Dice coefficient over character bigrams.
    SorensenDice,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Self::SequenceRatio,
        Self::NormalizedLevenshtein,
        Self::JaroWinkler,
        Self::SorensenDice,
    ];

    /// Scores `candidate` against `query`.
    #[must_use]
    pub fn score(self, candidate: &str, query: &str) -> f64 {
        match self {
            Self::SequenceRatio => sequence::ratio(candidate, query),
            Self::NormalizedLevenshtein => strsim::normalized_levenshtein(candidate, query),
            Self::JaroWinkler => strsim::jaro_winkler(candidate, query),
            Self::SorensenDice => strsim::sorensen_dice(candidate, query),
        }
    }

    /// Scores `candidate` against `query`, returning `None` when the score is
    /// certain to fall below `cutoff`.
    ///
    /// For [`Metric::SequenceRatio`] the cheap upper bounds are tried first.
    /// Use [`Metric::prepare`] when scoring one query against many candidates.
    #[must_use]
    pub fn score_at_least(self, candidate: &str, query: &str, cutoff: f64) -> Option<f64> {
        self.prepare(query).score_at_least(candidate, cutoff)
    }

    /// Prepares `query` once for scoring against many candidates.
    #[must_use]
    pub fn prepare(self, query: &str) -> PreparedQuery<'_> {
        let indexed = match self {
            Self::SequenceRatio => Some(IndexedSequence::new(query)),
            _ => None,
        };
        PreparedQuery {
            metric: self,
            query,
            indexed,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SequenceRatio => "sequence_ratio",
            Self::NormalizedLevenshtein => "normalized_levenshtein",
            Self::JaroWinkler => "jaro_winkler",
            Self::SorensenDice => "sorensen_dice",
        }
    }
}

/// A query ready to be scored against candidates with one metric.
#[derive(Debug, Clone)]
pub struct PreparedQuery<'q> {
    metric: Metric,
    query: &'q str,
    /// Present for [`Metric::SequenceRatio`] only.
    indexed: Option<IndexedSequence>,
}

impl PreparedQuery<'_> {
    #[must_use]
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Same as [`Metric::score_at_least`] for the prepared query.
    #[must_use]
    pub fn score_at_least(&self, candidate: &str, cutoff: f64) -> Option<f64> {
        let score = match &self.indexed {
            Some(indexed) => {
                let matcher = SequenceMatcher::against(candidate, indexed);
                if matcher.real_quick_ratio() < cutoff || matcher.quick_ratio() < cutoff {
                    return None;
                }
                matcher.ratio()
            }
            None => self.metric.score(candidate, self.query),
        };
        (score >= cutoff).then_some(score)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|m| m.as_str()).collect();
                format!("unknown metric {s:?}, expected one of: {}", known.join(", "))
            })
    }
}
