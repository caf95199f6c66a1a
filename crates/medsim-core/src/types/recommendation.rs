use std::fmt;

use serde::{Deserialize, Serialize};

/// A recommended item together with its similarity to the resolved item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    /// Catalog index of the recommended item.
    pub index: usize,
    /// Catalog name of the recommended item.
    pub name: String,
    /// Similarity of the resolved item to this item.
    pub score: f64,
}

/// The outcome of resolving a query and ranking its neighbours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Canonical catalog name the query resolved to.
    pub resolved_name: String,

    /// Recommended names, most similar first.
    pub recommendations: Vec<String>,
}

/// [`Recommendation`] with match and similarity scores attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecommendation {
    /// Canonical catalog name the query resolved to.
    pub resolved_name: String,

    /// Catalog index of the resolved name.
    pub resolved_index: usize,

    /// Fuzzy-match score of the query against `resolved_name`.
    pub match_score: f64,

    /// Recommended items, most similar first.
    pub recommendations: Vec<ScoredItem>,
}

impl From<ScoredRecommendation> for Recommendation {
    fn from(scored: ScoredRecommendation) -> Self {
        Self {
            resolved_name: scored.resolved_name,
            recommendations: scored.recommendations.into_iter().map(|i| i.name).collect(),
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> [{}]",
            self.resolved_name,
            self.recommendations.join(", ")
        )
    }
}
