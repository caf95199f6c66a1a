use serde::{Deserialize, Serialize};

use crate::matcher::{DEFAULT_CUTOFF, FuzzyMatcher, Metric};
use crate::ranker::{DEFAULT_TOP_K, SelfExclusion};

/// Configuration for the recommender.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Minimum fuzzy-match score for a query to resolve to a catalog name.
    pub cutoff: f64,
    /// Number of recommendations per query.
    pub top_k: usize,
    /// String similarity metric for fuzzy matching.
    pub metric: Metric,
    /// How the resolved item is kept out of its own recommendations.
    pub exclusion: SelfExclusion,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
            top_k: DEFAULT_TOP_K,
            metric: Metric::default(),
            exclusion: SelfExclusion::default(),
        }
    }
}

impl RecommenderConfig {
    /// Create a new recommender configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fuzzy-match cutoff, clamped to `[0.0, 1.0]`.
    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff.clamp(0.0, 1.0);
        self
    }

    /// Set the number of recommendations per query.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set the fuzzy-match metric.
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Set the self-exclusion policy.
    pub fn with_exclusion(mut self, exclusion: SelfExclusion) -> Self {
        self.exclusion = exclusion;
        self
    }

    /// Matcher described by this configuration.
    pub fn matcher(&self) -> FuzzyMatcher {
        FuzzyMatcher::new(self.metric, self.cutoff)
    }
}
