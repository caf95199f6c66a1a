//! # Ranker
//!
//! Orders one similarity row and keeps the top-K entries other than the
//! queried item.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of recommendations returned when none is requested explicitly.
pub const DEFAULT_TOP_K: usize = 5;

/// How the queried item is kept out of its own recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfExclusion {
    /// Remove the entry whose index is the queried index, wherever it ranks.
    #[default]
    Identity,
    /// Remove whatever entry ranks first. Only equivalent to `Identity` when
    /// self-similarity is the row maximum and wins its ties.
    TopRank,
}

impl SelfExclusion {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::TopRank => "top_rank",
        }
    }
}

impl fmt::Display for SelfExclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelfExclusion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "identity" => Ok(Self::Identity),
            "top_rank" => Ok(Self::TopRank),
            _ => Err(format!(
                "unknown self exclusion {s:?}, expected identity or top_rank"
            )),
        }
    }
}

/// One ranked entry of a similarity row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedIndex {
    pub index: usize,
    pub score: f64,
}

/// Ranks `row` (the similarity of item `index` to every item) and returns
/// up to `k` entries, excluding the queried item according to `exclusion`.
///
/// Entries are ordered by descending score; equal scores keep ascending
/// index order. The caller guarantees `index < row.len()`.
#[must_use]
pub fn top_k(row: &[f64], index: usize, k: usize, exclusion: SelfExclusion) -> Vec<RankedIndex> {
    let mut ranked: Vec<RankedIndex> = row
        .iter()
        .enumerate()
        .map(|(other, &score)| RankedIndex {
            index: other,
            score,
        })
        .collect();

    // Stable: ties stay in ascending index order.
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    match exclusion {
        SelfExclusion::Identity => ranked
            .into_iter()
            .filter(|entry| entry.index != index)
            .take(k)
            .collect(),
        SelfExclusion::TopRank => ranked.into_iter().skip(1).take(k).collect(),
    }
}
