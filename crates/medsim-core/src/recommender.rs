//! # Recommender
//!
//! Composes the catalog, similarity matrix, fuzzy matcher and ranker into
//! the query → resolved name → top-K pipeline. A `Recommender` is immutable
//! once built and safe to share across threads.

use tracing::{debug, error};

use crate::catalog::Catalog;
use crate::config::RecommenderConfig;
use crate::error::{MedsimError, Result};
use crate::matrix::SimilarityMatrix;
use crate::ranker;
use crate::types::{Recommendation, ScoredItem, ScoredRecommendation};

#[derive(Debug, Clone)]
pub struct Recommender {
    catalog: Catalog,
    matrix: SimilarityMatrix,
    config: RecommenderConfig,
}

impl Recommender {
    /// Assembles a recommender from a catalog and its similarity matrix.
    ///
    /// # Errors
    ///
    /// Returns `MedsimError::DimensionMismatch` if the catalog size is not
    /// the matrix dimension.
    pub fn new(
        catalog: Catalog,
        matrix: SimilarityMatrix,
        config: RecommenderConfig,
    ) -> Result<Self> {
        if catalog.len() != matrix.dim() {
            return Err(MedsimError::DimensionMismatch {
                catalog: catalog.len(),
                matrix: matrix.dim(),
            });
        }

        Ok(Self {
            catalog,
            matrix,
            config,
        })
    }

    /// Closest catalog name to `query` under the configured matcher.
    pub fn find_closest(&self, query: &str) -> Option<&str> {
        self.config
            .matcher()
            .find_closest(query, self.catalog.all_names())
            .map(|(_, name, _)| name)
    }

    /// Names of the `k` items most similar to item `index`, excluding itself.
    ///
    /// # Errors
    ///
    /// Returns `MedsimError::IndexOutOfRange` if `index` is not a matrix row.
    pub fn recommend(&self, index: usize, k: usize) -> Result<Vec<String>> {
        Ok(self
            .recommend_scored(index, k)?
            .into_iter()
            .map(|item| item.name)
            .collect())
    }

    /// Like [`Recommender::recommend`], with similarity scores.
    ///
    /// # Errors
    ///
    /// Returns `MedsimError::IndexOutOfRange` if `index` is not a matrix row.
    pub fn recommend_scored(&self, index: usize, k: usize) -> Result<Vec<ScoredItem>> {
        let Some(row) = self.matrix.row(index) else {
            error!(
                index,
                len = self.matrix.dim(),
                "resolved index outside similarity matrix"
            );
            return Err(MedsimError::IndexOutOfRange {
                index,
                len: self.matrix.dim(),
            });
        };

        ranker::top_k(row, index, k, self.config.exclusion)
            .into_iter()
            .map(|ranked| {
                let name = self.catalog.name(ranked.index).ok_or_else(|| {
                    error!(index = ranked.index, "ranked index outside catalog");
                    MedsimError::IndexOutOfRange {
                        index: ranked.index,
                        len: self.catalog.len(),
                    }
                })?;
                Ok(ScoredItem {
                    index: ranked.index,
                    name: name.to_string(),
                    score: ranked.score,
                })
            })
            .collect()
    }

    /// Resolves `query` to a catalog name and recommends its neighbours.
    ///
    /// # Errors
    ///
    /// Returns `MedsimError::NoSimilarItem` when no name scores at least the
    /// cutoff, or an internal error if catalog and matrix disagree.
    pub fn handle(&self, query: &str) -> Result<Recommendation> {
        self.handle_scored(query).map(Recommendation::from)
    }

    /// Like [`Recommender::handle`], with match and similarity scores.
    ///
    /// # Errors
    ///
    /// Same as [`Recommender::handle`].
    pub fn handle_scored(&self, query: &str) -> Result<ScoredRecommendation> {
        let matcher = self.config.matcher();
        let Some((_, name, match_score)) = matcher.find_closest(query, self.catalog.all_names())
        else {
            debug!(query, cutoff = matcher.cutoff(), "no catalog name above cutoff");
            return Err(MedsimError::NoSimilarItem {
                query: query.to_string(),
            });
        };

        let index = self.catalog.index_of(name).inspect_err(|err| {
            error!(%err, "matched name missing from catalog index");
        })?;
        let recommendations = self.recommend_scored(index, self.config.top_k)?;

        debug!(
            query,
            resolved = name,
            match_score,
            count = recommendations.len(),
            "resolved query"
        );

        Ok(ScoredRecommendation {
            resolved_name: name.to_string(),
            resolved_index: index,
            match_score,
            recommendations,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Number of catalog items.
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranker::SelfExclusion;

    fn sample(config: RecommenderConfig) -> Recommender {
        let catalog = Catalog::new(["Aspirin", "Asprin", "Parol"]).unwrap();
        let matrix = SimilarityMatrix::from_rows(vec![
            vec![1.0, 0.9, 0.1],
            vec![0.9, 1.0, 0.2],
            vec![0.1, 0.2, 1.0],
        ])
        .unwrap();
        Recommender::new(catalog, matrix, config).unwrap()
    }

    fn larger() -> Recommender {
        let names: Vec<String> = (0..8).map(|i| format!("Medicine {i}")).collect();
        let rows = (0..8)
            .map(|i| {
                (0..8)
                    .map(|j| if i == j { 1.0 } else { ((i * 7 + j * 3) % 10) as f64 / 10.0 })
                    .collect()
            })
            .collect();
        Recommender::new(
            Catalog::new(names).unwrap(),
            SimilarityMatrix::from_rows(rows).unwrap(),
            RecommenderConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn typo_query_resolves_and_ranks() {
        let recommender = sample(RecommenderConfig::new().with_top_k(2));
        let result = recommender.handle("Aspirn").unwrap();
        assert_eq!(result.resolved_name, "Aspirin");
        assert_eq!(result.recommendations, vec!["Asprin", "Parol"]);
    }

    #[test]
    fn exact_query_resolves_to_itself() {
        let recommender = sample(RecommenderConfig::new().with_top_k(2));
        let result = recommender.handle("Parol").unwrap();
        assert_eq!(result.resolved_name, "Parol");
        assert_eq!(result.recommendations, vec!["Asprin", "Aspirin"]);
    }

    #[test]
    fn unrelated_query_is_not_found() {
        let recommender = sample(RecommenderConfig::default());
        let err = recommender.handle("Zzzzz").unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(err, MedsimError::NoSimilarItem { ref query } if query == "Zzzzz"));
    }

    #[test]
    fn empty_catalog_never_matches() {
        let recommender = Recommender::new(
            Catalog::default(),
            SimilarityMatrix::default(),
            RecommenderConfig::default(),
        )
        .unwrap();
        assert!(recommender.is_empty());
        assert!(recommender.handle("").unwrap_err().is_not_found());
    }

    #[test]
    fn small_catalog_returns_what_it_has() {
        let recommender = sample(RecommenderConfig::default());
        let result = recommender.handle("Asprin").unwrap();
        assert_eq!(result.recommendations, vec!["Aspirin", "Parol"]);
    }

    #[test]
    fn out_of_range_index_is_internal_error() {
        let recommender = sample(RecommenderConfig::default());
        let err = recommender.recommend(3, 2).unwrap_err();
        assert!(matches!(err, MedsimError::IndexOutOfRange { index: 3, len: 3 }));
        assert!(err.is_internal());
    }

    #[test]
    fn size_mismatch_rejected() {
        let catalog = Catalog::new(["A", "B"]).unwrap();
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0]]).unwrap();
        let err = Recommender::new(catalog, matrix, RecommenderConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            MedsimError::DimensionMismatch {
                catalog: 2,
                matrix: 1
            }
        ));
    }

    #[test]
    fn recommend_never_includes_self() {
        let recommender = larger();
        for i in 0..recommender.len() {
            let name = recommender.catalog().name(i).unwrap().to_string();
            let result = recommender.recommend(i, 10).unwrap();
            assert!(!result.contains(&name), "row {i} recommended itself");
        }
    }

    #[test]
    fn recommend_is_sorted_by_score() {
        let recommender = larger();
        for i in 0..recommender.len() {
            let scored = recommender.recommend_scored(i, 10).unwrap();
            assert!(
                scored.windows(2).all(|w| w[0].score >= w[1].score),
                "row {i} not sorted: {scored:?}"
            );
        }
    }

    #[test]
    fn recommend_returns_min_k_n_minus_one() {
        let recommender = larger();
        let n = recommender.len();
        for k in [0, 1, 5, n - 1, n, n + 3] {
            assert_eq!(recommender.recommend(0, k).unwrap().len(), k.min(n - 1));
        }
    }

    #[test]
    fn handle_is_idempotent() {
        let recommender = larger();
        let first = recommender.handle("Medicine 3").unwrap();
        let second = recommender.handle("Medicine 3").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.resolved_name, "Medicine 3");
        assert_eq!(first.recommendations.len(), 5);
    }

    #[test]
    fn scored_handle_reports_match_score() {
        let recommender = sample(RecommenderConfig::new().with_top_k(2));
        let scored = recommender.handle_scored("Aspirn").unwrap();
        assert_eq!(scored.resolved_index, 0);
        assert!((scored.match_score - 12.0 / 13.0).abs() < 1e-12);
        assert_eq!(scored.recommendations[0].score, 0.9);
        assert_eq!(scored.recommendations[1].index, 2);
    }

    #[test]
    fn top_rank_exclusion_follows_rank_position() {
        let catalog = Catalog::new(["Alpha", "Beta", "Gamma"]).unwrap();
        // Alpha is more similar to Beta than to itself.
        let matrix = SimilarityMatrix::from_rows(vec![
            vec![0.5, 0.9, 0.1],
            vec![0.9, 1.0, 0.2],
            vec![0.1, 0.2, 1.0],
        ])
        .unwrap();

        let identity = Recommender::new(
            catalog.clone(),
            matrix.clone(),
            RecommenderConfig::new().with_top_k(2),
        )
        .unwrap();
        assert_eq!(identity.recommend(0, 2).unwrap(), vec!["Beta", "Gamma"]);

        let top_rank = Recommender::new(
            catalog,
            matrix,
            RecommenderConfig::new()
                .with_top_k(2)
                .with_exclusion(SelfExclusion::TopRank),
        )
        .unwrap();
        assert_eq!(top_rank.recommend(0, 2).unwrap(), vec!["Alpha", "Gamma"]);
    }

    #[test]
    fn find_closest_uses_catalog() {
        let recommender = sample(RecommenderConfig::default());
        assert_eq!(recommender.find_closest("Asprn"), Some("Asprin"));
        assert_eq!(recommender.find_closest("Zzzzz"), None);
    }

    #[test]
    fn recommender_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Recommender>();
    }
}
