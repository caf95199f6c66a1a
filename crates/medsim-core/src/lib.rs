//! # Medsim Core
//!
//! The recommendation engine behind medsim. Resolves free-text medicine names
//! to catalog entries with fuzzy string matching, then ranks the catalog by a
//! precomputed similarity matrix.
//!
//! ## Quick Start
//!
//! ```rust
//! use medsim_core::{Catalog, Recommender, RecommenderConfig, SimilarityMatrix};
//!
//! let catalog = Catalog::new(["Aspirin", "Asprin", "Parol"]).unwrap();
//! let matrix = SimilarityMatrix::from_rows(vec![
//!     vec![1.0, 0.9, 0.1],
//!     vec![0.9, 1.0, 0.2],
//!     vec![0.1, 0.2, 1.0],
//! ])
//! .unwrap();
//! let recommender = Recommender::new(catalog, matrix, RecommenderConfig::default()).unwrap();
//!
//! let result = recommender.handle("Aspirn").unwrap();
//! assert_eq!(result.resolved_name, "Aspirin");
//! assert_eq!(result.recommendations, vec!["Asprin", "Parol"]);
//! ```
pub mod catalog;
pub mod config;
pub mod error;
pub mod matcher;
pub mod matrix;
pub mod ranker;
pub mod recommender;
pub mod types;

// Re-export primary API
pub use catalog::{Catalog, CatalogEntry};
pub use config::RecommenderConfig;
pub use error::{MedsimError, Result};
pub use matcher::{
    DEFAULT_CUTOFF, FuzzyMatch, FuzzyMatcher, IndexedSequence, Metric, PreparedQuery,
    SequenceMatcher, closest_matches, find_closest,
};
pub use matrix::SimilarityMatrix;
pub use ranker::{DEFAULT_TOP_K, RankedIndex, SelfExclusion};
pub use recommender::Recommender;
pub use types::{Recommendation, ScoredItem, ScoredRecommendation};
