pub mod recommendation;

pub use recommendation::{Recommendation, ScoredItem, ScoredRecommendation};
