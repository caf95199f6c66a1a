//! # Medsim
//!
//! Typo-tolerant medicine recommendations. Re-exports the recommendation
//! engine ([`medsim_core`]) and the startup artifact loader
//! ([`medsim_store`]).
//!
//! ```no_run
//! use medsim::{ArtifactPaths, RecommenderConfig, load_recommender};
//!
//! let recommender = load_recommender(&ArtifactPaths::default(), RecommenderConfig::default())?;
//! let result = recommender.handle("Paracetmol")?;
//! println!("{result}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use medsim_core::*;
pub use medsim_store::{
    ArtifactLoadError, ArtifactPaths, CATALOG_FILE, DEFAULT_NAME_COLUMN, MATRIX_FILE,
    default_artifact_dir, load_catalog, load_matrix, load_recommender,
};

pub use medsim_store as store;
