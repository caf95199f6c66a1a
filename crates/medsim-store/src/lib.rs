//! # Medsim Store
//!
//! Loads the startup artifacts a recommender is built from: the medicine
//! catalog and the precomputed similarity matrix. Both are JSON, optionally
//! gzip-compressed. Loading happens once, before serving, and any failure
//! aborts startup.
//!
//! ## Converting pickled artifacts
//!
//! Pickled pandas/numpy artifacts are not read directly. Export them once
//! with Python:
//!
//! ```python
//! import gzip, json, pickle
//!
//! with open("medicine_dict.pkl", "rb") as f:
//!     medicines = pickle.load(f)
//! with open("medicine_dict.json", "w") as f:
//!     json.dump({"Drug_Name": medicines["Drug_Name"]}, f)
//!
//! with gzip.open("similarity_compressed.pkl.gz", "rb") as f:
//!     similarity = pickle.load(f)
//! with gzip.open("similarity.json.gz", "wt") as f:
//!     json.dump(similarity.tolist(), f)
//! ```
//!
//! `json.dump` turns the integer row labels of the `Drug_Name` column into
//! string keys, which [`load_catalog`] orders numerically. Only the name
//! column is exported since other columns may hold `NaN`, which is not JSON.

pub mod catalog;
pub mod error;
pub mod matrix;
pub mod reader;

use std::path::{Path, PathBuf};
use std::time::Instant;

use medsim_core::{Recommender, RecommenderConfig, SelfExclusion};
use tracing::{debug, info, warn};

pub use catalog::{DEFAULT_NAME_COLUMN, load_catalog};
pub use error::{ArtifactLoadError, Result};
pub use matrix::load_matrix;
pub use reader::{open_artifact, read_json};

/// Default catalog file name inside the artifact directory.
pub const CATALOG_FILE: &str = "medicine_dict.json";
/// Default matrix file name inside the artifact directory.
pub const MATRIX_FILE: &str = "similarity.json.gz";

/// Default artifact directory
pub fn default_artifact_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("medsim")
}

/// Where to find the startup artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub catalog: PathBuf,
    pub matrix: PathBuf,
    /// Column holding item names when the catalog is a table.
    pub name_column: String,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self::in_dir(default_artifact_dir())
    }
}

impl ArtifactPaths {
    pub fn new(catalog: impl Into<PathBuf>, matrix: impl Into<PathBuf>) -> Self {
        Self {
            catalog: catalog.into(),
            matrix: matrix.into(),
            name_column: DEFAULT_NAME_COLUMN.to_string(),
        }
    }

    /// Default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(CATALOG_FILE), dir.join(MATRIX_FILE))
    }

    pub fn with_name_column(mut self, column: impl Into<String>) -> Self {
        self.name_column = column.into();
        self
    }
}

/// Loads both artifacts and assembles a ready-to-serve recommender.
///
/// # Errors
///
/// Returns an `ArtifactLoadError` if either artifact is missing, unreadable,
/// malformed, or if the catalog size does not match the matrix dimension.
pub fn load_recommender(paths: &ArtifactPaths, config: RecommenderConfig) -> Result<Recommender> {
    let started = Instant::now();

    let catalog = load_catalog(&paths.catalog, &paths.name_column)?;
    info!(
        path = %paths.catalog.display(),
        items = catalog.len(),
        "loaded catalog"
    );

    let matrix = load_matrix(&paths.matrix)?;
    info!(
        path = %paths.matrix.display(),
        dim = matrix.dim(),
        "loaded similarity matrix"
    );

    if !matrix.is_symmetric(1e-9) {
        debug!("similarity matrix is not symmetric");
    }
    let weak_rows = matrix.rows_without_dominant_diagonal();
    if !weak_rows.is_empty() {
        match config.exclusion {
            SelfExclusion::TopRank => warn!(
                rows = weak_rows.len(),
                first = weak_rows[0],
                "self-similarity is not the row maximum; top-rank exclusion may recommend an item to itself"
            ),
            SelfExclusion::Identity => debug!(
                rows = weak_rows.len(),
                "self-similarity is not the row maximum"
            ),
        }
    }

    let recommender =
        Recommender::new(catalog, matrix, config).map_err(ArtifactLoadError::Inconsistent)?;

    info!(
        items = recommender.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "recommender ready"
    );
    Ok(recommender)
}
