use thiserror::Error;

/// Errors that can occur while building or querying a recommender.
#[derive(Debug, Error)]
pub enum MedsimError {
    /// The name is not an exact member of the catalog.
    #[error("name not found in catalog: {name:?}")]
    NameNotFound {
        /// The name that was looked up.
        name: String,
    },

    /// The same name appears twice while building a catalog.
    #[error("duplicate catalog name {name:?} at indices {first} and {second}")]
    DuplicateName {
        /// The repeated name.
        name: String,
        /// Index of the first occurrence.
        first: usize,
        /// Index of the repeated occurrence.
        second: usize,
    },

    /// No catalog name scored at or above the fuzzy-match cutoff.
    #[error("no similar item found for query {query:?}")]
    NoSimilarItem {
        /// The query that could not be resolved.
        query: String,
    },

    /// A resolved index falls outside the similarity matrix.
    #[error("index {index} out of range for {len} items")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of items in the matrix.
        len: usize,
    },

    /// Catalog size and matrix dimension disagree.
    #[error("catalog has {catalog} items but similarity matrix is {matrix}x{matrix}")]
    DimensionMismatch {
        /// Number of catalog entries.
        catalog: usize,
        /// Matrix dimension.
        matrix: usize,
    },

    /// A matrix row does not have one score per item.
    #[error("similarity matrix row {row} has {found} columns, expected {expected}")]
    NonSquareMatrix {
        /// The ragged row.
        row: usize,
        /// Required number of columns.
        expected: usize,
        /// Actual number of columns.
        found: usize,
    },

    /// A score is NaN or infinite.
    #[error("similarity matrix entry ({row}, {col}) is not a finite number")]
    NonFiniteScore {
        /// Row of the bad score.
        row: usize,
        /// Column of the bad score.
        col: usize,
    },
}

impl MedsimError {
    /// Returns `true` for the expected "nothing matched" outcome of a query.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NoSimilarItem { .. })
    }

    /// Returns `true` for errors that indicate catalog/matrix inconsistency
    /// rather than a bad query.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        !self.is_not_found()
    }
}

/// Result type alias for medsim operations.
pub type Result<T> = std::result::Result<T, MedsimError>;
