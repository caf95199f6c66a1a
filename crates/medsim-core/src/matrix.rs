//! # Similarity Matrix
//!
//! Dense, row-major N×N table of precomputed pairwise similarity scores.
//! `get(i, j)` is the similarity of item `i` to item `j`; symmetry is not
//! assumed.

use crate::error::{MedsimError, Result};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityMatrix {
    dim: usize,
    scores: Vec<f64>,
}

impl SimilarityMatrix {
    /// Builds a matrix from nested rows.
    ///
    /// # Errors
    ///
    /// Returns `MedsimError::NonSquareMatrix` if any row length differs from
    /// the number of rows, or `MedsimError::NonFiniteScore` if a score is NaN
    /// or infinite.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let dim = rows.len();
        if let Some((row, values)) = rows.iter().enumerate().find(|(_, v)| v.len() != dim) {
            return Err(MedsimError::NonSquareMatrix {
                row,
                expected: dim,
                found: values.len(),
            });
        }

        // Row lengths are checked, so the flattened buffer is exactly dim * dim.
        let scores: Vec<f64> = rows.into_iter().flatten().collect();
        Self::from_flat(dim, scores)
    }

    /// Builds a matrix from `dim * dim` scores in row-major order.
    ///
    /// # Errors
    ///
    /// Same as [`SimilarityMatrix::from_rows`].
    pub fn from_flat(dim: usize, scores: Vec<f64>) -> Result<Self> {
        if dim.checked_mul(dim) != Some(scores.len()) {
            let complete_rows = if dim == 0 { 0 } else { scores.len() / dim };
            return Err(MedsimError::NonSquareMatrix {
                row: complete_rows,
                expected: dim,
                found: scores.len() - complete_rows * dim,
            });
        }

        if let Some(pos) = scores.iter().position(|s| !s.is_finite()) {
            return Err(MedsimError::NonFiniteScore {
                row: pos / dim,
                col: pos % dim,
            });
        }

        Ok(Self { dim, scores })
    }

    /// Number of items (rows and columns).
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dim == 0
    }

    /// Scores of item `index` against every item, itself included.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        if index >= self.dim {
            return None;
        }
        let start = index * self.dim;
        Some(&self.scores[start..start + self.dim])
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if col >= self.dim {
            return None;
        }
        self.row(row).map(|r| r[col])
    }

    /// Whether `get(i, j)` and `get(j, i)` agree within `tolerance` everywhere.
    #[must_use]
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        (0..self.dim).all(|i| {
            ((i + 1)..self.dim).all(|j| {
                let a = self.scores[i * self.dim + j];
                let b = self.scores[j * self.dim + i];
                (a - b).abs() <= tolerance
            })
        })
    }

    /// Rows whose diagonal entry is strictly beaten by another entry.
    ///
    /// For these items, dropping the top-ranked entry would not drop the
    /// item itself.
    #[must_use]
    pub fn rows_without_dominant_diagonal(&self) -> Vec<usize> {
        (0..self.dim)
            .filter(|&i| {
                let row = &self.scores[i * self.dim..(i + 1) * self.dim];
                let own = row[i];
                row.iter().any(|&s| s > own)
            })
            .collect()
    }
}
