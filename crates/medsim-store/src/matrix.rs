use std::path::Path;

use medsim_core::SimilarityMatrix;

use crate::error::{ArtifactLoadError, Result};
use crate::reader::read_json;

/// Loads a similarity matrix stored as a JSON array of rows, plain or gzip.
pub fn load_matrix(path: &Path) -> Result<SimilarityMatrix> {
    let rows: Vec<Vec<f64>> = read_json(path)?;
    SimilarityMatrix::from_rows(rows).map_err(|source| ArtifactLoadError::Invalid {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::Compression;
    use flate2::write::GzEncoder;
    use medsim_core::MedsimError;

    use super::*;

    #[test]
    fn loads_gzip_matrix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("similarity.json.gz");
        let mut encoder =
            GzEncoder::new(std::fs::File::create(&path).unwrap(), Compression::best());
        encoder
            .write_all(b"[[1.0, 0.9, 0.1], [0.9, 1.0, 0.2], [0.1, 0.2, 1.0]]")
            .unwrap();
        encoder.finish().unwrap();

        let matrix = load_matrix(&path).unwrap();
        assert_eq!(matrix.dim(), 3);
        assert_eq!(matrix.get(0, 1), Some(0.9));
    }

    #[test]
    fn integer_scores_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("similarity.json");
        std::fs::write(&path, "[[1, 0], [0, 1]]").unwrap();
        assert_eq!(load_matrix(&path).unwrap().get(1, 1), Some(1.0));
    }

    #[test]
    fn ragged_matrix_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("similarity.json");
        std::fs::write(&path, "[[1.0, 0.5], [0.5]]").unwrap();

        let err = load_matrix(&path).unwrap_err();
        assert!(matches!(
            err,
            ArtifactLoadError::Invalid {
                source: MedsimError::NonSquareMatrix { row: 1, .. },
                ..
            }
        ));
    }

    #[test]
    fn non_numeric_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("similarity.json");
        std::fs::write(&path, r#"[[1.0, "x"], [0.5, 1.0]]"#).unwrap();
        assert!(matches!(
            load_matrix(&path).unwrap_err(),
            ArtifactLoadError::Parse { .. }
        ));
    }
}
