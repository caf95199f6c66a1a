use std::path::PathBuf;

use medsim_core::MedsimError;
use thiserror::Error;

/// Errors raised while loading startup artifacts. All of them are fatal:
/// a recommender cannot be served without both artifacts.
#[derive(Debug, Error)]
pub enum ArtifactLoadError {
    /// The artifact file does not exist.
    #[error("artifact not found: {}", path.display())]
    Missing { path: PathBuf },

    /// The artifact exists but could not be read or decompressed.
    #[error("failed to read artifact {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The artifact bytes are not the expected JSON shape.
    #[error("failed to parse artifact {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The catalog table has no column with the configured name.
    #[error("catalog {} has no column {column:?}", path.display())]
    MissingColumn { path: PathBuf, column: String },

    /// Row labels of a labeled catalog column skip a position.
    #[error("catalog {} row labels are not dense: expected {expected}, found {found}", path.display())]
    SparseRowLabels {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    /// The catalog parsed but its contents are unusable.
    #[error("malformed catalog {}: {reason}", path.display())]
    MalformedCatalog { path: PathBuf, reason: String },

    /// The artifact parsed but violates a core invariant.
    #[error("invalid artifact {}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: MedsimError,
    },

    /// Catalog and matrix are individually valid but do not fit together.
    #[error("catalog and similarity matrix do not match: {0}")]
    Inconsistent(#[source] MedsimError),
}

impl ArtifactLoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::Missing { path }
        } else {
            Self::Io { path, source }
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        let path = path.into();
        // Decompression failures surface through serde_json as I/O errors.
        if source.is_io() {
            let io = std::io::Error::other(source.to_string());
            return Self::Io { path, source: io };
        }
        Self::Parse { path, source }
    }
}

/// Result type alias for artifact loading.
pub type Result<T> = std::result::Result<T, ArtifactLoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_missing() {
        let err = ArtifactLoadError::io(
            "/nowhere/catalog.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, ArtifactLoadError::Missing { .. }));
        assert_eq!(err.to_string(), "artifact not found: /nowhere/catalog.json");
    }

    #[test]
    fn other_io_errors_kept() {
        let err = ArtifactLoadError::io(
            "matrix.json.gz",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, ArtifactLoadError::Io { .. }));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ArtifactLoadError>();
    }
}
