//! Opening artifacts, with transparent gzip decompression.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use serde::de::DeserializeOwned;

use crate::error::{ArtifactLoadError, Result};

/// Leading bytes of every gzip member.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Opens `path` for reading, decompressing on the fly when the file starts
/// with the gzip magic bytes. Concatenated gzip members are read as one
/// stream. The extension is not consulted.
pub fn open_artifact(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| ArtifactLoadError::io(path, e))?;
    let mut reader = BufReader::new(file);

    let head = reader.fill_buf().map_err(|e| ArtifactLoadError::io(path, e))?;
    if head.starts_with(&GZIP_MAGIC) {
        tracing::debug!(path = %path.display(), "reading gzip artifact");
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(reader))))
    } else {
        Ok(Box::new(reader))
    }
}

/// Deserializes a JSON artifact, plain or gzip.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let reader = open_artifact(path)?;
    serde_json::from_reader(reader).map_err(|e| ArtifactLoadError::parse(path, e))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::Compression;
    use flate2::write::GzEncoder;

    use super::*;

    #[test]
    fn plain_and_gzip_read_the_same() {
        let dir = tempfile::tempdir().unwrap();
        let body = br#"{"value": [1, 2, 3]}"#;

        let plain = dir.path().join("plain.json");
        std::fs::write(&plain, body).unwrap();

        // Misleading extension on purpose: detection is by content.
        let gz = dir.path().join("packed.json");
        let mut encoder = GzEncoder::new(File::create(&gz).unwrap(), Compression::default());
        encoder.write_all(body).unwrap();
        encoder.finish().unwrap();

        let a: serde_json::Value = read_json(&plain).unwrap();
        let b: serde_json::Value = read_json(&gz).unwrap();
        assert_eq!(a, b);
        assert_eq!(a["value"][2], 3);
    }

    #[test]
    fn concatenated_gzip_members_read_as_one_stream() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("similarity.json.gz");

        let mut bytes = Vec::new();
        for part in [&b"[[1.0, 0.5], "[..], &b"[0.5, 1.0]]"[..]] {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(part).unwrap();
            bytes.extend(encoder.finish().unwrap());
        }
        std::fs::write(&path, bytes).unwrap();

        let rows: Vec<Vec<f64>> = read_json(&path).unwrap();
        assert_eq!(rows, vec![vec![1.0, 0.5], vec![0.5, 1.0]]);
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_json::<serde_json::Value>(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ArtifactLoadError::Missing { .. }));
    }

    #[test]
    fn truncated_gzip_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json.gz");

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(br#"[[1.0, 0.5], [0.5, 1.0]]"#).unwrap();
        let bytes = encoder.finish().unwrap();
        std::fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

        let err = read_json::<Vec<Vec<f64>>>(&path).unwrap_err();
        // Depending on where the stream is cut, the decoder either errors or
        // ends early and leaves the JSON incomplete.
        assert!(
            matches!(
                err,
                ArtifactLoadError::Io { .. } | ArtifactLoadError::Parse { .. }
            ),
            "{err:?}"
        );
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "[[1.0, 0.5],").unwrap();

        let err = read_json::<Vec<Vec<f64>>>(&path).unwrap_err();
        assert!(matches!(err, ArtifactLoadError::Parse { .. }), "{err:?}");
    }
}
