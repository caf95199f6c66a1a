//! Catalog artifact decoding.
//!
//! Accepted shapes:
//!
//! - a column table keyed by row label: `{"Drug_Name": {"0": "A", "1": "B"}}`
//! - a column table of lists: `{"Drug_Name": ["A", "B"]}`
//! - a bare list of names: `["A", "B"]`
//!
//! Other columns in a table are ignored.

use std::collections::BTreeMap;
use std::path::Path;

use medsim_core::Catalog;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ArtifactLoadError, Result};
use crate::reader::read_json;

/// Column holding item names in catalog tables.
pub const DEFAULT_NAME_COLUMN: &str = "Drug_Name";

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogRepr {
    Names(Vec<Value>),
    Table(BTreeMap<String, ColumnRepr>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColumnRepr {
    List(Vec<Value>),
    Labeled(BTreeMap<String, Value>),
}

/// Loads a catalog artifact, taking names from `column` when the artifact
/// is a table.
pub fn load_catalog(path: &Path, column: &str) -> Result<Catalog> {
    let repr: CatalogRepr = read_json(path)?;
    let names = decode_names(path, repr, column)?;
    Catalog::new(names).map_err(|source| ArtifactLoadError::Invalid {
        path: path.to_path_buf(),
        source,
    })
}

fn decode_names(path: &Path, repr: CatalogRepr, column: &str) -> Result<Vec<String>> {
    let values = match repr {
        CatalogRepr::Names(values) => values,
        CatalogRepr::Table(mut table) => {
            let Some(col) = table.remove(column) else {
                return Err(ArtifactLoadError::MissingColumn {
                    path: path.to_path_buf(),
                    column: column.to_string(),
                });
            };
            match col {
                ColumnRepr::List(values) => values,
                ColumnRepr::Labeled(cells) => order_by_label(path, cells)?,
            }
        }
    };

    values
        .into_iter()
        .enumerate()
        .map(|(row, value)| match value {
            Value::String(name) => Ok(name),
            other => Err(malformed(
                path,
                format!("row {row} name is not a string: {other}"),
            )),
        })
        .collect()
}

/// Orders row-labeled cells numerically; labels must be exactly `0..N`.
fn order_by_label(path: &Path, cells: BTreeMap<String, Value>) -> Result<Vec<Value>> {
    let mut rows = Vec::with_capacity(cells.len());
    for (label, value) in cells {
        let row: usize = label
            .parse()
            .map_err(|_| malformed(path, format!("row label {label:?} is not an integer")))?;
        rows.push((row, value));
    }
    rows.sort_by_key(|(row, _)| *row);

    for (expected, (row, _)) in rows.iter().enumerate() {
        if *row != expected {
            return Err(ArtifactLoadError::SparseRowLabels {
                path: path.to_path_buf(),
                expected,
                found: *row,
            });
        }
    }

    Ok(rows.into_iter().map(|(_, value)| value).collect())
}

fn malformed(path: &Path, reason: String) -> ArtifactLoadError {
    ArtifactLoadError::MalformedCatalog {
        path: path.to_path_buf(),
        reason,
    }
}
