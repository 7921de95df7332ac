//! CSV reader for binary datasets with full input validation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::IoError;
use crate::domain::BinaryDataset;

/// Reads a binary classification dataset from a CSV file.
///
/// Expected CSV format:
/// - Header row required; one column is the label, every other column is a feature
/// - Every cell is `0`, `1`, `true` or `false` (case-insensitive, surrounding
///   whitespace ignored)
/// - All rows must have the same number of columns
///
/// The label column is named `label` unless set with
/// [`with_label_column`](Self::with_label_column).
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Malformed CSV record |
/// | [`IoError::DuplicateColumn`] | Two header columns share a name |
/// | [`IoError::MissingLabelColumn`] | No header column has the label name |
/// | [`IoError::NoFeatureColumns`] | The label is the only column |
/// | [`IoError::EmptyDataset`] | Zero data rows after header |
/// | [`IoError::InconsistentRowLength`] | Row has different column count than header |
/// | [`IoError::NonBinaryValue`] | Cell is not a recognised binary value |
pub struct BinaryCsvReader {
    path: PathBuf,
    label_column: String,
}

impl BinaryCsvReader {
    /// Create a new reader for the given CSV file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            label_column: "label".to_string(),
        }
    }

    /// Set the name of the label column.
    #[must_use]
    pub fn with_label_column(mut self, name: impl Into<String>) -> Self {
        self.label_column = name.into();
        self
    }

    /// Read and validate the CSV file, returning a [`BinaryDataset`].
    #[instrument(skip(self), fields(path = %self.path.display(), label = %self.label_column))]
    pub fn read(&self) -> Result<BinaryDataset, IoError> {
        let file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        // flexible(true) so a short or long row surfaces as InconsistentRowLength.
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let header = rdr.headers().map_err(|e| self.csv_error(e))?.clone();
        let expected_cols = header.len();
        debug!(expected_cols, "read CSV header");

        let mut seen: HashMap<&str, usize> = HashMap::new();
        for (col, name) in header.iter().enumerate() {
            if let Some(&first_col) = seen.get(name.trim()) {
                return Err(IoError::DuplicateColumn {
                    path: self.path.clone(),
                    column: name.trim().to_string(),
                    first_col,
                    second_col: col,
                });
            }
            seen.insert(name.trim(), col);
        }

        let label_index = header
            .iter()
            .position(|name| name.trim() == self.label_column)
            .ok_or_else(|| IoError::MissingLabelColumn {
                path: self.path.clone(),
                label: self.label_column.clone(),
            })?;

        if expected_cols < 2 {
            return Err(IoError::NoFeatureColumns {
                path: self.path.clone(),
            });
        }

        let feature_names: Vec<String> = header
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != label_index)
            .map(|(_, name)| name.trim().to_string())
            .collect();

        let mut features = Vec::new();
        let mut labels = Vec::new();

        for (row_index, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| self.csv_error(e))?;

            if record.len() != expected_cols {
                return Err(IoError::InconsistentRowLength {
                    path: self.path.clone(),
                    row_index,
                    expected: expected_cols,
                    got: record.len(),
                });
            }

            let mut row = Vec::with_capacity(feature_names.len());
            let mut label = 0;
            for (col_index, raw) in record.iter().enumerate() {
                let value = parse_binary(raw).ok_or_else(|| IoError::NonBinaryValue {
                    path: self.path.clone(),
                    row_index,
                    column: header.get(col_index).unwrap_or_default().to_string(),
                    raw: raw.to_string(),
                })?;
                if col_index == label_index {
                    label = value;
                } else {
                    row.push(value);
                }
            }

            features.push(row);
            labels.push(label);
        }

        if labels.is_empty() {
            return Err(IoError::EmptyDataset {
                path: self.path.clone(),
            });
        }

        info!(
            n_samples = labels.len(),
            n_features = feature_names.len(),
            "binary dataset loaded"
        );

        Ok(BinaryDataset::new(
            self.label_column.clone(),
            feature_names,
            features,
            labels,
        ))
    }

    fn csv_error(&self, e: csv::Error) -> IoError {
        IoError::CsvParse {
            path: self.path.clone(),
            offset: e.position().map_or(0, |p| p.byte()),
            source: e,
        }
    }
}

/// Parse one cell as 0 or 1.
fn parse_binary(raw: &str) -> Option<u8> {
    let cell = raw.trim();
    if cell == "0" || cell.eq_ignore_ascii_case("false") {
        Some(0)
    } else if cell == "1" || cell.eq_ignore_ascii_case("true") {
        Some(1)
    } else {
        None
    }
}
