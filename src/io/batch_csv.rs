//! Delimited-file reader for example batches.
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use csv::StringRecord;
use ndarray::Array2;

/// An example batch loaded from disk, ready to bind to a model.
#[derive(Debug)]
pub struct BatchData {
    pub x: Array2<f64>,
    pub column_names: Vec<String>,
}

/// Configuration for reading delimited example-batch files.
#[derive(Debug, Clone)]
pub struct BatchReaderConfig {
    /// Field delimiter.
    pub delimiter: u8,
    /// Whether the first row is a header.
    pub has_headers: bool,
    /// Optional list of columns to load (in order).
    /// When `None`, all non-ignored columns are loaded.
    pub feature_columns: Option<Vec<String>>,
    /// Columns to skip when auto-selecting features.
    pub ignore_columns: Vec<String>,
}

impl Default for BatchReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
            feature_columns: None,
            ignore_columns: Vec::new(),
        }
    }
}

/// Read a delimited file into an example batch using default settings.
pub fn read_batch_csv<P: AsRef<Path>>(path: P) -> Result<BatchData> {
    read_batch_csv_with_config(path, &BatchReaderConfig::default())
}

/// Read a delimited file into an example batch using a custom configuration.
pub fn read_batch_csv_with_config<P: AsRef<Path>>(
    path: P,
    config: &BatchReaderConfig,
) -> Result<BatchData> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(config.has_headers)
        .from_path(&path)
        .with_context(|| format!("Failed to open batch file: {}", path.as_ref().display()))?;

    let headers = if config.has_headers {
        reader
            .headers()
            .context("Failed to read batch header row")?
            .clone()
    } else {
        StringRecord::new()
    };

    let mut feature_indices: Option<Vec<usize>> = if config.has_headers {
        Some(resolve_feature_indices(&headers, config)?)
    } else {
        // headerless files resolve their width from the first record
        None
    };

    let mut values = Vec::new();
    let mut n_rows = 0usize;

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;

        let indices = feature_indices.get_or_insert_with(|| (0..record.len()).collect());

        for &idx in indices.iter() {
            let value = record
                .get(idx)
                .ok_or_else(|| anyhow!("Missing value at row {}", row_idx + 1))?;
            let parsed = value.trim().parse::<f64>().with_context(|| {
                let column = headers
                    .get(idx)
                    .map(|name| name.to_string())
                    .unwrap_or_else(|| idx.to_string());
                format!(
                    "Invalid value '{}' in column {} at row {}",
                    value,
                    column,
                    row_idx + 1
                )
            })?;
            values.push(parsed);
        }
        n_rows += 1;
    }

    let indices = feature_indices.unwrap_or_default();
    if indices.is_empty() {
        return Err(anyhow!("No feature columns detected in batch file"));
    }

    let x = Array2::from_shape_vec((n_rows, indices.len()), values)
        .context("Failed to build example matrix")?;

    let column_names = indices
        .iter()
        .map(|&idx| match headers.get(idx) {
            Some(name) => name.to_string(),
            None => format!("column_{}", idx),
        })
        .collect();

    Ok(BatchData { x, column_names })
}

fn resolve_feature_indices(
    headers: &StringRecord,
    config: &BatchReaderConfig,
) -> Result<Vec<usize>> {
    if let Some(names) = &config.feature_columns {
        let mut indices = Vec::with_capacity(names.len());
        for name in names {
            let idx = find_column(headers, name)
                .ok_or_else(|| anyhow!("Missing feature column '{}'", name))?;
            indices.push(idx);
        }
        return Ok(indices);
    }

    Ok(headers
        .iter()
        .enumerate()
        .filter(|(_, header)| {
            !config
                .ignore_columns
                .iter()
                .any(|ignored| header.eq_ignore_ascii_case(ignored))
        })
        .map(|(idx, _)| idx)
        .collect())
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(name))
}
