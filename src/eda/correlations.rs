use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

use super::stats::CorrelationMatrix;
use crate::data::model::Dataset;

pub const FILE_NAME: &str = "high_correlations.csv";

/// Pairs at or above this absolute correlation are reported.
pub const THRESHOLD: f64 = 0.7;

const HEADER: [&str; 3] = ["Feature 1", "Feature 2", "Correlation"];

/// One row of the high-correlation table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPair {
    #[serde(rename = "Feature 1")]
    pub feature_1: String,
    #[serde(rename = "Feature 2")]
    pub feature_2: String,
    #[serde(rename = "Correlation")]
    pub correlation: f64,
}

/// Unordered pairs with |r| ≥ [`THRESHOLD`], strongest first.
/// Undefined correlations never qualify.
pub fn high_correlation_pairs(matrix: &CorrelationMatrix) -> Vec<CorrelationPair> {
    let n = matrix.len();
    let mut pairs: Vec<CorrelationPair> = (0..n)
        .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
        .filter(|&(i, j)| matrix.get(i, j).abs() >= THRESHOLD)
        .map(|(i, j)| CorrelationPair {
            feature_1: matrix.columns[i].clone(),
            feature_2: matrix.columns[j].clone(),
            correlation: (matrix.get(i, j) * 10_000.0).round() / 10_000.0,
        })
        .collect();
    pairs.sort_by(|a, b| b.correlation.abs().total_cmp(&a.correlation.abs()));
    pairs
}

/// Write the high-correlation table for `columns` as CSV.
///
/// The header row is always present, even when no pair qualifies.
pub fn save_high_correlations(
    dataset: &Dataset,
    columns: &[&str],
    out_dir: &Path,
) -> Result<PathBuf> {
    let matrix = CorrelationMatrix::compute(dataset, columns)?;
    let pairs = high_correlation_pairs(&matrix);
    let path = out_dir.join(FILE_NAME);

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(HEADER)?;
    for pair in &pairs {
        writer.serialize(pair)?;
    }
    writer.flush()?;

    info!("wrote {} ({} pairs)", path.display(), pairs.len());
    Ok(path)
}
