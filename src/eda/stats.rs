//! Descriptive statistics shared by the plots and tables.

use std::ops::Range;

use crate::data::model::Dataset;
use crate::error::EdaError;

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Equal-width bins over the observed range.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub bins: Vec<Range<f64>>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` into `n_bins` buckets spanning `[min, max]`.
    ///
    /// The maximum lands in the last bucket. A constant sample gets one bin
    /// of width 1 centred on the value; an empty sample yields no bins.
    pub fn new(values: &[f64], n_bins: usize) -> Self {
        let (min, max) = match min_max(values) {
            Some(bounds) => bounds,
            None => {
                return Histogram {
                    bins: Vec::new(),
                    counts: Vec::new(),
                }
            }
        };

        if max == min || n_bins == 0 {
            return Histogram {
                bins: vec![(min - 0.5)..(min + 0.5)],
                counts: vec![values.len()],
            };
        }

        let width = (max - min) / n_bins as f64;
        let bins = (0..n_bins)
            .map(|i| (min + i as f64 * width)..(min + (i + 1) as f64 * width))
            .collect();
        let mut counts = vec![0; n_bins];
        for &v in values {
            let idx = (((v - min) / width) as usize).min(n_bins - 1);
            counts[idx] += 1;
        }
        Histogram { bins, counts }
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Outer edges of the first and last bins.
    pub fn span(&self) -> Option<Range<f64>> {
        Some(self.bins.first()?.start..self.bins.last()?.end)
    }
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

// ---------------------------------------------------------------------------
// Pearson correlation
// ---------------------------------------------------------------------------

/// Pearson's r over the positions where both samples are present.
///
/// NaN when fewer than two complete pairs exist or either side has zero
/// variance.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    (cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0)
}

/// Symmetric matrix of pairwise correlations.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// Row-major, `columns.len()` squared entries.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn compute(dataset: &Dataset, columns: &[&str]) -> Result<Self, EdaError> {
        let series = columns
            .iter()
            .map(|col| dataset.numeric_column(col))
            .collect::<Result<Vec<_>, _>>()?;

        let n = series.len();
        let mut values = vec![vec![f64::NAN; n]; n];
        for i in 0..n {
            for j in i..n {
                let r = pearson(&series[i], &series[j]);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Ok(CorrelationMatrix {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            values,
        })
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn histogram_puts_max_in_last_bin() {
        let h = Histogram::new(&[0.0, 1.0, 2.0, 3.0, 4.0], 4);
        assert_eq!(h.counts, vec![1, 1, 1, 2]);
        assert_eq!(h.span(), Some(0.0..4.0));
        assert_eq!(h.max_count(), 2);
    }

    #[test]
    fn histogram_of_constant_sample_is_one_bin() {
        let h = Histogram::new(&[3.0, 3.0, 3.0], 20);
        assert_eq!(h.bins, vec![2.5..3.5]);
        assert_eq!(h.counts, vec![3]);
    }

    #[test]
    fn histogram_of_empty_sample_has_no_bins() {
        let h = Histogram::new(&[], 20);
        assert!(h.bins.is_empty());
        assert_eq!(h.span(), None);
    }

    #[test]
    fn pearson_detects_perfect_relationships() {
        let x = some(&[1.0, 2.0, 3.0, 4.0]);
        let up = some(&[2.0, 4.0, 6.0, 8.0]);
        let down = some(&[8.0, 6.0, 4.0, 2.0]);
        assert!((pearson(&x, &up) - 1.0).abs() < 1e-12);
        assert!((pearson(&x, &down) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_uses_pairwise_complete_rows() {
        let x = vec![Some(1.0), Some(2.0), None, Some(3.0)];
        let y = vec![Some(1.0), Some(2.0), Some(100.0), Some(3.0)];
        assert!((pearson(&x, &y) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn pearson_is_nan_for_constant_or_short_samples() {
        assert!(pearson(&some(&[1.0, 1.0, 1.0]), &some(&[1.0, 2.0, 3.0])).is_nan());
        assert!(pearson(&some(&[1.0]), &some(&[2.0])).is_nan());
    }

    #[test]
    fn matrix_is_symmetric_with_unit_diagonal() {
        let ds = Dataset::new(
            vec!["a".into(), "b".into()],
            vec![
                vec![CellValue::Integer(1), CellValue::Float(3.0)],
                vec![CellValue::Integer(2), CellValue::Float(1.0)],
                vec![CellValue::Integer(3), CellValue::Float(2.5)],
            ],
        );
        let m = CorrelationMatrix::compute(&ds, &["a", "b"]).unwrap();
        assert_eq!(m.len(), 2);
        assert!((m.get(0, 0) - 1.0).abs() < 1e-12);
        assert_eq!(m.get(0, 1), m.get(1, 0));
    }
}
