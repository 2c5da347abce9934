use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{debug, info};
use plotters::prelude::*;

use super::stats::Histogram;
use super::{grid_canvas, grid_shape, FONT};
use crate::color::generate_palette;
use crate::columns::short_label;
use crate::data::model::Dataset;
use crate::error::EdaError;

pub const FILE_NAME: &str = "numeric_distributions.svg";
const BINS: usize = 20;

/// One histogram per numeric column, laid out in a grid.
///
/// A column with no values still gets its (empty) panel.
pub fn numeric_distributions(
    dataset: &Dataset,
    columns: &[&str],
    out_dir: &Path,
) -> Result<PathBuf> {
    if columns.is_empty() {
        return Err(EdaError::Empty("numeric distributions".into()).into());
    }
    let path = out_dir.join(FILE_NAME);
    let colours = generate_palette(columns.len());

    {
        let root = SVGBackend::new(&path, grid_canvas(columns.len())).into_drawing_area();
        root.fill(&WHITE)?;
        let root = root.titled("Numeric feature distributions", (FONT, 24))?;

        for ((area, col), colour) in root
            .split_evenly(grid_shape(columns.len()))
            .iter()
            .zip(columns)
            .zip(&colours)
        {
            let values: Vec<f64> = dataset.numeric_column(col)?.into_iter().flatten().collect();
            let hist = Histogram::new(&values, BINS);
            debug!("{col}: {} values in {} bins", values.len(), hist.bins.len());

            let x_range = hist.span().unwrap_or(0.0..1.0);
            let y_max = (hist.max_count() as f64 * 1.1).max(1.0);

            let mut chart = ChartBuilder::on(area)
                .caption(short_label(col), (FONT, 16))
                .margin(10)
                .x_label_area_size(30)
                .y_label_area_size(40)
                .build_cartesian_2d(x_range, 0f64..y_max)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(6)
                .y_desc("Count")
                .label_style((FONT, 11))
                .draw()?;

            chart.draw_series(hist.bins.iter().zip(&hist.counts).map(|(bin, &count)| {
                Rectangle::new(
                    [(bin.start, 0.0), (bin.end, count as f64)],
                    colour.mix(0.8).filled(),
                )
            }))?;
        }

        root.present()?;
    }

    info!("wrote {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    #[test]
    fn writes_one_svg_with_a_panel_per_column() {
        let dir = tempfile::tempdir().unwrap();
        let ds = Dataset::new(
            vec!["Age (in years)".into(), "Maximum heart rate achieved".into()],
            (0..10)
                .map(|i| vec![CellValue::Integer(40 + i), CellValue::Float(150.0 - i as f64)])
                .collect(),
        );

        let path = numeric_distributions(
            &ds,
            &["Age (in years)", "Maximum heart rate achieved"],
            dir.path(),
        )
        .unwrap();

        assert_eq!(path, dir.path().join(FILE_NAME));
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Maximum heart rate achieved"));
    }

    #[test]
    fn infinite_value_fails_instead_of_plotting() {
        let dir = tempfile::tempdir().unwrap();
        let ds = Dataset::new(
            vec!["Age (in years)".into()],
            vec![vec![CellValue::parse("50")], vec![CellValue::parse("inf")]],
        );
        let err = numeric_distributions(&ds, &["Age (in years)"], dir.path()).unwrap_err();
        assert!(err.to_string().contains("not a finite number"));
    }

    #[test]
    fn text_in_numeric_column_fails() {
        let dir = tempfile::tempdir().unwrap();
        let ds = Dataset::new(
            vec!["Age (in years)".into()],
            vec![vec![CellValue::String("old".into())]],
        );
        assert!(numeric_distributions(&ds, &["Age (in years)"], dir.path()).is_err());
    }
}
