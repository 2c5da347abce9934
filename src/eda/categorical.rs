use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{debug, info};
use plotters::prelude::*;

use super::{grid_canvas, grid_shape, index_label, FONT};
use crate::color::generate_palette;
use crate::columns::short_label;
use crate::data::model::Dataset;
use crate::error::EdaError;

pub const FILE_NAME: &str = "categorical_distributions.svg";

/// One bar chart of value counts per categorical column.
pub fn categorical_distributions(
    dataset: &Dataset,
    columns: &[&str],
    out_dir: &Path,
) -> Result<PathBuf> {
    if columns.is_empty() {
        return Err(EdaError::Empty("categorical distributions".into()).into());
    }
    let path = out_dir.join(FILE_NAME);

    {
        let root = SVGBackend::new(&path, grid_canvas(columns.len())).into_drawing_area();
        root.fill(&WHITE)?;
        let root = root.titled("Categorical feature distributions", (FONT, 24))?;

        for (area, col) in root
            .split_evenly(grid_shape(columns.len()))
            .iter()
            .zip(columns)
        {
            let counts = dataset.value_counts(col)?;
            debug!("{col}: {} distinct values", counts.len());

            let labels: Vec<String> = counts.keys().map(ToString::to_string).collect();
            let colours = generate_palette(counts.len());
            let n = counts.len().max(1) as f64;
            let y_max = (counts.values().copied().max().unwrap_or(0) as f64 * 1.1).max(1.0);

            let mut chart = ChartBuilder::on(area)
                .caption(short_label(col), (FONT, 16))
                .margin(10)
                .x_label_area_size(30)
                .y_label_area_size(40)
                .build_cartesian_2d(-0.5..(n - 0.5), 0f64..y_max)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(labels.len().max(1))
                .x_label_formatter(&|v: &f64| index_label(&labels, *v))
                .y_desc("Count")
                .label_style((FONT, 11))
                .draw()?;

            chart.draw_series(counts.values().zip(&colours).enumerate().map(
                |(i, (&count, colour))| {
                    let x = i as f64;
                    Rectangle::new([(x - 0.4, 0.0), (x + 0.4, count as f64)], colour.filled())
                },
            ))?;
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
    fn labels_each_category() {
        let dir = tempfile::tempdir().unwrap();
        let ds = Dataset::new(
            vec!["Chest pain type".into()],
            ["typical angina", "asymptomatic", "asymptomatic", "non-anginal pain"]
                .iter()
                .map(|s| vec![CellValue::String((*s).into())])
                .collect(),
        );

        let path = categorical_distributions(&ds, &["Chest pain type"], dir.path()).unwrap();

        let svg = std::fs::read_to_string(path).unwrap();
        assert!(svg.contains("Chest pain type"));
        assert!(svg.contains("asymptomatic"));
    }

    #[test]
    fn missing_column_fails() {
        let dir = tempfile::tempdir().unwrap();
        let ds = Dataset::new(vec!["Sex".into()], vec![vec![CellValue::Integer(1)]]);
        assert!(categorical_distributions(&ds, &["Thalassemia"], dir.path()).is_err());
        assert!(categorical_distributions(&ds, &[], dir.path()).is_err());
    }
}
