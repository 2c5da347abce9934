use std::path::{Path, PathBuf};

use anyhow::Result;
use log::info;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::stats::CorrelationMatrix;
use super::{index_label, FONT};
use crate::color::diverging;
use crate::columns::short_label;
use crate::data::model::Dataset;
use crate::error::EdaError;

pub const FILE_NAME: &str = "correlation_heatmap.svg";
const CANVAS: (u32, u32) = (1100, 900);

/// Annotation for a heatmap cell.
fn cell_text(r: f64) -> String {
    if r.is_nan() {
        "n/a".to_string()
    } else {
        format!("{r:.2}")
    }
}

/// Pearson correlation heatmap of the numeric columns.
///
/// Row 0 of the matrix is drawn at the top; the diagonal runs top-left to
/// bottom-right.
pub fn correlation_heatmap(dataset: &Dataset, columns: &[&str], out_dir: &Path) -> Result<PathBuf> {
    let matrix = CorrelationMatrix::compute(dataset, columns)?;
    if matrix.is_empty() {
        return Err(EdaError::Empty("correlation heatmap".into()).into());
    }
    let n = matrix.len();
    let labels: Vec<String> = matrix.columns.iter().map(|c| short_label(c)).collect();
    let flipped: Vec<String> = labels.iter().rev().cloned().collect();
    let path = out_dir.join(FILE_NAME);

    {
        let root = SVGBackend::new(&path, CANVAS).into_drawing_area();
        root.fill(&WHITE)?;

        let extent = -0.5..(n as f64 - 0.5);
        let mut chart = ChartBuilder::on(&root)
            .caption("Correlation heatmap (Pearson)", (FONT, 24))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(220)
            .build_cartesian_2d(extent.clone(), extent)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(n)
            .y_labels(n)
            .x_label_formatter(&|v: &f64| index_label(&labels, *v))
            .y_label_formatter(&|v: &f64| index_label(&flipped, *v))
            .label_style((FONT, 12))
            .draw()?;

        // (column, displayed row, r)
        let cells: Vec<(f64, f64, f64)> = (0..n)
            .flat_map(|i| (0..n).map(move |j| (i, j)))
            .map(|(i, j)| (j as f64, (n - 1 - i) as f64, matrix.get(i, j)))
            .collect();

        chart.draw_series(cells.iter().map(|&(x, y, r)| {
            Rectangle::new([(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)], diverging(r).filled())
        }))?;

        let text_style = TextStyle::from((FONT, 14).into_font())
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        chart.draw_series(
            cells
                .iter()
                .map(|&(x, y, r)| Text::new(cell_text(r), (x, y), text_style.clone())),
        )?;

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
    fn cell_text_rounds_and_marks_undefined() {
        assert_eq!(cell_text(0.8765), "0.88");
        assert_eq!(cell_text(-1.0), "-1.00");
        assert_eq!(cell_text(f64::NAN), "n/a");
    }

    #[test]
    fn annotates_every_cell() {
        let dir = tempfile::tempdir().unwrap();
        let ds = Dataset::new(
            vec!["a".into(), "b".into()],
            (0..5)
                .map(|i| vec![CellValue::Integer(i), CellValue::Integer(10 - 2 * i)])
                .collect(),
        );

        let path = correlation_heatmap(&ds, &["a", "b"], dir.path()).unwrap();

        let svg = std::fs::read_to_string(path).unwrap();
        // two cells of 1.00 on the diagonal, two of -1.00 off it
        assert_eq!(svg.matches("-1.00").count(), 2);
        assert_eq!(svg.matches("1.00").count(), 4);
    }
}
