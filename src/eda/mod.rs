/// Analysis helpers: each takes the filtered dataset, a column list and an
/// output directory, writes one artifact and returns its path.
///
/// ```text
///   Dataset ──► stats ──► numeric      → figures/numeric_distributions.svg
///                    ├──► categorical  → figures/categorical_distributions.svg
///                    ├──► heatmap      → figures/correlation_heatmap.svg
///                    └──► correlations → tables/high_correlations.csv
/// ```

pub mod categorical;
pub mod correlations;
pub mod heatmap;
pub mod numeric;
pub mod stats;

pub use categorical::categorical_distributions;
pub use correlations::save_high_correlations;
pub use heatmap::correlation_heatmap;
pub use numeric::numeric_distributions;

const FONT: &str = "sans-serif";
const PANELS_PER_ROW: usize = 3;
const PANEL_WIDTH: u32 = 420;
const PANEL_HEIGHT: u32 = 320;
const TITLE_HEIGHT: u32 = 50;

/// (rows, columns) of a panel grid holding `n` plots.
fn grid_shape(n: usize) -> (usize, usize) {
    let cols = n.clamp(1, PANELS_PER_ROW);
    (n.div_ceil(cols).max(1), cols)
}

/// Canvas size for a grid of `n` panels under a title.
fn grid_canvas(n: usize) -> (u32, u32) {
    let (rows, cols) = grid_shape(n);
    (
        PANEL_WIDTH * cols as u32,
        PANEL_HEIGHT * rows as u32 + TITLE_HEIGHT,
    )
}

/// Axis label for an integer tick on a category axis; blank between ticks.
fn index_label(labels: &[String], v: f64) -> String {
    let i = v.round();
    if (v - i).abs() > 1e-6 || i < 0.0 {
        return String::new();
    }
    labels.get(i as usize).cloned().unwrap_or_default()
}
