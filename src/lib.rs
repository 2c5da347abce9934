//! Exploratory data analysis for the processed heart-disease training set.

pub mod cli;
pub mod color;
pub mod columns;
pub mod data;
pub mod eda;
pub mod error;

use std::fs;

use anyhow::{Context, Result};
use log::info;

use cli::Cli;
use columns::{CATEGORICAL_COLUMNS, NUMERIC_COLUMNS};
use data::filter::drop_missing;
use data::loader::load_file;

/// Load, filter and analyse the training set, writing every artifact under
/// `--write-to`. The first failure aborts the run.
pub fn run(cli: &Cli) -> Result<()> {
    let figures_dir = cli.figures_dir();
    let tables_dir = cli.tables_dir();
    for dir in [&figures_dir, &tables_dir] {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    println!("Generating EDA outputs...");

    let mut dataset = load_file(&cli.train)?;
    drop_missing(&mut dataset, &CATEGORICAL_COLUMNS)?;
    info!("analysing {} rows", dataset.len());

    eda::numeric_distributions(&dataset, &NUMERIC_COLUMNS, &figures_dir)?;
    eda::categorical_distributions(&dataset, &CATEGORICAL_COLUMNS, &figures_dir)?;
    eda::correlation_heatmap(&dataset, &NUMERIC_COLUMNS, &figures_dir)?;
    eda::save_high_correlations(&dataset, &NUMERIC_COLUMNS, &tables_dir)?;

    println!("EDA outputs generated.");
    Ok(())
}
