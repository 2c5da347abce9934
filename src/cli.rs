use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "heart-eda",
    version,
    about = "Distribution plots, correlation heatmap and high-correlation table for the processed training set"
)]
pub struct Cli {
    /// Path to the input training CSV file (env: EDA_TRAIN)
    #[arg(
        long,
        value_name = "PATH",
        env = "EDA_TRAIN",
        default_value = "data/processed/train_df.csv",
        value_parser = existing_path
    )]
    pub train: PathBuf,

    /// Directory where output figures and tables will be saved (env: EDA_WRITE_TO)
    #[arg(long, value_name = "DIR", env = "EDA_WRITE_TO", default_value = "results")]
    pub write_to: PathBuf,
}

impl Cli {
    pub fn figures_dir(&self) -> PathBuf {
        self.write_to.join("figures")
    }

    pub fn tables_dir(&self) -> PathBuf {
        self.write_to.join("tables")
    }
}

/// Rejects paths that do not exist, so a bad `--train` fails at parse time.
fn existing_path(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("path '{s}' does not exist"))
    }
}
