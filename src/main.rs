use clap::Parser;
use env_logger::Env;

use heart_eda::cli::Cli;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    heart_eda::run(&cli)
}
