use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::fs;
use std::path::PathBuf;

mod charts;
mod table;

use charts::render_chart_grid;
use table::Table;

const DEFAULT_OUTPUT_DIR: &str = "output";
const DEFAULT_OUTPUT_FILE: &str = "pie_charts_and_distributions.png";

#[derive(Parser, Debug)]
#[command(author, version, about = "Render summary charts for a generated university dataset", long_about = None)]
struct Args {
    /// Path to the generated CSV table
    csv_path: PathBuf,
    /// Output PNG path (default: output/pie_charts_and_distributions.png)
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let table = Table::load(&args.csv_path)?;
    info!("loaded {} rows from {}", table.len(), args.csv_path.display());

    let output = match args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create output directory '{}'", parent.display())
                })?;
            }
            path
        }
        None => {
            fs::create_dir_all(DEFAULT_OUTPUT_DIR)
                .with_context(|| format!("failed to create output directory '{DEFAULT_OUTPUT_DIR}'"))?;
            PathBuf::from(DEFAULT_OUTPUT_DIR).join(DEFAULT_OUTPUT_FILE)
        }
    };

    render_chart_grid(&table, &output)?;
    println!("Charts saved to '{}'", output.display());
    Ok(())
}
