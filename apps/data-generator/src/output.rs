use anyhow::{Context, Result};
use csv::{QuoteStyle, WriterBuilder};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::data_generator::StudentRecord;

pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_OUTPUT_FILE: &str = "university_data.csv";

/// Resolve the target CSV path, creating any missing directories.
/// Without an explicit path the table lands in `output/university_data.csv`.
pub fn resolve_output_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create output directory '{}'", parent.display())
                })?;
            }
            Ok(path)
        }
        None => {
            fs::create_dir_all(DEFAULT_OUTPUT_DIR).with_context(|| {
                format!("failed to create output directory '{DEFAULT_OUTPUT_DIR}'")
            })?;
            Ok(Path::new(DEFAULT_OUTPUT_DIR).join(DEFAULT_OUTPUT_FILE))
        }
    }
}

/// Write the table as one header row plus one row per record, all fields quoted
pub fn write_csv(records: &[StudentRecord], path: &Path) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_path(path)
        .with_context(|| format!("failed to create output file '{}'", path.display()))?;

    for record in records {
        writer
            .serialize(record)
            .with_context(|| format!("failed to write record {}", record.student_id))?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush '{}'", path.display()))?;

    info!("wrote {} rows to {}", records.len(), path.display());
    Ok(())
}
