use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use log::info;
use rand::Rng;
use std::path::PathBuf;
use std::time::Instant;

use student_data_generator::data_generator::generate_students;
use student_data_generator::output::{resolve_output_path, write_csv};

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate a pseudorandom university student dataset", long_about = None)]
struct Args {
    /// Number of student records to generate
    row_count: i64,
    /// Output CSV path (default: output/university_data.csv)
    output: Option<PathBuf>,
    /// Master seed for reproducible generation (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let start_time = Instant::now();

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let today = Utc::now().date_naive();
    info!(
        "🚀 Generating {} student records (seed {}, reference date {})",
        args.row_count, seed, today
    );

    let students = generate_students(args.row_count, seed, today)?;

    let output_path = resolve_output_path(args.output)?;
    write_csv(&students, &output_path)?;
    info!(
        "✅ Generated and wrote {} rows in {:.1}s",
        students.len(),
        start_time.elapsed().as_secs_f64()
    );

    println!(
        "Generated {} rows of university data and saved to '{}'",
        students.len(),
        output_path.display()
    );
    println!(
        "Current working directory: {}",
        std::env::current_dir()?.display()
    );
    Ok(())
}
