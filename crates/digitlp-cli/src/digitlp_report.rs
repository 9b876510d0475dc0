//! Markdown results report CLI
//!
//! Usage: digitlp_report [--id <ID>] [--problem <FILE>] [--output <PATH>]
//!
//! Example:
//!   digitlp_report
//!   digitlp_report --id s225187913 --output docs/RESULTS.md

use anyhow::{Context, Result};
use clap::Parser;
use digitlp_core::build_report;
use digitlp_core::constants::{
    DEFAULT_REVERSE_INDICES, DEFAULT_STUDENT_ID, TRANSPORT_CONSTRAINT, WHAT_IF_CAPACITY,
};
use digitlp_core::domain::problem::ProductMixProblem;
use digitlp_core::infra::problem_io::{get_report_path, load_problem, save_report};
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about = "Write the Markdown results report")]
struct Args {
    /// Student ID to analyze
    #[arg(long = "id", default_value = DEFAULT_STUDENT_ID)]
    student_id: String,

    /// TOML problem file (default: built-in product-mix problem)
    #[arg(long, value_name = "FILE")]
    problem: Option<PathBuf>,

    /// Output path (default: ./RESULTS.md)
    #[arg(long, short = 'o', value_name = "PATH")]
    output: Option<PathBuf>,
}

fn run(args: Args) -> Result<()> {
    let (problem, what_if) = match &args.problem {
        Some(path) => (
            load_problem(path).with_context(|| format!("loading {}", path.display()))?,
            None,
        ),
        None => (
            ProductMixProblem::default(),
            Some((TRANSPORT_CONSTRAINT, WHAT_IF_CAPACITY)),
        ),
    };

    let report = build_report(&args.student_id, &DEFAULT_REVERSE_INDICES, &problem, what_if)?;

    let output = args.output.unwrap_or_else(|| get_report_path("."));
    save_report(&output, &report.render())
        .with_context(|| format!("writing {}", output.display()))?;

    println!("Report written to {}", output.display());
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
