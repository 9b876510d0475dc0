//! Student ID analysis CLI
//!
//! Usage: digitlp_analyze [ID] [--from-index <N>]... [--json]
//!
//! Example:
//!   digitlp_analyze
//!   digitlp_analyze s225187913 --from-index 2 --from-index 4
//!   digitlp_analyze s225187913 --json

use anyhow::Result;
use clap::Parser;
use digitlp_core::analyze_student_id;
use digitlp_core::constants::{DEFAULT_REVERSE_INDICES, DEFAULT_STUDENT_ID};
use digitlp_core::domain::student_id::{reverse_student_id, reverse_student_id_from_index};

#[derive(Parser)]
#[command(version, about = "Reverse a student ID and analyze its digits")]
struct Args {
    /// Student ID (must start with 's')
    #[arg(default_value = DEFAULT_STUDENT_ID)]
    student_id: String,

    /// Start index for partial reversal (repeatable; default 1, 3, 5)
    #[arg(long = "from-index", value_name = "N")]
    from_index: Vec<usize>,

    /// Print the digit analysis as JSON
    #[arg(long)]
    json: bool,
}

fn run(args: Args) -> Result<()> {
    let analysis = analyze_student_id(&args.student_id)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    let indices = if args.from_index.is_empty() {
        DEFAULT_REVERSE_INDICES.to_vec()
    } else {
        args.from_index
    };

    println!("String Operations");
    println!("{}", "=".repeat(40));
    println!("\nOriginal: {}", args.student_id);
    println!("Reversed list: {:?}", reverse_student_id(&args.student_id)?);
    for index in indices {
        println!(
            "Reversed from index {}: {}",
            index,
            reverse_student_id_from_index(&args.student_id, index)?
        );
    }

    println!("\nArray Algorithms");
    println!("{}", "=".repeat(40));
    println!("Digits: {:?}", analysis.digits);
    println!(
        "\nMaximum: {} at index {}",
        analysis.maximum, analysis.max_index
    );
    match analysis.second_maximum {
        Some(second) => println!("Second Maximum: {}", second),
        None => println!("Second Maximum: none"),
    }
    println!("\nDistinct digits: {:?}", analysis.distinct_digits);
    println!("Distinct count: {}", analysis.distinct_count);
    println!("\nSmaller counts: {:?}", analysis.smaller_counts);

    println!("\nDetailed Position Analysis:");
    for (i, (digit, count)) in analysis
        .digits
        .iter()
        .zip(&analysis.smaller_counts)
        .enumerate()
    {
        println!("  Position {}: Digit {} has {} smaller numbers", i, digit, count);
    }

    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
