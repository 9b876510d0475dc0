//! Product-mix solver CLI
//!
//! Usage: digitlp_solve [options]
//!
//! Options:
//!   --problem <FILE>       TOML problem file (default: built-in product-mix problem)
//!   --parallel             Enumerate with rayon
//!   --quiet                Skip the feasible point table
//!   --what-if <NAME=RHS>   Re-solve with one right-hand side changed
//!   --json <FILE>          Write the solution as JSON
//!
//! Example: digitlp_solve --what-if transportation=18

use anyhow::{Context, Result};
use clap::Parser;
use digitlp_core::constants::{MAX_LISTED_POINTS, TRANSPORT_CONSTRAINT, WHAT_IF_CAPACITY};
use digitlp_core::domain::problem::ProductMixProblem;
use digitlp_core::infra::problem_io::{load_problem, save_solution_json};
use digitlp_core::{
    brute_force_solve, brute_force_solve_parallel, sensitivity_analysis, verify_constraints,
};
use log::info;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(version, about = "Solve a two-product integer LP by enumeration")]
struct Args {
    /// TOML problem file
    #[arg(long, value_name = "FILE")]
    problem: Option<PathBuf>,

    /// Enumerate in parallel
    #[arg(long)]
    parallel: bool,

    /// Skip the feasible point table
    #[arg(long)]
    quiet: bool,

    /// Constraint right-hand side to try, as NAME=RHS
    #[arg(long = "what-if", value_name = "NAME=RHS", value_parser = parse_what_if)]
    what_if: Option<(String, i64)>,

    /// Write the solution as JSON to this file
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,
}

fn parse_what_if(value: &str) -> Result<(String, i64), String> {
    let (name, rhs) = value
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=RHS, got '{}'", value))?;
    let rhs = rhs
        .trim()
        .parse()
        .map_err(|_| format!("invalid right-hand side: {}", rhs))?;
    Ok((name.trim().to_string(), rhs))
}

fn run(args: Args) -> Result<()> {
    let (problem, default_what_if) = match &args.problem {
        Some(path) => (
            load_problem(path).with_context(|| format!("loading {}", path.display()))?,
            None,
        ),
        None => (
            ProductMixProblem::default(),
            Some((TRANSPORT_CONSTRAINT.to_string(), WHAT_IF_CAPACITY)),
        ),
    };
    let what_if = args.what_if.or(default_what_if);

    println!("Linear Programming Optimization");
    println!("{}", "=".repeat(50));
    println!("Problem: Maximize {}", problem.objective);
    let labels: Vec<String> = problem.constraints.iter().map(|c| c.label()).collect();
    println!("Constraints: {}", labels.join(", "));

    let start = Instant::now();
    let solution = if args.parallel {
        brute_force_solve_parallel(&problem)
    } else {
        brute_force_solve(&problem)
    }?;
    info!("Solved in {:.3} ms", start.elapsed().as_secs_f64() * 1000.0);

    if !args.quiet {
        println!("{}", "-".repeat(50));
        println!("{:<15} {:<12}", "Point (A, B)", "Value");
        println!("{}", "-".repeat(50));
        for fp in solution.feasible_points.iter().take(MAX_LISTED_POINTS) {
            println!("{:<15} {:<12}", fp.point.to_string(), fp.value);
        }
        let hidden = solution.num_feasible.saturating_sub(MAX_LISTED_POINTS);
        if hidden > 0 {
            println!("... {} more feasible point(s)", hidden);
        }
        println!("{}", "-".repeat(50));
    }

    println!("\n{}", "=".repeat(50));
    println!("OPTIMAL SOLUTION FOUND");
    println!("{}", "=".repeat(50));
    println!("Product A units: {}", solution.optimal.a);
    println!("Product B units: {}", solution.optimal.b);
    println!("Maximum value: {}", solution.max_revenue);
    println!("Feasible Solutions: {}", solution.num_feasible);

    println!("\nConstraint Verification for {}:", solution.optimal);
    println!("{}", "-".repeat(45));
    for check in verify_constraints(&problem, solution.optimal) {
        println!("{}: {} {}", check.constraint, check.expression, check.status());
    }

    let sensitivity = sensitivity_analysis(
        &problem,
        &solution,
        what_if.as_ref().map(|(name, rhs)| (name.as_str(), *rhs)),
    )?;

    println!("\nSensitivity Analysis");
    println!("{}", "=".repeat(50));
    println!("Slack Variables:");
    for (name, slack) in &sensitivity.slacks {
        println!("  {}: {} units slack", name, slack);
    }
    if let Some(w) = &sensitivity.what_if {
        println!("\nWhat-if: {} changes from {} to {}?", w.constraint, w.original_rhs, w.new_rhs);
        println!("  New optimal: {} with value {}", w.new_optimal, w.new_revenue);
        println!("  Value change: {:+}", w.revenue_change);
        if let Some(price) = w.shadow_price_estimate {
            println!("  Shadow price estimate: {:.2}", price);
        }
    }

    if let Some(path) = &args.json {
        save_solution_json(path, &solution)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("\nSolution saved to {}", path.display());
    }

    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
