//! Sensitivity analysis around a solved problem
//!
//! Reports per-constraint slack at the optimum and, optionally, re-solves
//! with one constraint's right-hand side changed to estimate its shadow price.

use crate::app::solver::{Solution, SolveError, brute_force_solve};
use crate::domain::problem::{Point, ProblemError, ProductMixProblem};
use log::info;
use serde::Serialize;

/// Result of re-solving with one right-hand side changed
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WhatIf {
    pub constraint: String,
    pub original_rhs: i64,
    pub new_rhs: i64,
    pub new_optimal: Point,
    pub new_revenue: i64,
    pub revenue_change: i64,
    /// Revenue change per unit of right-hand side change
    pub shadow_price_estimate: Option<f64>,
}

/// Slack per constraint plus an optional what-if scenario
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SensitivityReport {
    pub slacks: Vec<(String, i64)>,
    pub what_if: Option<WhatIf>,
}

/// Analyze `solution` of `problem`
///
/// # Arguments
/// * `problem` - The solved problem
/// * `solution` - Its solution
/// * `what_if` - Constraint name and replacement right-hand side to try
///
/// # Errors
/// Fails if the named constraint does not exist or the modified problem
/// has no feasible point.
pub fn sensitivity_analysis(
    problem: &ProductMixProblem,
    solution: &Solution,
    what_if: Option<(&str, i64)>,
) -> Result<SensitivityReport, SolveError> {
    let slacks = problem
        .constraints
        .iter()
        .map(|c| (c.name.clone(), c.slack(solution.optimal)))
        .collect();

    let what_if = what_if
        .map(|(name, new_rhs)| run_what_if(problem, solution, name, new_rhs))
        .transpose()?;

    Ok(SensitivityReport { slacks, what_if })
}

fn run_what_if(
    problem: &ProductMixProblem,
    solution: &Solution,
    name: &str,
    new_rhs: i64,
) -> Result<WhatIf, SolveError> {
    let original_rhs = problem
        .constraint(name)
        .map(|c| c.rhs)
        .ok_or_else(|| ProblemError::UnknownConstraint(name.to_string()))?;

    let modified = problem.with_rhs(name, new_rhs)?;
    let new_solution = brute_force_solve(&modified)?;

    let revenue_change = new_solution.max_revenue - solution.max_revenue;
    let rhs_change = new_rhs - original_rhs;
    let shadow_price_estimate =
        (rhs_change != 0).then(|| revenue_change as f64 / rhs_change as f64);

    info!(
        "What-if {}: {} -> {} moves optimum to {} (change {})",
        name, original_rhs, new_rhs, new_solution.optimal, revenue_change
    );

    Ok(WhatIf {
        constraint: name.to_string(),
        original_rhs,
        new_rhs,
        new_optimal: new_solution.optimal,
        new_revenue: new_solution.max_revenue,
        revenue_change,
        shadow_price_estimate,
    })
}
