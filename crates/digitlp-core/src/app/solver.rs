//! Brute-force integer solver
//!
//! Enumerates every integer point in the problem's search box, keeps the
//! feasible ones and picks the point with the highest objective value.

use crate::domain::problem::{Point, ProblemError, ProductMixProblem};
use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

/// Solver errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// Problem failed validation
    #[error(transparent)]
    Problem(#[from] ProblemError),
    /// No point in the search box satisfies every constraint
    #[error("No feasible solution in {searched} searched point(s)")]
    Infeasible { searched: u64 },
}

/// Feasible point with its objective value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FeasiblePoint {
    pub point: Point,
    pub value: i64,
}

/// Solver result
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Solution {
    /// First point (in enumeration order) attaining the maximum
    pub optimal: Point,
    /// Objective value at the optimum
    pub max_revenue: i64,
    /// All feasible points, A ascending then B ascending
    pub feasible_points: Vec<FeasiblePoint>,
    pub num_feasible: usize,
}

impl Solution {
    fn from_feasible(
        feasible_points: Vec<FeasiblePoint>,
        searched: u64,
    ) -> Result<Self, SolveError> {
        // Strict `>` keeps the earliest point on ties
        let best = feasible_points
            .iter()
            .fold(None::<FeasiblePoint>, |best, fp| match best {
                Some(b) if fp.value <= b.value => Some(b),
                _ => Some(*fp),
            })
            .ok_or(SolveError::Infeasible { searched })?;

        info!(
            "Optimal solution {} with value {} ({} feasible of {} searched)",
            best.point,
            best.value,
            feasible_points.len(),
            searched
        );

        Ok(Self {
            optimal: best.point,
            max_revenue: best.value,
            num_feasible: feasible_points.len(),
            feasible_points,
        })
    }

    /// Whether `point` was recorded as feasible
    pub fn is_feasible(&self, point: Point) -> bool {
        self.feasible_points.iter().any(|fp| fp.point == point)
    }
}

/// Feasible points in one column (fixed A), B ascending
fn solve_column(problem: &ProductMixProblem, a: i64) -> Vec<FeasiblePoint> {
    problem
        .search
        .b_range()
        .map(|b| Point::new(a, b))
        .filter(|&p| problem.check_constraints(p))
        .map(|point| {
            let value = problem.objective_value(point);
            debug!("Feasible {} value {}", point, value);
            FeasiblePoint { point, value }
        })
        .collect()
}

/// Solve by sequential enumeration
///
/// A is the outer loop and B the inner loop, both ascending.
///
/// # Errors
/// * `SolveError::Problem` - the problem failed validation
/// * `SolveError::Infeasible` - no point satisfies every constraint
pub fn brute_force_solve(problem: &ProductMixProblem) -> Result<Solution, SolveError> {
    problem.validate()?;

    let feasible: Vec<FeasiblePoint> = problem
        .search
        .a_range()
        .flat_map(|a| solve_column(problem, a))
        .collect();

    Solution::from_feasible(feasible, problem.search.num_points())
}

/// Solve with rayon, one task per A value
///
/// Produces the same `Solution` as [`brute_force_solve`], including feasible
/// point order and tie-breaking.
pub fn brute_force_solve_parallel(problem: &ProductMixProblem) -> Result<Solution, SolveError> {
    problem.validate()?;

    let columns: Vec<Vec<FeasiblePoint>> = problem
        .search
        .a_range()
        .into_par_iter()
        .map(|a| solve_column(problem, a))
        .collect();

    let feasible = columns.into_iter().flatten().collect();
    Solution::from_feasible(feasible, problem.search.num_points())
}
