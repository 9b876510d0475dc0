//! Constraint verification for a candidate solution

use crate::domain::problem::{Point, ProductMixProblem};
use serde::Serialize;

/// Satisfaction details for one constraint at one point
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConstraintCheck {
    /// Constraint name
    pub name: String,
    /// Symbolic form (`A + 2B ≤ 14`)
    pub constraint: String,
    /// Substituted form (`8 + 2(3) = 14`)
    pub expression: String,
    pub satisfied: bool,
    pub binding: bool,
    pub slack: i64,
}

impl ConstraintCheck {
    /// `✓`/`✗` status mark, with a `(BINDING)` suffix when binding
    pub fn status(&self) -> String {
        let mark = if self.satisfied { '✓' } else { '✗' };
        if self.binding {
            format!("{} (BINDING)", mark)
        } else {
            mark.to_string()
        }
    }
}

/// Check every constraint at `point`, in declaration order
pub fn verify_constraints(problem: &ProductMixProblem, point: Point) -> Vec<ConstraintCheck> {
    problem
        .constraints
        .iter()
        .map(|c| ConstraintCheck {
            name: c.name.clone(),
            constraint: c.label(),
            expression: c.expression(point),
            satisfied: c.is_satisfied(point),
            binding: c.is_binding(point),
            slack: c.slack(point),
        })
        .collect()
}
