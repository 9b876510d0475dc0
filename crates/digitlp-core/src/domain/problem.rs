//! Two-product integer linear program
//!
//! A problem maximizes `Z = a·A + b·B` over integer points `(A, B)` inside a
//! bounded search box, subject to linear constraints `a·A + b·B (rel) rhs`.
//! Problems deserialize from TOML (see `infra::problem_io`).

use crate::constants::{
    MAX_SEARCH_POINTS, MAX_UNITS, MIN_B_UNITS, REVENUE_A, REVENUE_B, TRANSPORT_CAPACITY,
    TRANSPORT_CONSTRAINT,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use thiserror::Error;

/// Problem definition errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProblemError {
    /// Two constraints share a name
    #[error("Duplicate constraint name: {0}")]
    DuplicateConstraint(String),
    /// No constraint with this name
    #[error("Unknown constraint: {0}")]
    UnknownConstraint(String),
    /// Search range with lo > hi
    #[error("Invalid search range for {variable}: [{lo}, {hi})")]
    InvalidRange { variable: char, lo: i64, hi: i64 },
    /// Search box exceeds the enumeration limit
    #[error("Search space too large: {points} points (limit {limit})")]
    SearchSpaceTooLarge { points: u64, limit: u64 },
    /// A linear form can leave the `i64` range inside the search box
    #[error("Arithmetic overflow possible in {0} within the search box")]
    Overflow(String),
}

/// Integer point (units of product A, units of product B)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Point {
    pub a: i64,
    pub b: i64,
}

impl Point {
    pub fn new(a: i64, b: i64) -> Self {
        Self { a, b }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.a, self.b)
    }
}

/// Constraint relation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relation {
    #[serde(rename = "le", alias = "<=")]
    Le,
    #[serde(rename = "lt", alias = "<")]
    Lt,
    #[serde(rename = "ge", alias = ">=")]
    Ge,
    #[serde(rename = "gt", alias = ">")]
    Gt,
    #[serde(rename = "eq", alias = "=", alias = "==")]
    Eq,
}

impl Relation {
    /// Whether `lhs (rel) rhs` holds
    pub fn holds(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Self::Le => lhs <= rhs,
            Self::Lt => lhs < rhs,
            Self::Ge => lhs >= rhs,
            Self::Gt => lhs > rhs,
            Self::Eq => lhs == rhs,
        }
    }

    /// Mathematical symbol
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Le => "≤",
            Self::Lt => "<",
            Self::Ge => "≥",
            Self::Gt => ">",
            Self::Eq => "=",
        }
    }
}

/// Linear constraint `a·A + b·B (relation) rhs`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    pub name: String,
    #[serde(default)]
    pub a: i64,
    #[serde(default)]
    pub b: i64,
    pub relation: Relation,
    pub rhs: i64,
}

impl Constraint {
    pub fn new(name: impl Into<String>, a: i64, b: i64, relation: Relation, rhs: i64) -> Self {
        Self {
            name: name.into(),
            a,
            b,
            relation,
            rhs,
        }
    }

    /// Left-hand side evaluated at `point`
    #[inline]
    pub fn lhs(&self, point: Point) -> i64 {
        self.a * point.a + self.b * point.b
    }

    #[inline]
    pub fn is_satisfied(&self, point: Point) -> bool {
        self.relation.holds(self.lhs(point), self.rhs)
    }

    /// Satisfied with equality; strict relations never bind
    pub fn is_binding(&self, point: Point) -> bool {
        match self.relation {
            Relation::Le | Relation::Ge | Relation::Eq => self.lhs(point) == self.rhs,
            Relation::Lt | Relation::Gt => false,
        }
    }

    /// Distance from the bound, positive on the feasible side
    pub fn slack(&self, point: Point) -> i64 {
        let lhs = self.lhs(point);
        match self.relation {
            Relation::Le | Relation::Lt => self.rhs - lhs,
            Relation::Ge | Relation::Gt => lhs - self.rhs,
            Relation::Eq => (lhs - self.rhs).abs(),
        }
    }

    fn terms(&self) -> impl Iterator<Item = (i64, char)> {
        [(self.a, 'A'), (self.b, 'B')]
            .into_iter()
            .filter(|&(coef, _)| coef != 0)
    }

    /// Symbolic form, e.g. `A + 2B ≤ 14`
    pub fn label(&self) -> String {
        let mut out = String::new();
        for (i, (coef, var)) in self.terms().enumerate() {
            push_sign(&mut out, i, coef);
            match coef.abs() {
                1 => out.push(var),
                c => out.push_str(&format!("{}{}", c, var)),
            }
        }
        if out.is_empty() {
            out.push('0');
        }
        format!("{} {} {}", out, self.relation.symbol(), self.rhs)
    }

    /// Substituted form, e.g. `8 + 2(3) = 14` or `3 ≥ 3`
    pub fn expression(&self, point: Point) -> String {
        let values: Vec<(i64, i64)> = self
            .terms()
            .map(|(coef, var)| (coef, if var == 'A' { point.a } else { point.b }))
            .collect();

        if let [(1, value)] = values.as_slice() {
            return format!("{} {} {}", value, self.relation.symbol(), self.rhs);
        }

        let mut out = String::new();
        for (i, &(coef, value)) in values.iter().enumerate() {
            push_sign(&mut out, i, coef);
            match coef.abs() {
                1 => out.push_str(&value.to_string()),
                c => out.push_str(&format!("{}({})", c, value)),
            }
        }
        if out.is_empty() {
            out.push('0');
        }
        format!("{} = {}", out, self.lhs(point))
    }
}

fn push_sign(out: &mut String, position: usize, coef: i64) {
    match (position, coef < 0) {
        (0, true) => out.push('-'),
        (0, false) => {}
        (_, true) => out.push_str(" - "),
        (_, false) => out.push_str(" + "),
    }
}

/// Objective `Z = a·A + b·B` (maximized)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    pub a: i64,
    pub b: i64,
}

impl Objective {
    #[inline]
    pub fn value(&self, point: Point) -> i64 {
        self.a * point.a + self.b * point.b
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Z = {}A + {}B", self.a, self.b)
    }
}

/// Half-open integer enumeration box, `[lo, hi)` per variable
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchBounds {
    pub a: [i64; 2],
    pub b: [i64; 2],
}

impl SearchBounds {
    pub fn a_range(&self) -> Range<i64> {
        self.a[0]..self.a[1]
    }

    pub fn b_range(&self) -> Range<i64> {
        self.b[0]..self.b[1]
    }

    /// Largest `|A|` and `|B|` in the box (0 for an empty range)
    pub fn max_abs(&self) -> (i128, i128) {
        let max_abs = |r: [i64; 2]| {
            if r[0] >= r[1] {
                0
            } else {
                (r[0] as i128).abs().max((r[1] as i128 - 1).abs())
            }
        };
        (max_abs(self.a), max_abs(self.b))
    }

    /// Number of integer points in the box
    pub fn num_points(&self) -> u64 {
        let span = |r: [i64; 2]| r[1].saturating_sub(r[0]).max(0) as u64;
        span(self.a).saturating_mul(span(self.b))
    }
}

/// Product-mix problem definition
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMixProblem {
    #[serde(default = "default_name")]
    pub name: String,
    pub objective: Objective,
    pub search: SearchBounds,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
}

fn default_name() -> String {
    "Product mix".to_string()
}

impl Default for ProductMixProblem {
    /// Maximize `3A + 4B` subject to the transportation limit and unit bounds
    fn default() -> Self {
        Self {
            name: default_name(),
            objective: Objective {
                a: REVENUE_A,
                b: REVENUE_B,
            },
            search: SearchBounds {
                a: [0, MAX_UNITS],
                b: [MIN_B_UNITS, MAX_UNITS],
            },
            constraints: vec![
                Constraint::new(TRANSPORT_CONSTRAINT, 1, 2, Relation::Le, TRANSPORT_CAPACITY),
                Constraint::new("min_b", 0, 1, Relation::Ge, MIN_B_UNITS),
                Constraint::new("max_a", 1, 0, Relation::Lt, MAX_UNITS),
                Constraint::new("max_b", 0, 1, Relation::Lt, MAX_UNITS),
                Constraint::new("non_negativity", 1, 0, Relation::Ge, 0),
            ],
        }
    }
}

impl ProductMixProblem {
    /// Whether every constraint holds at `point`
    pub fn check_constraints(&self, point: Point) -> bool {
        self.constraints.iter().all(|c| c.is_satisfied(point))
    }

    #[inline]
    pub fn objective_value(&self, point: Point) -> i64 {
        self.objective.value(point)
    }

    pub fn constraint(&self, name: &str) -> Option<&Constraint> {
        self.constraints.iter().find(|c| c.name == name)
    }

    /// Check names, ranges and the enumeration limit
    pub fn validate(&self) -> Result<(), ProblemError> {
        for (i, constraint) in self.constraints.iter().enumerate() {
            if self.constraints[..i].iter().any(|c| c.name == constraint.name) {
                return Err(ProblemError::DuplicateConstraint(constraint.name.clone()));
            }
        }

        for (variable, [lo, hi]) in [('A', self.search.a), ('B', self.search.b)] {
            if lo > hi {
                return Err(ProblemError::InvalidRange { variable, lo, hi });
            }
        }

        let points = self.search.num_points();
        if points > MAX_SEARCH_POINTS {
            return Err(ProblemError::SearchSpaceTooLarge {
                points,
                limit: MAX_SEARCH_POINTS,
            });
        }

        // Worst case of |a·A + b·B| + |rhs| must fit in i64 so that lhs,
        // objective and slack never overflow during enumeration
        let (max_a, max_b) = self.search.max_abs();
        let bound = |a: i64, b: i64, rhs: i64| {
            (a as i128).abs() * max_a + (b as i128).abs() * max_b + (rhs as i128).abs()
        };
        if bound(self.objective.a, self.objective.b, 0) > i64::MAX as i128 {
            return Err(ProblemError::Overflow("objective".to_string()));
        }
        if let Some(c) = self
            .constraints
            .iter()
            .find(|c| bound(c.a, c.b, c.rhs) > i64::MAX as i128)
        {
            return Err(ProblemError::Overflow(c.name.clone()));
        }

        Ok(())
    }

    /// Copy of the problem with one constraint's right-hand side replaced
    pub fn with_rhs(&self, name: &str, rhs: i64) -> Result<Self, ProblemError> {
        let mut problem = self.clone();
        let constraint = problem
            .constraints
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| ProblemError::UnknownConstraint(name.to_string()))?;
        constraint.rhs = rhs;
        Ok(problem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport() -> Constraint {
        Constraint::new("transportation", 1, 2, Relation::Le, 14)
    }

    #[test]
    fn test_constraint_labels() {
        let problem = ProductMixProblem::default();
        let labels: Vec<String> = problem.constraints.iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            vec!["A + 2B ≤ 14", "B ≥ 3", "A < 15", "B < 15", "A ≥ 0"]
        );
    }

    #[test]
    fn test_label_with_negative_and_zero_terms() {
        assert_eq!(Constraint::new("c", -1, 3, Relation::Gt, 2).label(), "-A + 3B > 2");
        assert_eq!(Constraint::new("c", 2, -1, Relation::Eq, 0).label(), "2A - B = 0");
        assert_eq!(Constraint::new("c", 0, 0, Relation::Le, 1).label(), "0 ≤ 1");
    }

    #[test]
    fn test_expression() {
        let point = Point::new(8, 3);
        assert_eq!(transport().expression(point), "8 + 2(3) = 14");
        assert_eq!(
            Constraint::new("min_b", 0, 1, Relation::Ge, 3).expression(point),
            "3 ≥ 3"
        );
    }

    #[test]
    fn test_binding_and_slack() {
        let point = Point::new(8, 3);
        assert!(transport().is_binding(point));
        assert_eq!(transport().slack(point), 0);
        assert_eq!(transport().slack(Point::new(0, 3)), 8);

        let strict = Constraint::new("max_a", 1, 0, Relation::Lt, 8);
        assert!(!strict.is_satisfied(point));
        assert!(!strict.is_binding(point));
    }

    #[test]
    fn test_default_problem_at_optimum() {
        let problem = ProductMixProblem::default();
        let point = Point::new(8, 3);
        assert!(problem.check_constraints(point));
        assert_eq!(problem.objective_value(point), 36);
        assert!(!problem.check_constraints(Point::new(9, 3)));
        assert!(!problem.check_constraints(Point::new(8, 2)));
    }

    #[test]
    fn test_validate_duplicate_names() {
        let mut problem = ProductMixProblem::default();
        problem.constraints.push(transport());
        assert_eq!(
            problem.validate(),
            Err(ProblemError::DuplicateConstraint("transportation".into()))
        );
    }

    #[test]
    fn test_validate_invalid_range() {
        let mut problem = ProductMixProblem::default();
        problem.search.b = [5, 2];
        assert!(matches!(
            problem.validate(),
            Err(ProblemError::InvalidRange { variable: 'B', .. })
        ));
    }

    #[test]
    fn test_validate_search_space_limit() {
        let mut problem = ProductMixProblem::default();
        problem.search.a = [0, 1 << 20];
        problem.search.b = [0, 1 << 20];
        assert!(matches!(
            problem.validate(),
            Err(ProblemError::SearchSpaceTooLarge { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_objective_overflow() {
        let mut problem = ProductMixProblem::default();
        problem.objective = Objective { a: 1 << 62, b: 1 };
        problem.search = SearchBounds {
            a: [0, 3],
            b: [0, 1],
        };
        problem.constraints.clear();
        assert_eq!(
            problem.validate(),
            Err(ProblemError::Overflow("objective".into()))
        );

        problem.search.a = [0, 2];
        assert!(problem.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_constraint_overflow() {
        let mut problem = ProductMixProblem::default();
        problem
            .constraints
            .push(Constraint::new("huge", 1, 0, Relation::Le, i64::MAX));
        assert_eq!(
            problem.validate(),
            Err(ProblemError::Overflow("huge".into()))
        );
    }

    #[test]
    fn test_validate_negative_bounds_use_magnitude() {
        let mut problem = ProductMixProblem::default();
        problem.constraints.clear();
        problem.objective = Objective { a: 1 << 61, b: 0 };
        problem.search.a = [-4, 0];
        assert_eq!(
            problem.validate(),
            Err(ProblemError::Overflow("objective".into()))
        );
    }

    #[test]
    fn test_relation_holds() {
        assert!(Relation::Gt.holds(4, 3));
        assert!(!Relation::Gt.holds(3, 3));
        assert!(Relation::Eq.holds(3, 3));
        assert!(!Relation::Eq.holds(2, 3));
        assert!(Relation::Lt.holds(2, 3));
        assert!(!Relation::Lt.holds(3, 3));
    }

    #[test]
    fn test_greater_than_at_bound() {
        let floor = Constraint::new("floor", 1, 1, Relation::Gt, 5);
        let point = Point::new(2, 3);
        assert!(!floor.is_satisfied(point));
        assert!(!floor.is_binding(point));
        assert_eq!(floor.slack(point), 0);
        assert_eq!(floor.slack(Point::new(4, 3)), 2);
    }

    #[test]
    fn test_equality_binding_and_slack() {
        let balance = Constraint::new("balance", 2, -1, Relation::Eq, 4);
        assert!(balance.is_satisfied(Point::new(3, 2)));
        assert!(balance.is_binding(Point::new(3, 2)));
        assert_eq!(balance.slack(Point::new(3, 2)), 0);

        // 2·1 - 5 = -3, off by 7 on the low side
        assert!(!balance.is_binding(Point::new(1, 5)));
        assert_eq!(balance.slack(Point::new(1, 5)), 7);
        // 2·6 - 0 = 12, off by 8 on the high side
        assert_eq!(balance.slack(Point::new(6, 0)), 8);
    }

    #[test]
    fn test_with_rhs() {
        let problem = ProductMixProblem::default();
        let relaxed = problem.with_rhs("transportation", 16).unwrap();
        assert_eq!(relaxed.constraint("transportation").map(|c| c.rhs), Some(16));
        assert_eq!(problem.constraint("transportation").map(|c| c.rhs), Some(14));

        assert_eq!(
            problem.with_rhs("missing", 1),
            Err(ProblemError::UnknownConstraint("missing".into()))
        );
    }
}
