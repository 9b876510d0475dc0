//! digitlp-core - Student ID digit analysis and product-mix integer optimization
//!
//! This crate provides functionality to:
//! - Reverse and slice student IDs, and extract their digits
//! - Analyze digit arrays (maximum, second maximum, distinct values, smaller counts)
//! - Solve a two-product integer linear program by exhaustive enumeration
//! - Render the results as a Markdown report

pub mod constants;
pub mod domain;
pub mod infra;
pub mod app;

// Re-export commonly used types
pub use app::analysis::analyze_student_id;
pub use app::report::{Report, build_report};
pub use app::sensitivity::{SensitivityReport, WhatIf, sensitivity_analysis};
pub use app::solver::{Solution, SolveError, brute_force_solve, brute_force_solve_parallel};
pub use domain::digits::DigitAnalysis;
pub use domain::problem::{Constraint, Point, ProductMixProblem, Relation};
pub use domain::verification::{ConstraintCheck, verify_constraints};
