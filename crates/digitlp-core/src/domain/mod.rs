//! Domain layer - Pure computational logic
//!
//! This module contains pure functions and algorithms without I/O dependencies.

pub mod digits;
pub mod problem;
pub mod student_id;
pub mod verification;
