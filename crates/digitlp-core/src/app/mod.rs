//! Application layer - Use case implementations
//!
//! This module coordinates domain and infrastructure layers to implement use cases.

pub mod analysis;
pub mod report;
pub mod sensitivity;
pub mod solver;
