//! Infrastructure layer - I/O and external dependencies
//!
//! This module handles file operations and other external dependencies.

pub mod problem_io;
