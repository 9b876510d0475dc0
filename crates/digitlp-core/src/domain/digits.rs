//! Array algorithms over digit sequences
//!
//! All operations leave the input untouched and work for any `Ord + Copy`
//! element type; the report only ever feeds them `u8` digits.

use rustc_hash::FxHashSet;
use serde::Serialize;
use std::hash::Hash;
use thiserror::Error;

/// Digit analysis errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DigitError {
    /// No elements to analyze
    #[error("Cannot analyze an empty sequence")]
    Empty,
}

/// Complete analysis of a digit sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigitAnalysis {
    /// Digits in input order
    pub digits: Vec<u8>,
    /// Largest digit
    pub maximum: u8,
    /// Index of the first occurrence of the largest digit
    pub max_index: usize,
    /// Largest digit strictly below the maximum
    pub second_maximum: Option<u8>,
    /// Distinct digits in order of first occurrence
    pub distinct_digits: Vec<u8>,
    /// Number of distinct digits
    pub distinct_count: usize,
    /// For each position, how many digits are strictly smaller
    pub smaller_counts: Vec<usize>,
}

impl DigitAnalysis {
    /// Run every array algorithm over `digits`
    pub fn from_digits(digits: Vec<u8>) -> Result<Self, DigitError> {
        let (maximum, max_index) = find_max(&digits)?;
        let second_maximum = find_second_max(&digits);
        let distinct_digits = find_distinct(&digits);
        let smaller_counts = count_smaller(&digits);

        Ok(Self {
            distinct_count: distinct_digits.len(),
            digits,
            maximum,
            max_index,
            second_maximum,
            distinct_digits,
            smaller_counts,
        })
    }
}

/// Find the maximum value and the index of its first occurrence
///
/// Single pass, O(n).
pub fn find_max<T: Ord + Copy>(values: &[T]) -> Result<(T, usize), DigitError> {
    let (&first, rest) = values.split_first().ok_or(DigitError::Empty)?;

    let mut maximum = first;
    let mut max_index = 0;
    for (i, &value) in rest.iter().enumerate() {
        if value > maximum {
            maximum = value;
            max_index = i + 1;
        }
    }

    Ok((maximum, max_index))
}

/// Find the largest value strictly below the maximum
///
/// Returns `None` for fewer than two elements or when all elements are equal.
pub fn find_second_max<T: Ord + Copy>(values: &[T]) -> Option<T> {
    if values.len() < 2 {
        return None;
    }

    let mut first: Option<T> = None;
    let mut second: Option<T> = None;

    for &value in values {
        match first {
            None => first = Some(value),
            Some(f) if value > f => {
                second = first;
                first = Some(value);
            }
            Some(f) if value != f && second.is_none_or(|s| value > s) => {
                second = Some(value);
            }
            _ => {}
        }
    }

    second
}

/// Distinct values in order of first occurrence
pub fn find_distinct<T: Eq + Hash + Copy>(values: &[T]) -> Vec<T> {
    let mut seen = FxHashSet::default();
    values.iter().copied().filter(|v| seen.insert(*v)).collect()
}

/// For each position, count the elements strictly smaller than it
///
/// Uses a sorted copy and binary search, O(n log n).
pub fn count_smaller<T: Ord + Copy>(values: &[T]) -> Vec<usize> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    values
        .iter()
        .map(|v| sorted.partition_point(|x| x < v))
        .collect()
}
