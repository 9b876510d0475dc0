//! Student ID string operations
//!
//! IDs are handled as sequences of `char`, so indices count characters
//! rather than bytes.

use crate::constants::STUDENT_ID_PREFIX;
use thiserror::Error;

/// Student ID errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StudentIdError {
    /// ID does not start with the required prefix
    #[error("Student ID must be a string starting with 's'")]
    MissingPrefix,
    /// Start index past the end of the ID
    #[error("Index {index} out of range for string length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Check that the ID starts with `s` or `S`
pub fn validate(student_id: &str) -> Result<(), StudentIdError> {
    match student_id.chars().next() {
        Some(c) if c.eq_ignore_ascii_case(&STUDENT_ID_PREFIX) => Ok(()),
        _ => Err(StudentIdError::MissingPrefix),
    }
}

/// Reverse all characters of the ID
///
/// ```
/// use digitlp_core::domain::student_id::reverse_student_id;
///
/// let reversed = reverse_student_id("s225187913").unwrap();
/// assert_eq!(reversed, vec!['3', '1', '9', '7', '8', '1', '5', '2', '2', 's']);
/// ```
pub fn reverse_student_id(student_id: &str) -> Result<Vec<char>, StudentIdError> {
    validate(student_id)?;
    Ok(student_id.chars().rev().collect())
}

/// Keep `id[..start]` and append `id[start..]` reversed
///
/// ```
/// use digitlp_core::domain::student_id::reverse_student_id_from_index;
///
/// assert_eq!(reverse_student_id_from_index("s123456", 3).unwrap(), "s126543");
/// ```
pub fn reverse_student_id_from_index(
    student_id: &str,
    start_index: usize,
) -> Result<String, StudentIdError> {
    validate(student_id)?;

    let chars: Vec<char> = student_id.chars().collect();
    if start_index >= chars.len() {
        return Err(StudentIdError::IndexOutOfRange {
            index: start_index,
            len: chars.len(),
        });
    }

    let (unchanged, to_reverse) = chars.split_at(start_index);
    Ok(unchanged
        .iter()
        .chain(to_reverse.iter().rev())
        .collect())
}

/// Extract ASCII decimal digits in order
pub fn extract_digits(student_id: &str) -> Vec<u8> {
    student_id
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| d as u8)
        .collect()
}
