//! Student ID digit analysis workflow

use crate::domain::digits::{DigitAnalysis, DigitError};
use crate::domain::student_id::extract_digits;
use log::debug;

/// Extract the digits of `student_id` and run every array algorithm on them
///
/// The ID prefix is not validated; any string with at least one ASCII digit
/// can be analyzed.
pub fn analyze_student_id(student_id: &str) -> Result<DigitAnalysis, DigitError> {
    let digits = extract_digits(student_id);
    debug!("Extracted {} digit(s) from {:?}", digits.len(), student_id);
    DigitAnalysis::from_digits(digits)
}
