//! Default inputs and limits

// =============================================================================
// Student ID
// =============================================================================

/// Student ID analyzed when none is given
pub const DEFAULT_STUDENT_ID: &str = "s225187913";

/// Required leading character of a student ID (compared case-insensitively)
pub const STUDENT_ID_PREFIX: char = 's';

/// Start indices used for partial reversal when none are given
pub const DEFAULT_REVERSE_INDICES: [usize; 3] = [1, 3, 5];

// =============================================================================
// Product-mix problem
// =============================================================================

/// Revenue per unit of product A
pub const REVENUE_A: i64 = 3;

/// Revenue per unit of product B
pub const REVENUE_B: i64 = 4;

/// Transportation capacity (A + 2B <= capacity)
pub const TRANSPORT_CAPACITY: i64 = 14;

/// Minimum units of product B
pub const MIN_B_UNITS: i64 = 3;

/// Exclusive upper bound on units of either product
pub const MAX_UNITS: i64 = 15;

/// Name of the capacity constraint in the default problem
pub const TRANSPORT_CONSTRAINT: &str = "transportation";

/// Transportation capacity used by the default what-if scenario
pub const WHAT_IF_CAPACITY: i64 = 16;

/// Upper limit on enumerated points (every feasible point is kept in memory)
pub const MAX_SEARCH_POINTS: u64 = 1 << 22; // 4,194,304

/// Feasible points listed individually in reports and CLI output
pub const MAX_LISTED_POINTS: usize = 100;

// =============================================================================
// Report
// =============================================================================

/// Report file name
pub const REPORT_FILE_NAME: &str = "RESULTS.md";

/// Feasible region image referenced (not generated) by the report
pub const FEASIBLE_REGION_IMAGE: &str = "lp_feasible_region.png";
