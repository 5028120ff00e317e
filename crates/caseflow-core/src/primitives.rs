//! # Fixed Limits
//!
//! Compile-time constants shared by the evaluator, the list store and the CLI.

/// The first valid step number. Step numbering is 1-based.
pub const FIRST_STEP: u32 = 1;

/// Scale of `percent_complete`. Percentages are integers in `0..=PERCENT_SCALE`.
pub const PERCENT_SCALE: u32 = 100;

/// Maximum number of process steps a single case may carry.
///
/// Workflows in the service desk are a handful of steps long; anything past
/// this is treated as malformed collaborator data.
pub const MAX_STEPS: usize = 1024;

// =============================================================================
// PAGINATION
// =============================================================================

/// Default number of cases per page in list views.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Upper bound for a requested page size.
pub const MAX_PAGE_SIZE: usize = 100;
