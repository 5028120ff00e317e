//! # caseflow-core
//!
//! Case progress derivation for the caseflow service desk - THE LOGIC.
//!
//! A case moves through an ordered list of process steps. This crate turns
//! the case's step list, current-step pointer and overall status into the
//! display state every consumer needs: which steps are done, which one is in
//! progress, how far along the case is and which badge it carries.
//!
//! ## Architectural Constraints
//!
//! - The evaluator is pure: same inputs, same output, no side effects
//! - Integer arithmetic only, no floating point
//! - Nothing is cached; progress is recomputed from the record on every read
//! - NO async, NO I/O, NO logging (callers decide how to report failures)

// =============================================================================
// MODULES
// =============================================================================

pub mod primitives;
pub mod progress;
pub mod record;
pub mod status;
pub mod store;
pub mod timeline;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    CaseProgressState, CaseStatus, CaseflowError, InvalidInput, ProcessStep, StepProgress,
    StepState,
};

// =============================================================================
// RE-EXPORTS: Evaluation
// =============================================================================

pub use progress::{evaluate, percent_complete, step_state};
pub use record::CaseRecord;
pub use status::{StatusBadge, Tone};
pub use timeline::{Timeline, TimelineEntry};

// =============================================================================
// RE-EXPORTS: List Store
// =============================================================================

pub use store::{CaseListAction, CaseListState, Page, paginate};
