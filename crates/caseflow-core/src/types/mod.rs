//! # Core Type Definitions
//!
//! This module contains the shared types of the caseflow core:
//! - Process steps and case status (`ProcessStep`, `CaseStatus`)
//! - Derived progress (`StepState`, `StepProgress`, `CaseProgressState`)
//! - Error types (`InvalidInput`, `CaseflowError`)
//!
//! Derived types are never persisted. They are rebuilt from the case record
//! whenever a consumer asks for them.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// PROCESS STEP
// =============================================================================

/// One ordered stage of a case's workflow.
///
/// Step numbers start at 1 and increase by one per step. The collaborator
/// supplying the steps owns that ordering; the evaluator never re-sorts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStep {
    /// 1-based position of the step in the workflow.
    pub step_number: u32,
    /// Display title.
    pub title: String,
    /// Display description.
    #[serde(default)]
    pub description: String,
}

impl ProcessStep {
    /// Create a new process step.
    #[must_use]
    pub fn new(step_number: u32, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            step_number,
            title: title.into(),
            description: description.into(),
        }
    }
}

// =============================================================================
// CASE STATUS
// =============================================================================

/// Overall lifecycle state of a case.
///
/// Independent of the current-step pointer, but `Completed` overrides it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    New,
    InProgress,
    Completed,
    Cancelled,
}

impl CaseStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [CaseStatus; 4] = [
        CaseStatus::New,
        CaseStatus::InProgress,
        CaseStatus::Completed,
        CaseStatus::Cancelled,
    ];

    /// Wire name of the status, as the backend sends it.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::New => "new",
            CaseStatus::InProgress => "in_progress",
            CaseStatus::Completed => "completed",
            CaseStatus::Cancelled => "cancelled",
        }
    }

    /// Whether the case can no longer move (completed or cancelled).
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self, CaseStatus::Completed | CaseStatus::Cancelled)
    }
}

impl FromStr for CaseStatus {
    type Err = InvalidInput;

    /// Strict parse. Unknown tags are rejected rather than mapped to `New`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(CaseStatus::New),
            "in_progress" => Ok(CaseStatus::InProgress),
            "completed" => Ok(CaseStatus::Completed),
            "cancelled" => Ok(CaseStatus::Cancelled),
            other => Err(InvalidInput::UnknownStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// DERIVED PROGRESS
// =============================================================================

/// Display state of a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    Completed,
    Current,
    Upcoming,
}

impl StepState {
    /// Wire name of the state.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            StepState::Completed => "completed",
            StepState::Current => "current",
            StepState::Upcoming => "upcoming",
        }
    }
}

impl std::fmt::Display for StepState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluated state of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepProgress {
    pub step_number: u32,
    pub state: StepState,
}

/// Derived progress of a whole case.
///
/// Produced by [`crate::evaluate`]; `step_states` follows the input step
/// order and `percent_complete` is always within `0..=100`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseProgressState {
    pub step_states: Vec<StepProgress>,
    pub percent_complete: u8,
}

impl CaseProgressState {
    /// Step number of the step currently in progress, if any.
    #[must_use]
    pub fn current_step(&self) -> Option<u32> {
        self.step_states
            .iter()
            .find(|s| s.state == StepState::Current)
            .map(|s| s.step_number)
    }

    /// Number of steps in the given state.
    #[must_use]
    pub fn count(&self, state: StepState) -> usize {
        self.step_states.iter().filter(|s| s.state == state).count()
    }

    /// Whether every step is completed.
    #[must_use]
    pub fn all_completed(&self) -> bool {
        self.step_states
            .iter()
            .all(|s| s.state == StepState::Completed)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Malformed evaluator input.
///
/// Detected before any computation; nothing here is retryable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    /// The case has no process steps.
    #[error("case has no process steps")]
    EmptySteps,

    /// The case has more steps than `MAX_STEPS`.
    #[error("case has {0} process steps, more than the supported maximum")]
    TooManySteps(usize),

    /// The current step is zero or negative.
    #[error("current step must be positive, got {0}")]
    NonPositiveStep(i64),

    /// The current step is past `total_steps + 1`.
    #[error("current step {current_step} is out of range for {total_steps} steps")]
    StepOutOfRange { current_step: u32, total_steps: usize },

    /// The status tag is not one of the known values.
    #[error("unknown case status '{0}'")]
    UnknownStatus(String),
}

/// Errors that can occur anywhere in caseflow.
///
/// - The evaluator only ever returns `InvalidInput`
/// - I/O, serialization and config errors come from the CLI layer
#[derive(Debug, Error)]
pub enum CaseflowError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    /// The requested case was not found.
    #[error("Case not found: {0}")]
    CaseNotFound(u64),

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(String),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The configuration file or environment is invalid.
    #[error("Config error: {0}")]
    ConfigError(String),
}

// =============================================================================
// TESTS
// =============================================================================
