//! # Case Record
//!
//! A case as the backend hands it over: raw status tag and raw step pointer,
//! not yet validated. `progress()` and `timeline()` validate and evaluate on
//! every call.

use crate::progress::evaluate;
use crate::timeline::Timeline;
use crate::types::{CaseProgressState, CaseStatus, InvalidInput, ProcessStep};
use serde::{Deserialize, Serialize};

/// A case record supplied by the backend collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    /// Raw status tag, e.g. `"in_progress"`.
    pub status: String,
    /// Raw step pointer. May be zero or negative in bad data.
    pub current_step: i64,
    pub steps: Vec<ProcessStep>,
}

impl CaseRecord {
    /// Create a record from already-typed parts.
    #[must_use]
    pub fn new(
        id: u64,
        title: impl Into<String>,
        status: CaseStatus,
        current_step: u32,
        steps: Vec<ProcessStep>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            status: status.as_str().to_string(),
            current_step: i64::from(current_step),
            steps,
        }
    }

    /// Parse the raw status tag.
    pub fn parse_status(&self) -> Result<CaseStatus, InvalidInput> {
        self.status.parse()
    }

    /// Validate the raw step pointer.
    ///
    /// Values above `u32::MAX` are reported as out of range for this case.
    pub fn parse_current_step(&self) -> Result<u32, InvalidInput> {
        if self.current_step < 1 {
            return Err(InvalidInput::NonPositiveStep(self.current_step));
        }
        u32::try_from(self.current_step).map_err(|_| InvalidInput::StepOutOfRange {
            current_step: u32::MAX,
            total_steps: self.steps.len(),
        })
    }

    /// Evaluate this case's progress.
    pub fn progress(&self) -> Result<CaseProgressState, InvalidInput> {
        let (current_step, status) = self.validated()?;
        evaluate(&self.steps, current_step, status)
    }

    /// Build this case's timeline.
    pub fn timeline(&self) -> Result<Timeline, InvalidInput> {
        let (current_step, status) = self.validated()?;
        Timeline::build(&self.steps, current_step, status)
    }

    fn validated(&self) -> Result<(u32, CaseStatus), InvalidInput> {
        if self.steps.is_empty() {
            return Err(InvalidInput::EmptySteps);
        }
        let current_step = self.parse_current_step()?;
        let status = self.parse_status()?;
        Ok((current_step, status))
    }
}
