//! # Case Timeline
//!
//! Joins step display data with evaluated step states, in input order.

use crate::progress::evaluate;
use crate::status::StatusBadge;
use crate::types::{CaseStatus, InvalidInput, ProcessStep, StepState};
use serde::Serialize;

/// A single row of the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub step_number: u32,
    pub title: String,
    pub description: String,
    pub state: StepState,
}

/// Timeline of a case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub entries: Vec<TimelineEntry>,
    pub status: CaseStatus,
    pub badge: StatusBadge,
    pub percent_complete: u8,
}

impl Timeline {
    /// Evaluate the case and build its timeline.
    pub fn build(
        steps: &[ProcessStep],
        current_step: u32,
        status: CaseStatus,
    ) -> Result<Self, InvalidInput> {
        let progress = evaluate(steps, current_step, status)?;

        let entries = steps
            .iter()
            .zip(progress.step_states.iter())
            .map(|(step, evaluated)| TimelineEntry {
                step_number: step.step_number,
                title: step.title.clone(),
                description: step.description.clone(),
                state: evaluated.state,
            })
            .collect();

        Ok(Self {
            entries,
            status,
            badge: status.badge(),
            percent_complete: progress.percent_complete,
        })
    }

    /// The entry currently in progress, if any.
    #[must_use]
    pub fn current_entry(&self) -> Option<&TimelineEntry> {
        self.entries.iter().find(|e| e.state == StepState::Current)
    }

    /// Total number of steps.
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.entries.len()
    }

    /// Short human summary: "Step 2 of 3", "All 3 steps done" or "Completed".
    #[must_use]
    pub fn summary(&self) -> String {
        if self.status == CaseStatus::Completed {
            return "Completed".to_string();
        }
        match self.current_entry() {
            Some(entry) => {
                let position = self
                    .entries
                    .iter()
                    .position(|e| e.step_number == entry.step_number)
                    .map_or(0, |i| i + 1);
                format!("Step {} of {}", position, self.total_steps())
            }
            None => format!("All {} steps done", self.total_steps()),
        }
    }
}
