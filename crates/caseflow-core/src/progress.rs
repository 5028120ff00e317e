//! # Case Progress Evaluator
//!
//! Derives per-step display state and the completion percentage from a
//! case's steps, current-step pointer and status.
//!
//! ## Rules
//!
//! Per step, first match wins:
//!
//! | Condition | State |
//! |-----------|-------|
//! | `step_number < current_step` or status is `Completed` | `Completed` |
//! | `step_number == current_step` | `Current` |
//! | otherwise | `Upcoming` |
//!
//! A `Completed` status wins even when the pointer is stale. A `Cancelled`
//! status does not touch step states; it only changes the badge.
//!
//! Percentage is 100 for completed cases, otherwise
//! `round((current_step - 1) * 100 / total_steps)` rounded half up.

use crate::primitives::{FIRST_STEP, MAX_STEPS, PERCENT_SCALE};
use crate::types::{CaseProgressState, CaseStatus, InvalidInput, ProcessStep, StepProgress, StepState};

/// Evaluate a case's progress.
///
/// `current_step` may range from 1 to `steps.len() + 1`; the latter means
/// every step has been passed and the case awaits its completed status.
///
/// # Errors
///
/// `InvalidInput` if `steps` is empty or too long, or `current_step` is
/// outside `1..=steps.len() + 1`. Validation runs before anything else, for
/// every status.
pub fn evaluate(
    steps: &[ProcessStep],
    current_step: u32,
    status: CaseStatus,
) -> Result<CaseProgressState, InvalidInput> {
    validate(steps, current_step)?;

    let step_states = steps
        .iter()
        .map(|step| StepProgress {
            step_number: step.step_number,
            state: step_state(step.step_number, current_step, status),
        })
        .collect();

    Ok(CaseProgressState {
        step_states,
        percent_complete: percent_complete(steps.len(), current_step, status),
    })
}

/// State of one step given the case pointer and status.
#[must_use]
pub fn step_state(step_number: u32, current_step: u32, status: CaseStatus) -> StepState {
    if status == CaseStatus::Completed || step_number < current_step {
        StepState::Completed
    } else if step_number == current_step {
        StepState::Current
    } else {
        StepState::Upcoming
    }
}

/// Completion percentage.
///
/// Expects validated input (`total_steps > 0`, `current_step >= 1`); for
/// anything else it saturates instead of dividing by zero.
#[must_use]
pub fn percent_complete(total_steps: usize, current_step: u32, status: CaseStatus) -> u8 {
    if status == CaseStatus::Completed {
        return PERCENT_SCALE as u8;
    }
    if total_steps == 0 {
        return 0;
    }

    let passed = u64::from(current_step.saturating_sub(FIRST_STEP));
    let total = total_steps as u64;

    // round(passed * 100 / total), half up, integer only
    let scaled = passed.saturating_mul(2 * u64::from(PERCENT_SCALE));
    let rounded = scaled.saturating_add(total) / (2 * total);

    rounded.min(u64::from(PERCENT_SCALE)) as u8
}

fn validate(steps: &[ProcessStep], current_step: u32) -> Result<(), InvalidInput> {
    if steps.is_empty() {
        return Err(InvalidInput::EmptySteps);
    }
    if steps.len() > MAX_STEPS {
        return Err(InvalidInput::TooManySteps(steps.len()));
    }
    if current_step < FIRST_STEP {
        return Err(InvalidInput::NonPositiveStep(i64::from(current_step)));
    }
    if current_step as usize > steps.len() + 1 {
        return Err(InvalidInput::StepOutOfRange {
            current_step,
            total_steps: steps.len(),
        });
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
