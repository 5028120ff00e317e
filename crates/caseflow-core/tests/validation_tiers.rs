//! # Validation Tier Tests (T0-T3)
//!
//! If ANY tier fails, case progress shown to agents is wrong.
//!
//! ## Tiers
//! - T0: Input Validation
//! - T1: Step State Derivation
//! - T2: Completion Percentage
//! - T3: Record, Timeline and List Integration

use caseflow_core::{
    CaseProgressState, CaseRecord, CaseStatus, InvalidInput, ProcessStep, StepState, evaluate,
};

fn abc() -> Vec<ProcessStep> {
    vec![
        ProcessStep::new(1, "A", "a"),
        ProcessStep::new(2, "B", "b"),
        ProcessStep::new(3, "C", "c"),
    ]
}

fn states(progress: &CaseProgressState) -> Vec<StepState> {
    progress.step_states.iter().map(|s| s.state).collect()
}

// =============================================================================
// TIER T0: INPUT VALIDATION
// =============================================================================

mod t0_input_validation {
    use super::*;

    /// T0.1: Empty step list is rejected.
    #[test]
    fn empty_steps_rejected() {
        let result = evaluate(&[], 1, CaseStatus::InProgress);
        assert!(matches!(result, Err(InvalidInput::EmptySteps)));
    }

    /// T0.2: Pointer zero is rejected.
    #[test]
    fn zero_pointer_rejected() {
        let result = evaluate(&abc(), 0, CaseStatus::New);
        assert!(matches!(result, Err(InvalidInput::NonPositiveStep(0))));
    }

    /// T0.3: Pointer beyond `n + 1` is rejected, also for completed cases.
    #[test]
    fn out_of_range_pointer_rejected() {
        for status in CaseStatus::ALL {
            let result = evaluate(&abc(), 5, status);
            assert!(matches!(
                result,
                Err(InvalidInput::StepOutOfRange {
                    current_step: 5,
                    total_steps: 3
                })
            ));
        }
    }

    /// T0.4: Unknown status tags are rejected.
    #[test]
    fn unknown_status_rejected() {
        let result = "escalated".parse::<CaseStatus>();
        assert!(matches!(result, Err(InvalidInput::UnknownStatus(ref s)) if s == "escalated"));
    }
}

// =============================================================================
// TIER T1: STEP STATE DERIVATION
// =============================================================================

mod t1_step_states {
    use super::*;

    /// T1.1: Pointer on step 2 of 3.
    #[test]
    fn middle_step_current() {
        let progress = evaluate(&abc(), 2, CaseStatus::InProgress).expect("evaluate");
        assert_eq!(
            states(&progress),
            vec![StepState::Completed, StepState::Current, StepState::Upcoming]
        );
    }

    /// T1.2: Completed status wins over an inconsistent pointer.
    #[test]
    fn completed_with_stale_pointer() {
        let progress = evaluate(&abc(), 1, CaseStatus::Completed).expect("evaluate");
        assert_eq!(states(&progress), vec![StepState::Completed; 3]);
    }

    /// T1.3: Cancelled cases keep their pointer-derived states.
    #[test]
    fn cancelled_does_not_complete_steps() {
        let progress = evaluate(&abc(), 2, CaseStatus::Cancelled).expect("evaluate");
        assert_eq!(progress.current_step(), Some(2));
        assert_eq!(progress.count(StepState::Upcoming), 1);
    }

    /// T1.4: Step order follows input order.
    #[test]
    fn step_order_preserved() {
        let progress = evaluate(&abc(), 1, CaseStatus::New).expect("evaluate");
        let numbers: Vec<u32> = progress.step_states.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }
}

// =============================================================================
// TIER T2: COMPLETION PERCENTAGE
// =============================================================================

mod t2_percentage {
    use super::*;

    /// T2.1: One of three steps done rounds to 33.
    #[test]
    fn one_third() {
        let progress = evaluate(&abc(), 2, CaseStatus::InProgress).expect("evaluate");
        assert_eq!(progress.percent_complete, 33);
    }

    /// T2.2: Completed is always 100.
    #[test]
    fn completed_is_full() {
        let progress = evaluate(&abc(), 1, CaseStatus::Completed).expect("evaluate");
        assert_eq!(progress.percent_complete, 100);
    }

    /// T2.3: Single step boundaries.
    #[test]
    fn single_step() {
        let steps = vec![ProcessStep::new(1, "Only", "")];
        let at_start = evaluate(&steps, 1, CaseStatus::New).expect("evaluate");
        let past_end = evaluate(&steps, 2, CaseStatus::InProgress).expect("evaluate");

        assert_eq!(at_start.percent_complete, 0);
        assert_eq!(states(&at_start), vec![StepState::Current]);
        assert_eq!(past_end.percent_complete, 100);
        assert_eq!(states(&past_end), vec![StepState::Completed]);
    }
}

// =============================================================================
// TIER T3: RECORD, TIMELINE AND LIST INTEGRATION
// =============================================================================

mod t3_integration {
    use super::*;
    use caseflow_core::{CaseListAction, CaseListState};

    const CASES_JSON: &str = r#"[
        {"id": 1, "title": "Residency", "status": "new", "currentStep": 1,
         "steps": [{"stepNumber": 1, "title": "Intake"}, {"stepNumber": 2, "title": "Review"}]},
        {"id": 2, "title": "Renewal", "status": "completed", "currentStep": 1,
         "steps": [{"stepNumber": 1, "title": "Intake"}, {"stepNumber": 2, "title": "Review"}]},
        {"id": 3, "title": "Broken", "status": "archived", "currentStep": 1,
         "steps": [{"stepNumber": 1, "title": "Intake"}]}
    ]"#;

    /// T3.1: Backend JSON flows through the record into progress.
    #[test]
    fn records_from_json() {
        let records: Vec<CaseRecord> = serde_json::from_str(CASES_JSON).expect("parse");
        let percents: Vec<Option<u8>> = records
            .iter()
            .map(|r| r.progress().ok().map(|p| p.percent_complete))
            .collect();
        assert_eq!(percents, vec![Some(0), Some(100), None]);
    }

    /// T3.2: Timeline of a completed record.
    #[test]
    fn completed_timeline() {
        let records: Vec<CaseRecord> = serde_json::from_str(CASES_JSON).expect("parse");
        let timeline = records[1].timeline().expect("timeline");
        assert_eq!(timeline.summary(), "Completed");
        assert_eq!(timeline.badge.label, "Completed");
    }

    /// T3.3: Loaded list answers progress queries per case.
    #[test]
    fn list_store_progress() {
        let records: Vec<CaseRecord> = serde_json::from_str(CASES_JSON).expect("parse");
        let mut state = CaseListState::default();
        state.apply(CaseListAction::FetchStarted {
            request_id: 42,
            page: 1,
        });
        state.apply(CaseListAction::FetchSucceeded {
            request_id: 42,
            page: 1,
            items: records,
            total: 3,
        });

        assert_eq!(state.progress_of(2).expect("progress").percent_complete, 100);
        assert!(state.progress_of(3).is_err());
    }
}
