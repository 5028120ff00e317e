//! # Case List Store
//!
//! Reducer-style state for a paginated case list with loading and error
//! flags.
//!
//! Fetches are asynchronous on the caller's side. Every fetch is tagged with
//! a request id; only the response matching the latest `FetchStarted` is
//! applied, older ones are dropped as stale. The store holds records only,
//! never derived progress: `progress_of` evaluates on each call.

use crate::primitives::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::record::CaseRecord;
use crate::types::{CaseProgressState, CaseflowError};
use serde::{Deserialize, Serialize};

// =============================================================================
// ACTIONS
// =============================================================================

/// State transitions of the case list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseListAction {
    /// A page fetch was issued.
    FetchStarted { request_id: u64, page: usize },
    /// A page fetch returned.
    FetchSucceeded {
        request_id: u64,
        page: usize,
        items: Vec<CaseRecord>,
        total: usize,
    },
    /// A page fetch failed.
    FetchFailed { request_id: u64, message: String },
    /// A case was created or changed (e.g. after a step transition).
    CaseUpserted(CaseRecord),
    /// A case was deleted.
    CaseRemoved(u64),
    /// The user picked a different page size.
    PageSizeChanged(usize),
    /// The error banner was dismissed.
    ErrorCleared,
}

// =============================================================================
// STATE
// =============================================================================

/// The fetch currently awaited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingFetch {
    pub request_id: u64,
    pub page: usize,
}

/// Paginated case list state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseListState {
    pub items: Vec<CaseRecord>,
    /// 1-based page number of `items`.
    pub page: usize,
    pub page_size: usize,
    /// Total number of cases on the backend.
    pub total: usize,
    pub loading: bool,
    pub error: Option<String>,
    pub pending: Option<PendingFetch>,
}

impl Default for CaseListState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl CaseListState {
    /// Empty state with the given page size (clamped to `1..=MAX_PAGE_SIZE`).
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            page_size: clamp_page_size(page_size),
            total: 0,
            loading: false,
            error: None,
            pending: None,
        }
    }

    /// Apply an action.
    ///
    /// Returns `false` when the action was ignored (stale fetch response).
    pub fn apply(&mut self, action: CaseListAction) -> bool {
        match action {
            CaseListAction::FetchStarted { request_id, page } => {
                self.loading = true;
                self.error = None;
                self.pending = Some(PendingFetch {
                    request_id,
                    page: page.max(1),
                });
                true
            }

            CaseListAction::FetchSucceeded {
                request_id,
                page,
                items,
                total,
            } => {
                if !self.is_pending(request_id) {
                    return false;
                }
                self.items = items;
                self.page = page.max(1);
                self.total = total.max(self.items.len());
                self.loading = false;
                self.pending = None;
                true
            }

            CaseListAction::FetchFailed {
                request_id,
                message,
            } => {
                if !self.is_pending(request_id) {
                    return false;
                }
                self.error = Some(message);
                self.loading = false;
                self.pending = None;
                true
            }

            CaseListAction::CaseUpserted(record) => {
                if let Some(existing) = self.items.iter_mut().find(|c| c.id == record.id) {
                    *existing = record;
                } else {
                    if self.items.len() < self.page_size {
                        self.items.push(record);
                    }
                    self.total = self.total.saturating_add(1);
                }
                true
            }

            CaseListAction::CaseRemoved(id) => {
                let before = self.items.len();
                self.items.retain(|c| c.id != id);
                if self.items.len() != before {
                    self.total = self.total.saturating_sub(1);
                }
                true
            }

            CaseListAction::PageSizeChanged(size) => {
                self.page_size = clamp_page_size(size);
                self.page = 1;
                self.items.truncate(self.page_size);
                // A fetch in flight was sliced for the old page size.
                self.pending = None;
                self.loading = false;
                true
            }

            CaseListAction::ErrorCleared => {
                self.error = None;
                true
            }
        }
    }

    fn is_pending(&self, request_id: u64) -> bool {
        self.pending.is_some_and(|p| p.request_id == request_id)
    }

    /// Number of pages, at least 1.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        total_pages(self.total, self.page_size)
    }

    /// Look up a loaded case.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&CaseRecord> {
        self.items.iter().find(|c| c.id == id)
    }

    /// Evaluate a loaded case's progress.
    pub fn progress_of(&self, id: u64) -> Result<CaseProgressState, CaseflowError> {
        let record = self.get(id).ok_or(CaseflowError::CaseNotFound(id))?;
        Ok(record.progress()?)
    }
}

fn clamp_page_size(size: usize) -> usize {
    size.clamp(1, MAX_PAGE_SIZE)
}

fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

// =============================================================================
// PAGINATION
// =============================================================================

/// One page of an in-memory collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl<T> Page<'_, T> {
    /// Number of the following page, if there is one.
    #[must_use]
    pub fn next_page(&self) -> Option<usize> {
        (self.page < self.total_pages).then_some(self.page + 1)
    }
}

/// Slice `items` into a page.
///
/// `page` is 1-based and clamped to `1..=total_pages`; `page_size` is
/// clamped to `1..=MAX_PAGE_SIZE`.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let page_size = clamp_page_size(page_size);
    let total_pages = total_pages(items.len(), page_size);
    let page = page.clamp(1, total_pages);

    let start = (page - 1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());

    Page {
        items: &items[start..end],
        page,
        page_size,
        total: items.len(),
        total_pages,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CaseStatus, InvalidInput, ProcessStep};

    fn case(id: u64, current_step: u32) -> CaseRecord {
        CaseRecord::new(
            id,
            format!("Case {id}"),
            CaseStatus::InProgress,
            current_step,
            vec![
                ProcessStep::new(1, "Intake", ""),
                ProcessStep::new(2, "Review", ""),
            ],
        )
    }

    #[test]
    fn fetch_lifecycle() {
        let mut state = CaseListState::default();
        assert!(state.apply(CaseListAction::FetchStarted {
            request_id: 1,
            page: 2
        }));
        assert!(state.loading);

        assert!(state.apply(CaseListAction::FetchSucceeded {
            request_id: 1,
            page: 2,
            items: vec![case(11, 1), case(12, 2)],
            total: 12,
        }));
        assert!(!state.loading);
        assert_eq!(state.page, 2);
        assert_eq!(state.items.len(), 2);
        assert_eq!(state.total_pages(), 2);
        assert!(state.pending.is_none());
    }

    #[test]
    fn stale_response_ignored() {
        let mut state = CaseListState::default();
        state.apply(CaseListAction::FetchStarted {
            request_id: 1,
            page: 1,
        });
        state.apply(CaseListAction::FetchStarted {
            request_id: 2,
            page: 2,
        });

        let applied = state.apply(CaseListAction::FetchSucceeded {
            request_id: 1,
            page: 1,
            items: vec![case(1, 1)],
            total: 1,
        });
        assert!(!applied);
        assert!(state.loading);
        assert!(state.items.is_empty());

        assert!(!state.apply(CaseListAction::FetchFailed {
            request_id: 1,
            message: "timeout".to_string(),
        }));
        assert!(state.error.is_none());
    }

    #[test]
    fn fetch_from_before_page_size_change_is_stale() {
        let mut state = CaseListState::new(10);
        state.apply(CaseListAction::FetchStarted {
            request_id: 1,
            page: 3,
        });
        state.apply(CaseListAction::PageSizeChanged(50));
        assert!(!state.loading);
        assert!(state.pending.is_none());

        let applied = state.apply(CaseListAction::FetchSucceeded {
            request_id: 1,
            page: 3,
            items: (21..=30).map(|id| case(id, 1)).collect(),
            total: 30,
        });
        assert!(!applied);
        assert_eq!(state.page, 1);
        assert!(state.items.is_empty());
        assert!(state.page <= state.total_pages());
    }

    #[test]
    fn shrinking_page_size_truncates_items() {
        let mut state = CaseListState::new(5);
        for id in 1..=5 {
            state.apply(CaseListAction::CaseUpserted(case(id, 1)));
        }
        state.apply(CaseListAction::PageSizeChanged(2));

        assert_eq!(state.items.len(), 2);
        assert_eq!(state.get(1).map(|c| c.id), Some(1));
        assert!(state.get(3).is_none());
        assert_eq!(state.total, 5);
        assert_eq!(state.total_pages(), 3);
    }

    #[test]
    fn failure_keeps_items() {
        let mut state = CaseListState::default();
        state.apply(CaseListAction::FetchStarted {
            request_id: 1,
            page: 1,
        });
        state.apply(CaseListAction::FetchSucceeded {
            request_id: 1,
            page: 1,
            items: vec![case(1, 1)],
            total: 1,
        });
        state.apply(CaseListAction::FetchStarted {
            request_id: 2,
            page: 1,
        });
        state.apply(CaseListAction::FetchFailed {
            request_id: 2,
            message: "503".to_string(),
        });

        assert_eq!(state.items.len(), 1);
        assert_eq!(state.error.as_deref(), Some("503"));
        assert!(!state.loading);

        state.apply(CaseListAction::ErrorCleared);
        assert!(state.error.is_none());
    }

    #[test]
    fn upsert_and_remove() {
        let mut state = CaseListState::new(2);
        state.apply(CaseListAction::CaseUpserted(case(1, 1)));
        state.apply(CaseListAction::CaseUpserted(case(2, 1)));
        state.apply(CaseListAction::CaseUpserted(case(3, 1)));
        // Page is full; the third case only counts towards the total.
        assert_eq!(state.items.len(), 2);
        assert_eq!(state.total, 3);

        state.apply(CaseListAction::CaseUpserted(case(1, 2)));
        assert_eq!(state.total, 3);
        assert_eq!(state.get(1).map(|c| c.current_step), Some(2));

        state.apply(CaseListAction::CaseRemoved(1));
        assert_eq!(state.total, 2);
        state.apply(CaseListAction::CaseRemoved(99));
        assert_eq!(state.total, 2);
    }

    #[test]
    fn progress_recomputed_after_upsert() {
        let mut state = CaseListState::default();
        state.apply(CaseListAction::CaseUpserted(case(5, 1)));
        assert_eq!(state.progress_of(5).expect("progress").percent_complete, 0);

        state.apply(CaseListAction::CaseUpserted(case(5, 2)));
        assert_eq!(state.progress_of(5).expect("progress").percent_complete, 50);
    }

    #[test]
    fn progress_of_errors() {
        let mut state = CaseListState::default();
        assert!(matches!(
            state.progress_of(1),
            Err(CaseflowError::CaseNotFound(1))
        ));

        let mut broken = case(2, 1);
        broken.status = "unknown".to_string();
        state.apply(CaseListAction::CaseUpserted(broken));
        assert!(matches!(
            state.progress_of(2),
            Err(CaseflowError::InvalidInput(InvalidInput::UnknownStatus(_)))
        ));
    }

    #[test]
    fn page_size_clamped() {
        let mut state = CaseListState::new(0);
        assert_eq!(state.page_size, 1);
        state.page = 3;
        state.apply(CaseListAction::PageSizeChanged(10_000));
        assert_eq!(state.page_size, MAX_PAGE_SIZE);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn paginate_slices_and_clamps() {
        let items: Vec<u32> = (1..=25).collect();

        let page = paginate(&items, 3, 10);
        assert_eq!(page.items, &[21u32, 22, 23, 24, 25]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.next_page(), None);
        assert_eq!(paginate(&items, 2, 10).next_page(), Some(3));

        let clamped = paginate(&items, 99, 10);
        assert_eq!(clamped.page, 3);

        let first = paginate(&items, 0, 10);
        assert_eq!(first.page, 1);
        assert_eq!(first.items.len(), 10);

        let empty: Vec<u32> = Vec::new();
        let page = paginate(&empty, 1, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
    }
}
