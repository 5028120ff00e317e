//! # Status Badges
//!
//! Label and tone shown next to a case for each status.
//!
//! The lookup is an exhaustive match over [`CaseStatus`]. There is no
//! fallback badge: an unknown status tag never gets this far because
//! parsing it already failed with `InvalidInput::UnknownStatus`.

use crate::types::CaseStatus;
use serde::{Deserialize, Serialize};

/// Visual tone of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Info,
    Warning,
    Success,
    Danger,
}

impl Tone {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Info => "info",
            Tone::Warning => "warning",
            Tone::Success => "success",
            Tone::Danger => "danger",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display configuration of a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StatusBadge {
    pub label: &'static str,
    pub tone: Tone,
}

impl CaseStatus {
    /// Badge for this status.
    #[must_use]
    pub fn badge(&self) -> StatusBadge {
        let (label, tone) = match self {
            CaseStatus::New => ("New", Tone::Info),
            CaseStatus::InProgress => ("In Progress", Tone::Warning),
            CaseStatus::Completed => ("Completed", Tone::Success),
            CaseStatus::Cancelled => ("Cancelled", Tone::Danger),
        };
        StatusBadge { label, tone }
    }
}

impl std::fmt::Display for StatusBadge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.tone, self.label)
    }
}
