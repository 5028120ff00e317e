//! # CLI Command Implementations
//!
//! Each command has a `render_*` function producing its output as a string
//! and a `cmd_*` wrapper that reads input files and prints.

use caseflow_core::{
    CaseProgressState, CaseRecord, CaseStatus, CaseflowError, StepState, paginate,
    primitives::MAX_PAGE_SIZE,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::path::{Path, PathBuf};

// =============================================================================
// FILE INPUT
// =============================================================================

/// Maximum size of a case export file (50 MB).
const MAX_CASE_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), CaseflowError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| CaseflowError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(CaseflowError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Resolve the input path and make sure it is a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, CaseflowError> {
    let canonical = path.canonicalize().map_err(|e| {
        CaseflowError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(CaseflowError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CaseflowError> {
    let path = validate_file_path(path)?;
    validate_file_size(&path, MAX_CASE_FILE_SIZE)?;

    let text = std::fs::read_to_string(&path)
        .map_err(|e| CaseflowError::IoError(format!("Cannot read '{}': {}", path.display(), e)))?;

    serde_json::from_str(&text).map_err(|e| {
        CaseflowError::SerializationError(format!("Invalid JSON in '{}': {}", path.display(), e))
    })
}

/// Read a single case record.
pub fn read_case_file(path: &Path) -> Result<CaseRecord, CaseflowError> {
    let record: CaseRecord = read_json(path)?;
    tracing::debug!(case_id = record.id, steps = record.steps.len(), "Loaded case");
    Ok(record)
}

/// One element of a case export.
///
/// Elements that do not have the case record shape are kept with their
/// decode error so a listing can show them next to the valid cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseEntry {
    Record(CaseRecord),
    Malformed {
        id: Option<u64>,
        title: String,
        error: String,
    },
}

impl CaseEntry {
    /// Decode one array element.
    pub fn from_value(value: serde_json::Value) -> Self {
        let id = value.get("id").and_then(|v| v.as_u64());
        let title = value
            .get("title")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        match serde_json::from_value::<CaseRecord>(value) {
            Ok(record) => CaseEntry::Record(record),
            Err(e) => CaseEntry::Malformed {
                id,
                title,
                error: format!("malformed case record: {}", e),
            },
        }
    }
}

impl From<CaseRecord> for CaseEntry {
    fn from(record: CaseRecord) -> Self {
        CaseEntry::Record(record)
    }
}

/// Read a JSON array of case records.
///
/// Only a file that is not a JSON array fails as a whole; each element is
/// decoded on its own.
pub fn read_cases_file(path: &Path) -> Result<Vec<CaseEntry>, CaseflowError> {
    let values: Vec<serde_json::Value> = read_json(path)?;
    let entries: Vec<CaseEntry> = values.into_iter().map(CaseEntry::from_value).collect();

    let malformed = entries
        .iter()
        .filter(|e| matches!(e, CaseEntry::Malformed { .. }))
        .count();
    tracing::debug!(
        count = entries.len(),
        malformed,
        "Loaded cases from {}",
        path.display()
    );
    Ok(entries)
}

fn to_pretty(value: &serde_json::Value) -> Result<String, CaseflowError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CaseflowError::SerializationError(e.to_string()))
}

fn state_marker(state: StepState) -> &'static str {
    match state {
        StepState::Completed => "[x]",
        StepState::Current => "[>]",
        StepState::Upcoming => "[ ]",
    }
}

// =============================================================================
// PROGRESS COMMAND
// =============================================================================

/// Render step states and completion of a case.
pub fn render_progress(record: &CaseRecord, json_mode: bool) -> Result<String, CaseflowError> {
    let status = record.parse_status()?;
    let progress = record.progress()?;
    let badge = status.badge();

    if json_mode {
        let output = json!({
            "id": record.id,
            "title": record.title,
            "status": status,
            "badge": badge,
            "percentComplete": progress.percent_complete,
            "currentStep": progress.current_step(),
            "stepStates": progress.step_states,
        });
        return to_pretty(&output);
    }

    let mut out = String::new();
    out.push_str(&format!("Case {}: {}\n", record.id, record.title));
    out.push_str(&format!("Status:   {}\n", badge));
    out.push_str(&format!("Progress: {}%\n", progress.percent_complete));
    out.push('\n');
    for (step, evaluated) in record.steps.iter().zip(progress.step_states.iter()) {
        out.push_str(&format!(
            "  {} {} {}\n",
            state_marker(evaluated.state),
            step.step_number,
            step.title
        ));
    }
    Ok(out)
}

/// Show step states and completion of a case.
pub fn cmd_progress(path: &Path, json_mode: bool) -> Result<(), CaseflowError> {
    let record = read_case_file(path)?;
    print!("{}", render_progress(&record, json_mode)?);
    Ok(())
}

// =============================================================================
// TIMELINE COMMAND
// =============================================================================

/// Render the step timeline of a case.
pub fn render_timeline(record: &CaseRecord, json_mode: bool) -> Result<String, CaseflowError> {
    let timeline = record.timeline()?;

    if json_mode {
        let output = json!({
            "id": record.id,
            "title": record.title,
            "summary": timeline.summary(),
            "timeline": timeline,
        });
        return to_pretty(&output);
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{} - {} ({}%) {}\n",
        record.title,
        timeline.summary(),
        timeline.percent_complete,
        timeline.badge
    ));
    for entry in &timeline.entries {
        out.push_str(&format!(
            "\n{} {}. {} ({})\n",
            state_marker(entry.state),
            entry.step_number,
            entry.title,
            entry.state
        ));
        if !entry.description.is_empty() {
            out.push_str(&format!("      {}\n", entry.description));
        }
    }
    Ok(out)
}

/// Show the step timeline of a case.
pub fn cmd_timeline(path: &Path, json_mode: bool) -> Result<(), CaseflowError> {
    let record = read_case_file(path)?;
    print!("{}", render_timeline(&record, json_mode)?);
    Ok(())
}

// =============================================================================
// BADGE COMMAND
// =============================================================================

/// Render the badge of a status tag.
pub fn render_badge(tag: &str, json_mode: bool) -> Result<String, CaseflowError> {
    let status: CaseStatus = tag.parse()?;
    let badge = status.badge();

    if json_mode {
        let output = json!({
            "status": status,
            "label": badge.label,
            "tone": badge.tone,
        });
        return to_pretty(&output);
    }

    Ok(format!("{}\n", badge))
}

/// Show the badge of a status tag.
pub fn cmd_badge(tag: &str, json_mode: bool) -> Result<(), CaseflowError> {
    print!("{}", render_badge(tag, json_mode)?);
    Ok(())
}

// =============================================================================
// LIST COMMAND
// =============================================================================

/// A listed case with its evaluated progress, or the reason it has none.
struct ListRow<'a> {
    id: Option<u64>,
    title: &'a str,
    outcome: Result<(CaseStatus, CaseProgressState), String>,
}

impl<'a> ListRow<'a> {
    fn from_entry(entry: &'a CaseEntry) -> Self {
        match entry {
            CaseEntry::Record(record) => {
                let outcome = record
                    .parse_status()
                    .and_then(|status| record.progress().map(|p| (status, p)))
                    .map_err(|e| e.to_string());
                ListRow {
                    id: Some(record.id),
                    title: &record.title,
                    outcome,
                }
            }
            CaseEntry::Malformed { id, title, error } => ListRow {
                id: *id,
                title,
                outcome: Err(error.clone()),
            },
        }
    }

    fn to_json(&self) -> serde_json::Value {
        match &self.outcome {
            Ok((status, progress)) => json!({
                "id": self.id,
                "title": self.title,
                "status": status,
                "badge": status.badge(),
                "closed": status.is_closed(),
                "percentComplete": progress.percent_complete,
                "currentStep": progress.current_step(),
            }),
            Err(error) => json!({
                "id": self.id,
                "title": self.title,
                "error": error,
            }),
        }
    }

    fn to_text(&self) -> String {
        let id = self.id.map_or_else(|| "?".to_string(), |id| id.to_string());
        match &self.outcome {
            Ok((status, progress)) => format!(
                "#{:<6} {:<32} {:>3}%  {}\n",
                id,
                self.title,
                progress.percent_complete,
                status.badge()
            ),
            Err(error) => format!("#{:<6} {:<32} error: {}\n", id, self.title, error),
        }
    }
}

/// Render one page of cases.
///
/// A case that fails decoding or validation is shown with its error; the
/// rest of the page still renders.
pub fn render_list(
    entries: &[CaseEntry],
    page: usize,
    page_size: usize,
    json_mode: bool,
) -> Result<String, CaseflowError> {
    if page_size > MAX_PAGE_SIZE {
        tracing::warn!(
            "Page size {} exceeds maximum {}, clamping",
            page_size,
            MAX_PAGE_SIZE
        );
    }
    let page = paginate(entries, page, page_size);

    let rows: Vec<ListRow<'_>> = page.items.iter().map(ListRow::from_entry).collect();
    for row in &rows {
        if let Err(e) = &row.outcome {
            tracing::warn!(case_id = row.id, "Skipping progress: {}", e);
        }
    }

    if json_mode {
        let output = json!({
            "page": page.page,
            "pageSize": page.page_size,
            "total": page.total,
            "totalPages": page.total_pages,
            "nextPage": page.next_page(),
            "items": rows.iter().map(ListRow::to_json).collect::<Vec<_>>(),
        });
        return to_pretty(&output);
    }

    let mut out: String = rows.iter().map(ListRow::to_text).collect();
    out.push_str(&format!(
        "\nPage {} of {} ({} cases)\n",
        page.page, page.total_pages, page.total
    ));
    if let Some(next) = page.next_page() {
        out.push_str(&format!("Next: --page {}\n", next));
    }
    Ok(out)
}

/// Show one page of cases.
pub fn cmd_list(
    path: &Path,
    json_mode: bool,
    page: usize,
    page_size: usize,
) -> Result<(), CaseflowError> {
    let records = read_cases_file(path)?;
    print!("{}", render_list(&records, page, page_size, json_mode)?);
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
