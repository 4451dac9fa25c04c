//! Core data types for productivity logging.
//!
//! A [`DailyLogSubmission`] is one form-fill: shared metadata (employee,
//! date, total hours, rating, blockers) plus one or more tasks. Submissions
//! are expanded into task-level [`ProductivityLog`] records, each carrying an
//! equal fractional share of the submission's hours. Logs are immutable once
//! created and are never deleted.
//!
//! Department, category, and status are closed enums — an invalid value is a
//! deserialization error at the boundary, not a runtime surprise downstream.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Enumerated domain values
// ---------------------------------------------------------------------------

/// Department a log belongs to.
///
/// Declaration order is significant: the department rollup breaks
/// completion-rate ties by this order (via a stable sort).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "Data Management")]
    DataManagement,
    #[serde(rename = "Accounts/Finance")]
    AccountsFinance,
    #[serde(rename = "Admin/HR")]
    AdminHr,
    #[serde(rename = "IT")]
    It,
    #[serde(rename = "HSE")]
    Hse,
    Procurement,
    Maintenance,
    Janitorial,
    Inventory,
    #[serde(rename = "Coring/Wellsite")]
    CoringWellsite,
    Iso,
    Environmental,
    Reception,
    #[serde(rename = "CT/Imaging/Gamma")]
    CtImagingGamma,
    Rockshop,
    #[serde(rename = "PVT/GC")]
    PvtGc,
    #[serde(rename = "Scal/Routine")]
    ScalRoutine,
    #[serde(rename = "Business Development")]
    BusinessDevelopment,
    Security,
}

impl Department {
    /// All departments in declaration order.
    pub const ALL: [Department; 19] = [
        Self::DataManagement,
        Self::AccountsFinance,
        Self::AdminHr,
        Self::It,
        Self::Hse,
        Self::Procurement,
        Self::Maintenance,
        Self::Janitorial,
        Self::Inventory,
        Self::CoringWellsite,
        Self::Iso,
        Self::Environmental,
        Self::Reception,
        Self::CtImagingGamma,
        Self::Rockshop,
        Self::PvtGc,
        Self::ScalRoutine,
        Self::BusinessDevelopment,
        Self::Security,
    ];

    /// Human-readable name (matches the serde wire form).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DataManagement => "Data Management",
            Self::AccountsFinance => "Accounts/Finance",
            Self::AdminHr => "Admin/HR",
            Self::It => "IT",
            Self::Hse => "HSE",
            Self::Procurement => "Procurement",
            Self::Maintenance => "Maintenance",
            Self::Janitorial => "Janitorial",
            Self::Inventory => "Inventory",
            Self::CoringWellsite => "Coring/Wellsite",
            Self::Iso => "Iso",
            Self::Environmental => "Environmental",
            Self::Reception => "Reception",
            Self::CtImagingGamma => "CT/Imaging/Gamma",
            Self::Rockshop => "Rockshop",
            Self::PvtGc => "PVT/GC",
            Self::ScalRoutine => "Scal/Routine",
            Self::BusinessDevelopment => "Business Development",
            Self::Security => "Security",
        }
    }

    /// Parse a display name back into a department (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of work a task falls under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskCategory {
    Maintenance,
    #[serde(rename = "Contract/Tender")]
    ContractTender,
    Supervision,
    Inventory,
    Training,
    Reporting,
    #[serde(rename = "IT")]
    It,
    Admin,
    Invoice,
    Procurement,
    #[serde(rename = "House Keeping")]
    HouseKeeping,
    #[serde(rename = "Accounts/Finance")]
    AccountsFinance,
    #[serde(rename = "HR")]
    Hr,
}

impl TaskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Maintenance => "Maintenance",
            Self::ContractTender => "Contract/Tender",
            Self::Supervision => "Supervision",
            Self::Inventory => "Inventory",
            Self::Training => "Training",
            Self::Reporting => "Reporting",
            Self::It => "IT",
            Self::Admin => "Admin",
            Self::Invoice => "Invoice",
            Self::Procurement => "Procurement",
            Self::HouseKeeping => "House Keeping",
            Self::AccountsFinance => "Accounts/Finance",
            Self::Hr => "HR",
        }
    }
}

impl std::fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Completion state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    Complete,
    #[serde(rename = "In Progress")]
    InProgress,
    Incomplete,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Complete => "Complete",
            Self::InProgress => "In Progress",
            Self::Incomplete => "Incomplete",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Log records
// ---------------------------------------------------------------------------

/// One task-level productivity record. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductivityLog {
    pub id: Uuid,
    pub employee_name: String,
    pub employee_id: String,
    pub department: Department,
    /// Calendar date of the submission — no time component.
    pub date: NaiveDate,
    pub task_category: TaskCategory,
    pub task_description: String,
    pub task_status: TaskStatus,
    /// Fractional share of the submission's total hours. Non-negative.
    pub hours: f64,
    /// Self-reported rating, 1–5.
    pub productivity_rating: u8,
    /// Free-text blockers; empty when none were reported.
    #[serde(default)]
    pub blockers: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks_carried_over: Option<String>,
}

/// One task line within a submission form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskItem {
    pub task_description: String,
    pub task_category: TaskCategory,
    pub task_status: TaskStatus,
}

/// One daily form-fill, expanded into task-level logs by [`expand_submission`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyLogSubmission {
    pub employee_name: String,
    pub employee_id: String,
    pub department: Department,
    pub date: NaiveDate,
    /// Total hours worked across all tasks in the submission.
    pub hours: f64,
    pub productivity_rating: u8,
    #[serde(default)]
    pub blockers: String,
    #[serde(default)]
    pub tasks_carried_over: Option<String>,
    pub tasks: Vec<TaskItem>,
}

// ---------------------------------------------------------------------------
// Validation + expansion
// ---------------------------------------------------------------------------

/// A submission rejected before reaching the store. No partial writes occur.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("employee name is required")]
    MissingEmployeeName,
    #[error("employee ID is required")]
    MissingEmployeeId,
    #[error("hours must be between 0 and 24, got {0}")]
    HoursOutOfRange(f64),
    #[error("productivity rating must be between 1 and 5, got {0}")]
    RatingOutOfRange(u8),
    #[error("task {0} is missing a description")]
    MissingTaskDescription(usize),
}

/// Check a submission's required fields.
pub fn validate_submission(submission: &DailyLogSubmission) -> Result<(), ValidationError> {
    if submission.employee_name.trim().is_empty() {
        return Err(ValidationError::MissingEmployeeName);
    }
    if submission.employee_id.trim().is_empty() {
        return Err(ValidationError::MissingEmployeeId);
    }
    if !submission.hours.is_finite() || submission.hours < 0.0 || submission.hours > 24.0 {
        return Err(ValidationError::HoursOutOfRange(submission.hours));
    }
    if !(1..=5).contains(&submission.productivity_rating) {
        return Err(ValidationError::RatingOutOfRange(submission.productivity_rating));
    }
    for (i, task) in submission.tasks.iter().enumerate() {
        if task.task_description.trim().is_empty() {
            return Err(ValidationError::MissingTaskDescription(i + 1));
        }
    }
    Ok(())
}

/// Expand a validated submission into task-level logs.
///
/// A submission covering N tasks yields N logs, each with `hours = total / N`
/// and the submission's shared metadata. Zero tasks yield zero logs — the
/// per-task share is defined as 0 in that case so there is no division by
/// zero.
pub fn expand_submission(
    submission: &DailyLogSubmission,
) -> Result<Vec<ProductivityLog>, ValidationError> {
    validate_submission(submission)?;

    let hours_per_task = if submission.tasks.is_empty() {
        0.0
    } else {
        submission.hours / submission.tasks.len() as f64
    };

    Ok(submission
        .tasks
        .iter()
        .map(|task| ProductivityLog {
            id: Uuid::new_v4(),
            employee_name: submission.employee_name.clone(),
            employee_id: submission.employee_id.clone(),
            department: submission.department,
            date: submission.date,
            task_category: task.task_category,
            task_description: task.task_description.clone(),
            task_status: task.task_status,
            hours: hours_per_task,
            productivity_rating: submission.productivity_rating,
            blockers: submission.blockers.clone(),
            tasks_carried_over: submission.tasks_carried_over.clone(),
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(hours: f64, task_count: usize) -> DailyLogSubmission {
        DailyLogSubmission {
            employee_name: "Amina Yusuf".to_string(),
            employee_id: "E-104".to_string(),
            department: Department::It,
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            hours,
            productivity_rating: 4,
            blockers: String::new(),
            tasks_carried_over: None,
            tasks: (0..task_count)
                .map(|i| TaskItem {
                    task_description: format!("task {i}"),
                    task_category: TaskCategory::Admin,
                    task_status: TaskStatus::Complete,
                })
                .collect(),
        }
    }

    #[test]
    fn expand_splits_hours_evenly() {
        let logs = expand_submission(&submission(8.0, 4)).unwrap();
        assert_eq!(logs.len(), 4);
        for log in &logs {
            assert_eq!(log.hours, 2.0);
            assert_eq!(log.employee_name, "Amina Yusuf");
            assert_eq!(log.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
            assert_eq!(log.productivity_rating, 4);
        }
    }

    #[test]
    fn expand_empty_task_list_yields_no_logs() {
        let logs = expand_submission(&submission(8.0, 0)).unwrap();
        assert!(logs.is_empty());
    }

    #[test]
    fn expand_assigns_unique_ids() {
        let logs = expand_submission(&submission(6.0, 3)).unwrap();
        assert_ne!(logs[0].id, logs[1].id);
        assert_ne!(logs[1].id, logs[2].id);
    }

    #[test]
    fn validation_rejects_blank_name() {
        let mut sub = submission(8.0, 1);
        sub.employee_name = "   ".to_string();
        assert_eq!(
            expand_submission(&sub).unwrap_err(),
            ValidationError::MissingEmployeeName
        );
    }

    #[test]
    fn validation_rejects_out_of_range_hours() {
        let mut sub = submission(25.0, 1);
        assert_eq!(
            expand_submission(&sub).unwrap_err(),
            ValidationError::HoursOutOfRange(25.0)
        );
        sub.hours = -1.0;
        assert!(matches!(
            expand_submission(&sub).unwrap_err(),
            ValidationError::HoursOutOfRange(_)
        ));
    }

    #[test]
    fn validation_rejects_bad_rating() {
        let mut sub = submission(8.0, 1);
        sub.productivity_rating = 0;
        assert_eq!(
            expand_submission(&sub).unwrap_err(),
            ValidationError::RatingOutOfRange(0)
        );
        sub.productivity_rating = 6;
        assert!(expand_submission(&sub).is_err());
    }

    #[test]
    fn validation_rejects_blank_task_description() {
        let mut sub = submission(8.0, 2);
        sub.tasks[1].task_description = String::new();
        assert_eq!(
            expand_submission(&sub).unwrap_err(),
            ValidationError::MissingTaskDescription(2)
        );
    }

    #[test]
    fn department_round_trips_through_serde() {
        let json = serde_json::to_string(&Department::AccountsFinance).unwrap();
        assert_eq!(json, "\"Accounts/Finance\"");
        let back: Department = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Department::AccountsFinance);
    }

    #[test]
    fn department_rejects_unknown_value() {
        let result: Result<Department, _> = serde_json::from_str("\"Marketing\"");
        assert!(result.is_err());
    }

    #[test]
    fn department_parse_is_case_insensitive() {
        assert_eq!(Department::parse("accounts/finance"), Some(Department::AccountsFinance));
        assert_eq!(Department::parse(" IT "), Some(Department::It));
        assert_eq!(Department::parse("Marketing"), None);
    }

    #[test]
    fn status_serializes_with_space() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
    }

    #[test]
    fn log_round_trips_through_serde() {
        let logs = expand_submission(&submission(8.0, 1)).unwrap();
        let json = serde_json::to_string(&logs[0]).unwrap();
        let back: ProductivityLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back.employee_name, logs[0].employee_name);
        assert_eq!(back.task_status, TaskStatus::Complete);
        assert_eq!(back.hours, 8.0);
    }
}
