//! CSV export of productivity logs.
//!
//! Matches the dashboard's download format: a fixed seven-column header and
//! one comma-joined row per log. Fields are written as-is without quoting,
//! so a comma inside a task description splits that cell. Known limitation.

use crate::model::ProductivityLog;

/// Column header of every export.
pub const CSV_HEADER: &str = "Date,Employee,ID,Department,Task,Status,Hours";

/// Render the given logs as a CSV document, header included.
///
/// The `Task` column carries the free-text task description. Rows appear in
/// the order the slice provides them. Dates are ISO (`YYYY-MM-DD`); hours
/// keep their full float precision.
pub fn logs_to_csv(logs: &[&ProductivityLog]) -> String {
    let mut out = String::with_capacity(64 * (logs.len() + 1));
    out.push_str(CSV_HEADER);
    out.push('\n');

    for log in logs {
        out.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            log.date,
            log.employee_name,
            log.employee_id,
            log.department,
            log.task_description,
            log.task_status,
            log.hours,
        ));
    }

    out
}

/// Suggested filename for a dated export, e.g. `productivity-logs-2024-01-15.csv`.
pub fn export_filename(date: chrono::NaiveDate) -> String {
    format!("productivity-logs-{date}.csv")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Department, TaskCategory, TaskStatus};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn sample_log() -> ProductivityLog {
        ProductivityLog {
            id: Uuid::new_v4(),
            employee_name: "Amina Yusuf".to_string(),
            employee_id: "EMP-007".to_string(),
            department: Department::AccountsFinance,
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            task_category: TaskCategory::Invoice,
            task_description: "month-end close".to_string(),
            task_status: TaskStatus::InProgress,
            hours: 3.5,
            productivity_rating: 4,
            blockers: String::new(),
            tasks_carried_over: None,
        }
    }

    #[test]
    fn empty_export_is_header_only() {
        assert_eq!(logs_to_csv(&[]), "Date,Employee,ID,Department,Task,Status,Hours\n");
    }

    #[test]
    fn row_uses_display_names_and_iso_date() {
        let log = sample_log();
        let csv = logs_to_csv(&[&log]);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));
        assert_eq!(
            lines.next(),
            Some("2024-01-15,Amina Yusuf,EMP-007,Accounts/Finance,month-end close,In Progress,3.5")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn task_column_carries_the_description_not_the_category() {
        let log = sample_log();
        let csv = logs_to_csv(&[&log]);
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains("month-end close"));
        assert!(!row.contains("Invoice"));
    }

    #[test]
    fn rows_preserve_slice_order() {
        let mut a = sample_log();
        a.employee_name = "First".to_string();
        let mut b = sample_log();
        b.employee_name = "Second".to_string();

        let csv = logs_to_csv(&[&a, &b]);
        let lines: Vec<&str> = csv.lines().collect();
        assert!(lines[1].contains("First"));
        assert!(lines[2].contains("Second"));
    }

    #[test]
    fn filename_embeds_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(export_filename(date), "productivity-logs-2024-01-15.csv");
    }
}
