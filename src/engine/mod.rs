//! KPI aggregation engine — pure derivations over a log snapshot.
//!
//! Reads a flat collection of [`ProductivityLog`] records and produces:
//! - **Executive summary**: completion rate, hours, durations, utilization
//! - **Department rollup**: per-department performance, sorted by completion
//! - **Employee leaderboard**: top performers by completed tasks
//! - **Daily trend**: task counts over a trailing calendar window
//! - **Status distribution** and **data-quality scores**
//!
//! Every function here is total over well-formed input: ratios define their
//! divide-by-zero cases explicitly, and an empty log set produces an empty
//! (not erroneous) bundle. Nothing is cached — the bundle is recomputed from
//! the full snapshot on every call.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::model::{Department, ProductivityLog, TaskStatus};

// ---------------------------------------------------------------------------
// Filter layer
// ---------------------------------------------------------------------------

/// Criteria narrowing the full log set before aggregation.
///
/// Absent fields impose no constraint. Date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogFilter {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub department: Option<Department>,
    pub employee: Option<String>,
}

impl LogFilter {
    /// Whether a single log satisfies every set criterion.
    pub fn matches(&self, log: &ProductivityLog) -> bool {
        if let Some(start) = self.start
            && log.date < start
        {
            return false;
        }
        if let Some(end) = self.end
            && log.date > end
        {
            return false;
        }
        if let Some(dept) = self.department
            && log.department != dept
        {
            return false;
        }
        if let Some(ref employee) = self.employee
            && log.employee_name != *employee
        {
            return false;
        }
        true
    }

    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Select the subsequence of logs satisfying the filter. Input order is kept,
/// though consumers re-sort as needed and must not rely on it.
pub fn filter_logs<'a>(logs: &'a [ProductivityLog], filter: &LogFilter) -> Vec<&'a ProductivityLog> {
    logs.iter().filter(|log| filter.matches(log)).collect()
}

// ---------------------------------------------------------------------------
// Engine options
// ---------------------------------------------------------------------------

/// Tunables threaded in from configuration.
#[derive(Debug, Clone, Copy)]
pub struct EngineOptions {
    /// Available hours per employee workday, the utilization denominator.
    pub workday_hours: f64,
    /// Maximum leaderboard length.
    pub leaderboard_size: usize,
    /// Trailing calendar window of the daily trend, in days.
    pub trend_days: u32,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            workday_hours: 8.0,
            leaderboard_size: 10,
            trend_days: 7,
        }
    }
}

// ---------------------------------------------------------------------------
// Derived metric types
// ---------------------------------------------------------------------------

/// Headline KPIs over the filtered log set.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutiveSummary {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Percentage in `[0, 100]`; 0 when there are no tasks.
    pub completion_rate: f64,
    pub total_hours: f64,
    pub avg_task_duration: f64,
    /// `"N/A"` when no department has any tasks.
    pub top_performing_dept: String,
    pub least_performing_dept: String,
    pub overall_utilization_rate: f64,
}

/// Per-department performance row.
#[derive(Debug, Clone, Serialize)]
pub struct DepartmentPerformance {
    pub department: Department,
    pub total_tasks: usize,
    pub completion_rate: f64,
    pub avg_task_duration: f64,
    pub utilization_rate: f64,
}

/// One leaderboard row, keyed by employee name.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub completed_tasks: usize,
    pub avg_task_duration: f64,
    pub utilization_rate: f64,
}

/// One day of the trailing trend window.
#[derive(Debug, Clone, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub total_tasks: usize,
    pub completed_tasks: usize,
}

/// Task counts per status. All three statuses are always present.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusDistribution {
    pub complete: usize,
    pub in_progress: usize,
    pub incomplete: usize,
}

impl StatusDistribution {
    /// Sum across the three statuses — equals the filtered task count.
    pub fn total(&self) -> usize {
        self.complete + self.in_progress + self.incomplete
    }
}

/// Form-completeness scores over the filtered log set.
#[derive(Debug, Clone, Serialize)]
pub struct DataQuality {
    /// Percentage of logs with every required field filled. 100 when there
    /// is nothing to check.
    pub form_completeness_score: f64,
    /// Percentage of logs with zero or negative hours. 0 for an empty set.
    pub missing_time_entries_pct: f64,
}

/// Everything the dashboard renders, derived in one pass.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsBundle {
    pub executive_summary: ExecutiveSummary,
    pub departments: Vec<DepartmentPerformance>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub trend: Vec<TrendPoint>,
    pub status_distribution: StatusDistribution,
    pub data_quality: DataQuality,
}

// ---------------------------------------------------------------------------
// Bundle computation
// ---------------------------------------------------------------------------

/// Compute the full metrics bundle from a log snapshot.
///
/// Takes the FULL log set plus the filter because the daily trend
/// deliberately scans unfiltered logs (see [`daily_trend`]); every other
/// rollup works on the filtered subsequence.
pub fn compute_metrics(
    all_logs: &[ProductivityLog],
    filter: &LogFilter,
    today: NaiveDate,
    options: &EngineOptions,
) -> MetricsBundle {
    let filtered = filter_logs(all_logs, filter);

    let departments = department_rollup(&filtered, options.workday_hours);
    let executive_summary = executive_summary(&filtered, &departments, options.workday_hours);

    MetricsBundle {
        executive_summary,
        leaderboard: employee_leaderboard(&filtered, options),
        trend: daily_trend(all_logs, today, options.trend_days),
        status_distribution: status_distribution(&filtered),
        data_quality: data_quality(&filtered),
        departments,
    }
}

// ---------------------------------------------------------------------------
// Utilization
// ---------------------------------------------------------------------------

/// Logged hours as a percentage of theoretical capacity for a scope.
///
/// Capacity is `distinct (employee, date) pairs × workday_hours` — a day with
/// several task-logs counts as one workday for that employee. Unbounded
/// above: logging more than a workday's hours yields over 100%. An empty
/// scope (zero capacity) is 0.
pub fn utilization(logs: &[&ProductivityLog], workday_hours: f64) -> f64 {
    if logs.is_empty() {
        return 0.0;
    }

    let total_hours: f64 = logs.iter().map(|log| log.hours).sum();

    let mut work_days: HashMap<&str, HashSet<NaiveDate>> = HashMap::new();
    for log in logs {
        work_days
            .entry(log.employee_name.as_str())
            .or_default()
            .insert(log.date);
    }
    let total_work_days: usize = work_days.values().map(HashSet::len).sum();

    let available_hours = total_work_days as f64 * workday_hours;
    if available_hours > 0.0 {
        (total_hours / available_hours) * 100.0
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Executive summary
// ---------------------------------------------------------------------------

/// Build the headline KPIs. `departments` must be the already-sorted output
/// of [`department_rollup`] over the same filtered logs.
pub fn executive_summary(
    filtered: &[&ProductivityLog],
    departments: &[DepartmentPerformance],
    workday_hours: f64,
) -> ExecutiveSummary {
    let total_tasks = filtered.len();
    let completed_tasks = filtered
        .iter()
        .filter(|log| log.task_status == TaskStatus::Complete)
        .count();
    let total_hours: f64 = filtered.iter().map(|log| log.hours).sum();

    let completion_rate = if total_tasks > 0 {
        (completed_tasks as f64 / total_tasks as f64) * 100.0
    } else {
        0.0
    };
    let avg_task_duration = if total_tasks > 0 {
        total_hours / total_tasks as f64
    } else {
        0.0
    };

    // Rollup is sorted descending by completion rate and excludes empty
    // departments, so first = top, last = least.
    let top_performing_dept = departments
        .first()
        .map(|d| d.department.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let least_performing_dept = departments
        .last()
        .map(|d| d.department.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    ExecutiveSummary {
        total_tasks,
        completed_tasks,
        completion_rate,
        total_hours,
        avg_task_duration,
        top_performing_dept,
        least_performing_dept,
        overall_utilization_rate: utilization(filtered, workday_hours),
    }
}

// ---------------------------------------------------------------------------
// Department rollup
// ---------------------------------------------------------------------------

/// Per-department performance over the filtered logs.
///
/// Every department in the enumeration is computed, then departments with no
/// tasks are dropped. Sorted descending by completion rate; the stable sort
/// leaves ties in enum declaration order.
pub fn department_rollup(
    filtered: &[&ProductivityLog],
    workday_hours: f64,
) -> Vec<DepartmentPerformance> {
    let mut rows: Vec<DepartmentPerformance> = Department::ALL
        .into_iter()
        .map(|dept| {
            let dept_logs: Vec<&ProductivityLog> = filtered
                .iter()
                .filter(|log| log.department == dept)
                .copied()
                .collect();

            let total_tasks = dept_logs.len();
            let completed = dept_logs
                .iter()
                .filter(|log| log.task_status == TaskStatus::Complete)
                .count();
            let total_hours: f64 = dept_logs.iter().map(|log| log.hours).sum();

            DepartmentPerformance {
                department: dept,
                total_tasks,
                completion_rate: if total_tasks > 0 {
                    (completed as f64 / total_tasks as f64) * 100.0
                } else {
                    0.0
                },
                avg_task_duration: if total_tasks > 0 {
                    total_hours / total_tasks as f64
                } else {
                    0.0
                },
                utilization_rate: utilization(&dept_logs, workday_hours),
            }
        })
        .filter(|row| row.total_tasks > 0)
        .collect();

    rows.sort_by(|a, b| {
        b.completion_rate
            .partial_cmp(&a.completion_rate)
            .unwrap_or(Ordering::Equal)
    });

    rows
}

// ---------------------------------------------------------------------------
// Employee leaderboard
// ---------------------------------------------------------------------------

/// Top employees by completed tasks over the filtered logs.
///
/// Average duration is per log (all statuses), not per completed task.
/// Sorted descending by completed count; the stable sort leaves ties in
/// first-appearance order. Truncated to `options.leaderboard_size`.
pub fn employee_leaderboard(
    filtered: &[&ProductivityLog],
    options: &EngineOptions,
) -> Vec<LeaderboardEntry> {
    struct Acc<'a> {
        completed: usize,
        total_hours: f64,
        logs: Vec<&'a ProductivityLog>,
    }

    // Index map keeps first-appearance order for stable ties.
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Acc<'_>> = HashMap::new();

    for log in filtered {
        let acc = groups.entry(log.employee_name.as_str()).or_insert_with(|| {
            order.push(log.employee_name.as_str());
            Acc {
                completed: 0,
                total_hours: 0.0,
                logs: Vec::new(),
            }
        });
        if log.task_status == TaskStatus::Complete {
            acc.completed += 1;
        }
        acc.total_hours += log.hours;
        acc.logs.push(log);
    }

    let mut entries: Vec<LeaderboardEntry> = order
        .into_iter()
        .map(|name| {
            let acc = &groups[name];
            LeaderboardEntry {
                name: name.to_string(),
                completed_tasks: acc.completed,
                avg_task_duration: acc.total_hours / acc.logs.len() as f64,
                utilization_rate: utilization(&acc.logs, options.workday_hours),
            }
        })
        .collect();

    entries.sort_by(|a, b| b.completed_tasks.cmp(&a.completed_tasks));
    entries.truncate(options.leaderboard_size);
    entries
}

// ---------------------------------------------------------------------------
// Daily trend
// ---------------------------------------------------------------------------

/// Task counts for each of the `days` calendar days ending at `today`,
/// oldest first.
///
/// Scans the FULL unfiltered log set: the trend chart tracks overall activity
/// and does not react to department/employee filters. Preserved from the
/// source system; see DESIGN.md.
pub fn daily_trend(all_logs: &[ProductivityLog], today: NaiveDate, days: u32) -> Vec<TrendPoint> {
    let mut points: Vec<TrendPoint> = (0..days)
        .filter_map(|offset| today.checked_sub_days(Days::new(u64::from(offset))))
        .map(|date| {
            let on_date: Vec<&ProductivityLog> =
                all_logs.iter().filter(|log| log.date == date).collect();
            TrendPoint {
                date,
                total_tasks: on_date.len(),
                completed_tasks: on_date
                    .iter()
                    .filter(|log| log.task_status == TaskStatus::Complete)
                    .count(),
            }
        })
        .collect();

    points.reverse();
    points
}

// ---------------------------------------------------------------------------
// Status distribution
// ---------------------------------------------------------------------------

/// Count filtered logs per status. Statuses with no logs stay zero-filled so
/// all three keys are always present in the output.
pub fn status_distribution(filtered: &[&ProductivityLog]) -> StatusDistribution {
    let mut dist = StatusDistribution::default();
    for log in filtered {
        match log.task_status {
            TaskStatus::Complete => dist.complete += 1,
            TaskStatus::InProgress => dist.in_progress += 1,
            TaskStatus::Incomplete => dist.incomplete += 1,
        }
    }
    dist
}

// ---------------------------------------------------------------------------
// Data quality
// ---------------------------------------------------------------------------

/// Form-completeness scores.
///
/// A log is "complete" when employee name, employee ID, and task description
/// are non-empty, hours are positive, and the rating is positive. An empty
/// set is vacuously 100% complete with 0% missing time.
pub fn data_quality(filtered: &[&ProductivityLog]) -> DataQuality {
    let total = filtered.len();
    if total == 0 {
        return DataQuality {
            form_completeness_score: 100.0,
            missing_time_entries_pct: 0.0,
        };
    }

    let mut complete = 0usize;
    let mut missing_time = 0usize;
    for log in filtered {
        if !log.employee_name.is_empty()
            && !log.employee_id.is_empty()
            && !log.task_description.is_empty()
            && log.hours > 0.0
            && log.productivity_rating > 0
        {
            complete += 1;
        }
        if log.hours <= 0.0 {
            missing_time += 1;
        }
    }

    DataQuality {
        form_completeness_score: (complete as f64 / total as f64) * 100.0,
        missing_time_entries_pct: (missing_time as f64 / total as f64) * 100.0,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskCategory;
    use uuid::Uuid;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn log(name: &str, dept: Department, day: u32, status: TaskStatus, hours: f64) -> ProductivityLog {
        ProductivityLog {
            id: Uuid::new_v4(),
            employee_name: name.to_string(),
            employee_id: format!("id-{name}"),
            department: dept,
            date: date(day),
            task_category: TaskCategory::Admin,
            task_description: "work".to_string(),
            task_status: status,
            hours,
            productivity_rating: 3,
            blockers: String::new(),
            tasks_carried_over: None,
        }
    }

    fn refs(logs: &[ProductivityLog]) -> Vec<&ProductivityLog> {
        logs.iter().collect()
    }

    #[test]
    fn filter_by_date_range_is_inclusive() {
        let logs = vec![
            log("A", Department::It, 1, TaskStatus::Complete, 1.0),
            log("A", Department::It, 5, TaskStatus::Complete, 1.0),
            log("A", Department::It, 9, TaskStatus::Complete, 1.0),
        ];
        let filter = LogFilter {
            start: Some(date(1)),
            end: Some(date(5)),
            ..Default::default()
        };
        assert_eq!(filter_logs(&logs, &filter).len(), 2);
    }

    #[test]
    fn filter_by_department_and_employee() {
        let logs = vec![
            log("A", Department::It, 1, TaskStatus::Complete, 1.0),
            log("B", Department::It, 1, TaskStatus::Complete, 1.0),
            log("A", Department::Hse, 1, TaskStatus::Complete, 1.0),
        ];
        let filter = LogFilter {
            department: Some(Department::It),
            employee: Some("A".to_string()),
            ..Default::default()
        };
        let out = filter_logs(&logs, &filter);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].department, Department::It);
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let logs = vec![
            log("A", Department::It, 1, TaskStatus::Complete, 1.0),
            log("B", Department::Hse, 2, TaskStatus::Incomplete, 2.0),
        ];
        assert!(LogFilter::default().is_empty());
        assert_eq!(filter_logs(&logs, &LogFilter::default()).len(), 2);
    }

    #[test]
    fn utilization_of_empty_scope_is_zero() {
        assert_eq!(utilization(&[], 8.0), 0.0);
    }

    #[test]
    fn utilization_counts_distinct_days_once() {
        // Two logs on the same day: one workday, 8 available hours.
        let logs = vec![
            log("A", Department::It, 1, TaskStatus::Complete, 4.0),
            log("A", Department::It, 1, TaskStatus::Incomplete, 4.0),
        ];
        assert_eq!(utilization(&refs(&logs), 8.0), 100.0);
    }

    #[test]
    fn utilization_can_exceed_one_hundred() {
        let logs = vec![log("A", Department::It, 1, TaskStatus::Complete, 12.0)];
        assert!(utilization(&refs(&logs), 8.0) > 100.0);
    }

    #[test]
    fn utilization_sums_workdays_across_employees() {
        // A logs two days, B logs one: 3 workdays, 24 available hours, 12 logged.
        let logs = vec![
            log("A", Department::It, 1, TaskStatus::Complete, 4.0),
            log("A", Department::It, 2, TaskStatus::Complete, 4.0),
            log("B", Department::It, 1, TaskStatus::Complete, 4.0),
        ];
        assert_eq!(utilization(&refs(&logs), 8.0), 50.0);
    }

    #[test]
    fn summary_on_empty_set_is_all_zeros_and_na() {
        let summary = executive_summary(&[], &[], 8.0);
        assert_eq!(summary.total_tasks, 0);
        assert_eq!(summary.completion_rate, 0.0);
        assert_eq!(summary.avg_task_duration, 0.0);
        assert_eq!(summary.top_performing_dept, "N/A");
        assert_eq!(summary.least_performing_dept, "N/A");
        assert_eq!(summary.overall_utilization_rate, 0.0);
    }

    #[test]
    fn summary_completion_rate_is_one_hundred_when_all_complete() {
        let logs = vec![
            log("A", Department::It, 1, TaskStatus::Complete, 2.0),
            log("B", Department::Hse, 1, TaskStatus::Complete, 3.0),
        ];
        let filtered = refs(&logs);
        let depts = department_rollup(&filtered, 8.0);
        let summary = executive_summary(&filtered, &depts, 8.0);
        assert_eq!(summary.completion_rate, 100.0);
        assert!(summary.completion_rate <= 100.0);
    }

    #[test]
    fn summary_names_top_and_least_departments() {
        let logs = vec![
            log("A", Department::It, 1, TaskStatus::Complete, 1.0),
            log("A", Department::It, 1, TaskStatus::Complete, 1.0),
            log("B", Department::Hse, 1, TaskStatus::Complete, 1.0),
            log("B", Department::Hse, 1, TaskStatus::Incomplete, 1.0),
        ];
        let filtered = refs(&logs);
        let depts = department_rollup(&filtered, 8.0);
        let summary = executive_summary(&filtered, &depts, 8.0);
        assert_eq!(summary.top_performing_dept, "IT");
        assert_eq!(summary.least_performing_dept, "HSE");
    }

    #[test]
    fn rollup_excludes_departments_with_no_tasks() {
        let logs = vec![log("A", Department::It, 1, TaskStatus::Complete, 1.0)];
        let rows = department_rollup(&refs(&logs), 8.0);
        assert_eq!(rows.len(), 1);
        assert!(rows.iter().all(|r| r.total_tasks > 0));
    }

    #[test]
    fn rollup_sorts_descending_with_stable_ties() {
        let logs = vec![
            // HSE: 50% complete
            log("A", Department::Hse, 1, TaskStatus::Complete, 1.0),
            log("A", Department::Hse, 1, TaskStatus::Incomplete, 1.0),
            // Security and IT both 100% — tie broken by enum order (IT first)
            log("B", Department::Security, 1, TaskStatus::Complete, 1.0),
            log("C", Department::It, 1, TaskStatus::Complete, 1.0),
        ];
        let rows = department_rollup(&refs(&logs), 8.0);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].department, Department::It);
        assert_eq!(rows[1].department, Department::Security);
        assert_eq!(rows[2].department, Department::Hse);
    }

    #[test]
    fn leaderboard_sorts_by_completed_and_truncates() {
        let mut logs = Vec::new();
        // 12 employees, employee i completes i tasks
        for i in 1..=12usize {
            for _ in 0..i {
                logs.push(log(&format!("emp{i:02}"), Department::It, 1, TaskStatus::Complete, 1.0));
            }
        }
        let entries = employee_leaderboard(&refs(&logs), &EngineOptions::default());
        assert_eq!(entries.len(), 10);
        assert_eq!(entries[0].name, "emp12");
        assert_eq!(entries[0].completed_tasks, 12);
        for pair in entries.windows(2) {
            assert!(pair[0].completed_tasks >= pair[1].completed_tasks);
        }
    }

    #[test]
    fn leaderboard_avg_duration_spans_all_statuses() {
        let logs = vec![
            log("A", Department::It, 1, TaskStatus::Complete, 4.0),
            log("A", Department::It, 1, TaskStatus::Incomplete, 2.0),
        ];
        let entries = employee_leaderboard(&refs(&logs), &EngineOptions::default());
        assert_eq!(entries[0].completed_tasks, 1);
        assert_eq!(entries[0].avg_task_duration, 3.0);
    }

    #[test]
    fn trend_is_chronological_and_covers_window() {
        let today = date(10);
        let logs = vec![
            log("A", Department::It, 10, TaskStatus::Complete, 1.0),
            log("A", Department::It, 9, TaskStatus::Incomplete, 1.0),
            log("A", Department::It, 1, TaskStatus::Complete, 1.0), // outside window
        ];
        let trend = daily_trend(&logs, today, 7);
        assert_eq!(trend.len(), 7);
        assert_eq!(trend[0].date, date(4));
        assert_eq!(trend[6].date, date(10));
        assert_eq!(trend[6].total_tasks, 1);
        assert_eq!(trend[6].completed_tasks, 1);
        assert_eq!(trend[5].total_tasks, 1);
        assert_eq!(trend[5].completed_tasks, 0);
        assert_eq!(trend[0].total_tasks, 0);
    }

    #[test]
    fn trend_ignores_filters_by_design() {
        let logs = vec![
            log("A", Department::It, 10, TaskStatus::Complete, 1.0),
            log("B", Department::Hse, 10, TaskStatus::Complete, 1.0),
        ];
        let filter = LogFilter {
            department: Some(Department::It),
            ..Default::default()
        };
        let bundle = compute_metrics(&logs, &filter, date(10), &EngineOptions::default());
        // Filtered rollups see one log; the trend still sees both.
        assert_eq!(bundle.executive_summary.total_tasks, 1);
        assert_eq!(bundle.trend.last().unwrap().total_tasks, 2);
    }

    #[test]
    fn status_distribution_zero_fills_and_sums_to_total() {
        let logs = vec![
            log("A", Department::It, 1, TaskStatus::Complete, 1.0),
            log("A", Department::It, 1, TaskStatus::Complete, 1.0),
            log("A", Department::It, 1, TaskStatus::InProgress, 1.0),
        ];
        let dist = status_distribution(&refs(&logs));
        assert_eq!(dist.complete, 2);
        assert_eq!(dist.in_progress, 1);
        assert_eq!(dist.incomplete, 0);
        assert_eq!(dist.total(), 3);
    }

    #[test]
    fn data_quality_on_empty_set_is_vacuously_perfect() {
        let dq = data_quality(&[]);
        assert_eq!(dq.form_completeness_score, 100.0);
        assert_eq!(dq.missing_time_entries_pct, 0.0);
    }

    #[test]
    fn data_quality_flags_zero_hour_logs() {
        let mut incomplete = log("A", Department::It, 1, TaskStatus::Complete, 0.0);
        incomplete.task_description = String::new();
        let logs = vec![
            log("A", Department::It, 1, TaskStatus::Complete, 2.0),
            incomplete,
        ];
        let dq = data_quality(&refs(&logs));
        assert_eq!(dq.form_completeness_score, 50.0);
        assert_eq!(dq.missing_time_entries_pct, 50.0);
    }

    #[test]
    fn end_to_end_bundle_matches_worked_example() {
        // Employee A, one day, one complete + one incomplete task, 4h each.
        let logs = vec![
            log("A", Department::It, 1, TaskStatus::Complete, 4.0),
            log("A", Department::It, 1, TaskStatus::Incomplete, 4.0),
        ];
        let bundle = compute_metrics(&logs, &LogFilter::default(), date(1), &EngineOptions::default());

        let summary = &bundle.executive_summary;
        assert_eq!(summary.completion_rate, 50.0);
        assert_eq!(summary.total_hours, 8.0);
        assert_eq!(summary.avg_task_duration, 4.0);
        assert_eq!(summary.overall_utilization_rate, 100.0);
        assert_eq!(bundle.status_distribution.total(), 2);
        assert_eq!(bundle.leaderboard.len(), 1);
        assert_eq!(bundle.leaderboard[0].completed_tasks, 1);
    }
}
