//! Prompt construction for the insight generator.
//!
//! Logs are simplified to the analysis-relevant fields (identifiers and
//! free-text descriptions stay out of the prompt) and capped to the first
//! `max_logs` records so large histories cannot blow the request budget.
//! The template asks for a structured markdown analysis in a business-analyst
//! register; the dashboard renders the markdown as-is.

use serde::Serialize;

use crate::model::ProductivityLog;

/// The subset of a log that goes into the prompt's data block.
#[derive(Debug, Serialize)]
struct SimplifiedLog<'a> {
    #[serde(rename = "employeeName")]
    employee_name: &'a str,
    department: &'a str,
    #[serde(rename = "taskCategory")]
    task_category: &'a str,
    #[serde(rename = "taskStatus")]
    task_status: &'a str,
    hours: f64,
    #[serde(rename = "productivityRating")]
    productivity_rating: u8,
    blockers: &'a str,
}

/// Build the full analysis prompt over at most `max_logs` logs.
pub fn build_insight_prompt(logs: &[ProductivityLog], max_logs: usize) -> String {
    let simplified: Vec<SimplifiedLog<'_>> = logs
        .iter()
        .take(max_logs)
        .map(|log| SimplifiedLog {
            employee_name: &log.employee_name,
            department: log.department.as_str(),
            task_category: log.task_category.as_str(),
            task_status: log.task_status.as_str(),
            hours: log.hours,
            productivity_rating: log.productivity_rating,
            blockers: if log.blockers.is_empty() {
                "None"
            } else {
                &log.blockers
            },
        })
        .collect();

    let data = serde_json::to_string_pretty(&simplified).unwrap_or_else(|_| "[]".to_string());

    format!(
        "You are a senior business analyst reviewing productivity logs for a corporate team.\n\
         Based on the following {count} productivity log entries, provide a comprehensive analysis in markdown format.\n\
         \n\
         Your analysis must include:\n\
         1. **Executive Summary:** High-level overview of team performance and business impact\n\
         2. **Productivity Trends:** Key patterns in task completion, time allocation, and department performance\n\
         3. **Blocker Analysis:** Common obstacles and their impact on productivity\n\
         4. **Department Performance:** Identify top-performing and struggling departments with specific metrics\n\
         5. **Employee Insights:** Recognition of high performers and areas where support is needed\n\
         6. **Actionable Recommendations:** 3-4 specific, implementable suggestions for:\n\
         \x20  - Process improvements\n\
         \x20  - Resource allocation\n\
         \x20  - Employee development\n\
         \x20  - Workload balancing\n\
         \n\
         Maintain a strategic, data-driven tone. Be specific with numbers and examples from the data.\n\
         \n\
         Data:\n\
         {data}",
        count = logs.len(),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
