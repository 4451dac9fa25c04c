/// Integration tests for the insight pipeline.
///
/// Unit tests for the prompt template, client, and cache live in their own
/// `#[cfg(test)]` blocks. These tests exercise the generation flow up to the
/// network boundary (errors surface before any request is made) and the
/// cache interplay around it. No live API is contacted.
use chrono::NaiveDate;
use uuid::Uuid;

use tally::config::schema::InsightConfig;
use tally::insight::{self, InsightCache, InsightError, MemoryCache, build_insight_prompt};
use tally::model::{Department, ProductivityLog, TaskCategory, TaskStatus};

fn log(name: &str, dept: Department, status: TaskStatus) -> ProductivityLog {
    ProductivityLog {
        id: Uuid::new_v4(),
        employee_name: name.to_string(),
        employee_id: format!("ID-{name}"),
        department: dept,
        date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        task_category: TaskCategory::Admin,
        task_description: "daily work".to_string(),
        task_status: status,
        hours: 5.0,
        productivity_rating: 3,
        blockers: String::new(),
        tasks_carried_over: None,
    }
}

// ===========================================================================
// Prompt construction end-to-end
// ===========================================================================

#[test]
fn prompt_embeds_every_log_as_valid_json() {
    let logs = vec![
        log("Amina", Department::It, TaskStatus::Complete),
        log("Joseph", Department::Hse, TaskStatus::InProgress),
    ];
    let prompt = build_insight_prompt(&logs, 100);

    // The data block between "Data:" and the end must parse as a JSON array.
    let data = prompt.split("Data:\n").nth(1).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(data.trim()).unwrap();
    let entries = parsed.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["employeeName"], "Amina");
    assert_eq!(entries[1]["department"], "HSE");
    assert_eq!(entries[1]["taskStatus"], "In Progress");
    assert_eq!(entries[0]["blockers"], "None");
}

#[test]
fn prompt_respects_the_config_log_cap() {
    let logs: Vec<ProductivityLog> = (0..10)
        .map(|i| {
            log(
                &format!("emp{i}"),
                Department::It,
                TaskStatus::Complete,
            )
        })
        .collect();
    let config = InsightConfig {
        max_logs: 3,
        ..Default::default()
    };

    let prompt = build_insight_prompt(&logs, config.max_logs);
    assert!(prompt.contains("10 productivity log entries"));
    assert!(prompt.contains("emp2"));
    assert!(!prompt.contains("emp3"));
}

// ===========================================================================
// Generation gating (before the network boundary)
// ===========================================================================

#[test]
fn generation_over_no_logs_fails_without_a_request() {
    let config = InsightConfig {
        api_key: "sk-test".to_string(),
        ..Default::default()
    };
    assert!(matches!(
        insight::generate_insights(&[], &config),
        Err(InsightError::NoLogs)
    ));
}

#[test]
fn generation_without_a_key_fails_without_a_request() {
    let logs = vec![log("Amina", Department::It, TaskStatus::Complete)];
    let err = insight::generate_insights(&logs, &InsightConfig::default()).unwrap_err();
    assert!(matches!(err, InsightError::MissingApiKey));
    assert!(err.to_string().contains("TALLY_API_KEY"));
}

// ===========================================================================
// Cache interplay
// ===========================================================================

#[test]
fn failed_generation_leaves_the_cache_untouched() {
    let cache = MemoryCache::default();
    cache.set("previous analysis");

    let logs = vec![log("Amina", Department::It, TaskStatus::Complete)];
    let result = insight::generate_and_cache(&logs, &InsightConfig::default(), &cache);

    assert!(result.is_err());
    assert_eq!(cache.get().as_deref(), Some("previous analysis"));
}

#[test]
fn cache_trait_object_round_trips() {
    let cache = MemoryCache::default();
    let dyn_cache: &dyn InsightCache = &cache;

    assert!(dyn_cache.get().is_none());
    dyn_cache.set("## Weekly Analysis");
    assert_eq!(dyn_cache.get().as_deref(), Some("## Weekly Analysis"));
}
