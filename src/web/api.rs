//! JSON API handlers for the web dashboard.
//!
//! Each handler corresponds to an API endpoint and returns a
//! `Response<Cursor<Vec<u8>>>`. Report filters arrive as query parameters
//! (`start`, `end`, `department`, `employee`), percent-encoded.

use std::io::Cursor;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use tiny_http::{Response, StatusCode};

use crate::config;
use crate::engine::{self, LogFilter};
use crate::export;
use crate::insight::{self, FileCache, InsightCache};
use crate::model::{DailyLogSubmission, Department, expand_submission};
use crate::store::LogStore;

use super::{content_type_csv, content_type_json};

// ---------------------------------------------------------------------------
// JSON response types
// ---------------------------------------------------------------------------

/// Health API response.
#[derive(Serialize)]
struct HealthResponse {
    log_count: usize,
    store_path: String,
    config_exists: bool,
    insight_key_set: bool,
    insight_cached: bool,
    model: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a JSON success response.
fn json_response<T: Serialize>(data: &T) -> Result<Response<Cursor<Vec<u8>>>> {
    let body = serde_json::to_string(data).context("failed to serialize JSON response")?;
    Ok(Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(200)))
}

/// 400 response for a client input error.
fn bad_request(message: &str) -> Response<Cursor<Vec<u8>>> {
    let body = serde_json::json!({ "error": message }).to_string();
    Response::from_data(body.into_bytes())
        .with_header(content_type_json())
        .with_status_code(StatusCode(400))
}

/// Decode a percent-encoded query value (`%2F`, `+` for space).
fn url_decode(s: &str) -> String {
    let mut bytes = s.bytes();
    let mut buf = Vec::with_capacity(s.len());
    while let Some(b) = bytes.next() {
        match b {
            b'+' => buf.push(b' '),
            b'%' => {
                let hi = bytes.next();
                let lo = bytes.next();
                if let (Some(hi), Some(lo)) = (hi, lo)
                    && let Some(decoded) = hex_pair(hi, lo)
                {
                    buf.push(decoded);
                } else {
                    buf.push(b'%');
                    buf.extend(hi);
                    buf.extend(lo);
                }
            }
            _ => buf.push(b),
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn hex_pair(hi: u8, lo: u8) -> Option<u8> {
    let hi = (hi as char).to_digit(16)?;
    let lo = (lo as char).to_digit(16)?;
    Some((hi * 16 + lo) as u8)
}

/// Extract a single query parameter value from a URL.
fn query_param(url: &str, name: &str) -> Option<String> {
    url.split('?').nth(1)?.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        if k == name && !v.is_empty() {
            Some(url_decode(v))
        } else {
            None
        }
    })
}

/// Parse the filter query parameters into a [`LogFilter`].
fn parse_filter(url: &str) -> Result<LogFilter> {
    let parse_date = |v: String| {
        NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d")
            .with_context(|| format!("invalid date '{v}' (expected YYYY-MM-DD)"))
    };

    let start = query_param(url, "start").map(parse_date).transpose()?;
    let end = query_param(url, "end").map(parse_date).transpose()?;
    let department = query_param(url, "department")
        .map(|v| Department::parse(&v).with_context(|| format!("unknown department '{v}'")))
        .transpose()?;

    Ok(LogFilter {
        start,
        end,
        department,
        employee: query_param(url, "employee"),
    })
}

// ---------------------------------------------------------------------------
// API Handlers
// ---------------------------------------------------------------------------

/// `GET /api/metrics?start&end&department&employee` — the full metrics bundle.
pub fn get_metrics(url: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let filter = match parse_filter(url) {
        Ok(filter) => filter,
        Err(e) => return Ok(bad_request(&e.to_string())),
    };
    let store = LogStore::open_default()?;
    let logs = store.read_all()?;
    let cfg = config::load();

    let bundle = engine::compute_metrics(
        &logs,
        &filter,
        Local::now().date_naive(),
        &cfg.engine_options(),
    );

    json_response(&bundle)
}

/// `GET /api/logs?start&end&department&employee` — the filtered logs,
/// most recent first.
pub fn get_logs(url: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let filter = match parse_filter(url) {
        Ok(filter) => filter,
        Err(e) => return Ok(bad_request(&e.to_string())),
    };
    let store = LogStore::open_default()?;
    let logs = store.read_all()?;
    let mut filtered = engine::filter_logs(&logs, &filter);
    filtered.sort_by(|a, b| b.date.cmp(&a.date));

    json_response(&filtered)
}

/// `POST /api/logs` — record a daily submission.
///
/// Body is a JSON `DailyLogSubmission`; it is validated, expanded into
/// task-level logs, and appended to the store.
pub fn post_logs(body: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let submission: DailyLogSubmission =
        serde_json::from_str(body).context("submission is not valid JSON")?;

    let logs = match expand_submission(&submission) {
        Ok(logs) => logs,
        Err(e) => {
            let body = serde_json::json!({ "error": e.to_string() }).to_string();
            return Ok(Response::from_data(body.into_bytes())
                .with_header(content_type_json())
                .with_status_code(StatusCode(400)));
        }
    };

    let store = LogStore::open_default()?;
    store.append_all(&logs)?;

    let result = serde_json::json!({
        "added": logs.len(),
        "logs": logs,
    });

    json_response(&result)
}

/// `GET /api/insights` — the cached narrative, 404 when none exists yet.
pub fn get_insights() -> Result<Response<Cursor<Vec<u8>>>> {
    let cache = FileCache::open_default().context("could not determine home directory")?;

    match cache.get() {
        Some(text) => json_response(&serde_json::json!({ "insight": text })),
        None => {
            let body = r#"{"error": "no insight generated yet"}"#;
            Ok(Response::from_data(body.as_bytes().to_vec())
                .with_header(content_type_json())
                .with_status_code(StatusCode(404)))
        }
    }
}

/// `POST /api/insights` — generate a fresh narrative over all logs and cache it.
pub fn post_insights() -> Result<Response<Cursor<Vec<u8>>>> {
    let store = LogStore::open_default()?;
    let logs = store.read_all()?;
    let cfg = config::load();

    let cache = FileCache::open_default().context("could not determine home directory")?;
    let text = insight::generate_and_cache(&logs, &cfg.insight, &cache)?;

    json_response(&serde_json::json!({ "insight": text }))
}

/// `GET /api/export.csv?start&end&department&employee` — CSV download.
pub fn get_export_csv(url: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let filter = match parse_filter(url) {
        Ok(filter) => filter,
        Err(e) => return Ok(bad_request(&e.to_string())),
    };
    let store = LogStore::open_default()?;
    let logs = store.read_all()?;
    let filtered = engine::filter_logs(&logs, &filter);
    let csv = export::logs_to_csv(&filtered);

    let filename = export::export_filename(Local::now().date_naive());
    let disposition = tiny_http::Header::from_bytes(
        "Content-Disposition",
        format!("attachment; filename=\"{filename}\""),
    )
    .map_err(|_| anyhow::anyhow!("invalid content-disposition header"))?;

    Ok(Response::from_data(csv.into_bytes())
        .with_header(content_type_csv())
        .with_header(disposition)
        .with_status_code(StatusCode(200)))
}

/// `GET /api/health` — system health summary.
pub fn get_health() -> Result<Response<Cursor<Vec<u8>>>> {
    let cfg = config::load();
    let config_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);

    let store = LogStore::open_default()?;
    let log_count = store.read_all().map(|logs| logs.len()).unwrap_or(0);

    let insight_cached = FileCache::open_default()
        .map(|c| c.get().is_some())
        .unwrap_or(false);

    let resp = HealthResponse {
        log_count,
        store_path: store.path().display().to_string(),
        config_exists,
        insight_key_set: !cfg.insight.api_key.trim().is_empty(),
        insight_cached,
        model: cfg.insight.model,
    };

    json_response(&resp)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_param_extracts_value() {
        assert_eq!(
            query_param("/api/metrics?start=2024-01-01", "start"),
            Some("2024-01-01".to_string())
        );
        assert_eq!(
            query_param("/api/metrics?foo=bar&employee=Amina", "employee"),
            Some("Amina".to_string())
        );
    }

    #[test]
    fn query_param_returns_none_for_missing_or_empty() {
        assert_eq!(query_param("/api/metrics", "start"), None);
        assert_eq!(query_param("/api/metrics?start=", "start"), None);
    }

    #[test]
    fn url_decode_handles_percent_and_plus() {
        assert_eq!(url_decode("Accounts%2FFinance"), "Accounts/Finance");
        assert_eq!(url_decode("Amina+Yusuf"), "Amina Yusuf");
        assert_eq!(url_decode("plain"), "plain");
    }

    #[test]
    fn url_decode_leaves_bad_escapes_alone() {
        assert_eq!(url_decode("50%"), "50%");
        assert_eq!(url_decode("a%zz"), "a%zz");
    }

    #[test]
    fn parse_filter_reads_all_params() {
        let filter =
            parse_filter("/api/metrics?start=2024-01-01&end=2024-01-31&department=IT&employee=Joe")
                .unwrap();
        assert_eq!(filter.start, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(filter.end, NaiveDate::from_ymd_opt(2024, 1, 31));
        assert_eq!(filter.department, Some(Department::It));
        assert_eq!(filter.employee.as_deref(), Some("Joe"));
    }

    #[test]
    fn parse_filter_rejects_bad_date() {
        assert!(parse_filter("/api/metrics?start=Jan-1").is_err());
    }

    #[test]
    fn parse_filter_rejects_unknown_department() {
        assert!(parse_filter("/api/metrics?department=Warp+Drive").is_err());
    }

    #[test]
    fn bad_filter_params_answer_with_400_not_500() {
        let resp = get_metrics("/api/metrics?start=Jan-1").unwrap();
        assert_eq!(resp.status_code().0, 400);

        let resp = get_logs("/api/logs?department=Warp+Drive").unwrap();
        assert_eq!(resp.status_code().0, 400);

        let resp = get_export_csv("/api/export.csv?end=2024-13-99").unwrap();
        assert_eq!(resp.status_code().0, 400);
    }

    #[test]
    fn health_response_serializes() {
        let resp = HealthResponse {
            log_count: 12,
            store_path: "/home/user/.tally/logs.jsonl".to_string(),
            config_exists: true,
            insight_key_set: false,
            insight_cached: false,
            model: "claude-3-5-sonnet-20241022".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"log_count\":12"));
        assert!(json.contains("\"insight_key_set\":false"));
    }
}
