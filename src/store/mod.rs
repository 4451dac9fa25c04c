//! Append-only JSONL store for productivity logs.
//!
//! One log record per line at `~/.tally/logs.jsonl`. Records are never
//! mutated or deleted; concurrent submitters are serialized by the
//! append-only file semantics. A missing file means "no submissions yet"
//! and reads back as an empty list; any other transport failure surfaces
//! as a distinct [`StoreError`] rather than being swallowed.

use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::ProductivityLog;

/// Failure talking to the log store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("log store unavailable at {path}: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode log record: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("could not determine home directory for the log store")]
    NoHome,
}

/// Handle to a JSONL log file.
#[derive(Debug, Clone)]
pub struct LogStore {
    path: PathBuf,
}

impl LogStore {
    /// Open the default store at `~/.tally/logs.jsonl`.
    pub fn open_default() -> Result<Self, StoreError> {
        Ok(Self {
            path: default_log_path().ok_or(StoreError::NoHome)?,
        })
    }

    /// Open a store at an explicit path (tests).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file exists (no file = no submissions yet).
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Append a single log record.
    pub fn append(&self, log: &ProductivityLog) -> Result<(), StoreError> {
        self.append_all(std::slice::from_ref(log))
    }

    /// Append a batch of log records (one expanded submission).
    ///
    /// All lines are written through one handle so an expanded submission
    /// lands contiguously.
    pub fn append_all(&self, logs: &[ProductivityLog]) -> Result<(), StoreError> {
        if logs.is_empty() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            create_dir_all(parent).map_err(|source| StoreError::Unavailable {
                path: self.path.clone(),
                source,
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| StoreError::Unavailable {
                path: self.path.clone(),
                source,
            })?;

        for log in logs {
            let json = serde_json::to_string(log)?;
            writeln!(file, "{json}").map_err(|source| StoreError::Unavailable {
                path: self.path.clone(),
                source,
            })?;
        }

        Ok(())
    }

    /// Read every log record in the store.
    ///
    /// Malformed lines are silently skipped so one bad record cannot take
    /// down every report. A missing file reads as an empty list.
    pub fn read_all(&self) -> Result<Vec<ProductivityLog>, StoreError> {
        let file = match fs::File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Unavailable {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let reader = BufReader::new(file);
        Ok(reader
            .lines()
            .map_while(Result::ok)
            .filter_map(|line| serde_json::from_str::<ProductivityLog>(&line).ok())
            .collect())
    }
}

/// Default path of the log file: `~/.tally/logs.jsonl`.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".tally").join("logs.jsonl"))
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

    fn sample_log(name: &str) -> ProductivityLog {
        ProductivityLog {
            id: Uuid::new_v4(),
            employee_name: name.to_string(),
            employee_id: "E-1".to_string(),
            department: Department::It,
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            task_category: TaskCategory::Admin,
            task_description: "ticket triage".to_string(),
            task_status: TaskStatus::Complete,
            hours: 4.0,
            productivity_rating: 3,
            blockers: String::new(),
            tasks_carried_over: None,
        }
    }

    fn temp_store(name: &str) -> LogStore {
        let path = std::env::temp_dir()
            .join("tally-store-tests")
            .join(format!("{name}-{}.jsonl", Uuid::new_v4()));
        LogStore::at(path)
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let store = temp_store("missing");
        assert!(!store.exists());
        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn append_then_read_round_trips() {
        let store = temp_store("roundtrip");
        store.append(&sample_log("A")).unwrap();
        store.append(&sample_log("B")).unwrap();

        let logs = store.read_all().unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].employee_name, "A");
        assert_eq!(logs[1].employee_name, "B");

        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn append_all_writes_batch_in_order() {
        let store = temp_store("batch");
        let batch = vec![sample_log("A"), sample_log("B"), sample_log("C")];
        store.append_all(&batch).unwrap();

        let logs = store.read_all().unwrap();
        assert_eq!(logs.len(), 3);
        assert_eq!(logs[2].employee_name, "C");

        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let store = temp_store("malformed");
        store.append(&sample_log("A")).unwrap();
        {
            let mut file = OpenOptions::new()
                .append(true)
                .open(store.path())
                .unwrap();
            writeln!(file, "{{not json").unwrap();
        }
        store.append(&sample_log("B")).unwrap();

        let logs = store.read_all().unwrap();
        assert_eq!(logs.len(), 2);

        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn append_empty_batch_is_a_no_op() {
        let store = temp_store("noop");
        store.append_all(&[]).unwrap();
        assert!(!store.exists());
    }
}
