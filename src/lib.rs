//! tally — productivity log tracking with KPI reports and team insights.
//!
//! Logs land in an append-only JSONL store (`~/.tally/logs.jsonl`); the
//! [`engine`] derives every dashboard metric from a snapshot of that store
//! in one pass. Reporting is available from the CLI (`cli`) and an embedded
//! web dashboard (`web`); the [`insight`] module turns the logs into a
//! narrative analysis via an outbound messages-API call.

pub mod cli;
pub mod config;
pub mod engine;
pub mod export;
pub mod insight;
pub mod model;
pub mod store;
pub mod web;
