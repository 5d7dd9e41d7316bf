//! AI usage/reporting integration
//!
//! Queries the provider's organization usage API for token-usage buckets.
//! The admin bearer key lives only in server configuration; the SPA gets
//! the buckets through `GET /api/reports/usage` and aggregates them itself.

pub mod client;

pub use client::{month_window, ReportsClient, ReportsError, UsageBucket, UsageResult};
