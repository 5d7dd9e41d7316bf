//! Usage/Reporting API Client
//!
//! Fetches completions token-usage buckets for a time window, authorized
//! with the admin bearer key. No retries and no request timeouts.

use chrono::{TimeZone, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ReportsConfig;

/// Usage/reporting API client
pub struct ReportsClient {
    client: Client,
    config: ReportsConfig,
}

impl ReportsClient {
    /// Create a new client from server configuration
    pub fn new(client: Client, config: ReportsConfig) -> Self {
        Self { client, config }
    }

    /// Fetch completions usage buckets for `[start_time, end_time)` in
    /// unix seconds.
    pub async fn completions_usage(
        &self,
        start_time: i64,
        end_time: i64,
    ) -> Result<Vec<UsageBucket>, ReportsError> {
        let url = format!(
            "{}/v1/organization/usage/completions?start_time={}&end_time={}&limit=30",
            self.config.url.trim_end_matches('/'),
            start_time,
            end_time
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.admin_key)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ReportsError::Unavailable
                } else {
                    ReportsError::Request(e)
                }
            })?;

        if response.status().is_success() {
            let envelope: UsageEnvelope = response.json().await.map_err(ReportsError::Request)?;
            Ok(envelope.data)
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(ReportsError::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }
}

/// Unix-second window `[start, end)` covering a `YYYY-MM` month.
pub fn month_window(month: &str) -> Result<(i64, i64), ReportsError> {
    let invalid = || ReportsError::InvalidMonth(month.to_string());

    let (year_str, month_str) = month.split_once('-').ok_or_else(invalid)?;
    let year: i32 = year_str.parse().map_err(|_| invalid())?;
    let month_no: u32 = month_str.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month_no) {
        return Err(invalid());
    }

    let start = Utc
        .with_ymd_and_hms(year, month_no, 1, 0, 0, 0)
        .single()
        .ok_or_else(invalid)?;
    let end = if month_no == 12 {
        Utc.with_ymd_and_hms(year + 1, 1, 1, 0, 0, 0)
    } else {
        Utc.with_ymd_and_hms(year, month_no + 1, 1, 0, 0, 0)
    }
    .single()
    .ok_or_else(invalid)?;

    Ok((start.timestamp(), end.timestamp()))
}

// ============================================
// Response DTOs
// ============================================

#[derive(Debug, Deserialize)]
struct UsageEnvelope {
    #[serde(default)]
    data: Vec<UsageBucket>,
}

/// A time bucket of usage results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageBucket {
    #[serde(default)]
    pub start_time: i64,
    #[serde(default)]
    pub end_time: i64,
    #[serde(default)]
    pub results: Vec<UsageResult>,
}

/// Token counts within one bucket
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsageResult {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
}

// ============================================
// Errors
// ============================================

/// Errors that can occur when querying the usage API
#[derive(Error, Debug)]
pub enum ReportsError {
    #[error("Usage API unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Usage API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid month `{0}`, expected YYYY-MM")]
    InvalidMonth(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_window_mid_year() {
        let (start, end) = month_window("2025-05").unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap().timestamp());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap().timestamp());
    }

    #[test]
    fn test_month_window_december_rolls_over() {
        let (start, end) = month_window("2024-12").unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap().timestamp());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap().timestamp());
    }

    #[test]
    fn test_month_window_rejects_garbage() {
        assert!(matches!(month_window("2025"), Err(ReportsError::InvalidMonth(_))));
        assert!(matches!(month_window("2025-13"), Err(ReportsError::InvalidMonth(_))));
        assert!(matches!(month_window("05-2025x"), Err(ReportsError::InvalidMonth(_))));
    }

    #[test]
    fn test_usage_envelope_decodes() {
        let raw = r#"{
            "object": "page",
            "data": [{
                "start_time": 1746057600,
                "end_time": 1746144000,
                "results": [{"input_tokens": 120, "output_tokens": 45, "num_model_requests": 3}]
            }]
        }"#;
        let envelope: UsageEnvelope = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.data.len(), 1);
        assert_eq!(envelope.data[0].results[0].input_tokens, 120);
        assert_eq!(envelope.data[0].results[0].output_tokens, 45);
    }
}
