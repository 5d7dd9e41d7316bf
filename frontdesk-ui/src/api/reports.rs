//! Usage Reports (via the server proxy)
//!
//! Token-usage buckets for a month. The admin key stays on the server;
//! the SPA only sees the buckets and aggregates them for display.

use gloo_net::http::Request;

use super::server_error_message;

/// One month of usage buckets as returned by the server
#[derive(Clone, Debug, serde::Deserialize)]
pub struct UsageReport {
    pub month: String,
    pub start_time: i64,
    pub end_time: i64,
    #[serde(default)]
    pub buckets: Vec<UsageBucket>,
}

/// A time bucket of usage results
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct UsageBucket {
    #[serde(default)]
    pub start_time: i64,
    #[serde(default)]
    pub end_time: i64,
    #[serde(default)]
    pub results: Vec<UsageResult>,
}

/// Token counts within one bucket
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
pub struct UsageResult {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
}

/// Fetch the usage report for a `YYYY-MM` month
pub async fn fetch_usage(month: &str) -> Result<UsageReport, String> {
    let response = Request::get("/api/reports/usage")
        .query([("month", month)])
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(server_error_message(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}
