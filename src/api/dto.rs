//! API Data Transfer Objects
//!
//! Request/response bodies for the server's own routes. Helpdesk and
//! usage DTOs live with their clients and are passed through as-is.

use serde::{Deserialize, Serialize};

use crate::reports::UsageBucket;

/// GET /health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
    pub version: String,
    pub helpdesk_configured: bool,
    pub reports_configured: bool,
}

/// GET /api/config response: the public runtime configuration the SPA
/// bootstraps from. Secrets (helpdesk API key, reports admin key) are
/// deliberately absent.
#[derive(Debug, Serialize, Deserialize)]
pub struct RuntimeConfigResponse {
    pub platform_name: String,
    #[serde(default)]
    pub favicon_url: Option<String>,
    pub datastore_url: String,
    pub datastore_anon_key: String,
    pub reports_enabled: bool,
    pub assistant_enabled: bool,
    /// True while mandatory settings are missing; the SPA shows a setup
    /// notice instead of the app.
    pub setup_required: bool,
    #[serde(default)]
    pub missing_settings: Vec<String>,
}

/// POST /api/helpdesk/conversations/:id/messages request
#[derive(Debug, Deserialize)]
pub struct SendMessageBody {
    pub content: String,
}

/// GET /api/reports/usage query
#[derive(Debug, Deserialize)]
pub struct UsageQuery {
    /// Month in `YYYY-MM` form
    pub month: String,
}

/// GET /api/reports/usage response
#[derive(Debug, Serialize)]
pub struct UsageReportResponse {
    pub month: String,
    pub start_time: i64,
    pub end_time: i64,
    pub buckets: Vec<UsageBucket>,
}

/// GET /api/helpdesk/contacts query
#[derive(Debug, Deserialize)]
pub struct ContactsQuery {
    #[serde(default = "default_contacts_page")]
    pub page: u32,
}

fn default_contacts_page() -> u32 {
    1
}

/// POST /api/assistant/reply request
#[derive(Debug, Serialize, Deserialize)]
pub struct AssistantReplyRequest {
    pub message: String,
}

/// POST /api/assistant/reply response
#[derive(Debug, Serialize, Deserialize)]
pub struct AssistantReplyResponse {
    pub reply: String,
}
