//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::api::error::ApiError;
use crate::config::Config;
use crate::helpdesk::HelpdeskClient;
use crate::reports::ReportsClient;

/// Shared application state for all handlers
pub struct AppState {
    /// Full server configuration
    pub config: Arc<Config>,
    /// Upstream HTTP client, shared by all outbound calls
    pub http: reqwest::Client,
    /// Helpdesk client, present once the helpdesk settings are filled in
    pub helpdesk: Option<HelpdeskClient>,
    /// Usage/reporting client, present once the admin key is filled in
    pub reports: Option<ReportsClient>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Build state from configuration, constructing the upstream clients
    /// that have credentials available.
    pub fn new(config: Config) -> Self {
        let http = reqwest::Client::new();

        let helpdesk = config
            .helpdesk
            .is_configured()
            .then(|| HelpdeskClient::new(http.clone(), config.helpdesk.clone()));

        let reports = config
            .reports
            .is_configured()
            .then(|| ReportsClient::new(http.clone(), config.reports.clone()));

        Self {
            config: Arc::new(config),
            http,
            helpdesk,
            reports,
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// The helpdesk client, or a 503 when the settings are absent
    pub fn helpdesk(&self) -> Result<&HelpdeskClient, ApiError> {
        self.helpdesk
            .as_ref()
            .ok_or(ApiError::Unconfigured("helpdesk"))
    }

    /// The reports client, or a 503 when the admin key is absent
    pub fn reports(&self) -> Result<&ReportsClient, ApiError> {
        self.reports
            .as_ref()
            .ok_or(ApiError::Unconfigured("reports"))
    }
}
