//! Runtime Config Route
//!
//! - GET /api/config - public runtime configuration for the SPA
//!
//! The SPA bootstraps from this response instead of baked-in environment
//! variables. Only public values appear here; the helpdesk API key and the
//! reports admin key stay on the server.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::RuntimeConfigResponse;
use crate::api::state::AppState;

/// GET /api/config
pub async fn runtime_config(State(state): State<Arc<AppState>>) -> Json<RuntimeConfigResponse> {
    let config = &state.config;
    let missing = config.missing_settings();

    Json(RuntimeConfigResponse {
        platform_name: config.branding.platform_name.clone(),
        favicon_url: config.branding.favicon_url.clone(),
        datastore_url: config.datastore.url.clone(),
        datastore_anon_key: config.datastore.anon_key.clone(),
        reports_enabled: state.reports.is_some(),
        assistant_enabled: config.assistant.is_configured(),
        setup_required: !missing.is_empty(),
        missing_settings: missing.into_iter().map(String::from).collect(),
    })
}
