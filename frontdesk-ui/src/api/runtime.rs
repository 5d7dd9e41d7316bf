//! Runtime Configuration
//!
//! The SPA bootstraps from `GET /api/config` instead of baked-in
//! environment variables. The response is held in a context signal that
//! every component can read.

use gloo_net::http::Request;
use leptos::*;

use super::server_error_message;

/// Public runtime configuration served by the Frontdesk server
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct RuntimeConfig {
    pub platform_name: String,
    #[serde(default)]
    pub favicon_url: Option<String>,
    pub datastore_url: String,
    pub datastore_anon_key: String,
    pub reports_enabled: bool,
    pub assistant_enabled: bool,
    pub setup_required: bool,
    #[serde(default)]
    pub missing_settings: Vec<String>,
}

/// Context handle for the runtime configuration
///
/// `None` until the bootstrap fetch resolves.
#[derive(Clone, Copy)]
pub struct ConfigContext(pub RwSignal<Option<RuntimeConfig>>);

/// Provide the (initially empty) runtime config to the component tree
pub fn provide_runtime_config() -> ConfigContext {
    let context = ConfigContext(create_rw_signal(None));
    provide_context(context);
    context
}

/// Read the runtime config context
pub fn use_runtime_config() -> ConfigContext {
    use_context::<ConfigContext>().expect("ConfigContext not found")
}

/// Fetch the runtime configuration from the server
pub async fn fetch_runtime_config() -> Result<RuntimeConfig, String> {
    let response = Request::get("/api/config")
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
