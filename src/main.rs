//! Frontdesk Server
//!
//! Run with: cargo run
//!
//! # Configuration
//!
//! Loaded from `config.toml` (current directory, user config dir or
//! `/etc/frontdesk/`), overridable per-setting with `FRONTDESK_*`
//! environment variables. See [`frontdesk::config::generate_default_config`]
//! for the full list.
//!
//! - `RUST_LOG`: Log filter (default: frontdesk=info,tower_http=debug)

use frontdesk::api::{serve, AppState};
use frontdesk::config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "frontdesk=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Frontdesk server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::load_default();

    let missing = config.missing_settings();
    if missing.is_empty() {
        tracing::info!("All mandatory settings present");
    } else {
        tracing::warn!(
            settings = ?missing,
            "Mandatory settings missing; the SPA will show the setup notice"
        );
    }

    if config.reports.is_configured() {
        tracing::info!("Usage reports enabled: {}", config.reports.url);
    } else {
        tracing::info!("Usage reports disabled (no admin key configured)");
    }
    if config.assistant.is_configured() {
        tracing::info!("Assistant webhook relay enabled");
    }

    tracing::info!("Serving SPA bundle from {:?}", config.server.ui_dir);

    let state = AppState::new(config);
    serve(state).await?;

    Ok(())
}
