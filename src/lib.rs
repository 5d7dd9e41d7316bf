//! # Frontdesk
//!
//! Customer-support CRM dashboard - a full-stack Rust application pairing a
//! Leptos single-page app (`frontdesk-ui/`) with this small axum server.
//!
//! ## What the server does
//!
//! - **Serves the SPA bundle** with an `index.html` fallback for
//!   client-side routes
//! - **Hands out runtime config**: the SPA bootstraps from `GET /api/config`
//! - **Trusted proxy**: helpdesk API calls and AI usage reports go through
//!   this process so their keys never reach the browser
//! - **Assistant relay**: forwards assistant-panel messages to the
//!   automation webhook
//!
//! The entity data itself (pipeline stages, contact assignments,
//! attendants, AI chats) lives in a hosted datastore the SPA talks to
//! directly with its public anon key.
//!
//! ## Modules
//!
//! - [`config`]: TOML + environment configuration
//! - [`api`]: REST API server with Axum
//! - [`helpdesk`]: Helpdesk REST client (conversations, messages, contacts)
//! - [`reports`]: AI usage/reporting API client

pub mod api;
pub mod config;
pub mod helpdesk;
pub mod reports;
