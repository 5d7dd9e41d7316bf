//! Frontdesk Dashboard
//!
//! Customer-support CRM dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Messaging inbox backed by the helpdesk API
//! - Contact kanban board with drag-and-drop stage assignment
//! - Attendant management
//! - AI assistant chat panel
//! - Token-usage reporting
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It bootstraps from the server's `/api/config` endpoint,
//! talks to the hosted datastore directly with the public anon key, and
//! reaches the helpdesk / reports / assistant surfaces through the server's
//! same-origin `/api` routes.

use leptos::*;

mod api;
mod app;
mod board;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
