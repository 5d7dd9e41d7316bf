//! State Management
//!
//! Reactive application state: the auth session, toast messages and the
//! per-entity stores mirrored from the hosted datastore.

pub mod assistant;
pub mod attendants;
pub mod auth;
pub mod ui;

pub use auth::{datastore_signal, provide_auth_state, use_auth, AuthState};
pub use ui::{provide_ui_state, use_ui_state, UiState};
