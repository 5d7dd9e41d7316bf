//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod confirm;
pub mod loading;
pub mod modal;
pub mod nav;
pub mod toast;

pub use confirm::ConfirmDialog;
pub use loading::Loading;
pub use modal::Modal;
pub use nav::Nav;
pub use toast::Toast;
