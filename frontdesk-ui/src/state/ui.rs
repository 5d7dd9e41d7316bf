//! UI State
//!
//! Cross-page presentation state: toast messages.

use leptos::*;

/// Toast signals provided to all components
#[derive(Clone, Copy)]
pub struct UiState {
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Provide UI state to the component tree
pub fn provide_ui_state() {
    let state = UiState {
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

/// Read the UI state context
pub fn use_ui_state() -> UiState {
    use_context::<UiState>().expect("UiState not found")
}

impl UiState {
    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}
