//! Auth Session State
//!
//! The session is an explicit context value with a defined lifecycle:
//! initialized from `localStorage` when the provider mounts, changed only
//! through `sign_in`/`sign_out`, observed by subscribers through the
//! session signal. No ambient singleton.

use leptos::*;

use crate::api::datastore::{self, Datastore, Session};
use crate::api::runtime::{use_runtime_config, RuntimeConfig};

const STORAGE_KEY: &str = "frontdesk_session";

/// Auth session provided to all components
#[derive(Clone, Copy)]
pub struct AuthState {
    /// Current session, `None` when signed out
    pub session: RwSignal<Option<Session>>,
    /// True while a sign-in round trip is outstanding
    pub pending: RwSignal<bool>,
}

/// Provide auth state to the component tree, restoring any stored session
pub fn provide_auth_state() -> AuthState {
    let state = AuthState {
        session: create_rw_signal(load_stored_session()),
        pending: create_rw_signal(false),
    };

    provide_context(state);
    state
}

/// Read the auth state context
pub fn use_auth() -> AuthState {
    use_context::<AuthState>().expect("AuthState not found")
}

/// A derived signal yielding a datastore handle for the current config +
/// session, `None` until the runtime config has loaded
pub fn datastore_signal() -> Signal<Option<Datastore>> {
    let config = use_runtime_config();
    let auth = use_auth();
    Signal::derive(move || {
        let runtime = config.0.get()?;
        let session = auth.session.get();
        Some(Datastore::new(&runtime, session.as_ref()))
    })
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.session.with(|s| s.is_some())
    }

    /// Sign in with email/password and persist the session
    pub async fn sign_in(
        &self,
        config: &RuntimeConfig,
        email: &str,
        password: &str,
    ) -> Result<(), String> {
        self.pending.set(true);

        let result = datastore::sign_in(config, email, password).await;
        self.pending.set(false);

        let session = result?;
        store_session(Some(&session));
        self.session.set(Some(session));
        Ok(())
    }

    /// Sign out: clear the stored session and invalidate the token
    /// remotely on a best-effort basis.
    pub async fn sign_out(&self, config: &RuntimeConfig) {
        let previous = self.session.get_untracked();
        store_session(None);
        self.session.set(None);

        if let Some(session) = previous {
            if let Err(e) = datastore::sign_out(config, &session.access_token).await {
                web_sys::console::warn_1(&format!("Remote sign-out failed: {}", e).into());
            }
        }
    }
}

fn load_stored_session() -> Option<Session> {
    let storage = web_sys::window()?.local_storage().ok()??;
    let raw = storage.get_item(STORAGE_KEY).ok()??;
    serde_json::from_str(&raw).ok()
}

fn store_session(session: Option<&Session>) {
    let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
        return;
    };

    match session.and_then(|s| serde_json::to_string(s).ok()) {
        Some(raw) => {
            let _ = storage.set_item(STORAGE_KEY, &raw);
        }
        None => {
            let _ = storage.remove_item(STORAGE_KEY);
        }
    }
}
