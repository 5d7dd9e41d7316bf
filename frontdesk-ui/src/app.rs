//! App Root Component
//!
//! Main application component with routing and global providers.

use leptos::*;
use leptos_router::*;

use crate::api::runtime::{self, provide_runtime_config};
use crate::components::{Loading, Nav, Toast};
use crate::pages::{Account, Assistant, Attendants, BoardPage, Dashboard, Inbox, Login};
use crate::state::{provide_auth_state, provide_ui_state, use_auth, use_ui_state};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components
    provide_ui_state();
    provide_auth_state();
    let config = provide_runtime_config();
    let ui = use_ui_state();

    // Bootstrap: fetch the runtime configuration once on mount
    spawn_local(async move {
        match runtime::fetch_runtime_config().await {
            Ok(runtime_config) => config.0.set(Some(runtime_config)),
            Err(e) => ui.show_error(&format!("Could not load configuration: {}", e)),
        }
    });

    view! {
        <Router>
            <div class="min-h-screen bg-gray-900 text-white">
                <Routes>
                    <Route path="/login" view=Login />
                    <Route path="/" view=Shell>
                        <Route path="" view=Dashboard />
                        <Route path="inbox" view=Inbox />
                        <Route path="board" view=BoardPage />
                        <Route path="attendants" view=Attendants />
                        <Route path="assistant" view=Assistant />
                        <Route path="account" view=Account />
                    </Route>
                    <Route path="/*any" view=NotFound />
                </Routes>

                // Toast notifications
                <Toast />
            </div>
        </Router>
    }
}

/// Authenticated application shell: waits for the runtime config, routes
/// unconfigured installs to the setup notice and anonymous visitors to
/// the login page.
#[component]
fn Shell() -> impl IntoView {
    let config = runtime::use_runtime_config();
    let auth = use_auth();

    view! {
        {move || {
            match config.0.get() {
                None => view! { <Loading /> }.into_view(),
                Some(runtime_config) if runtime_config.setup_required => view! {
                    <SetupNotice missing=runtime_config.missing_settings.clone() />
                }.into_view(),
                Some(_) => {
                    if auth.is_authenticated() {
                        view! {
                            <Nav />
                            <main class="container mx-auto px-4 py-8">
                                <Outlet />
                            </main>
                        }.into_view()
                    } else {
                        view! { <Redirect path="/login" /> }.into_view()
                    }
                }
            }
        }}
    }
}

/// Shown instead of the app while mandatory server settings are missing
#[component]
fn SetupNotice(missing: Vec<String>) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[80vh] text-center px-4">
            <div class="text-6xl mb-4">"🛠️"</div>
            <h1 class="text-3xl font-bold mb-2">"Almost there"</h1>
            <p class="text-gray-400 mb-6 max-w-md">
                "The server is missing mandatory settings. Fill them in the server's "
                "config.toml (or the matching FRONTDESK_* environment variables) and restart."
            </p>
            <ul class="text-sm text-gray-300 bg-gray-800 rounded-lg px-6 py-4 space-y-1">
                {missing.into_iter().map(|setting| view! {
                    <li class="font-mono">{setting}</li>
                }).collect_view()}
            </ul>
        </div>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/"
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "Go to Dashboard"
            </A>
        </div>
    }
}
