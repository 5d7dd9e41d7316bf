//! Login Page
//!
//! Email/password sign-in against the hosted datastore's auth endpoint.

use leptos::*;
use leptos_router::*;

use crate::api::runtime::use_runtime_config;
use crate::state::{use_auth, use_ui_state};

/// Login page component
#[component]
pub fn Login() -> impl IntoView {
    let config = use_runtime_config();
    let auth = use_auth();
    let ui = use_ui_state();
    let navigate = use_navigate();

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);

    let platform_name = move || {
        config
            .0
            .get()
            .map(|c| c.platform_name)
            .unwrap_or_else(|| "Frontdesk".to_string())
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let Some(runtime) = config.0.get_untracked() else {
            set_error.set(Some("Still loading configuration, try again".to_string()));
            return;
        };

        let email_value = email.get_untracked();
        let password_value = password.get_untracked();
        if email_value.is_empty() || password_value.is_empty() {
            set_error.set(Some("Email and password are required".to_string()));
            return;
        }

        set_error.set(None);

        let navigate = navigate.clone();
        spawn_local(async move {
            match auth.sign_in(&runtime, &email_value, &password_value).await {
                Ok(()) => {
                    ui.show_success("Welcome back!");
                    navigate("/", Default::default());
                }
                Err(e) => {
                    set_error.set(Some(e));
                }
            }
        });
    };

    view! {
        // Already signed in? Go straight to the dashboard.
        {move || {
            if auth.is_authenticated() {
                view! { <Redirect path="/" /> }.into_view()
            } else {
                view! {}.into_view()
            }
        }}

        <div class="min-h-screen bg-gray-900 text-white flex items-center justify-center px-4">
            <div class="bg-gray-800 rounded-xl p-8 w-full max-w-md">
                <div class="text-center mb-8">
                    <div class="text-4xl mb-2">"🎧"</div>
                    <h1 class="text-2xl font-bold">{platform_name}</h1>
                    <p class="text-gray-400 mt-1">"Sign in to your dashboard"</p>
                </div>

                <form on:submit=on_submit class="space-y-4">
                    <div>
                        <label class="block text-sm text-gray-400 mb-2">"Email"</label>
                        <input
                            type="email"
                            placeholder="you@company.com"
                            prop:value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                            class="w-full bg-gray-700 rounded-lg px-4 py-3
                                   border border-gray-600 focus:border-primary-500 focus:outline-none"
                        />
                    </div>

                    <div>
                        <label class="block text-sm text-gray-400 mb-2">"Password"</label>
                        <input
                            type="password"
                            placeholder="••••••••"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            class="w-full bg-gray-700 rounded-lg px-4 py-3
                                   border border-gray-600 focus:border-primary-500 focus:outline-none"
                        />
                    </div>

                    {move || {
                        error.get().map(|msg| view! {
                            <div class="bg-red-900/40 border border-red-700 text-red-300 text-sm rounded-lg px-4 py-3">
                                {msg}
                            </div>
                        })
                    }}

                    <button
                        type="submit"
                        disabled=move || auth.pending.get()
                        class="w-full px-4 py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                               rounded-lg font-medium transition-colors"
                    >
                        {move || if auth.pending.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
