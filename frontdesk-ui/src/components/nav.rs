//! Navigation Component
//!
//! Header navigation bar with branding, links and sign-out.

use leptos::*;
use leptos_router::*;

use crate::api::runtime::use_runtime_config;
use crate::state::{use_auth, use_ui_state};

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let config = use_runtime_config();
    let auth = use_auth();
    let ui = use_ui_state();
    let navigate = use_navigate();

    let platform_name = move || {
        config
            .0
            .get()
            .map(|c| c.platform_name)
            .unwrap_or_else(|| "Frontdesk".to_string())
    };

    let user_email = move || {
        auth.session
            .get()
            .and_then(|s| s.user.email)
            .unwrap_or_default()
    };

    let sign_out = move |_| {
        let Some(runtime) = config.0.get_untracked() else {
            return;
        };
        let navigate = navigate.clone();
        spawn_local(async move {
            auth.sign_out(&runtime).await;
            ui.show_success("Signed out");
            navigate("/login", Default::default());
        });
    };

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    // Logo and brand
                    <A href="/" class="flex items-center space-x-3">
                        <span class="text-2xl">"🎧"</span>
                        <span class="text-xl font-bold text-white">{platform_name}</span>
                    </A>

                    // Navigation links
                    <div class="flex items-center space-x-1">
                        <NavLink href="/" label="Dashboard" />
                        <NavLink href="/inbox" label="Inbox" />
                        <NavLink href="/board" label="Board" />
                        <NavLink href="/attendants" label="Attendants" />
                        <NavLink href="/assistant" label="Assistant" />
                        <NavLink href="/account" label="Account" />
                    </div>

                    // Session
                    <div class="flex items-center space-x-3">
                        <span class="text-sm text-gray-400 hidden md:inline">{user_email}</span>
                        <button
                            on:click=sign_out
                            class="px-3 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors text-sm"
                        >
                            "Sign out"
                        </button>
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(
    href: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <A
            href=href
            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
            active_class="bg-gray-700 text-white"
        >
            {label}
        </A>
    }
}
