//! Account Page
//!
//! Profile form for the signed-in user.

use leptos::*;

use crate::state::{use_auth, use_ui_state};

/// Account page component
#[component]
pub fn Account() -> impl IntoView {
    let auth = use_auth();
    let ui = use_ui_state();

    let initial_email = auth
        .session
        .get_untracked()
        .and_then(|s| s.user.email)
        .unwrap_or_default();

    let (name, set_name) = create_signal(String::new());
    let (email, set_email) = create_signal(initial_email);
    let (phone, set_phone) = create_signal(String::new());

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        ui.show_success("Your information has been updated");
    };

    view! {
        <div class="max-w-xl space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Account"</h1>
                <p class="text-gray-400 mt-1">"Your profile information"</p>
            </div>

            <form on:submit=save class="space-y-4">
                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Full name"</label>
                    <input
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-4 py-3
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>

                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Email"</label>
                    <input
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-4 py-3
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>

                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Phone"</label>
                    <input
                        type="tel"
                        prop:value=move || phone.get()
                        on:input=move |ev| set_phone.set(event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-4 py-3
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>

                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Password"</label>
                    <input
                        type="password"
                        prop:value="••••••••"
                        disabled=true
                        class="w-full bg-gray-700/50 rounded-lg px-4 py-3
                               border border-gray-600 text-gray-500"
                    />
                </div>

                <button
                    type="submit"
                    class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                >
                    "Save changes"
                </button>
            </form>
        </div>
    }
}
