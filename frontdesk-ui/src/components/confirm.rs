//! Delete Confirmation Dialog

use leptos::*;

use super::modal::Modal;

/// Yes/no confirmation before a destructive action
#[component]
pub fn ConfirmDialog(
    #[prop(into)]
    title: String,
    #[prop(into)]
    message: String,
    on_confirm: impl Fn() + 'static + Clone,
    on_cancel: impl Fn() + 'static + Clone,
) -> impl IntoView {
    let on_cancel_for_close = on_cancel.clone();
    let on_cancel_for_button = on_cancel;

    view! {
        <Modal title=title on_close=move || on_cancel_for_close()>
            <p class="text-gray-300 mb-6">{message}</p>

            <div class="flex space-x-3">
                <button
                    on:click=move |_| on_cancel_for_button()
                    class="flex-1 px-4 py-3 bg-gray-700 hover:bg-gray-600 rounded-lg font-medium transition-colors"
                >
                    "Cancel"
                </button>
                <button
                    on:click=move |_| on_confirm()
                    class="flex-1 px-4 py-3 bg-red-600 hover:bg-red-700 rounded-lg font-medium transition-colors"
                >
                    "Delete"
                </button>
            </div>
        </Modal>
    }
}
