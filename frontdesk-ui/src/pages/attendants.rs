//! Attendants Page
//!
//! Manage the attendants wired to the automation platform.

use leptos::*;

use crate::components::loading::ListSkeleton;
use crate::components::{ConfirmDialog, Modal};
use crate::state::attendants::{Attendant, AttendantsStore};
use crate::state::{datastore_signal, use_ui_state};

/// Attendants management page
#[component]
pub fn Attendants() -> impl IntoView {
    let store = AttendantsStore::new();
    let datastore = datastore_signal();
    let ui = use_ui_state();

    let (show_create, set_show_create) = create_signal(false);
    let editing = create_rw_signal(None::<Attendant>);
    let deleting = create_rw_signal(None::<Attendant>);
    let loaded = create_rw_signal(false);

    create_effect(move |_| {
        if loaded.get_untracked() {
            return;
        }
        if let Some(ds) = datastore.get() {
            loaded.set(true);
            spawn_local(async move { store.load(&ds).await });
        }
    });

    let toggle_active = move |attendant: Attendant| {
        let Some(ds) = datastore.get_untracked() else {
            return;
        };
        spawn_local(async move {
            if let Err(e) = store.set_active(&ds, &attendant.id, !attendant.active).await {
                ui.show_error(&e);
            }
        });
    };

    let confirm_delete = move || {
        let Some(attendant) = deleting.get_untracked() else {
            return;
        };
        deleting.set(None);

        let Some(ds) = datastore.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match store.delete(&ds, &attendant.id).await {
                Ok(()) => ui.show_success("Attendant deleted"),
                Err(e) => ui.show_error(&e),
            }
        });
    };

    view! {
        <div class="space-y-8">
            // Header
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Attendants"</h1>
                    <p class="text-gray-400 mt-1">"Who answers your conversations"</p>
                </div>

                <button
                    on:click=move |_| set_show_create.set(true)
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                >
                    "+ New Attendant"
                </button>
            </div>

            // Load failure banner
            {move || {
                store.error.get().map(|msg| view! {
                    <div class="bg-red-900/40 border border-red-700 text-red-300 text-sm rounded-lg px-4 py-3">
                        {msg}
                    </div>
                })
            }}

            // Modals
            {move || {
                if show_create.get() {
                    view! {
                        <AttendantModal
                            store=store
                            attendant=None
                            on_close=move || set_show_create.set(false)
                        />
                    }.into_view()
                } else {
                    view! {}.into_view()
                }
            }}
            {move || {
                editing.get().map(|attendant| view! {
                    <AttendantModal
                        store=store
                        attendant=Some(attendant)
                        on_close=move || editing.set(None)
                    />
                })
            }}
            {move || {
                deleting.get().map(|attendant| {
                    let message = format!(
                        "Delete attendant \"{}\"? This cannot be undone.",
                        attendant.name
                    );
                    view! {
                        <ConfirmDialog
                            title="Delete Attendant"
                            message=message
                            on_confirm=confirm_delete
                            on_cancel=move || deleting.set(None)
                        />
                    }
                })
            }}

            // List
            {move || {
                if store.loading.get() {
                    view! { <ListSkeleton count=4 /> }.into_view()
                } else {
                    let attendants = store.attendants.get();
                    if attendants.is_empty() {
                        view! {
                            <div class="text-center py-12">
                                <p class="text-gray-400">"No attendants yet. Create your first one!"</p>
                            </div>
                        }.into_view()
                    } else {
                        attendants.into_iter().map(|attendant| {
                            let for_toggle = attendant.clone();
                            let for_edit = attendant.clone();
                            let for_delete = attendant.clone();

                            view! {
                                <div class="bg-gray-800 rounded-xl p-4 border border-gray-700 flex items-center justify-between">
                                    <div>
                                        <div class="flex items-center space-x-2">
                                            <h3 class="font-semibold">{attendant.name.clone()}</h3>
                                            {if attendant.active {
                                                view! {
                                                    <span class="bg-green-600 text-xs px-2 py-0.5 rounded-full text-white">"Active"</span>
                                                }.into_view()
                                            } else {
                                                view! {
                                                    <span class="bg-gray-600 text-xs px-2 py-0.5 rounded-full text-white">"Inactive"</span>
                                                }.into_view()
                                            }}
                                        </div>
                                        <p class="text-gray-400 text-sm mt-1">
                                            "Automation ID: "{attendant.n8n_id.clone()}
                                        </p>
                                    </div>

                                    <div class="flex items-center space-x-2">
                                        <button
                                            on:click=move |_| toggle_active(for_toggle.clone())
                                            class="px-3 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg text-sm transition-colors"
                                        >
                                            {if attendant.active { "Deactivate" } else { "Activate" }}
                                        </button>
                                        <button
                                            on:click=move |_| editing.set(Some(for_edit.clone()))
                                            class="px-3 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg text-sm transition-colors"
                                        >
                                            "Edit"
                                        </button>
                                        <button
                                            on:click=move |_| deleting.set(Some(for_delete.clone()))
                                            class="px-3 py-2 bg-red-700/60 hover:bg-red-700 rounded-lg text-sm transition-colors"
                                        >
                                            "Delete"
                                        </button>
                                    </div>
                                </div>
                            }
                        }).collect_view()
                    }
                }
            }}
        </div>
    }
}

/// Create/edit attendant modal
#[component]
fn AttendantModal(
    store: AttendantsStore,
    attendant: Option<Attendant>,
    on_close: impl Fn() + 'static + Clone,
) -> impl IntoView {
    let datastore = datastore_signal();
    let ui = use_ui_state();

    let editing_id = attendant.as_ref().map(|a| a.id.clone());
    let modal_title = if editing_id.is_some() {
        "Edit Attendant"
    } else {
        "Create Attendant"
    };

    let (name, set_name) = create_signal(
        attendant.as_ref().map(|a| a.name.clone()).unwrap_or_default(),
    );
    let (n8n_id, set_n8n_id) = create_signal(
        attendant.as_ref().map(|a| a.n8n_id.clone()).unwrap_or_default(),
    );
    let (submitting, set_submitting) = create_signal(false);

    let on_close_for_submit = on_close.clone();
    let on_close_for_cancel = on_close.clone();
    let on_close_for_modal = on_close;

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let name_value = name.get_untracked().trim().to_string();
        let n8n_value = n8n_id.get_untracked().trim().to_string();
        if name_value.is_empty() || n8n_value.is_empty() {
            ui.show_error("Name and automation ID are required");
            return;
        }

        let Some(ds) = datastore.get_untracked() else {
            return;
        };

        set_submitting.set(true);

        let editing_id = editing_id.clone();
        let on_close_inner = on_close_for_submit.clone();
        spawn_local(async move {
            let result = match &editing_id {
                Some(id) => store
                    .update(&ds, id, &name_value, &n8n_value)
                    .await
                    .map(|_| "Attendant updated"),
                None => store
                    .create(&ds, &name_value, &n8n_value)
                    .await
                    .map(|_| "Attendant created"),
            };

            match result {
                Ok(message) => {
                    ui.show_success(message);
                    on_close_inner();
                }
                Err(e) => {
                    ui.show_error(&e);
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <Modal title=modal_title on_close=move || on_close_for_modal()>
            <form on:submit=on_submit class="space-y-4">
                // Name
                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Name"</label>
                    <input
                        type="text"
                        placeholder="e.g., Ana"
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-4 py-3
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>

                // Automation ID
                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Automation ID"</label>
                    <input
                        type="text"
                        placeholder="Workflow id on the automation platform"
                        prop:value=move || n8n_id.get()
                        on:input=move |ev| set_n8n_id.set(event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-4 py-3
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>

                // Buttons
                <div class="flex space-x-3 pt-4">
                    <button
                        type="button"
                        on:click=move |_| on_close_for_cancel()
                        class="flex-1 px-4 py-3 bg-gray-700 hover:bg-gray-600 rounded-lg font-medium transition-colors"
                    >
                        "Cancel"
                    </button>
                    <button
                        type="submit"
                        disabled=move || submitting.get()
                        class="flex-1 px-4 py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                               rounded-lg font-medium transition-colors"
                    >
                        {move || if submitting.get() { "Saving..." } else { "Save" }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
