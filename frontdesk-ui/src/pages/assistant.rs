//! Assistant Page
//!
//! AI-assisted chat panel. Threads and messages persist in the datastore;
//! replies come from the automation webhook through the server relay.

use leptos::*;

use crate::api::assistant;
use crate::components::{ConfirmDialog, Loading};
use crate::state::assistant::{auto_title, AiChatsStore, AiMessagesStore, Role};
use crate::state::{datastore_signal, use_auth, use_ui_state};

const REPLY_FALLBACK: &str = "Sorry, something went wrong while processing your message. Try again.";

/// AI assistant chat page
#[component]
pub fn Assistant() -> impl IntoView {
    let chats = AiChatsStore::new();
    let messages = AiMessagesStore::new();
    let datastore = datastore_signal();
    let auth = use_auth();
    let ui = use_ui_state();

    let (draft, set_draft) = create_signal(String::new());
    let (busy, set_busy) = create_signal(false);
    let renaming = create_rw_signal(None::<(String, String)>);
    let deleting = create_rw_signal(None::<String>);
    let loaded = create_rw_signal(false);

    // Load chats once the runtime config is available, then select the
    // most recent one.
    create_effect(move |_| {
        if loaded.get_untracked() {
            return;
        }
        if let Some(ds) = datastore.get() {
            loaded.set(true);
            spawn_local(async move {
                chats.load(&ds).await;
                if let Some(first) = chats.chats.get_untracked().first() {
                    messages.select_chat(&ds, &first.id).await;
                }
            });
        }
    });

    let select_chat = move |chat_id: String| {
        let Some(ds) = datastore.get_untracked() else {
            return;
        };
        spawn_local(async move { messages.select_chat(&ds, &chat_id).await });
    };

    let create_chat = move |_| {
        let Some(ds) = datastore.get_untracked() else {
            return;
        };
        let Some(user_id) = auth.session.get_untracked().map(|s| s.user.id) else {
            ui.show_error("You must be signed in to create a chat");
            return;
        };

        spawn_local(async move {
            match chats.create(&ds, &user_id, "New conversation").await {
                Ok(chat) => {
                    ui.show_success("Chat created");
                    messages.select_chat(&ds, &chat.id).await;
                }
                Err(e) => ui.show_error(&e),
            }
        });
    };

    let confirm_delete = move || {
        let Some(chat_id) = deleting.get_untracked() else {
            return;
        };
        deleting.set(None);

        let Some(ds) = datastore.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match chats.delete(&ds, &chat_id).await {
                Ok(()) => {
                    ui.show_success("Chat deleted");
                    if messages.active_chat.get_untracked().as_deref() == Some(chat_id.as_str()) {
                        match chats.chats.get_untracked().first() {
                            Some(next) => messages.select_chat(&ds, &next.id).await,
                            None => messages.clear(),
                        }
                    }
                }
                Err(e) => ui.show_error(&e),
            }
        });
    };

    let save_rename = move || {
        let Some((chat_id, title)) = renaming.get_untracked() else {
            return;
        };
        renaming.set(None);

        let title = title.trim().to_string();
        if title.is_empty() {
            return;
        }

        let Some(ds) = datastore.get_untracked() else {
            return;
        };
        spawn_local(async move {
            if let Err(e) = chats.rename(&ds, &chat_id, &title).await {
                ui.show_error(&e);
            }
        });
    };

    // Persist the user's message, relay it to the webhook, persist the
    // reply (or a fallback when the webhook fails).
    let send = move |_| {
        let text = draft.get_untracked().trim().to_string();
        if text.is_empty() || busy.get_untracked() {
            return;
        }
        let Some(chat_id) = messages.active_chat.get_untracked() else {
            return;
        };
        let Some(ds) = datastore.get_untracked() else {
            return;
        };

        set_draft.set(String::new());
        set_busy.set(true);

        spawn_local(async move {
            let first_message = messages.messages.get_untracked().is_empty();

            if let Err(e) = messages.append(&ds, &chat_id, &text, Role::User).await {
                ui.show_error(&e);
                set_busy.set(false);
                return;
            }

            // the first message names the conversation
            if first_message {
                if let Err(e) = chats.rename(&ds, &chat_id, &auto_title(&text)).await {
                    ui.show_error(&e);
                }
            }

            let reply = match assistant::request_reply(&text).await {
                Ok(reply) if !reply.trim().is_empty() => reply,
                Ok(_) => "Sorry, I could not process your message.".to_string(),
                Err(_) => REPLY_FALLBACK.to_string(),
            };

            if let Err(e) = messages.append(&ds, &chat_id, &reply, Role::Assistant).await {
                ui.show_error(&e);
            }

            set_busy.set(false);
        });
    };

    let send_for_click = send;
    let send_for_key = send;

    view! {
        <div class="flex h-[calc(100vh-8rem)] bg-gray-800 rounded-xl overflow-hidden border border-gray-700">
            // Chat list
            <div class="w-72 border-r border-gray-700 flex flex-col">
                <div class="p-3 border-b border-gray-700 flex items-center justify-between">
                    <h2 class="font-semibold">"Assistant"</h2>
                    <button
                        on:click=create_chat
                        class="px-2 py-1 text-sm bg-primary-600 hover:bg-primary-700 rounded-lg transition-colors"
                    >
                        "+ New"
                    </button>
                </div>

                <div class="flex-1 overflow-y-auto">
                    {move || {
                        if chats.loading.get() {
                            view! { <Loading /> }.into_view()
                        } else {
                            let list = chats.chats.get();
                            if list.is_empty() {
                                view! {
                                    <p class="text-gray-400 text-sm text-center py-8">"No conversations yet"</p>
                                }.into_view()
                            } else {
                                list.into_iter().map(|chat| {
                                    let id = chat.id.clone();
                                    let id_for_select = chat.id.clone();
                                    let id_for_rename = chat.id.clone();
                                    let id_for_delete = chat.id.clone();
                                    let title_for_rename = chat.title.clone();
                                    let is_active = move || {
                                        messages.active_chat.get().as_deref() == Some(id.as_str())
                                    };

                                    view! {
                                        <div class=move || {
                                            let base = "group flex items-center px-3 py-2 hover:bg-gray-700/60 transition-colors";
                                            if is_active() {
                                                format!("{} bg-gray-700", base)
                                            } else {
                                                base.to_string()
                                            }
                                        }>
                                            <button
                                                on:click=move |_| select_chat(id_for_select.clone())
                                                class="flex-1 text-left text-sm truncate"
                                            >
                                                {chat.title.clone()}
                                            </button>
                                            <button
                                                on:click=move |_| renaming.set(Some((id_for_rename.clone(), title_for_rename.clone())))
                                                class="ml-1 text-gray-500 hover:text-white text-xs opacity-0 group-hover:opacity-100"
                                                title="Rename"
                                            >
                                                "✎"
                                            </button>
                                            <button
                                                on:click=move |_| deleting.set(Some(id_for_delete.clone()))
                                                class="ml-1 text-gray-500 hover:text-red-400 text-xs opacity-0 group-hover:opacity-100"
                                                title="Delete"
                                            >
                                                "🗑"
                                            </button>
                                        </div>
                                    }
                                }).collect_view()
                            }
                        }
                    }}
                </div>
            </div>

            // Thread
            <div class="flex-1 flex flex-col min-w-0">
                {move || {
                    if messages.active_chat.get().is_none() {
                        view! {
                            <div class="flex-1 flex items-center justify-center text-gray-400">
                                "Create a conversation to talk to the assistant"
                            </div>
                        }.into_view()
                    } else {
                        view! {
                            <div class="flex-1 overflow-y-auto p-4 space-y-3">
                                {move || {
                                    if messages.loading.get() {
                                        view! { <Loading /> }.into_view()
                                    } else {
                                        messages.messages.get().into_iter().map(|message| {
                                            let (align, bubble, icon) = match message.role {
                                                Role::User => ("justify-end", "bg-primary-700", "🧑"),
                                                Role::Assistant => ("justify-start", "bg-gray-700", "🤖"),
                                            };
                                            view! {
                                                <div class=format!("flex {}", align)>
                                                    <div class=format!("{} max-w-lg rounded-lg px-3 py-2", bubble)>
                                                        <span class="text-xs mr-1">{icon}</span>
                                                        <span class="text-sm whitespace-pre-wrap break-words">{message.content.clone()}</span>
                                                    </div>
                                                </div>
                                            }
                                        }).collect_view()
                                    }
                                }}

                                {move || {
                                    busy.get().then(|| view! {
                                        <div class="flex justify-start">
                                            <div class="bg-gray-700 rounded-lg px-3 py-2 text-sm text-gray-400">
                                                "🤖 Thinking..."
                                            </div>
                                        </div>
                                    })
                                }}
                            </div>

                            <div class="p-3 border-t border-gray-700 flex items-center space-x-2">
                                <input
                                    type="text"
                                    placeholder="Ask the assistant"
                                    prop:value=move || draft.get()
                                    disabled=move || busy.get()
                                    on:input=move |ev| set_draft.set(event_target_value(&ev))
                                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                                        if ev.key() == "Enter" {
                                            send_for_key(());
                                        }
                                    }
                                    class="flex-1 bg-gray-700 rounded-lg px-4 py-3
                                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                                />
                                <button
                                    on:click=move |_| send_for_click(())
                                    disabled=move || busy.get()
                                    class="px-4 py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                                           rounded-lg font-medium transition-colors"
                                >
                                    "Send"
                                </button>
                            </div>
                        }.into_view()
                    }
                }}
            </div>
        </div>

        // Rename dialog
        {move || {
            renaming.get().map(|(_, title)| view! {
                <RenameDialog
                    current=title
                    on_save=move |new_title: String| {
                        renaming.update(|state| {
                            if let Some((_, title)) = state {
                                *title = new_title.clone();
                            }
                        });
                        save_rename();
                    }
                    on_cancel=move || renaming.set(None)
                />
            })
        }}

        // Delete confirmation
        {move || {
            deleting.get().map(|_| view! {
                <ConfirmDialog
                    title="Delete Conversation"
                    message="Delete this conversation and its messages? This cannot be undone."
                    on_confirm=confirm_delete
                    on_cancel=move || deleting.set(None)
                />
            })
        }}
    }
}

/// Small rename prompt
#[component]
fn RenameDialog(
    #[prop(into)]
    current: String,
    on_save: impl Fn(String) + 'static + Clone,
    on_cancel: impl Fn() + 'static + Clone,
) -> impl IntoView {
    use crate::components::Modal;

    let (title, set_title) = create_signal(current);

    let on_cancel_for_modal = on_cancel.clone();
    let on_cancel_for_button = on_cancel;

    let save = move |_| {
        on_save(title.get_untracked());
    };

    view! {
        <Modal title="Rename Conversation" on_close=move || on_cancel_for_modal()>
            <div class="space-y-4">
                <input
                    type="text"
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />

                <div class="flex space-x-3">
                    <button
                        on:click=move |_| on_cancel_for_button()
                        class="flex-1 px-4 py-3 bg-gray-700 hover:bg-gray-600 rounded-lg font-medium transition-colors"
                    >
                        "Cancel"
                    </button>
                    <button
                        on:click=save
                        class="flex-1 px-4 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                    >
                        "Save"
                    </button>
                </div>
            </div>
        </Modal>
    }
}
