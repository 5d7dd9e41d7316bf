//! Inbox Page
//!
//! The messaging inbox backed by the helpdesk API: a searchable
//! conversation list and the selected conversation's thread.
//!
//! Selecting a conversation fires an un-cancelled fetch; the handler
//! checks that the originating conversation is still selected before
//! applying results, so a slow response can never overwrite a newer
//! selection.

use chrono::{DateTime, TimeZone, Utc};
use leptos::*;

use crate::api::helpdesk::{self, Conversation, Direction, Message};
use crate::components::Loading;
use crate::state::use_ui_state;

// ============ View model ============

/// A conversation prepared for rendering
#[derive(Clone, Debug, PartialEq)]
pub struct ChatThread {
    pub id: u64,
    pub name: String,
    pub number: String,
    pub initials: String,
    /// Unix seconds of the last activity
    pub last_activity: i64,
    pub status: Option<String>,
    pub unread: u32,
    pub avatar: Option<String>,
    pub messages: Vec<ChatMessage>,
}

/// A message prepared for rendering
#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub id: u64,
    pub content: String,
    pub outgoing: bool,
    /// Unix seconds
    pub timestamp: i64,
    pub status: Option<String>,
    pub audio: Option<AudioClip>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AudioClip {
    pub url: String,
    pub duration: Option<f64>,
}

fn thread_from_conversation(conversation: &Conversation) -> ChatThread {
    let sender = conversation.meta.sender.clone().unwrap_or_default();
    let name = sender
        .name
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "Unnamed".to_string());
    let number = sender
        .phone_number
        .unwrap_or_else(|| "Unknown number".to_string());

    let mut messages: Vec<ChatMessage> = conversation.messages.iter().map(chat_message).collect();
    messages.sort_by_key(|m| m.timestamp);

    ChatThread {
        id: conversation.id,
        initials: initials(&name),
        name,
        number,
        last_activity: conversation.last_activity_at,
        status: conversation.status.clone(),
        unread: conversation.unread_count,
        avatar: sender.thumbnail,
        messages,
    }
}

fn chat_message(message: &Message) -> ChatMessage {
    let audio = detect_audio(message);

    let content = message
        .content
        .clone()
        .or_else(|| message.processed_message_content.clone())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| {
            if audio.is_some() {
                "🎵 Audio message".to_string()
            } else {
                String::new()
            }
        });

    ChatMessage {
        id: message.id,
        content,
        outgoing: message.direction == Direction::Outgoing,
        timestamp: message.created_at,
        status: message.status.clone(),
        audio,
    }
}

// Audio messages are flagged by content type or carry an audio attachment
// with the playable URL.
fn detect_audio(message: &Message) -> Option<AudioClip> {
    let typed_audio = message.content_type.as_deref() == Some("audio");
    let attachment = message.attachments.first()?;
    let attached_audio = attachment
        .file_type
        .as_deref()
        .is_some_and(|t| t.starts_with("audio"));

    if !typed_audio && !attached_audio {
        return None;
    }

    attachment.data_url.clone().map(|url| AudioClip {
        url,
        duration: attachment.metadata.as_ref().and_then(|m| m.duration),
    })
}

/// Up to two initials from the leading words of a name
pub fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(|c| c.to_uppercase())
        .collect();

    if letters.is_empty() {
        "?".to_string()
    } else {
        letters
    }
}

/// Relative timestamp for the conversation list: time today, "Yesterday",
/// weekday within 30 days, full date otherwise.
pub fn format_last_activity(timestamp: i64, now: DateTime<Utc>) -> String {
    let Some(moment) = Utc.timestamp_opt(timestamp, 0).single() else {
        return String::new();
    };

    let today = now.date_naive();
    let date = moment.date_naive();

    if date == today {
        return moment.format("%H:%M").to_string();
    }
    if Some(date) == today.pred_opt() {
        return "Yesterday".to_string();
    }
    if (today - date).num_days() < 30 {
        return moment.format("%a").to_string();
    }
    moment.format("%d/%m/%Y").to_string()
}

/// Case-insensitive match against name or phone number
pub fn matches_search(thread: &ChatThread, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }
    thread.name.to_lowercase().contains(&term.to_lowercase()) || thread.number.contains(term)
}

// ============ Page ============

/// Messaging inbox page
#[component]
pub fn Inbox() -> impl IntoView {
    let ui = use_ui_state();

    let threads = create_rw_signal(Vec::<ChatThread>::new());
    let selected = create_rw_signal(None::<u64>);
    let (search, set_search) = create_signal(String::new());
    let (loading, set_loading) = create_signal(true);
    let (refreshing, set_refreshing) = create_signal(false);
    // The conversation whose messages are being fetched
    let loading_messages = create_rw_signal(None::<u64>);

    let apply_conversations = move |conversations: Vec<Conversation>| {
        let mapped: Vec<ChatThread> = conversations.iter().map(thread_from_conversation).collect();

        // keep the selection when the conversation still exists
        let still_selected = selected
            .get_untracked()
            .filter(|id| mapped.iter().any(|t| t.id == *id));
        if still_selected.is_none() {
            selected.set(mapped.first().map(|t| t.id));
        }

        threads.set(mapped);
    };

    // Initial load
    spawn_local(async move {
        match helpdesk::fetch_conversations().await {
            Ok(conversations) => apply_conversations(conversations),
            Err(e) => ui.show_error(&format!("Could not load conversations: {}", e)),
        }
        set_loading.set(false);
    });

    let select_conversation = move |id: u64| {
        selected.set(Some(id));
        loading_messages.set(Some(id));

        spawn_local(async move {
            let result = helpdesk::fetch_messages(id).await;

            // a newer selection supersedes this response
            if selected.get_untracked() != Some(id) {
                return;
            }
            loading_messages.set(None);

            match result {
                Ok(messages) => {
                    threads.update(|list| {
                        if let Some(thread) = list.iter_mut().find(|t| t.id == id) {
                            let mut mapped: Vec<ChatMessage> =
                                messages.iter().map(chat_message).collect();
                            mapped.sort_by_key(|m| m.timestamp);
                            thread.messages = mapped;
                        }
                    });
                }
                Err(e) => ui.show_error(&format!("Could not load messages: {}", e)),
            }
        });
    };

    let refresh = move |_| {
        set_refreshing.set(true);
        spawn_local(async move {
            match helpdesk::fetch_conversations().await {
                Ok(conversations) => {
                    apply_conversations(conversations);
                    if let Some(id) = selected.get_untracked() {
                        select_conversation(id);
                    }
                }
                Err(e) => ui.show_error(&format!("Could not refresh conversations: {}", e)),
            }
            set_refreshing.set(false);
        });
    };

    let send = move |text: String| {
        let Some(id) = selected.get_untracked() else {
            return;
        };

        // show the message immediately, in `sending` state
        let local_id = Utc::now().timestamp_millis() as u64;
        threads.update(|list| {
            if let Some(thread) = list.iter_mut().find(|t| t.id == id) {
                thread.messages.push(ChatMessage {
                    id: local_id,
                    content: text.clone(),
                    outgoing: true,
                    timestamp: Utc::now().timestamp(),
                    status: Some("sending".to_string()),
                    audio: None,
                });
                thread.last_activity = Utc::now().timestamp();
            }
        });

        spawn_local(async move {
            let update_status = move |server_id: Option<u64>, status: &str| {
                let status = status.to_string();
                threads.update(|list| {
                    if let Some(thread) = list.iter_mut().find(|t| t.id == id) {
                        if let Some(msg) =
                            thread.messages.iter_mut().find(|m| m.id == local_id)
                        {
                            if let Some(server_id) = server_id {
                                msg.id = server_id;
                            }
                            msg.status = Some(status);
                        }
                    }
                });
            };

            match helpdesk::send_message(id, &text).await {
                Ok(message) => update_status(Some(message.id), "sent"),
                Err(e) => {
                    update_status(None, "failed");
                    ui.show_error(&format!("Could not send message: {}", e));
                }
            }
        });
    };

    let visible_threads = move || {
        let term = search.get();
        threads
            .get()
            .into_iter()
            .filter(|t| matches_search(t, &term))
            .collect::<Vec<_>>()
    };

    let selected_thread =
        move || selected.get().and_then(|id| threads.get().into_iter().find(|t| t.id == id));

    view! {
        <div class="flex h-[calc(100vh-8rem)] bg-gray-800 rounded-xl overflow-hidden border border-gray-700">
            // Conversation list
            <div class="w-80 border-r border-gray-700 flex flex-col">
                <div class="p-3 border-b border-gray-700 space-y-2">
                    <div class="flex items-center justify-between">
                        <h2 class="font-semibold">"Conversations"</h2>
                        <button
                            on:click=refresh
                            disabled=move || refreshing.get()
                            class="px-2 py-1 text-sm bg-gray-700 hover:bg-gray-600 disabled:bg-gray-700/50 rounded-lg transition-colors"
                        >
                            {move || if refreshing.get() { "..." } else { "↻" }}
                        </button>
                    </div>
                    <input
                        type="text"
                        placeholder="Search by name or number"
                        prop:value=move || search.get()
                        on:input=move |ev| set_search.set(event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-3 py-2 text-sm
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>

                <div class="flex-1 overflow-y-auto">
                    {move || {
                        if loading.get() {
                            view! { <Loading /> }.into_view()
                        } else {
                            let items = visible_threads();
                            if items.is_empty() {
                                view! {
                                    <p class="text-gray-400 text-sm text-center py-8">"No conversations"</p>
                                }.into_view()
                            } else {
                                items.into_iter().map(|thread| {
                                    let id = thread.id;
                                    let is_selected = move || selected.get() == Some(id);

                                    view! {
                                        <button
                                            on:click=move |_| select_conversation(id)
                                            class=move || {
                                                let base = "w-full flex items-center space-x-3 px-3 py-3 text-left hover:bg-gray-700/60 transition-colors";
                                                if is_selected() {
                                                    format!("{} bg-gray-700", base)
                                                } else {
                                                    base.to_string()
                                                }
                                            }
                                        >
                                            <span class="w-10 h-10 rounded-full bg-gray-600 flex items-center justify-center text-sm font-semibold flex-shrink-0">
                                                {thread.initials.clone()}
                                            </span>
                                            <span class="flex-1 min-w-0">
                                                <span class="flex items-center justify-between">
                                                    <span class="font-medium text-sm truncate">{thread.name.clone()}</span>
                                                    <span class="text-xs text-gray-400 ml-2">
                                                        {format_last_activity(thread.last_activity, Utc::now())}
                                                    </span>
                                                </span>
                                                <span class="flex items-center justify-between mt-0.5">
                                                    <span class="text-xs text-gray-400 truncate">{thread.number.clone()}</span>
                                                    {(thread.unread > 0).then(|| view! {
                                                        <span class="bg-primary-600 text-xs px-1.5 py-0.5 rounded-full">
                                                            {thread.unread}
                                                        </span>
                                                    })}
                                                </span>
                                            </span>
                                        </button>
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
                    match selected_thread() {
                        Some(thread) => view! {
                            <ThreadView
                                thread=thread
                                loading=Signal::derive(move || loading_messages.get() == selected.get() && loading_messages.get().is_some())
                                on_send=send
                            />
                        }.into_view(),
                        None => view! {
                            <div class="flex-1 flex items-center justify-center text-gray-400">
                                "Select a conversation"
                            </div>
                        }.into_view(),
                    }
                }}
            </div>
        </div>
    }
}

/// The selected conversation's message thread and composer
#[component]
fn ThreadView(
    thread: ChatThread,
    #[prop(into)]
    loading: Signal<bool>,
    on_send: impl Fn(String) + 'static + Clone,
) -> impl IntoView {
    let (draft, set_draft) = create_signal(String::new());

    let status_badge = thread.status.clone().map(|status| {
        let class = match status.as_str() {
            "open" => "bg-green-700",
            "resolved" => "bg-gray-600",
            _ => "bg-yellow-700",
        };
        view! {
            <span class=format!("{} text-xs px-2 py-0.5 rounded-full capitalize", class)>
                {status}
            </span>
        }
    });

    let submit = {
        let on_send = on_send.clone();
        move || {
            let text = draft.get_untracked().trim().to_string();
            if text.is_empty() {
                return;
            }
            set_draft.set(String::new());
            on_send(text);
        }
    };

    let submit_for_click = submit.clone();
    let submit_for_key = submit;

    let messages = thread.messages.clone();

    view! {
        // Header
        <div class="flex items-center space-x-3 px-4 py-3 border-b border-gray-700">
            <span class="w-10 h-10 rounded-full bg-gray-600 flex items-center justify-center text-sm font-semibold">
                {thread.initials.clone()}
            </span>
            <div class="flex-1">
                <div class="flex items-center space-x-2">
                    <h3 class="font-semibold">{thread.name.clone()}</h3>
                    {status_badge}
                </div>
                <p class="text-xs text-gray-400">{thread.number.clone()}</p>
            </div>
        </div>

        // Messages
        <div class="flex-1 overflow-y-auto p-4 space-y-2">
            {move || {
                if loading.get() {
                    view! { <Loading /> }.into_view()
                } else {
                    messages.clone().into_iter().map(|message| {
                        view! { <MessageBubble message=message /> }
                    }).collect_view()
                }
            }}
        </div>

        // Composer
        <div class="p-3 border-t border-gray-700 flex items-center space-x-2">
            <input
                type="text"
                placeholder="Type a message"
                prop:value=move || draft.get()
                on:input=move |ev| set_draft.set(event_target_value(&ev))
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    if ev.key() == "Enter" {
                        submit_for_key();
                    }
                }
                class="flex-1 bg-gray-700 rounded-lg px-4 py-3
                       border border-gray-600 focus:border-primary-500 focus:outline-none"
            />
            <button
                on:click=move |_| submit_for_click()
                class="px-4 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "Send"
            </button>
        </div>
    }
}

/// One message bubble
#[component]
fn MessageBubble(message: ChatMessage) -> impl IntoView {
    let align = if message.outgoing {
        "justify-end"
    } else {
        "justify-start"
    };
    let bubble = if message.outgoing {
        "bg-primary-700"
    } else {
        "bg-gray-700"
    };

    let time = Utc
        .timestamp_opt(message.timestamp, 0)
        .single()
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_default();

    let status_hint = message.status.clone().and_then(|status| match status.as_str() {
        "sending" => Some("…"),
        "failed" => Some("!"),
        _ => None,
    });

    view! {
        <div class=format!("flex {}", align)>
            <div class=format!("{} max-w-md rounded-lg px-3 py-2", bubble)>
                {message.audio.clone().map(|clip| view! {
                    <audio controls=true src=clip.url class="max-w-full mb-1" />
                })}
                <p class="text-sm whitespace-pre-wrap break-words">{message.content.clone()}</p>
                <p class="text-[10px] text-gray-300/70 text-right mt-1">
                    {time}
                    {status_hint.map(|hint| view! { <span class="ml-1">{hint}</span> })}
                </p>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::helpdesk::{Attachment, AttachmentMetadata, ConversationMeta, Sender};

    fn message(id: u64, content: Option<&str>, direction: Direction, created_at: i64) -> Message {
        Message {
            id,
            content: content.map(String::from),
            processed_message_content: None,
            direction,
            created_at,
            content_type: None,
            status: None,
            attachments: Vec::new(),
        }
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("Adriano Fante"), "AF");
        assert_eq!(initials("Ana"), "A");
        assert_eq!(initials("ana maria braga"), "AM");
        assert_eq!(initials(""), "?");
    }

    #[test]
    fn test_format_last_activity_buckets() {
        let now = Utc.with_ymd_and_hms(2025, 5, 26, 18, 0, 0).unwrap();

        let today = Utc.with_ymd_and_hms(2025, 5, 26, 14, 4, 0).unwrap();
        assert_eq!(format_last_activity(today.timestamp(), now), "14:04");

        let yesterday = Utc.with_ymd_and_hms(2025, 5, 25, 9, 0, 0).unwrap();
        assert_eq!(format_last_activity(yesterday.timestamp(), now), "Yesterday");

        // 2025-05-20 is a Tuesday, within 30 days
        let recent = Utc.with_ymd_and_hms(2025, 5, 20, 10, 30, 0).unwrap();
        assert_eq!(format_last_activity(recent.timestamp(), now), "Tue");

        let old = Utc.with_ymd_and_hms(2025, 1, 2, 10, 30, 0).unwrap();
        assert_eq!(format_last_activity(old.timestamp(), now), "02/01/2025");
    }

    #[test]
    fn test_thread_sorts_messages_ascending() {
        let conversation = Conversation {
            id: 1,
            status: Some("open".to_string()),
            unread_count: 0,
            last_activity_at: 300,
            meta: ConversationMeta {
                sender: Some(Sender {
                    name: Some("Ana".to_string()),
                    phone_number: Some("+55".to_string()),
                    thumbnail: None,
                }),
            },
            messages: vec![
                message(2, Some("second"), Direction::Outgoing, 200),
                message(1, Some("first"), Direction::Incoming, 100),
            ],
        };

        let thread = thread_from_conversation(&conversation);
        assert_eq!(thread.initials, "A");
        assert_eq!(
            thread.messages.iter().map(|m| m.id).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert!(!thread.messages[0].outgoing);
        assert!(thread.messages[1].outgoing);
    }

    #[test]
    fn test_audio_message_detection_and_fallback() {
        let mut audio = message(1, None, Direction::Incoming, 100);
        audio.attachments = vec![Attachment {
            file_type: Some("audio/ogg".to_string()),
            data_url: Some("https://cdn.example/a.ogg".to_string()),
            metadata: Some(AttachmentMetadata { duration: Some(5.0) }),
        }];

        let mapped = chat_message(&audio);
        let clip = mapped.audio.expect("audio clip");
        assert_eq!(clip.url, "https://cdn.example/a.ogg");
        assert_eq!(clip.duration, Some(5.0));
        assert_eq!(mapped.content, "🎵 Audio message");
    }

    #[test]
    fn test_non_audio_attachment_is_not_audio() {
        let mut msg = message(1, Some("doc"), Direction::Incoming, 100);
        msg.attachments = vec![Attachment {
            file_type: Some("image/png".to_string()),
            data_url: Some("https://cdn.example/p.png".to_string()),
            metadata: None,
        }];

        assert!(chat_message(&msg).audio.is_none());
    }

    #[test]
    fn test_search_matches_name_and_number() {
        let thread = ChatThread {
            id: 1,
            name: "Adriano Fante".to_string(),
            number: "556392878781".to_string(),
            initials: "AF".to_string(),
            last_activity: 0,
            status: None,
            unread: 0,
            avatar: None,
            messages: Vec::new(),
        };

        assert!(matches_search(&thread, ""));
        assert!(matches_search(&thread, "adriano"));
        assert!(matches_search(&thread, "6392"));
        assert!(!matches_search(&thread, "maria"));
    }
}
