//! Board Page
//!
//! The contact kanban: one column per pipeline stage plus the synthetic
//! unassigned bucket, with HTML5 drag-and-drop between columns.

use leptos::*;

use crate::board::model::{Card, Lane, DEFAULT_STAGE_COLOR};
use crate::board::BoardStore;
use crate::components::{ConfirmDialog, Loading, Modal};
use crate::state::{datastore_signal, use_ui_state};

/// Stage colors offered by the stage dialog
const STAGE_COLORS: [(&str, &str); 6] = [
    ("#3B82F6", "Blue"),
    ("#10B981", "Green"),
    ("#F59E0B", "Amber"),
    ("#EF4444", "Red"),
    ("#8B5CF6", "Violet"),
    ("#EC4899", "Pink"),
];

/// A stage as edited through the modal: `(id, title, color)`
type StageDraft = (String, String, String);

/// Kanban board page component
#[component]
pub fn BoardPage() -> impl IntoView {
    let store = BoardStore::new();
    let datastore = datastore_signal();
    let ui = use_ui_state();

    let (show_create, set_show_create) = create_signal(false);
    let editing_stage = create_rw_signal(None::<StageDraft>);
    // (id, title) of the stage queued for deletion
    let deleting_stage = create_rw_signal(None::<(String, String)>);
    // (card id, source lane id) of the card being dragged
    let dragging = create_rw_signal(None::<(String, String)>);
    let loaded = create_rw_signal(false);

    // Initial load once the runtime config is available
    create_effect(move |_| {
        if loaded.get_untracked() {
            return;
        }
        if let Some(ds) = datastore.get() {
            loaded.set(true);
            spawn_local(async move { store.load(&ds).await });
        }
    });

    let refresh = move |_| {
        let Some(ds) = datastore.get_untracked() else {
            return;
        };
        spawn_local(async move { store.load(&ds).await });
    };

    let drop_on_lane = move |target_lane_id: String| {
        let Some((card_id, source_lane_id)) = dragging.get_untracked() else {
            return;
        };
        dragging.set(None);

        let Some(ds) = datastore.get_untracked() else {
            return;
        };

        spawn_local(async move {
            if let Err(e) = store
                .move_card(&ds, &card_id, &source_lane_id, &target_lane_id)
                .await
            {
                ui.show_error(&format!("Could not move contact: {}", e));
            }
        });
    };

    let confirm_delete_stage = move || {
        let Some((stage_id, _)) = deleting_stage.get_untracked() else {
            return;
        };
        deleting_stage.set(None);

        let Some(ds) = datastore.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match store.delete_stage(&ds, &stage_id).await {
                Ok(()) => ui.show_success("Stage deleted"),
                Err(e) => ui.show_error(&e),
            }
        });
    };

    view! {
        <div class="space-y-6">
            // Header
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Contact Board"</h1>
                    <p class="text-gray-400 mt-1">"Drag contacts through your pipeline"</p>
                </div>

                <div class="flex items-center space-x-2">
                    <button
                        on:click=refresh
                        class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg font-medium transition-colors"
                    >
                        "Refresh"
                    </button>
                    <button
                        on:click=move |_| set_show_create.set(true)
                        class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
                    >
                        "+ New Stage"
                    </button>
                </div>
            </div>

            // Per-source load failures: the board still renders what loaded
            {move || {
                let errors = store.errors.get();
                if errors.is_empty() {
                    view! {}.into_view()
                } else {
                    view! {
                        <div class="space-y-2">
                            {errors.into_iter().map(|msg| view! {
                                <div class="bg-red-900/40 border border-red-700 text-red-300 text-sm rounded-lg px-4 py-3">
                                    {msg}
                                </div>
                            }).collect_view()}
                        </div>
                    }.into_view()
                }
            }}

            // Stage modals
            {move || {
                if show_create.get() {
                    view! {
                        <StageModal
                            store=store
                            stage=None
                            on_close=move || set_show_create.set(false)
                        />
                    }.into_view()
                } else {
                    view! {}.into_view()
                }
            }}
            {move || {
                editing_stage.get().map(|draft| view! {
                    <StageModal
                        store=store
                        stage=Some(draft)
                        on_close=move || editing_stage.set(None)
                    />
                })
            }}
            {move || {
                deleting_stage.get().map(|(_, title)| {
                    let message = format!(
                        "Delete stage \"{}\"? Contacts assigned to it return to Unassigned.",
                        title
                    );
                    view! {
                        <ConfirmDialog
                            title="Delete Stage"
                            message=message
                            on_confirm=confirm_delete_stage
                            on_cancel=move || deleting_stage.set(None)
                        />
                    }
                })
            }}

            // Lanes
            {move || {
                if store.loading.get() {
                    view! { <Loading /> }.into_view()
                } else {
                    let lanes = store.board.get().lanes;
                    if lanes.is_empty() {
                        view! {
                            <div class="text-center py-12">
                                <p class="text-gray-400">"No stages yet. Create your first one!"</p>
                            </div>
                        }.into_view()
                    } else {
                        view! {
                            <div class="flex items-start space-x-4 overflow-x-auto pb-4">
                                {lanes.into_iter().map(|lane| {
                                    view! {
                                        <BoardLane
                                            lane=lane
                                            dragging=dragging
                                            editing_stage=editing_stage
                                            deleting_stage=deleting_stage
                                            on_drop=drop_on_lane
                                        />
                                    }
                                }).collect_view()}
                            </div>
                        }.into_view()
                    }
                }
            }}
        </div>
    }
}

/// One column of the board
#[component]
fn BoardLane(
    lane: Lane,
    dragging: RwSignal<Option<(String, String)>>,
    editing_stage: RwSignal<Option<StageDraft>>,
    deleting_stage: RwSignal<Option<(String, String)>>,
    on_drop: impl Fn(String) + 'static + Clone,
) -> impl IntoView {
    let lane_id = lane.id.clone();
    let card_count = lane.cards.len();
    let is_stage = !lane.is_unassigned();

    let header_style = format!("color: {};", lane.style.color);
    let lane_style = format!("background-color: {};", lane.style.background);

    let draft = (lane.id.clone(), lane.title.clone(), lane.style.color.clone());
    let delete_target = (lane.id.clone(), lane.title.clone());

    let on_drop_for_lane = on_drop;
    let lane_id_for_drop = lane_id.clone();

    view! {
        <div
            class="flex-shrink-0 w-72 rounded-xl p-3"
            style=lane_style
            on:dragover=move |ev: web_sys::DragEvent| ev.prevent_default()
            on:drop=move |ev: web_sys::DragEvent| {
                ev.prevent_default();
                on_drop_for_lane(lane_id_for_drop.clone());
            }
        >
            <div class="group flex items-center justify-between px-1 mb-3">
                <h3 class="font-semibold" style=header_style>{lane.title.clone()}</h3>
                <div class="flex items-center space-x-1">
                    {is_stage.then(|| {
                        let draft = draft.clone();
                        let delete_target = delete_target.clone();
                        view! {
                            <button
                                on:click=move |_| editing_stage.set(Some(draft.clone()))
                                class="text-gray-500 hover:text-white text-xs opacity-0 group-hover:opacity-100"
                                title="Edit stage"
                            >
                                "✎"
                            </button>
                            <button
                                on:click=move |_| deleting_stage.set(Some(delete_target.clone()))
                                class="text-gray-500 hover:text-red-400 text-xs opacity-0 group-hover:opacity-100"
                                title="Delete stage"
                            >
                                "🗑"
                            </button>
                        }
                    })}
                    <span class="text-xs text-gray-400">{card_count}</span>
                </div>
            </div>

            <div class="space-y-2 min-h-[3rem]">
                {lane.cards.into_iter().map(|card| {
                    view! { <BoardCard card=card lane_id=lane_id.clone() dragging=dragging /> }
                }).collect_view()}
            </div>
        </div>
    }
}

/// One contact card
#[component]
fn BoardCard(
    card: Card,
    lane_id: String,
    dragging: RwSignal<Option<(String, String)>>,
) -> impl IntoView {
    let card_id = card.id.clone();
    let drag_payload = format!("{}:{}", card.id, lane_id);

    view! {
        <div
            class="bg-gray-800 rounded-lg p-3 border border-gray-700 cursor-grab
                   hover:border-gray-500 transition-colors"
            draggable="true"
            on:dragstart=move |ev: web_sys::DragEvent| {
                if let Some(dt) = ev.data_transfer() {
                    let _ = dt.set_data("text/plain", &drag_payload);
                }
                dragging.set(Some((card_id.clone(), lane_id.clone())));
            }
        >
            <div class="flex items-center justify-between">
                <span class="font-medium text-sm">{card.title}</span>
                <span class="text-sm">{card.label}</span>
            </div>
            {(!card.description.is_empty()).then(|| view! {
                <p class="text-xs text-gray-400 mt-1">{card.description.clone()}</p>
            })}
        </div>
    }
}

/// Create/edit stage modal
#[component]
fn StageModal(
    store: BoardStore,
    stage: Option<StageDraft>,
    on_close: impl Fn() + 'static + Clone,
) -> impl IntoView {
    let datastore = datastore_signal();
    let ui = use_ui_state();

    let editing_id = stage.as_ref().map(|(id, _, _)| id.clone());
    let modal_title = if editing_id.is_some() {
        "Edit Stage"
    } else {
        "Create Stage"
    };

    let (title, set_title) = create_signal(
        stage
            .as_ref()
            .map(|(_, title, _)| title.clone())
            .unwrap_or_default(),
    );
    let (color, set_color) = create_signal(
        stage
            .as_ref()
            .map(|(_, _, color)| color.clone())
            .unwrap_or_else(|| DEFAULT_STAGE_COLOR.to_string()),
    );
    let (submitting, set_submitting) = create_signal(false);

    let on_close_for_submit = on_close.clone();
    let on_close_for_cancel = on_close.clone();
    let on_close_for_modal = on_close;

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let stage_title = title.get_untracked().trim().to_string();
        if stage_title.is_empty() {
            ui.show_error("Stage title is required");
            return;
        }

        let Some(ds) = datastore.get_untracked() else {
            return;
        };

        set_submitting.set(true);

        let stage_color = color.get_untracked();
        let editing_id = editing_id.clone();
        let on_close_inner = on_close_for_submit.clone();
        spawn_local(async move {
            let result = match &editing_id {
                Some(id) => store
                    .update_stage(&ds, id, &stage_title, &stage_color)
                    .await
                    .map(|()| "Stage updated"),
                None => store
                    .create_stage(&ds, &stage_title, &stage_color)
                    .await
                    .map(|()| "Stage created"),
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
                // Title
                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Title"</label>
                    <input
                        type="text"
                        placeholder="e.g., Qualified"
                        prop:value=move || title.get()
                        on:input=move |ev| set_title.set(event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-4 py-3
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>

                // Color
                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Color"</label>
                    <div class="flex space-x-2">
                        {STAGE_COLORS.into_iter().map(|(value, name)| {
                            let swatch = format!("background-color: {};", value);
                            view! {
                                <button
                                    type="button"
                                    title=name
                                    style=swatch
                                    on:click=move |_| set_color.set(value.to_string())
                                    class=move || {
                                        let base = "w-8 h-8 rounded-full transition-transform";
                                        if color.get() == value {
                                            format!("{} ring-2 ring-white scale-110", base)
                                        } else {
                                            base.to_string()
                                        }
                                    }
                                />
                            }
                        }).collect_view()}
                    </div>
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
