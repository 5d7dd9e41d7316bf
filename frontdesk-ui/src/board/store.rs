//! Board Store
//!
//! Wires the pure assembly to the remote services. Loads degrade per
//! source; moves are optimistic with a full reload as the only rollback.

use leptos::*;
use serde_json::json;

use crate::api::datastore::Datastore;
use crate::api::helpdesk::{self, Contact};

use super::assemble::{apply_move, assemble};
use super::model::{Board, ContactStage, Stage, DEFAULT_STAGE_COLOR, UNASSIGNED_LANE_ID};

/// Reactive board state
#[derive(Clone, Copy)]
pub struct BoardStore {
    pub board: RwSignal<Board>,
    pub loading: RwSignal<bool>,
    /// One message per source that failed during the last load
    pub errors: RwSignal<Vec<String>>,
}

impl BoardStore {
    pub fn new() -> Self {
        Self {
            board: create_rw_signal(Board::default()),
            loading: create_rw_signal(true),
            errors: create_rw_signal(Vec::new()),
        }
    }

    /// Fetch the three sources and assemble the board.
    ///
    /// Each source is wrapped individually: a failure contributes an error
    /// message and an empty collection, so the board still renders in a
    /// degraded form instead of going blank.
    pub async fn load(&self, ds: &Datastore) {
        self.loading.set(true);
        let mut errors = Vec::new();

        let stages: Vec<Stage> = match fetch_stages(ds).await {
            Ok(rows) => rows,
            Err(e) => {
                errors.push(format!("Could not load stages: {}", e));
                Vec::new()
            }
        };

        let contacts: Vec<Contact> = match helpdesk::fetch_all_contacts().await {
            Ok(rows) => rows,
            Err(e) => {
                errors.push(format!("Could not load contacts: {}", e));
                Vec::new()
            }
        };

        let assignments: Vec<ContactStage> = match fetch_assignments(ds).await {
            Ok(rows) => rows,
            Err(e) => {
                errors.push(format!("Could not load stage assignments: {}", e));
                Vec::new()
            }
        };

        self.board.set(assemble(&stages, &contacts, &assignments));
        self.errors.set(errors);
        self.loading.set(false);
    }

    /// Create a stage at the end of the pipeline, then reload.
    ///
    /// A full reload is simpler than incremental insertion and fine at the
    /// expected scale of tens of stages.
    pub async fn create_stage(
        &self,
        ds: &Datastore,
        title: &str,
        color: &str,
    ) -> Result<(), String> {
        let color = if color.is_empty() {
            DEFAULT_STAGE_COLOR
        } else {
            color
        };

        let newest: Vec<Stage> = ds
            .select(
                "stages",
                &[("order", "order_index.desc"), ("limit", "1")],
            )
            .await?;
        let order_index = next_order_index(newest.first().map(|s| s.order_index));

        let _: Stage = ds
            .insert(
                "stages",
                &json!({ "title": title, "color": color, "order_index": order_index }),
            )
            .await?;

        self.load(ds).await;
        Ok(())
    }

    /// Rename or recolor a stage, then reload
    pub async fn update_stage(
        &self,
        ds: &Datastore,
        stage_id: &str,
        title: &str,
        color: &str,
    ) -> Result<(), String> {
        let _: Stage = ds
            .update(
                "stages",
                "id",
                stage_id,
                &json!({ "title": title, "color": color }),
            )
            .await?;

        self.load(ds).await;
        Ok(())
    }

    /// Delete a stage, then reload. Assignments pointing at the deleted
    /// stage resolve to the unassigned lane on reassembly.
    pub async fn delete_stage(&self, ds: &Datastore, stage_id: &str) -> Result<(), String> {
        ds.delete("stages", "id", stage_id).await?;
        self.load(ds).await;
        Ok(())
    }

    /// Move a card between lanes.
    ///
    /// The board is mutated locally before the remote write so drag
    /// feedback never waits on the network. On remote failure the board is
    /// reloaded from scratch; there is no fine-grained rollback.
    pub async fn move_card(
        &self,
        ds: &Datastore,
        card_id: &str,
        source_lane_id: &str,
        target_lane_id: &str,
    ) -> Result<(), String> {
        if source_lane_id == target_lane_id {
            return Ok(()); // no state change, no remote call
        }

        self.board
            .update(|board| {
                apply_move(board, card_id, source_lane_id, target_lane_id);
            });

        let result = if target_lane_id == UNASSIGNED_LANE_ID {
            ds.delete("contact_stages", "contact_id", card_id).await
        } else {
            ds.upsert::<ContactStage, _>(
                "contact_stages",
                "contact_id",
                &json!({ "contact_id": card_id, "stage_id": target_lane_id }),
            )
            .await
            .map(|_| ())
        };

        if let Err(e) = result {
            // discard the optimistic guess, resynchronize with the store
            self.load(ds).await;
            return Err(e);
        }

        Ok(())
    }
}

async fn fetch_stages(ds: &Datastore) -> Result<Vec<Stage>, String> {
    ds.select("stages", &[("order", "order_index.asc")]).await
}

async fn fetch_assignments(ds: &Datastore) -> Result<Vec<ContactStage>, String> {
    ds.select("contact_stages", &[]).await
}

/// `order_index` for a new stage: one past the current maximum, 0 when
/// the pipeline is empty.
fn next_order_index(current_max: Option<i64>) -> i64 {
    match current_max {
        Some(max) => max + 1,
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_stage_gets_index_zero() {
        assert_eq!(next_order_index(None), 0);
    }

    #[test]
    fn test_following_stages_increment() {
        assert_eq!(next_order_index(Some(0)), 1);
        assert_eq!(next_order_index(Some(7)), 8);
    }
}
