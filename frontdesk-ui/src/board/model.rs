//! Board Data Model
//!
//! `Stage` and `ContactStage` mirror datastore tables. `Board`, `Lane`
//! and `Card` are derived presentation values, computed fresh on every
//! load and never persisted.

/// Lane id of the synthetic bucket for contacts without a stage
pub const UNASSIGNED_LANE_ID: &str = "unassigned";

/// Title of the synthetic unassigned lane
pub const UNASSIGNED_LANE_TITLE: &str = "Unassigned";

/// Color of the synthetic unassigned lane
pub const UNASSIGNED_COLOR: &str = "#6B7280";

/// Default color for new stages
pub const DEFAULT_STAGE_COLOR: &str = "#3B82F6";

/// A pipeline stage, owned by the datastore's `stages` table
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stage {
    pub id: String,
    pub title: String,
    pub order_index: i64,
    pub color: String,
    pub created_at: String,
    pub updated_at: String,
}

/// The persisted assignment of one contact to at most one stage
/// (`contact_stages` table, unique per `contact_id`)
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ContactStage {
    pub id: String,
    pub contact_id: String,
    pub stage_id: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A contact rendered within a lane
#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    /// The contact's external id in string form
    pub id: String,
    pub title: String,
    pub description: String,
    /// Glyph hinting at the available contact channel
    pub label: String,
    pub contact_id: u64,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub thumbnail: Option<String>,
}

/// Colors derived from the stage color at fixed opacity
#[derive(Clone, Debug, PartialEq)]
pub struct LaneStyle {
    pub background: String,
    pub color: String,
}

/// A column of the board: a stage, or the synthetic unassigned bucket
#[derive(Clone, Debug, PartialEq)]
pub struct Lane {
    pub id: String,
    pub title: String,
    pub cards: Vec<Card>,
    pub style: LaneStyle,
}

impl Lane {
    pub fn is_unassigned(&self) -> bool {
        self.id == UNASSIGNED_LANE_ID
    }
}

/// The derived board
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Board {
    pub lanes: Vec<Lane>,
}

impl Board {
    pub fn lane(&self, lane_id: &str) -> Option<&Lane> {
        self.lanes.iter().find(|l| l.id == lane_id)
    }

    /// Total number of cards across all lanes
    pub fn card_count(&self) -> usize {
        self.lanes.iter().map(|l| l.cards.len()).sum()
    }
}
