//! Board Assembly
//!
//! Pure reconciliation of stages, contacts and assignments into lanes,
//! plus the local half of the optimistic move.

use std::collections::HashMap;

use crate::api::helpdesk::Contact;

use super::model::{
    Board, Card, ContactStage, Lane, LaneStyle, Stage, UNASSIGNED_COLOR, UNASSIGNED_LANE_ID,
    UNASSIGNED_LANE_TITLE,
};

/// Lane colors from a stage color: background at ~12% opacity (hex alpha
/// suffix), accents at full strength.
fn lane_style(color: &str) -> LaneStyle {
    LaneStyle {
        background: format!("{}20", color),
        color: color.to_string(),
    }
}

/// Derive a card from a contact. The label glyph reflects the first
/// available channel, phone before email.
pub fn card_for_contact(contact: &Contact) -> Card {
    let label = if contact.phone_number.is_some() {
        "📱"
    } else if contact.email.is_some() {
        "📧"
    } else {
        ""
    };

    Card {
        id: contact.id.to_string(),
        title: contact
            .name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Unnamed".to_string()),
        description: contact
            .phone_number
            .clone()
            .or_else(|| contact.email.clone())
            .unwrap_or_default(),
        label: label.to_string(),
        contact_id: contact.id,
        phone: contact.phone_number.clone(),
        email: contact.email.clone(),
        thumbnail: contact.thumbnail.clone(),
    }
}

/// Build the board from the three source collections.
///
/// One lane per stage, ordered by `order_index`. Contacts whose
/// assignment is missing or points at an unknown stage land in the
/// synthetic unassigned lane, which is prepended only when non-empty.
/// Duplicate assignments resolve last-write-wins.
pub fn assemble(stages: &[Stage], contacts: &[Contact], assignments: &[ContactStage]) -> Board {
    let mut stage_by_contact: HashMap<&str, &str> = HashMap::new();
    for assignment in assignments {
        stage_by_contact.insert(&assignment.contact_id, &assignment.stage_id);
    }

    let mut ordered: Vec<&Stage> = stages.iter().collect();
    ordered.sort_by_key(|s| s.order_index);

    let mut lanes: Vec<Lane> = ordered
        .iter()
        .map(|stage| Lane {
            id: stage.id.clone(),
            title: stage.title.clone(),
            cards: Vec::new(),
            style: lane_style(&stage.color),
        })
        .collect();

    let mut unassigned = unassigned_lane();

    for contact in contacts {
        let card = card_for_contact(contact);
        let contact_key = contact.id.to_string();

        let lane = stage_by_contact
            .get(contact_key.as_str())
            .and_then(|stage_id| lanes.iter_mut().find(|l| l.id == **stage_id));

        match lane {
            Some(lane) => lane.cards.push(card),
            None => unassigned.cards.push(card),
        }
    }

    if !unassigned.cards.is_empty() {
        lanes.insert(0, unassigned);
    }

    Board { lanes }
}

/// Apply a move locally, before the remote write confirms.
///
/// Returns `false` without touching the board when the move is a no-op
/// (same lane), the card is missing, or the target lane does not exist.
/// Moving the last card out of the unassigned lane drops that lane;
/// moving a card into "unassigned" recreates it when needed.
pub fn apply_move(
    board: &mut Board,
    card_id: &str,
    source_lane_id: &str,
    target_lane_id: &str,
) -> bool {
    if source_lane_id == target_lane_id {
        return false;
    }

    let target_exists = board.lane(target_lane_id).is_some();
    if !target_exists && target_lane_id != UNASSIGNED_LANE_ID {
        return false;
    }

    let Some(source_index) = board.lanes.iter().position(|l| l.id == source_lane_id) else {
        return false;
    };
    let Some(card_index) = board.lanes[source_index]
        .cards
        .iter()
        .position(|c| c.id == card_id)
    else {
        return false;
    };

    let card = board.lanes[source_index].cards.remove(card_index);

    if board.lanes[source_index].is_unassigned() && board.lanes[source_index].cards.is_empty() {
        board.lanes.remove(source_index);
    }

    match board.lanes.iter_mut().find(|l| l.id == target_lane_id) {
        Some(target) => target.cards.push(card),
        None => {
            // target is the (currently absent) unassigned lane
            let mut lane = unassigned_lane();
            lane.cards.push(card);
            board.lanes.insert(0, lane);
        }
    }

    true
}

fn unassigned_lane() -> Lane {
    Lane {
        id: UNASSIGNED_LANE_ID.to_string(),
        title: UNASSIGNED_LANE_TITLE.to_string(),
        cards: Vec::new(),
        style: lane_style(UNASSIGNED_COLOR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(id: &str, title: &str, order_index: i64) -> Stage {
        Stage {
            id: id.to_string(),
            title: title.to_string(),
            order_index,
            color: "#3B82F6".to_string(),
            created_at: "2025-05-01T00:00:00Z".to_string(),
            updated_at: "2025-05-01T00:00:00Z".to_string(),
        }
    }

    fn contact(id: u64, name: &str, phone: Option<&str>, email: Option<&str>) -> Contact {
        Contact {
            id,
            name: Some(name.to_string()),
            email: email.map(String::from),
            phone_number: phone.map(String::from),
            thumbnail: None,
        }
    }

    fn assignment(contact_id: &str, stage_id: &str) -> ContactStage {
        ContactStage {
            id: format!("cs-{}-{}", contact_id, stage_id),
            contact_id: contact_id.to_string(),
            stage_id: stage_id.to_string(),
            created_at: "2025-05-01T00:00:00Z".to_string(),
            updated_at: "2025-05-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_one_lane_per_stage_without_unassigned() {
        let stages = vec![stage("s1", "Lead", 0), stage("s2", "Won", 1)];
        let contacts = vec![contact(1, "Ana", Some("+55"), None)];
        let assignments = vec![assignment("1", "s1")];

        let board = assemble(&stages, &contacts, &assignments);

        // every contact is mapped, so no unassigned lane appears
        assert_eq!(
            board.lanes.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(),
            vec!["s1", "s2"]
        );
        assert_eq!(board.lane("s1").unwrap().cards.len(), 1);
        assert!(board.lane("s2").unwrap().cards.is_empty());
    }

    #[test]
    fn test_unmapped_contact_creates_unassigned_lane() {
        let stages = vec![stage("s1", "Lead", 0)];
        let contacts = vec![contact(1, "Ana", None, None)];

        let board = assemble(&stages, &contacts, &[]);

        assert_eq!(board.lanes[0].id, UNASSIGNED_LANE_ID);
        assert_eq!(board.lanes[0].cards.len(), 1);
    }

    #[test]
    fn test_assignment_to_unknown_stage_falls_back_to_unassigned() {
        let stages = vec![stage("s1", "Lead", 0)];
        let contacts = vec![contact(1, "Ana", None, None)];
        let assignments = vec![assignment("1", "deleted-stage")];

        let board = assemble(&stages, &contacts, &assignments);

        assert_eq!(board.lanes[0].id, UNASSIGNED_LANE_ID);
        assert_eq!(board.lanes[0].cards[0].id, "1");
        assert!(board.lane("s1").unwrap().cards.is_empty());
    }

    #[test]
    fn test_lanes_ordered_by_order_index() {
        let stages = vec![stage("s2", "Won", 5), stage("s1", "Lead", 0)];

        let board = assemble(&stages, &[], &[]);

        assert_eq!(
            board.lanes.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(),
            vec!["s1", "s2"]
        );
    }

    #[test]
    fn test_duplicate_assignments_last_write_wins() {
        let stages = vec![stage("s1", "Lead", 0), stage("s2", "Won", 1)];
        let contacts = vec![contact(1, "Ana", None, None)];
        let assignments = vec![assignment("1", "s1"), assignment("1", "s2")];

        let board = assemble(&stages, &contacts, &assignments);

        assert!(board.lane("s1").unwrap().cards.is_empty());
        assert_eq!(board.lane("s2").unwrap().cards.len(), 1);
    }

    #[test]
    fn test_card_label_prefers_phone_over_email() {
        let both = card_for_contact(&contact(1, "Ana", Some("+55"), Some("a@b.c")));
        assert_eq!(both.label, "📱");
        assert_eq!(both.description, "+55");

        let email_only = card_for_contact(&contact(2, "Bo", None, Some("a@b.c")));
        assert_eq!(email_only.label, "📧");
        assert_eq!(email_only.description, "a@b.c");

        let neither = card_for_contact(&contact(3, "Cy", None, None));
        assert_eq!(neither.label, "");
        assert_eq!(neither.description, "");
    }

    #[test]
    fn test_nameless_contact_gets_placeholder_title() {
        let mut c = contact(1, "", None, None);
        c.name = None;
        assert_eq!(card_for_contact(&c).title, "Unnamed");
    }

    #[test]
    fn test_lane_style_applies_fixed_opacity() {
        let stages = vec![stage("s1", "Lead", 0)];
        let board = assemble(&stages, &[], &[]);
        assert_eq!(board.lanes[0].style.background, "#3B82F620");
        assert_eq!(board.lanes[0].style.color, "#3B82F6");
    }

    #[test]
    fn test_move_to_same_lane_is_noop() {
        let stages = vec![stage("s1", "Lead", 0)];
        let contacts = vec![contact(1, "Ana", None, None)];
        let assignments = vec![assignment("1", "s1")];
        let mut board = assemble(&stages, &contacts, &assignments);
        let before = board.clone();

        assert!(!apply_move(&mut board, "1", "s1", "s1"));
        assert_eq!(board, before);
    }

    #[test]
    fn test_move_unknown_card_leaves_board_unchanged() {
        let stages = vec![stage("s1", "Lead", 0), stage("s2", "Won", 1)];
        let mut board = assemble(&stages, &[], &[]);
        let before = board.clone();

        assert!(!apply_move(&mut board, "99", "s1", "s2"));
        assert_eq!(board, before);
    }

    #[test]
    fn test_move_between_stage_lanes() {
        let stages = vec![stage("s1", "Lead", 0), stage("s2", "Won", 1)];
        let contacts = vec![contact(1, "Ana", None, None)];
        let assignments = vec![assignment("1", "s1")];
        let mut board = assemble(&stages, &contacts, &assignments);

        assert!(apply_move(&mut board, "1", "s1", "s2"));
        assert!(board.lane("s1").unwrap().cards.is_empty());
        assert_eq!(board.lane("s2").unwrap().cards[0].id, "1");
    }

    #[test]
    fn test_move_to_unassigned_recreates_lane() {
        let stages = vec![stage("s1", "Lead", 0)];
        let contacts = vec![contact(1, "Ana", None, None)];
        let assignments = vec![assignment("1", "s1")];
        let mut board = assemble(&stages, &contacts, &assignments);
        assert!(board.lane(UNASSIGNED_LANE_ID).is_none());

        assert!(apply_move(&mut board, "1", "s1", UNASSIGNED_LANE_ID));
        assert_eq!(board.lanes[0].id, UNASSIGNED_LANE_ID);
        assert_eq!(board.lanes[0].cards[0].id, "1");
    }

    #[test]
    fn test_emptied_unassigned_lane_is_dropped() {
        // One stage, one unmapped contact: assign it, the bucket vanishes.
        let stages = vec![stage("s1", "Lead", 0)];
        let contacts = vec![contact(42, "Ana", Some("+551199"), None)];
        let mut board = assemble(&stages, &contacts, &[]);

        assert_eq!(
            board.lanes.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(),
            vec![UNASSIGNED_LANE_ID, "s1"]
        );
        assert_eq!(board.lanes[0].cards[0].id, "42");
        assert_eq!(board.lanes[0].cards[0].title, "Ana");

        assert!(apply_move(&mut board, "42", UNASSIGNED_LANE_ID, "s1"));

        // unassigned lane dropped once empty
        assert_eq!(
            board.lanes.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(),
            vec!["s1"]
        );
        assert_eq!(board.lane("s1").unwrap().cards[0].id, "42");
    }

    #[test]
    fn test_move_to_unknown_target_is_rejected() {
        let stages = vec![stage("s1", "Lead", 0)];
        let contacts = vec![contact(1, "Ana", None, None)];
        let assignments = vec![assignment("1", "s1")];
        let mut board = assemble(&stages, &contacts, &assignments);
        let before = board.clone();

        assert!(!apply_move(&mut board, "1", "s1", "nope"));
        assert_eq!(board, before);
    }
}
