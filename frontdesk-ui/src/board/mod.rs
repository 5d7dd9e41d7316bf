//! Contact Kanban Board
//!
//! Reconciles three independently-fetched collections - stage definitions
//! from the datastore, contacts from the helpdesk, and contact-to-stage
//! assignments - into a renderable board, and applies optimistic moves.
//!
//! The pure reconciliation lives in [`assemble`]; [`store`] wires it to
//! the remote services and the reactive signals the views render from.

pub mod assemble;
pub mod model;
pub mod store;

pub use assemble::{apply_move, assemble, card_for_contact};
pub use model::{Board, Card, ContactStage, Lane, Stage, UNASSIGNED_LANE_ID};
pub use store::BoardStore;
