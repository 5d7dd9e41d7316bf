//! Helpdesk API integration
//!
//! Client for the external helpdesk system that owns conversations,
//! messages and contacts. Frontdesk only observes contacts and relays
//! messages; it never owns helpdesk data.

pub mod client;

pub use client::{
    Contact, ContactsPage, Conversation, Direction, HelpdeskClient, HelpdeskError, Message,
};
