//! Database repositories
//!
//! Repository pattern implementations for database access.

pub mod giveaway;

pub use giveaway::{GiveawayRepository, SqlxGiveawayRepository};
