//! Data models

pub mod giveaway;

pub use giveaway::{Giveaway, GiveawayInput};
