//! Business logic services

pub mod admin;
pub mod giveaway;

pub use admin::{AdminAuth, AdminAuthError};
pub use giveaway::{CommunityStats, GiveawayService, GiveawayServiceError};
