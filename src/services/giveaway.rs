//! Giveaway lifecycle service
//!
//! Owns the rules for validating giveaway input, deriving active/expired
//! state from the current time, and performing create/read/update/delete
//! against the backing store through the repository interface.
//!
//! Creation requires a well-formed `endDate` strictly in the future. Updates
//! only require a well-formed `endDate` - moving it into the past is allowed
//! and is how a giveaway is ended early. Expiry is derived at read time; no
//! background task demotes records.

use crate::db::repositories::GiveawayRepository;
use crate::models::giveaway::{format_timestamp, now_timestamp, parse_end_date};
use crate::models::{Giveaway, GiveawayInput};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Static placeholder until real member tracking exists
const MEMBER_COUNT: i64 = 500;

/// Error types for giveaway service operations
#[derive(Debug, thiserror::Error)]
pub enum GiveawayServiceError {
    /// No giveaway with the requested id
    #[error("Giveaway not found: {0}")]
    NotFound(String),

    /// `endDate` does not parse as an ISO-8601 date-time
    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),

    /// `endDate` is not strictly in the future at creation time
    #[error("End date must be in the future")]
    EndDateNotInFuture,

    /// A required field failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error (storage unavailable, etc.)
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Community statistics
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityStats {
    pub total_giveaways: i64,
    pub active_giveaways: i64,
    pub member_count: i64,
    pub community_status: String,
}

/// Giveaway lifecycle and validation service
pub struct GiveawayService {
    repo: Arc<dyn GiveawayRepository>,
}

impl GiveawayService {
    pub fn new(repo: Arc<dyn GiveawayRepository>) -> Self {
        Self { repo }
    }

    /// All giveaways, newest first, regardless of expiry
    pub async fn list_all(&self) -> Result<Vec<Giveaway>, GiveawayServiceError> {
        Ok(self.repo.list_all().await?)
    }

    /// Giveaways whose `endDate` is strictly after the current time,
    /// soonest-ending first
    pub async fn list_active(&self) -> Result<Vec<Giveaway>, GiveawayServiceError> {
        Ok(self.repo.list_active(&now_timestamp()).await?)
    }

    /// Validate input for creation: `endDate` must parse and be strictly in
    /// the future, `title` must be non-empty. Returns the parsed end date.
    pub fn validate_for_create(
        input: &GiveawayInput,
    ) -> Result<DateTime<Utc>, GiveawayServiceError> {
        let end_date = Self::validate_for_update(input)?;
        if end_date <= Utc::now() {
            return Err(GiveawayServiceError::EndDateNotInFuture);
        }
        Ok(end_date)
    }

    /// Validate input for update: only format validity is checked, so an
    /// admin may retarget `endDate` into the past to end a giveaway early.
    pub fn validate_for_update(
        input: &GiveawayInput,
    ) -> Result<DateTime<Utc>, GiveawayServiceError> {
        if input.title.trim().is_empty() {
            return Err(GiveawayServiceError::Validation(
                "Title must not be empty".to_string(),
            ));
        }
        parse_end_date(&input.end_date)
            .ok_or_else(|| GiveawayServiceError::InvalidDateFormat(input.end_date.clone()))
    }

    /// Create a giveaway: validate, assign a fresh id, stamp `createdAt`,
    /// persist, and return the stored record
    pub async fn create(&self, input: GiveawayInput) -> Result<Giveaway, GiveawayServiceError> {
        let end_date = Self::validate_for_create(&input)?;

        let giveaway = Giveaway::new(
            input.title,
            input.description,
            input.prize,
            format_timestamp(end_date),
            input.entry_requirement,
        );

        self.repo.insert(&giveaway).await?;
        tracing::info!("Created giveaway {} ({})", giveaway.id, giveaway.title);
        Ok(giveaway)
    }

    /// Update a giveaway: overwrite the mutable fields and stamp `updatedAt`.
    /// `id` and `createdAt` are preserved; fails with `NotFound` rather than
    /// upserting.
    pub async fn update(
        &self,
        id: &str,
        input: GiveawayInput,
    ) -> Result<Giveaway, GiveawayServiceError> {
        let end_date = Self::validate_for_update(&input)?;

        let existing = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| GiveawayServiceError::NotFound(id.to_string()))?;

        let updated = Giveaway {
            id: existing.id,
            title: input.title,
            description: input.description,
            prize: input.prize,
            end_date: format_timestamp(end_date),
            entry_requirement: input.entry_requirement,
            created_at: existing.created_at,
            updated_at: Some(now_timestamp()),
        };

        // The row can vanish between the fetch and the write
        if !self.repo.update(&updated).await? {
            return Err(GiveawayServiceError::NotFound(id.to_string()));
        }

        Ok(updated)
    }

    /// Hard-delete a giveaway. A second delete of the same id reports
    /// `NotFound`, not success.
    pub async fn delete(&self, id: &str) -> Result<(), GiveawayServiceError> {
        if !self.repo.delete(id).await? {
            return Err(GiveawayServiceError::NotFound(id.to_string()));
        }
        tracing::info!("Deleted giveaway {}", id);
        Ok(())
    }

    /// Community statistics: total and active counts plus the placeholder
    /// member count
    pub async fn stats(&self) -> Result<CommunityStats, GiveawayServiceError> {
        let now = now_timestamp();
        let total_giveaways = self.repo.count_all().await?;
        let active_giveaways = self.repo.count_active(&now).await?;

        Ok(CommunityStats {
            total_giveaways,
            active_giveaways,
            member_count: MEMBER_COUNT,
            community_status: "active".to_string(),
        })
    }
}
