//! Giveaway repository
//!
//! The narrow storage interface for giveaway records: single-row
//! insert/get/update/delete plus the two sorted listings and their counts.
//! Active-giveaway filtering is a string comparison (`end_date > now`), which
//! is chronologically correct because all stored timestamps use the canonical
//! fixed-width UTC format.

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::Giveaway;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

#[async_trait]
pub trait GiveawayRepository: Send + Sync {
    async fn insert(&self, giveaway: &Giveaway) -> Result<()>;
    async fn get_by_id(&self, id: &str) -> Result<Option<Giveaway>>;
    /// All giveaways, newest first
    async fn list_all(&self) -> Result<Vec<Giveaway>>;
    /// Giveaways with `end_date` strictly after `now`, soonest-ending first
    async fn list_active(&self, now: &str) -> Result<Vec<Giveaway>>;
    /// Overwrite an existing row; returns false if no row matched
    async fn update(&self, giveaway: &Giveaway) -> Result<bool>;
    /// Hard delete; returns false if no row matched
    async fn delete(&self, id: &str) -> Result<bool>;
    async fn count_all(&self) -> Result<i64>;
    async fn count_active(&self, now: &str) -> Result<i64>;
}

pub struct SqlxGiveawayRepository {
    pool: DynDatabasePool,
}

impl SqlxGiveawayRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn GiveawayRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl GiveawayRepository for SqlxGiveawayRepository {
    async fn insert(&self, giveaway: &Giveaway) -> Result<()> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => insert_sqlite(self.pool.as_sqlite().unwrap(), giveaway).await,
            DatabaseDriver::Mysql => insert_mysql(self.pool.as_mysql().unwrap(), giveaway).await,
        }
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Giveaway>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => get_by_id_sqlite(self.pool.as_sqlite().unwrap(), id).await,
            DatabaseDriver::Mysql => get_by_id_mysql(self.pool.as_mysql().unwrap(), id).await,
        }
    }

    async fn list_all(&self) -> Result<Vec<Giveaway>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => list_all_sqlite(self.pool.as_sqlite().unwrap()).await,
            DatabaseDriver::Mysql => list_all_mysql(self.pool.as_mysql().unwrap()).await,
        }
    }

    async fn list_active(&self, now: &str) -> Result<Vec<Giveaway>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => list_active_sqlite(self.pool.as_sqlite().unwrap(), now).await,
            DatabaseDriver::Mysql => list_active_mysql(self.pool.as_mysql().unwrap(), now).await,
        }
    }

    async fn update(&self, giveaway: &Giveaway) -> Result<bool> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => update_sqlite(self.pool.as_sqlite().unwrap(), giveaway).await,
            DatabaseDriver::Mysql => update_mysql(self.pool.as_mysql().unwrap(), giveaway).await,
        }
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => delete_sqlite(self.pool.as_sqlite().unwrap(), id).await,
            DatabaseDriver::Mysql => delete_mysql(self.pool.as_mysql().unwrap(), id).await,
        }
    }

    async fn count_all(&self) -> Result<i64> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => count_all_sqlite(self.pool.as_sqlite().unwrap()).await,
            DatabaseDriver::Mysql => count_all_mysql(self.pool.as_mysql().unwrap()).await,
        }
    }

    async fn count_active(&self, now: &str) -> Result<i64> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => count_active_sqlite(self.pool.as_sqlite().unwrap(), now).await,
            DatabaseDriver::Mysql => count_active_mysql(self.pool.as_mysql().unwrap(), now).await,
        }
    }
}

const COLUMNS: &str =
    "id, title, description, prize, end_date, entry_requirement, created_at, updated_at";

// SQLite implementations

async fn insert_sqlite(pool: &SqlitePool, giveaway: &Giveaway) -> Result<()> {
    sqlx::query(
        "INSERT INTO giveaways (id, title, description, prize, end_date, entry_requirement, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
    )
    .bind(&giveaway.id)
    .bind(&giveaway.title)
    .bind(&giveaway.description)
    .bind(&giveaway.prize)
    .bind(&giveaway.end_date)
    .bind(&giveaway.entry_requirement)
    .bind(&giveaway.created_at)
    .bind(&giveaway.updated_at)
    .execute(pool)
    .await
    .context("Failed to insert giveaway")?;
    Ok(())
}

async fn get_by_id_sqlite(pool: &SqlitePool, id: &str) -> Result<Option<Giveaway>> {
    let row = sqlx::query(&format!("SELECT {} FROM giveaways WHERE id = ?", COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get giveaway")?;
    Ok(row.map(|r| row_to_giveaway_sqlite(&r)))
}

async fn list_all_sqlite(pool: &SqlitePool) -> Result<Vec<Giveaway>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM giveaways ORDER BY created_at DESC",
        COLUMNS
    ))
    .fetch_all(pool)
    .await
    .context("Failed to list giveaways")?;
    Ok(rows.iter().map(row_to_giveaway_sqlite).collect())
}

async fn list_active_sqlite(pool: &SqlitePool, now: &str) -> Result<Vec<Giveaway>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM giveaways WHERE end_date > ? ORDER BY end_date ASC",
        COLUMNS
    ))
    .bind(now)
    .fetch_all(pool)
    .await
    .context("Failed to list active giveaways")?;
    Ok(rows.iter().map(row_to_giveaway_sqlite).collect())
}

async fn update_sqlite(pool: &SqlitePool, giveaway: &Giveaway) -> Result<bool> {
    let result = sqlx::query(
        "UPDATE giveaways SET title = ?, description = ?, prize = ?, end_date = ?, entry_requirement = ?, updated_at = ? WHERE id = ?"
    )
    .bind(&giveaway.title)
    .bind(&giveaway.description)
    .bind(&giveaway.prize)
    .bind(&giveaway.end_date)
    .bind(&giveaway.entry_requirement)
    .bind(&giveaway.updated_at)
    .bind(&giveaway.id)
    .execute(pool)
    .await
    .context("Failed to update giveaway")?;
    Ok(result.rows_affected() > 0)
}

async fn delete_sqlite(pool: &SqlitePool, id: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM giveaways WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete giveaway")?;
    Ok(result.rows_affected() > 0)
}

async fn count_all_sqlite(pool: &SqlitePool) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM giveaways")
        .fetch_one(pool)
        .await
        .context("Failed to count giveaways")?;
    Ok(row.get("count"))
}

async fn count_active_sqlite(pool: &SqlitePool, now: &str) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM giveaways WHERE end_date > ?")
        .bind(now)
        .fetch_one(pool)
        .await
        .context("Failed to count active giveaways")?;
    Ok(row.get("count"))
}

fn row_to_giveaway_sqlite(row: &sqlx::sqlite::SqliteRow) -> Giveaway {
    Giveaway {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        prize: row.get("prize"),
        end_date: row.get("end_date"),
        entry_requirement: row.get("entry_requirement"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

// MySQL implementations

async fn insert_mysql(pool: &MySqlPool, giveaway: &Giveaway) -> Result<()> {
    sqlx::query(
        "INSERT INTO giveaways (id, title, description, prize, end_date, entry_requirement, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
    )
    .bind(&giveaway.id)
    .bind(&giveaway.title)
    .bind(&giveaway.description)
    .bind(&giveaway.prize)
    .bind(&giveaway.end_date)
    .bind(&giveaway.entry_requirement)
    .bind(&giveaway.created_at)
    .bind(&giveaway.updated_at)
    .execute(pool)
    .await
    .context("Failed to insert giveaway")?;
    Ok(())
}

async fn get_by_id_mysql(pool: &MySqlPool, id: &str) -> Result<Option<Giveaway>> {
    let row = sqlx::query(&format!("SELECT {} FROM giveaways WHERE id = ?", COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get giveaway")?;
    Ok(row.map(|r| row_to_giveaway_mysql(&r)))
}

async fn list_all_mysql(pool: &MySqlPool) -> Result<Vec<Giveaway>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM giveaways ORDER BY created_at DESC",
        COLUMNS
    ))
    .fetch_all(pool)
    .await
    .context("Failed to list giveaways")?;
    Ok(rows.iter().map(row_to_giveaway_mysql).collect())
}

async fn list_active_mysql(pool: &MySqlPool, now: &str) -> Result<Vec<Giveaway>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM giveaways WHERE end_date > ? ORDER BY end_date ASC",
        COLUMNS
    ))
    .bind(now)
    .fetch_all(pool)
    .await
    .context("Failed to list active giveaways")?;
    Ok(rows.iter().map(row_to_giveaway_mysql).collect())
}

async fn update_mysql(pool: &MySqlPool, giveaway: &Giveaway) -> Result<bool> {
    let result = sqlx::query(
        "UPDATE giveaways SET title = ?, description = ?, prize = ?, end_date = ?, entry_requirement = ?, updated_at = ? WHERE id = ?"
    )
    .bind(&giveaway.title)
    .bind(&giveaway.description)
    .bind(&giveaway.prize)
    .bind(&giveaway.end_date)
    .bind(&giveaway.entry_requirement)
    .bind(&giveaway.updated_at)
    .bind(&giveaway.id)
    .execute(pool)
    .await
    .context("Failed to update giveaway")?;
    Ok(result.rows_affected() > 0)
}

async fn delete_mysql(pool: &MySqlPool, id: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM giveaways WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete giveaway")?;
    Ok(result.rows_affected() > 0)
}

async fn count_all_mysql(pool: &MySqlPool) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM giveaways")
        .fetch_one(pool)
        .await
        .context("Failed to count giveaways")?;
    Ok(row.get("count"))
}

async fn count_active_mysql(pool: &MySqlPool, now: &str) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) as count FROM giveaways WHERE end_date > ?")
        .bind(now)
        .fetch_one(pool)
        .await
        .context("Failed to count active giveaways")?;
    Ok(row.get("count"))
}

fn row_to_giveaway_mysql(row: &sqlx::mysql::MySqlRow) -> Giveaway {
    Giveaway {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        prize: row.get("prize"),
        end_date: row.get("end_date"),
        entry_requirement: row.get("entry_requirement"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
