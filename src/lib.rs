//! RBC Community API - giveaway promotions backend
//!
//! This library provides the core functionality for the RBC community site:
//! public giveaway listings, admin-gated lifecycle management, and community
//! statistics.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
