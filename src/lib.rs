//! Workforce Calendar & Leave Scheduling Engine
//!
//! This crate generates yearly working-day calendars for company PTO policies
//! and schedules employee time off against them, enforcing per-day slot
//! capacity and tier-based permissions.

#![warn(missing_docs)]

pub mod api;
pub mod audit;
pub mod config;
pub mod error;
pub mod models;
pub mod scheduling;
pub mod storage;
