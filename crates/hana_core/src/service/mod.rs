//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate scorer, repository and sinks into use-case level APIs.
//! - Keep CLI/UI layers decoupled from storage and scoring details.

pub mod leaderboard_service;
pub mod submission_service;
