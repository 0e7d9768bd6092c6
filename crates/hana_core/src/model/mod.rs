//! Domain model for poem records and scoring results.
//!
//! # Responsibility
//! - Define the persisted record shape shared by store and CLI.
//! - Define the ephemeral analysis result returned by the scorer.
//!
//! # Invariants
//! - Records are immutable after submission.
//! - Breakdown percentages and scores stay within 0..=100.

pub mod poem;
pub mod score;
