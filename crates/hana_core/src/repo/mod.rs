//! Repository layer for the persisted poem collection.
//!
//! # Responsibility
//! - Define the load/save contract used by the leaderboard service.
//! - Isolate JSON encoding and storage-key details from business code.
//!
//! # Invariants
//! - Reads degrade to an empty collection instead of failing the caller.
//! - Writes always replace the whole collection.

pub mod poem_repo;
