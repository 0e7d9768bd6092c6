//! Key-value persistence backing the leaderboard collection.
//!
//! # Responsibility
//! - Provide a string key -> string value store with get/set/remove.
//! - Keep SQL details out of repository code.
//!
//! # Invariants
//! - `set` replaces any previous value for the key.
//! - Missing keys read as `None`, never as an error.

pub mod kv;

pub use kv::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StoreError, StoreResult};
