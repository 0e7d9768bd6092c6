//! Leaderboard use-case service.
//!
//! # Responsibility
//! - Append validated submissions to the persisted collection.
//! - Produce and render the ranked top-N view over persisted + baseline.
//!
//! # Invariants
//! - Appended records always carry an `id`.
//! - Writes replace the whole collection with the loaded one plus the new
//!   record.
//! - No two persisted records share an identity key; a repeated key replaces
//!   the stored record.

use crate::leaderboard::{merge_and_rank, top_n};
use crate::model::poem::PoemRecord;
use crate::render::{LeaderboardEntry, LeaderboardSink};
use crate::repo::poem_repo::{PoemRepository, RepoResult};
use log::info;

/// Leaderboard service over a poem repository and a fixed baseline.
pub struct LeaderboardService<R: PoemRepository> {
    repo: R,
    baseline: Vec<PoemRecord>,
}

impl<R: PoemRepository> LeaderboardService<R> {
    pub fn new(repo: R, baseline: Vec<PoemRecord>) -> Self {
        Self { repo, baseline }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn baseline(&self) -> &[PoemRecord] {
        &self.baseline
    }

    /// Appends one record and writes back the full collection.
    ///
    /// A stored record with the same identity key is replaced in place, so
    /// the persisted collection never holds duplicate keys. A record without
    /// an id also replaces a stored legacy record with the same author and
    /// text.
    ///
    /// # Errors
    /// - `RepoError::Validation` for blank author/poem or out-of-range score.
    /// - `RepoError::Storage` / `Serialization` when the write fails.
    pub fn append(&self, mut record: PoemRecord) -> RepoResult<PoemRecord> {
        record.validate()?;
        let fallback_key = record.identity_key();
        record.ensure_id();
        let key = record.identity_key();

        let mut poems = self.repo.load();
        let replaced = match poems.iter().position(|poem| {
            let stored_key = poem.identity_key();
            stored_key == key || stored_key == fallback_key
        }) {
            Some(index) => {
                poems[index] = record.clone();
                true
            }
            None => {
                poems.push(record.clone());
                false
            }
        };
        self.repo.save(&poems)?;

        info!(
            "event=poem_append module=service status=ok score={} replaced={} collection_size={}",
            record.score,
            replaced,
            poems.len()
        );
        Ok(record)
    }

    /// Full merged collection, ranked by score.
    pub fn ranked_all(&self) -> Vec<PoemRecord> {
        merge_and_rank(&self.repo.load(), &self.baseline)
    }

    /// Top `limit` records of the merged collection.
    pub fn ranked(&self, limit: usize) -> Vec<PoemRecord> {
        let ranked = self.ranked_all();
        top_n(&ranked, limit).to_vec()
    }

    /// Renders the top `limit` records into `sink` and returns how many were shown.
    pub fn render_top(&self, sink: &mut dyn LeaderboardSink, limit: usize) -> usize {
        let entries = LeaderboardEntry::from_ranked(&self.ranked(limit));
        sink.render(&entries);
        entries.len()
    }
}
