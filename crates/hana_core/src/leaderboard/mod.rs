//! Merge, dedupe and ranking of poem collections.
//!
//! # Responsibility
//! - Combine persisted records with the baseline set by identity key.
//! - Rank records by score for display.
//!
//! # Invariants
//! - Persisted records always win over baseline records on key collision.
//! - The merged result never holds two records with the same identity key.
//! - Ranking is a stable descending sort by `score`.

pub mod baseline;

use crate::model::poem::PoemRecord;
use log::warn;
use std::collections::HashMap;

/// Merges `persisted` over `baseline` and sorts the result by score.
///
/// A key repeated inside `persisted` keeps its first position and takes the
/// later record's contents. A key repeated inside `baseline` keeps the first
/// occurrence. Records with blank author or poem are skipped.
pub fn merge_and_rank(persisted: &[PoemRecord], baseline: &[PoemRecord]) -> Vec<PoemRecord> {
    let mut merged: Vec<PoemRecord> = Vec::with_capacity(persisted.len() + baseline.len());
    let mut positions: HashMap<String, usize> = HashMap::new();

    for poem in persisted {
        if !is_mergeable(poem, "persisted") {
            continue;
        }
        let key = poem.identity_key();
        match positions.get(&key) {
            Some(&index) => merged[index] = poem.clone(),
            None => {
                positions.insert(key, merged.len());
                merged.push(poem.clone());
            }
        }
    }

    for poem in baseline {
        if !is_mergeable(poem, "baseline") {
            continue;
        }
        let key = poem.identity_key();
        if positions.contains_key(&key) {
            continue;
        }
        positions.insert(key, merged.len());
        merged.push(poem.clone());
    }

    rank(&mut merged);
    merged
}

/// Stable descending sort by score.
pub fn rank(poems: &mut [PoemRecord]) {
    poems.sort_by(|a, b| b.score.cmp(&a.score));
}

/// Returns at most `limit` leading records of an already ranked slice.
pub fn top_n(ranked: &[PoemRecord], limit: usize) -> &[PoemRecord] {
    &ranked[..ranked.len().min(limit)]
}

fn is_mergeable(poem: &PoemRecord, source: &'static str) -> bool {
    match poem.validate() {
        Ok(()) => true,
        Err(err) => {
            warn!(
                "event=leaderboard_merge module=leaderboard status=skip source={} key_present={} reason={}",
                source,
                poem.has_id(),
                err
            );
            false
        }
    }
}
