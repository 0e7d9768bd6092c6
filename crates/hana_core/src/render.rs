//! Render sinks for leaderboard and score output.
//!
//! Rendering is injected: core code hands ordered entries to a sink and
//! never formats for a specific surface itself.

use crate::model::poem::PoemRecord;
use crate::model::score::ScoreBreakdown;

/// One ranked row handed to a `LeaderboardSink`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    /// 1-based position in the ranked list.
    pub rank: usize,
    pub text: String,
    pub author: String,
    pub score: u8,
}

impl LeaderboardEntry {
    pub fn from_ranked(poems: &[PoemRecord]) -> Vec<Self> {
        poems
            .iter()
            .enumerate()
            .map(|(index, poem)| Self {
                rank: index + 1,
                text: poem.poem.clone(),
                author: poem.author.clone(),
                score: poem.score,
            })
            .collect()
    }
}

/// Receives the ranked top-N list. An empty slice means no poems yet.
pub trait LeaderboardSink {
    fn render(&mut self, entries: &[LeaderboardEntry]);
}

/// Receives the score detail of one analysis.
pub trait ScoreSink {
    fn show_score(&mut self, score: u8, breakdown: &ScoreBreakdown);
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl LeaderboardSink for NullSink {
    fn render(&mut self, _entries: &[LeaderboardEntry]) {}
}

impl ScoreSink for NullSink {
    fn show_score(&mut self, _score: u8, _breakdown: &ScoreBreakdown) {}
}

/// Sink that keeps the last rendered output; useful for headless callers.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub leaderboards: Vec<Vec<LeaderboardEntry>>,
    pub scores: Vec<(u8, ScoreBreakdown)>,
}

impl LeaderboardSink for RecordingSink {
    fn render(&mut self, entries: &[LeaderboardEntry]) {
        self.leaderboards.push(entries.to_vec());
    }
}

impl ScoreSink for RecordingSink {
    fn show_score(&mut self, score: u8, breakdown: &ScoreBreakdown) {
        self.scores.push((score, *breakdown));
    }
}
