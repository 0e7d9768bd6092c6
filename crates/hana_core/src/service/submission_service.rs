//! Poem submission use-case.
//!
//! # Responsibility
//! - Validate input, score it, persist the record and refresh the views.
//!
//! # Invariants
//! - Blank author or poem is rejected before scoring.
//! - No record is created when the embedding model is unavailable.

use crate::companion::praise_line;
use crate::model::poem::{NewPoem, PoemRecord, PoemValidationError};
use crate::model::score::{AnalysisError, PoemAnalysis};
use crate::render::{LeaderboardSink, ScoreSink};
use crate::repo::poem_repo::{PoemRepository, RepoError};
use crate::scoring::Scorer;
use crate::service::leaderboard_service::LeaderboardService;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Leaderboard size shown after a submission unless configured otherwise.
pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug)]
pub enum SubmitError {
    Validation(PoemValidationError),
    Analysis(AnalysisError),
    Repo(RepoError),
}

impl Display for SubmitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "please write a poem and enter your name: {err}"),
            Self::Analysis(err) => write!(f, "analysis failed: {err}"),
            Self::Repo(err) => write!(f, "failed to save poem: {err}"),
        }
    }
}

impl Error for SubmitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Analysis(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<PoemValidationError> for SubmitError {
    fn from(value: PoemValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for SubmitError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub record: PoemRecord,
    pub analysis: PoemAnalysis,
    /// Hana's reaction to the score.
    pub message: String,
}

/// Orchestrates scorer, leaderboard and render sinks for one submission.
pub struct SubmissionService<'a, R: PoemRepository> {
    scorer: &'a Scorer,
    leaderboard: &'a LeaderboardService<R>,
    top_n: usize,
}

impl<'a, R: PoemRepository> SubmissionService<'a, R> {
    pub fn new(scorer: &'a Scorer, leaderboard: &'a LeaderboardService<R>) -> Self {
        Self {
            scorer,
            leaderboard,
            top_n: DEFAULT_TOP_N,
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Scores and stores one poem, then refreshes both sinks.
    ///
    /// # Errors
    /// - `Validation` when trimmed author or poem is blank.
    /// - `Analysis` when the embedding model is unavailable.
    /// - `Repo` when the collection cannot be written.
    pub fn submit(
        &self,
        author: &str,
        poem: &str,
        board: &mut dyn LeaderboardSink,
        detail: &mut dyn ScoreSink,
    ) -> Result<SubmissionOutcome, SubmitError> {
        let draft = match NewPoem::parse(author, poem, 0) {
            Ok(draft) => draft,
            Err(err) => {
                warn!(
                    "event=poem_submit module=service status=rejected reason={}",
                    err
                );
                return Err(err.into());
            }
        };

        let analysis = self.scorer.analyze(&draft.poem);
        if let Some(err) = analysis.error.clone() {
            warn!(
                "event=poem_submit module=service status=error error_code=analysis_failed error={}",
                err
            );
            return Err(SubmitError::Analysis(err));
        }

        let record = self.leaderboard.append(
            NewPoem {
                score: analysis.score,
                ..draft
            }
            .into_record(),
        )?;

        self.leaderboard.render_top(board, self.top_n);
        detail.show_score(analysis.score, &analysis.breakdown);

        info!(
            "event=poem_submit module=service status=ok score={}",
            record.score
        );
        Ok(SubmissionOutcome {
            message: praise_line(&record.author, record.score),
            record,
            analysis,
        })
    }
}
