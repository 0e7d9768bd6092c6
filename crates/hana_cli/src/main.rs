//! Command-line entry point for Hana's poem leaderboard.
//!
//! # Responsibility
//! - Collect `(author, poem)` submissions and print scores and rankings.
//! - Wire config, logging, storage and scorer from `hana_core`.

use clap::{Args, Parser, Subcommand};
use hana_core::companion::MessageRotation;
use hana_core::db::open_db;
use hana_core::leaderboard::baseline::builtin;
use hana_core::{
    default_scorer, init_logging, init_logging_with, BaselineSource, HanaConfig,
    KvPoemRepository, LeaderboardEntry, LeaderboardService, LeaderboardSink, LogTarget,
    PoemRecord, ScoreBreakdown, ScoreSink, SqliteKeyValueStore, SubmissionService,
};
use log::warn;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "hana", version, about = "Score poems and keep a local leaderboard")]
struct Cli {
    /// JSON config file; defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// SQLite database path, overriding the config value.
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a poem, store it and show the leaderboard.
    Submit {
        #[arg(long)]
        author: String,
        #[command(flatten)]
        poem: PoemInput,
    },
    /// Show the ranked leaderboard.
    Top {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Score a poem without storing it.
    Analyze {
        #[command(flatten)]
        poem: PoemInput,
    },
    /// Print Hana's messages.
    Say {
        #[arg(long, default_value_t = 1)]
        count: usize,
        #[arg(long, default_value_t = 0)]
        start: usize,
    },
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct PoemInput {
    /// Poem text given inline.
    #[arg(long)]
    poem: Option<String>,
    /// File holding the poem text.
    #[arg(long)]
    poem_file: Option<PathBuf>,
}

impl PoemInput {
    fn read(&self) -> Result<String, String> {
        match (&self.poem, &self.poem_file) {
            (Some(text), _) => Ok(text.clone()),
            (None, Some(path)) => std::fs::read_to_string(path)
                .map_err(|err| format!("failed to read poem file `{}`: {err}", path.display())),
            (None, None) => Err("either --poem or --poem-file is required".to_string()),
        }
    }
}

struct StdoutLeaderboard;

impl LeaderboardSink for StdoutLeaderboard {
    fn render(&mut self, entries: &[LeaderboardEntry]) {
        println!("🏆 Top Poems");
        if entries.is_empty() {
            println!("No poems submitted yet! Be the first to add one!");
            return;
        }
        for entry in entries {
            println!();
            println!("#{}", entry.rank);
            for line in entry.text.lines() {
                println!("  {line}");
            }
            println!("  — {} (Score: {})", entry.author, entry.score);
        }
    }
}

struct StdoutScore;

impl ScoreSink for StdoutScore {
    fn show_score(&mut self, score: u8, breakdown: &ScoreBreakdown) {
        println!();
        println!("Your Score: {score}/100");
        for (label, value) in breakdown.items() {
            println!("  {label}: {value}%");
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let mut config = match cli.config.as_deref() {
        Some(path) => HanaConfig::load(path).map_err(|err| err.to_string())?,
        None => HanaConfig::default(),
    };
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    start_logging(&config)?;

    match cli.command {
        Command::Say { count, start } => {
            for message in MessageRotation::starting_at(start).take(count) {
                println!("Hana: {message}");
            }
            Ok(())
        }
        Command::Analyze { poem } => {
            let text = poem.read()?;
            let analysis = default_scorer(&config.scoring).analyze(&text);
            if let Some(err) = analysis.error {
                return Err(err.to_string());
            }
            StdoutScore.show_score(analysis.score, &analysis.breakdown);
            Ok(())
        }
        Command::Top { limit } => {
            let limit = resolve_limit(limit, config.top_n)?;
            let conn = open_db(&config.db_path).map_err(|err| err.to_string())?;
            let repo = repository(&conn, &config);
            let leaderboard = LeaderboardService::new(repo, load_baseline(&config));
            leaderboard.render_top(&mut StdoutLeaderboard, limit);
            Ok(())
        }
        Command::Submit { author, poem } => {
            let text = poem.read()?;
            let conn = open_db(&config.db_path).map_err(|err| err.to_string())?;
            let repo = repository(&conn, &config);
            let leaderboard = LeaderboardService::new(repo, load_baseline(&config));
            let scorer = default_scorer(&config.scoring);
            let outcome = SubmissionService::new(&scorer, &leaderboard)
                .with_top_n(config.top_n)
                .submit(&author, &text, &mut StdoutLeaderboard, &mut StdoutScore)
                .map_err(|err| err.to_string())?;
            println!();
            println!("Hana: {}", outcome.message);
            Ok(())
        }
    }
}

fn resolve_limit(limit: Option<usize>, default: usize) -> Result<usize, String> {
    match limit {
        Some(0) => Err("--limit must be at least 1".to_string()),
        Some(limit) => Ok(limit),
        None => Ok(default),
    }
}

fn start_logging(config: &HanaConfig) -> Result<(), String> {
    let result = match config.log_dir.as_deref() {
        Some(dir) => init_logging(config.effective_log_level(), dir),
        None => init_logging_with(config.effective_log_level(), LogTarget::Stderr),
    };
    result.map_err(|err| err.to_string())
}

fn repository<'conn>(
    conn: &'conn Connection,
    config: &HanaConfig,
) -> KvPoemRepository<SqliteKeyValueStore<'conn>> {
    KvPoemRepository::with_key(SqliteKeyValueStore::new(conn), config.storage_key.clone())
}

fn load_baseline(config: &HanaConfig) -> Vec<PoemRecord> {
    let source = match config.baseline_path.as_deref() {
        Some(path) => BaselineSource::File(path.to_path_buf()),
        None => BaselineSource::Builtin,
    };
    source.load().unwrap_or_else(|err| {
        warn!(
            "event=baseline_load module=cli status=fallback source={} error={}",
            describe(config.baseline_path.as_deref()),
            err
        );
        builtin()
    })
}

fn describe(path: Option<&Path>) -> String {
    path.map_or_else(|| "builtin".to_string(), |path| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::{resolve_limit, Cli, Command};
    use clap::Parser;

    #[test]
    fn zero_limit_is_rejected() {
        assert!(resolve_limit(Some(0), 10).is_err());
        assert_eq!(resolve_limit(Some(3), 10), Ok(3));
        assert_eq!(resolve_limit(None, 10), Ok(10));
    }

    #[test]
    fn submit_requires_exactly_one_poem_source() {
        assert!(Cli::try_parse_from(["hana", "submit", "--author", "Mina"]).is_err());
        assert!(Cli::try_parse_from([
            "hana", "submit", "--author", "Mina", "--poem", "a", "--poem-file", "b",
        ])
        .is_err());

        let cli = Cli::try_parse_from(["hana", "submit", "--author", "Mina", "--poem", "a"]).unwrap();
        assert!(matches!(cli.command, Command::Submit { .. }));
    }
}
