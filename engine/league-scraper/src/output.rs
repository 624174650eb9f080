//! CSV tables and the run manifest

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::crawl::{Failure, SkippedRundle};
use crate::error::Result;
use crate::players::unique_players;
use crate::types::{LeagueTables, PlayerTables};

pub const RESPONSES_CSV: &str = "responses.csv";
pub const QUESTIONS_CSV: &str = "questions.csv";
pub const PLAYER_SEASONS_CSV: &str = "player_seasons.csv";
pub const PLAYERS_CSV: &str = "players.csv";
pub const PLAYER_STATS_CSV: &str = "player_stats.csv";

/// Column order of each table; written even when the table is empty
pub const RESPONSES_HEADER: [&str; 7] =
    ["defense", "player", "season", "day", "q_num", "correct", "opponent"];
pub const QUESTIONS_HEADER: [&str; 6] = ["category", "q_text", "a_text", "season", "day", "q_num"];
pub const PLAYER_SEASONS_HEADER: [&str; 5] = ["player", "season", "league", "rundle", "division"];
pub const PLAYERS_HEADER: [&str; 7] =
    ["player", "gender", "location", "college", "league", "branch", "referral"];
pub const PLAYER_STATS_HEADER: [&str; 6] =
    ["player", "category", "correct", "questions", "pct", "lgpct"];

/// Manifest written by the season pipeline
pub const SEASON_MANIFEST: &str = "manifest.json";
/// Manifest written by the player pipeline
pub const PLAYERS_MANIFEST: &str = "players_manifest.json";

/// Record of one pipeline run, written beside its tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub season: Option<u32>,
    pub pulled_at: DateTime<Utc>,
    /// Row count per written table
    pub tables: BTreeMap<String, usize>,
    pub skipped_rundles: Vec<SkippedRundle>,
    pub failures: Vec<Failure>,
}

impl RunManifest {
    pub fn new(season: Option<u32>) -> Self {
        Self {
            season,
            pulled_at: Utc::now(),
            tables: BTreeMap::new(),
            skipped_rundles: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn with_skipped(mut self, skipped: &[SkippedRundle]) -> Self {
        self.skipped_rundles = skipped.to_vec();
        self
    }

    pub fn with_failures(mut self, failures: &[Failure]) -> Self {
        self.failures = failures.to_vec();
        self
    }
}

/// Serialize rows to `dir/name` below `header`
fn write_table<T: Serialize>(dir: &Path, name: &str, header: &[&str], rows: &[T]) -> Result<usize> {
    let path = dir.join(name);
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(&path)?;
    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(rows.len())
}

/// Write responses, questions and player_seasons; returns row counts by file name
pub fn write_league_tables(dir: &Path, tables: &LeagueTables) -> Result<BTreeMap<String, usize>> {
    fs::create_dir_all(dir)?;
    let mut counts = BTreeMap::new();
    counts.insert(
        RESPONSES_CSV.to_string(),
        write_table(dir, RESPONSES_CSV, &RESPONSES_HEADER, &tables.responses)?,
    );
    counts.insert(
        QUESTIONS_CSV.to_string(),
        write_table(dir, QUESTIONS_CSV, &QUESTIONS_HEADER, &tables.questions)?,
    );
    counts.insert(
        PLAYER_SEASONS_CSV.to_string(),
        write_table(dir, PLAYER_SEASONS_CSV, &PLAYER_SEASONS_HEADER, &tables.player_seasons)?,
    );
    Ok(counts)
}

/// Write players and player_stats; returns row counts by file name
pub fn write_player_tables(dir: &Path, tables: &PlayerTables) -> Result<BTreeMap<String, usize>> {
    fs::create_dir_all(dir)?;
    let mut counts = BTreeMap::new();
    counts.insert(
        PLAYERS_CSV.to_string(),
        write_table(dir, PLAYERS_CSV, &PLAYERS_HEADER, &tables.players)?,
    );
    counts.insert(
        PLAYER_STATS_CSV.to_string(),
        write_table(dir, PLAYER_STATS_CSV, &PLAYER_STATS_HEADER, &tables.player_stats)?,
    );
    Ok(counts)
}

pub fn write_manifest(dir: &Path, name: &str, manifest: &RunManifest) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(manifest)?)?;
    info!("Wrote run manifest to {}", path.display());
    Ok(path)
}

#[derive(Deserialize)]
struct PlayerColumn {
    player: String,
}

/// Distinct player ids from a player_seasons table, in first-seen order
pub fn read_player_ids(path: &Path) -> Result<Vec<String>> {
    let file = fs::File::open(path)?;
    player_ids_from_reader(file)
}

fn player_ids_from_reader<R: Read>(rdr: R) -> Result<Vec<String>> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut ids = Vec::new();
    for row in reader.deserialize::<PlayerColumn>() {
        ids.push(row?.player);
    }
    Ok(unique_players(ids))
}
