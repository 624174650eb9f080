use serde::{Deserialize, Serialize};

use crate::coordinate::PageCoordinate;

/// One player's result on one question of one match day, as read from the standings table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub season: u32,
    pub league: String,
    pub rundle: String,
    pub division: String,
    pub day: u32,
    /// 1-based question number
    pub q_num: u32,
    pub player: String,
    /// 1 if answered correctly, 0 otherwise
    pub correct: u8,
    /// Defense points assigned by the opponent, before forfeiture adjustment; null for an empty cell
    pub defense: Option<i32>,
}

impl ResponseRecord {
    pub fn new(
        coordinate: &PageCoordinate,
        q_num: u32,
        player: &str,
        correct: u8,
        defense: Option<i32>,
    ) -> Self {
        Self {
            season: coordinate.season,
            league: coordinate.league.clone(),
            rundle: coordinate.rundle.clone(),
            division: coordinate.division.clone(),
            day: coordinate.day,
            q_num,
            player: player.to_string(),
            correct,
            defense,
        }
    }
}

/// One question of a match day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub category: String,
    pub q_text: String,
    pub a_text: String,
    pub season: u32,
    pub day: u32,
    pub q_num: u32,
}

/// One direction of a match-day pairing; every pairing appears twice
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchupEdge {
    pub season: u32,
    pub day: u32,
    pub player: String,
    pub opponent: String,
}

/// Where a player played during a season
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerSeasonRecord {
    pub player: String,
    pub season: u32,
    pub league: String,
    pub rundle: String,
    pub division: String,
}

/// Final `responses` row: joined with the opponent, forfeiture-adjusted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRow {
    pub defense: Option<i32>,
    pub player: String,
    pub season: u32,
    pub day: u32,
    pub q_num: u32,
    pub correct: u8,
    pub opponent: String,
}

/// Profile details of a player; only `player` is set when the profile could not be read
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfileRecord {
    pub player: String,
    pub gender: Option<String>,
    pub location: Option<String>,
    pub college: Option<String>,
    pub league: Option<String>,
    pub branch: Option<String>,
    pub referral: Option<String>,
}

impl PlayerProfileRecord {
    /// Record carrying only the player id
    pub fn partial(player: &str) -> Self {
        Self { player: player.to_string(), ..Default::default() }
    }
}

/// A player's career record in one question category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStatRecord {
    pub player: String,
    pub category: Option<String>,
    pub correct: Option<u32>,
    pub questions: Option<u32>,
    pub pct: Option<String>,
    pub lgpct: Option<String>,
}

impl PlayerStatRecord {
    /// Record carrying only the player id
    pub fn partial(player: &str) -> Self {
        Self { player: player.to_string(), ..Default::default() }
    }
}

/// Everything extracted from one match-day page
#[derive(Debug, Clone, Default)]
pub struct DayExtract {
    pub responses: Vec<ResponseRecord>,
    pub questions: Vec<QuestionRecord>,
    pub matchups: Vec<MatchupEdge>,
}

/// Tables produced by the day-level pipeline
#[derive(Debug, Clone, Default)]
pub struct LeagueTables {
    pub responses: Vec<ResponseRow>,
    pub questions: Vec<QuestionRecord>,
    pub player_seasons: Vec<PlayerSeasonRecord>,
}

/// Tables produced by the player-level pipeline
#[derive(Debug, Clone, Default)]
pub struct PlayerTables {
    pub players: Vec<PlayerProfileRecord>,
    pub player_stats: Vec<PlayerStatRecord>,
}
