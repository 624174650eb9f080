//! Aggregation of crawled rows into the final league tables.
//!
//! Responses are joined to matchup edges on (season, day, player). Player
//! placements are projected out of the joined rows. Defense is then adjusted
//! for forfeits: when the total defense an opponent received on a day is zero,
//! the defense values of every row facing that opponent become null.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{info, warn};

use crate::config::JoinPolicy;
use crate::crawl::CrawlAccumulator;
use crate::error::{Result, ScrapeError};
use crate::types::{
    LeagueTables, MatchupEdge, PlayerSeasonRecord, QuestionRecord, ResponseRecord, ResponseRow,
};

type DayKey = (u32, u32, String);

/// Build the three league tables from a finished crawl
pub fn aggregate_crawl(acc: CrawlAccumulator, policy: JoinPolicy) -> Result<LeagueTables> {
    aggregate(acc.responses, acc.questions, &acc.matchups, policy)
}

/// Join, project and forfeiture-adjust the crawled rows
pub fn aggregate(
    responses: Vec<ResponseRecord>,
    mut questions: Vec<QuestionRecord>,
    matchups: &[MatchupEdge],
    policy: JoinPolicy,
) -> Result<LeagueTables> {
    let opponents = index_matchups(matchups)?;
    let joined = join_responses(responses, &opponents, policy)?;
    let player_seasons = project_player_seasons(&joined);

    let mut deftotal: HashMap<DayKey, i32> = HashMap::new();
    for (response, opponent) in &joined {
        *deftotal.entry((response.season, response.day, opponent.clone())).or_insert(0) +=
            response.defense.unwrap_or(0);
    }

    let mut rows: Vec<ResponseRow> = joined
        .into_iter()
        .map(|(response, opponent)| {
            let forfeited = deftotal
                .get(&(response.season, response.day, opponent.clone()))
                .map_or(false, |total| *total == 0);
            ResponseRow {
                defense: if forfeited { None } else { response.defense },
                player: response.player,
                season: response.season,
                day: response.day,
                q_num: response.q_num,
                correct: response.correct,
                opponent,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        (a.season, a.day, &a.player, a.q_num).cmp(&(b.season, b.day, &b.player, b.q_num))
    });
    questions.sort_by_key(|q| (q.season, q.day, q.q_num));

    info!(
        "Aggregated {} responses, {} questions, {} player seasons",
        rows.len(),
        questions.len(),
        player_seasons.len()
    );

    Ok(LeagueTables { responses: rows, questions, player_seasons })
}

/// Map (season, day, player) to the day's opponent; a player with two edges on one day is an error
fn index_matchups(matchups: &[MatchupEdge]) -> Result<HashMap<DayKey, String>> {
    let mut opponents = HashMap::with_capacity(matchups.len());
    for edge in matchups {
        let key = (edge.season, edge.day, edge.player.clone());
        if let Some(previous) = opponents.insert(key, edge.opponent.clone()) {
            return Err(ScrapeError::Aggregation(format!(
                "{} has two matchups on season {} day {}: {} and {}",
                edge.player, edge.season, edge.day, previous, edge.opponent
            )));
        }
    }
    Ok(opponents)
}

fn join_responses(
    responses: Vec<ResponseRecord>,
    opponents: &HashMap<DayKey, String>,
    policy: JoinPolicy,
) -> Result<Vec<(ResponseRecord, String)>> {
    let mut joined = Vec::with_capacity(responses.len());
    let mut unmatched: BTreeSet<DayKey> = BTreeSet::new();

    for response in responses {
        let key = (response.season, response.day, response.player.clone());
        match opponents.get(&key) {
            Some(opponent) => joined.push((response, opponent.clone())),
            None => match policy {
                JoinPolicy::Fail => {
                    return Err(ScrapeError::JoinIncomplete {
                        season: response.season,
                        day: response.day,
                        player: response.player,
                    })
                }
                JoinPolicy::Drop => {
                    unmatched.insert(key);
                }
            },
        }
    }

    for (season, day, player) in &unmatched {
        warn!("Dropping responses of {} on season {} day {}: no matchup", player, season, day);
    }
    Ok(joined)
}

/// Distinct placements of every joined player; a player placed twice in one season is reported
fn project_player_seasons(joined: &[(ResponseRecord, String)]) -> Vec<PlayerSeasonRecord> {
    let distinct: BTreeSet<PlayerSeasonRecord> = joined
        .iter()
        .map(|(r, _)| PlayerSeasonRecord {
            player: r.player.clone(),
            season: r.season,
            league: r.league.clone(),
            rundle: r.rundle.clone(),
            division: r.division.clone(),
        })
        .collect();

    let mut placements: BTreeMap<(u32, &str), Vec<&PlayerSeasonRecord>> = BTreeMap::new();
    for record in &distinct {
        placements.entry((record.season, record.player.as_str())).or_default().push(record);
    }
    for ((season, player), records) in placements.iter().filter(|(_, r)| r.len() > 1) {
        let listed: Vec<String> = records
            .iter()
            .map(|r| format!("{}_{}{}", r.rundle, r.league, r.division))
            .collect();
        warn!("{} placed in {} rundles in season {}: {}", player, records.len(), season, listed.join(", "));
    }

    let mut seasons: Vec<PlayerSeasonRecord> = distinct.iter().cloned().collect();
    seasons.sort_by(|a, b| {
        (a.season, &a.player, &a.league, &a.rundle, &a.division)
            .cmp(&(b.season, &b.player, &b.league, &b.rundle, &b.division))
    });
    seasons
}
