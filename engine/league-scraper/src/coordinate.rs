//! Page coordinates and URL templating

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one match-day page: a rundle (or rundle division) of a league on one day
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PageCoordinate {
    pub season: u32,
    pub league: String,
    pub rundle: String,
    /// Division suffix appended to the rundle, empty when the rundle is undivided
    pub division: String,
    pub day: u32,
}

impl PageCoordinate {
    /// The (league, rundle, division) triple this page belongs to
    pub fn rundle_key(&self) -> RundleKey {
        RundleKey {
            league: self.league.clone(),
            rundle: self.rundle.clone(),
            division: self.division.clone(),
        }
    }
}

impl fmt::Display for PageCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "S{} D{} {}_{}{}",
            self.season, self.day, self.rundle, self.league, self.division
        )
    }
}

/// A league/rundle/division triple, independent of day
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RundleKey {
    pub league: String,
    pub rundle: String,
    pub division: String,
}

impl RundleKey {
    pub fn new(league: &str, rundle: &str, division: &str) -> Self {
        Self { league: league.to_string(), rundle: rundle.to_string(), division: division.to_string() }
    }

    /// Coordinate of this rundle's page for a given season and day
    pub fn at(&self, season: u32, day: u32) -> PageCoordinate {
        PageCoordinate {
            season,
            league: self.league.clone(),
            rundle: self.rundle.clone(),
            division: self.division.clone(),
            day,
        }
    }
}

impl fmt::Display for RundleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}{}", self.rundle, self.league, self.division)
    }
}

/// Every (league, rundle, division) triple in product order: leagues outermost
pub fn rundle_keys(leagues: &[String], rundles: &[String], divisions: &[String]) -> Vec<RundleKey> {
    let mut keys = Vec::with_capacity(leagues.len() * rundles.len() * divisions.len());
    for league in leagues {
        for rundle in rundles {
            for division in divisions {
                keys.push(RundleKey::new(league, rundle, division));
            }
        }
    }
    keys
}

/// Expand `{season}`, `{day}`, `{league}`, `{rundle}` and `{division}` in a URL template
pub fn expand_coordinate(template: &str, coordinate: &PageCoordinate) -> String {
    template
        .replace("{season}", &coordinate.season.to_string())
        .replace("{day}", &coordinate.day.to_string())
        .replace("{league}", &coordinate.league)
        .replace("{rundle}", &coordinate.rundle)
        .replace("{division}", &coordinate.division)
}

/// Expand `{player}` in a URL template
pub fn expand_player(template: &str, player: &str) -> String {
    template.replace("{player}", player)
}
