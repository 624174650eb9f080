//! # League Scraper
//!
//! Pulls a trivia league season from the league website and reshapes it into
//! flat CSV tables.
//!
//! The day-level pipeline crawls one match-day page per (league, rundle,
//! division, day), extracts player responses, the day's questions and the
//! matchups, and aggregates them into `responses`, `questions` and
//! `player_seasons`. The player-level pipeline reads the player ids back from
//! `player_seasons` and scrapes each player's profile and category stats into
//! `players` and `player_stats`.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod coordinate;
pub mod crawl;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod layout;
pub mod output;
pub mod players;
pub mod types;

#[cfg(test)]
mod fixtures;


pub use aggregate::{aggregate, aggregate_crawl};
pub use config::{Credentials, JoinPolicy, ScraperConfig};
pub use coordinate::{PageCoordinate, RundleKey};
pub use crawl::{crawl_season, CrawlAccumulator, CrawlReport};
pub use error::{Result, ScrapeError};
pub use fetch::{HttpFetcher, PageFetcher, PageRequest};
pub use layout::SiteLayout;
pub use players::{scrape_players, PlayerRun};
pub use types::{LeagueTables, PlayerTables};

/// Current version of the league scraper
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default season length in match days
pub const DEFAULT_NUM_DAYS: u32 = 25;

/// Default questions per match day
pub const DEFAULT_NUM_QS: usize = 6;

/// Default pages in flight
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
