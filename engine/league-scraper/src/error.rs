//! Error types for the league scraper

use thiserror::Error;

use crate::coordinate::PageCoordinate;

/// Errors that can occur while fetching, extracting or aggregating league data
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The match-day page has no standings table, so the rundle does not exist
    #[error("Invalid coordinate {coordinate}: standings table not found")]
    InvalidCoordinate { coordinate: PageCoordinate },

    /// Expected markup was not where the layout says it should be
    #[error("Layout mismatch at {context}: {detail}")]
    LayoutMismatch { context: String, detail: String },

    #[error("Player {player} not resolved: {section} section missing")]
    PlayerNotResolved { player: String, section: &'static str },

    #[error("Response for {player} on season {season} day {day} has no matchup")]
    JoinIncomplete { season: u32, day: u32, player: String },

    #[error("Aggregation error: {0}")]
    Aggregation(String),

    #[error("HTTP request to {url} failed with status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScrapeError {
    /// Build a layout mismatch for the given page context
    pub fn layout(context: impl Into<String>, detail: impl Into<String>) -> Self {
        ScrapeError::LayoutMismatch { context: context.into(), detail: detail.into() }
    }

    /// Whether this error means the rundle itself is absent for the day
    pub fn is_invalid_coordinate(&self) -> bool {
        matches!(self, ScrapeError::InvalidCoordinate { .. })
    }
}

impl From<config::ConfigError> for ScrapeError {
    fn from(err: config::ConfigError) -> Self {
        ScrapeError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
