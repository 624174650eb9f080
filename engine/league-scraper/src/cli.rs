//! # Command Line Interface
//!
//! Arguments shared by the `scrape_season` and `scrape_players` binaries.
//! Flags override values from the config file and environment.

use clap::{Args, Parser};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::{JoinPolicy, ScraperConfig};
use crate::error::Result;
use crate::output::PLAYER_SEASONS_CSV;

#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Season number to pull
    #[arg(short, long)]
    pub season: Option<u32>,

    /// Output directory for the CSV tables
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Maximum pages in flight
    #[arg(long)]
    pub concurrency: Option<usize>,
}

impl CommonArgs {
    /// Load the configuration and apply these flags on top
    pub fn load_config(&self) -> Result<ScraperConfig> {
        let mut config = ScraperConfig::load(self.config.as_deref())?;
        if let Some(season) = self.season {
            config.season = season;
        }
        if let Some(out) = &self.out {
            config.output_dir = out.clone();
        }
        if let Some(concurrency) = self.concurrency {
            config.http.concurrency = concurrency;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Crawl a season's match-day pages into responses, questions and player_seasons
#[derive(Parser, Debug)]
#[command(name = "scrape_season")]
#[command(about = "Scrape a season of match days into CSV tables", version)]
pub struct SeasonCli {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Restrict the crawl to these leagues (repeatable)
    #[arg(short, long = "league")]
    pub leagues: Vec<String>,

    /// Responses without a matchup: drop them with a warning, or fail
    #[arg(long)]
    pub join_policy: Option<JoinPolicy>,
}

impl SeasonCli {
    pub fn load_config(&self) -> Result<ScraperConfig> {
        let mut config = self.common.load_config()?;
        if !self.leagues.is_empty() {
            config.leagues = self.leagues.clone();
        }
        if let Some(policy) = self.join_policy {
            config.join_policy = policy;
        }
        Ok(config)
    }
}

/// Scrape profile and stats pages for every player of a player_seasons table
#[derive(Parser, Debug)]
#[command(name = "scrape_players")]
#[command(about = "Scrape player profiles and category stats into CSV tables", version)]
pub struct PlayersCli {
    #[command(flatten)]
    pub common: CommonArgs,

    /// player_seasons table to read ids from (default: <out>/player_seasons.csv)
    #[arg(short, long)]
    pub players: Option<PathBuf>,
}

impl PlayersCli {
    pub fn players_path(&self, config: &ScraperConfig) -> PathBuf {
        self.players.clone().unwrap_or_else(|| config.output_dir.join(PLAYER_SEASONS_CSV))
    }
}

/// Log to stderr, `info` unless `RUST_LOG` says otherwise
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
