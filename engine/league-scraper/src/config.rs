//! Configuration for the league scraper

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::coordinate::{rundle_keys, RundleKey};
use crate::error::{Result, ScrapeError};
use crate::{DEFAULT_CONCURRENCY, DEFAULT_NUM_DAYS, DEFAULT_NUM_QS, DEFAULT_TIMEOUT_SECS};

/// Environment variable prefix for overrides, e.g. `LEAGUE_SCRAPER__SEASON=78`
pub const ENV_PREFIX: &str = "LEAGUE_SCRAPER";

/// Environment variables holding the site login
pub const USERNAME_ENV: &str = "LL_USERNAME";
pub const PASSWORD_ENV: &str = "LL_PASSWORD";

/// Configuration for one scraping run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Season number to pull
    pub season: u32,

    /// Length of the season in match days
    pub num_days: u32,

    /// Questions asked per match day
    pub num_qs: usize,

    /// League names active this season
    pub leagues: Vec<String>,

    /// Rundle letters
    pub rundles: Vec<String>,

    /// Division suffixes; "" means the rundle is not divided
    pub divisions: Vec<String>,

    /// What to do with responses that have no matchup
    pub join_policy: JoinPolicy,

    /// Directory the CSV tables are written to
    pub output_dir: PathBuf,

    /// HTTP client configuration
    pub http: HttpConfig,

    /// Page URL templates
    pub urls: UrlTemplates,
}

/// How the aggregator treats a response row with no matching matchup edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinPolicy {
    /// Log a warning and drop the row
    Drop,
    /// Abort aggregation
    Fail,
}

impl FromStr for JoinPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "drop" => Ok(JoinPolicy::Drop),
            "fail" => Ok(JoinPolicy::Fail),
            other => Err(format!("unknown join policy '{other}' (expected drop or fail)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    pub user_agent: String,

    /// Maximum pages in flight at once
    pub concurrency: usize,

    /// Pause after each request in milliseconds
    pub pause_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlTemplates {
    /// Match-day page with standings, questions and results
    pub match_day: String,
    pub profile: String,
    pub stats: String,
    pub login: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            season: 77,
            num_days: DEFAULT_NUM_DAYS,
            num_qs: DEFAULT_NUM_QS,
            leagues: DEFAULT_LEAGUES.iter().map(|s| s.to_string()).collect(),
            rundles: ["A", "B", "C", "D", "E", "R"].iter().map(|s| s.to_string()).collect(),
            divisions: ["", "_Div_1", "_Div_2"].iter().map(|s| s.to_string()).collect(),
            join_policy: JoinPolicy::Drop,
            output_dir: PathBuf::from("data"),
            http: HttpConfig::default(),
            urls: UrlTemplates::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("league-scraper/{}", crate::VERSION),
            concurrency: DEFAULT_CONCURRENCY,
            pause_ms: 0,
        }
    }
}

impl Default for UrlTemplates {
    fn default() -> Self {
        Self {
            match_day: "https://www.learnedleague.com/match.php?{season}&{day}&{rundle}_{league}{division}"
                .to_string(),
            profile: "https://www.learnedleague.com/profiles.php?{player}".to_string(),
            stats: "https://www.learnedleague.com/profiles.php?{player}&2".to_string(),
            login: "https://www.learnedleague.com/ucp.php?mode=login".to_string(),
        }
    }
}

/// Leagues active in season 77
const DEFAULT_LEAGUES: &[&str] = &[
    "Alpine", "Arcadia", "Archipelago", "Atlantic", "Badlands", "Bayou", "Canyon", "Cascade",
    "Central", "Citadel", "Coastal", "Commonwealth", "Continental", "Corridor", "Delta", "Elysium",
    "Fjord", "Frontier", "Garden", "Glacier", "Highland", "Horizon", "Juniper", "Laguna",
    "Maelstrom", "Magnolia", "Maritime", "Memorial", "Meridian", "Metro", "Midland", "Morningstar",
    "Nebula", "Olympic", "Pacific", "Palisade", "Peninsula", "Piedmont", "Plaza", "Polaris",
    "Prairie", "Rubicon", "Seaboard", "Sequoia", "Sierra", "Skyline", "Sugarloaf", "Summit",
    "Taiga", "Tidewater", "Tundra", "Typhoon", "Valley", "Zephyr",
];

impl ScraperConfig {
    /// Load configuration from an optional TOML file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }
        let config: ScraperConfig = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX).separator("__").try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot produce any tables
    pub fn validate(&self) -> Result<()> {
        if self.num_days == 0 {
            return Err(ScrapeError::Config("num_days must be at least 1".to_string()));
        }
        if self.num_qs == 0 {
            return Err(ScrapeError::Config("num_qs must be at least 1".to_string()));
        }
        if self.leagues.is_empty() {
            return Err(ScrapeError::Config("at least one league is required".to_string()));
        }
        if self.rundles.is_empty() {
            return Err(ScrapeError::Config("at least one rundle is required".to_string()));
        }
        if self.divisions.is_empty() {
            return Err(ScrapeError::Config(
                "divisions must not be empty; use \"\" for undivided rundles".to_string(),
            ));
        }
        if self.http.concurrency == 0 {
            return Err(ScrapeError::Config("http.concurrency must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Every (league, rundle, division) triple this run will visit
    pub fn rundle_keys(&self) -> Vec<RundleKey> {
        rundle_keys(&self.leagues, &self.rundles, &self.divisions)
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }
}

/// Site login, supplied through the environment
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Read credentials from `LL_USERNAME` / `LL_PASSWORD`, if both are set
    pub fn from_env() -> Option<Self> {
        let username = std::env::var(USERNAME_ENV).ok()?;
        let password = std::env::var(PASSWORD_ENV).ok()?;
        Some(Self { username, password })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials").field("username", &self.username).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = ScraperConfig::default();
        assert_eq!(config.num_days, DEFAULT_NUM_DAYS);
        assert_eq!(config.num_qs, DEFAULT_NUM_QS);
        assert_eq!(config.leagues.len(), 54);
        assert_eq!(config.divisions, vec!["", "_Div_1", "_Div_2"]);
        assert_eq!(config.join_policy, JoinPolicy::Drop);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_load_from_toml_keeps_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
season = 81
leagues = ["Pacific"]
rundles = ["A", "B"]
divisions = [""]
join_policy = "fail"

[http]
concurrency = 2
"#
        )
        .unwrap();

        let config = ScraperConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.season, 81);
        assert_eq!(config.leagues, vec!["Pacific"]);
        assert_eq!(config.rundle_keys().len(), 2);
        assert_eq!(config.join_policy, JoinPolicy::Fail);
        assert_eq!(config.http.concurrency, 2);
        assert_eq!(config.http.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.num_days, DEFAULT_NUM_DAYS);
    }

    #[test]
    fn test_config_validation() {
        let config = ScraperConfig { num_qs: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ScrapeError::Config(_))));

        let config = ScraperConfig { divisions: vec![], ..Default::default() };
        assert!(matches!(config.validate(), Err(ScrapeError::Config(_))));

        let config = ScraperConfig { leagues: vec![], ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_join_policy_from_str() {
        assert_eq!("drop".parse::<JoinPolicy>().unwrap(), JoinPolicy::Drop);
        assert_eq!("FAIL".parse::<JoinPolicy>().unwrap(), JoinPolicy::Fail);
        assert!("ignore".parse::<JoinPolicy>().is_err());
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials { username: "quizzer".to_string(), password: "hunter2".to_string() };
        let shown = format!("{creds:?}");
        assert!(shown.contains("quizzer"));
        assert!(!shown.contains("hunter2"));
    }
}
