//! Page retrieval.
//!
//! [`PageFetcher`] is the seam between the pipelines and the network: the
//! crawl and the player pipeline only ever ask for a page's markup, so tests
//! drive them with canned HTML instead of HTTP.

use async_trait::async_trait;
use reqwest::Client;
use std::fmt;
use tracing::{debug, info};

use crate::config::{Credentials, HttpConfig, UrlTemplates};
use crate::coordinate::{expand_coordinate, expand_player, PageCoordinate};
use crate::error::{Result, ScrapeError};

/// A page the pipelines can ask for
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PageRequest {
    MatchDay(PageCoordinate),
    Profile(String),
    Stats(String),
}

impl fmt::Display for PageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageRequest::MatchDay(coordinate) => write!(f, "match day {coordinate}"),
            PageRequest::Profile(player) => write!(f, "profile {player}"),
            PageRequest::Stats(player) => write!(f, "stats {player}"),
        }
    }
}

/// Source of page markup
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, request: &PageRequest) -> Result<String>;
}

/// Fetches pages from the live site with a cookie-carrying client
pub struct HttpFetcher {
    client: Client,
    urls: UrlTemplates,
    http: HttpConfig,
}

impl HttpFetcher {
    pub fn new(http: &HttpConfig, urls: &UrlTemplates) -> Result<Self> {
        let client = Client::builder()
            .timeout(http.timeout())
            .user_agent(http.user_agent.as_str())
            .cookie_store(true)
            .build()?;

        Ok(Self { client, urls: urls.clone(), http: http.clone() })
    }

    /// Establish a session; profile and stats pages are only served to members
    pub async fn login(&self, credentials: &Credentials) -> Result<()> {
        info!("Logging in as {}", credentials.username);
        let form = [
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
            ("login", "Login"),
        ];
        let response = self.client.post(&self.urls.login).form(&form).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::HttpStatus { url: self.urls.login.clone(), status: status.as_u16() });
        }
        info!("Session established");
        Ok(())
    }

    /// URL for a request, built from the configured templates
    pub fn url_for(&self, request: &PageRequest) -> String {
        match request {
            PageRequest::MatchDay(coordinate) => expand_coordinate(&self.urls.match_day, coordinate),
            PageRequest::Profile(player) => expand_player(&self.urls.profile, player),
            PageRequest::Stats(player) => expand_player(&self.urls.stats, player),
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, request: &PageRequest) -> Result<String> {
        let url = self.url_for(request);
        debug!("Fetching {} from {}", request, url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::HttpStatus { url, status: status.as_u16() });
        }
        let body = response.text().await?;
        debug!("Fetched {} ({} bytes)", request, body.len());

        let pause = self.http.pause();
        if !pause.is_zero() {
            tokio::time::sleep(pause).await;
        }
        Ok(body)
    }
}
