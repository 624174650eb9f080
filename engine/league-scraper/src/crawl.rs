//! Day-level crawl.
//!
//! Every (league, rundle, division) triple is walked day by day. A day whose
//! page has no standings table marks the whole triple invalid: rundle
//! composition does not change during a season, so the remaining days are not
//! requested. Triples are independent and run with bounded concurrency; their
//! results are folded back in enumeration order.

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::config::ScraperConfig;
use crate::coordinate::{PageCoordinate, RundleKey};
use crate::extract::extract_day;
use crate::fetch::{PageFetcher, PageRequest};
use crate::layout::SiteLayout;
use crate::types::{DayExtract, MatchupEdge, QuestionRecord, ResponseRecord};

/// A triple found not to exist, and the day on which that was discovered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRundle {
    pub rundle: String,
    pub day: u32,
}

/// A page or player that could not be processed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub target: String,
    pub error: String,
}

/// What happened during a crawl besides the extracted rows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlReport {
    pub pages_extracted: usize,
    pub skipped_rundles: Vec<SkippedRundle>,
    pub failures: Vec<Failure>,
}

/// Rows collected across all extracted pages
#[derive(Debug, Clone, Default)]
pub struct CrawlAccumulator {
    pub responses: Vec<ResponseRecord>,
    pub questions: Vec<QuestionRecord>,
    pub matchups: Vec<MatchupEdge>,
    pub report: CrawlReport,
    question_days: HashSet<(u32, u32)>,
}

impl CrawlAccumulator {
    /// Add one page's rows. Questions are kept only from the first page seen for a day.
    pub fn absorb_page(mut self, coordinate: &PageCoordinate, page: DayExtract) -> Self {
        if self.question_days.insert((coordinate.season, coordinate.day)) {
            self.questions.extend(page.questions);
        }
        self.responses.extend(page.responses);
        self.matchups.extend(page.matchups);
        self.report.pages_extracted += 1;
        self
    }

    fn absorb_rundle(self, walk: RundleWalk) -> Self {
        let mut acc = walk
            .pages
            .into_iter()
            .fold(self, |acc, (coordinate, page)| acc.absorb_page(&coordinate, page));
        if let Some(day) = walk.invalid_on {
            acc.report.skipped_rundles.push(SkippedRundle { rundle: walk.key.to_string(), day });
        }
        acc.report.failures.extend(walk.failures);
        acc
    }
}

/// Outcome of walking one triple's days
struct RundleWalk {
    key: RundleKey,
    pages: Vec<(PageCoordinate, DayExtract)>,
    failures: Vec<Failure>,
    invalid_on: Option<u32>,
}

async fn walk_rundle(
    fetcher: &dyn PageFetcher,
    key: RundleKey,
    config: &ScraperConfig,
    layout: &SiteLayout,
) -> RundleWalk {
    let mut walk = RundleWalk { key, pages: Vec::new(), failures: Vec::new(), invalid_on: None };

    for day in 1..=config.num_days {
        let coordinate = walk.key.at(config.season, day);
        let request = PageRequest::MatchDay(coordinate.clone());

        let html = match fetcher.fetch(&request).await {
            Ok(html) => html,
            Err(e) => {
                warn!("Skipping {}: fetch failed: {}", coordinate, e);
                walk.failures.push(Failure { target: coordinate.to_string(), error: e.to_string() });
                continue;
            }
        };

        match extract_day(&html, &coordinate, config.num_qs, layout) {
            Ok(page) => {
                debug!(
                    "Extracted {}: {} responses, {} matchups",
                    coordinate,
                    page.responses.len(),
                    page.matchups.len()
                );
                walk.pages.push((coordinate, page));
            }
            Err(e) if e.is_invalid_coordinate() => {
                debug!("{} is not a rundle this season, skipping its remaining days", walk.key);
                walk.invalid_on = Some(day);
                break;
            }
            Err(e) => {
                warn!("Skipping {}: {}", coordinate, e);
                walk.failures.push(Failure { target: coordinate.to_string(), error: e.to_string() });
            }
        }
    }

    walk
}

/// Crawl every match-day page of the configured season
pub async fn crawl_season(
    fetcher: &dyn PageFetcher,
    config: &ScraperConfig,
    layout: &SiteLayout,
) -> CrawlAccumulator {
    let keys = config.rundle_keys();
    info!(
        "Crawling season {}: {} rundles x {} days, {} in flight",
        config.season,
        keys.len(),
        config.num_days,
        config.http.concurrency
    );

    let walks: Vec<RundleWalk> = stream::iter(keys)
        .map(|key| walk_rundle(fetcher, key, config, layout))
        .buffered(config.http.concurrency.max(1))
        .collect()
        .await;

    let acc = walks.into_iter().fold(CrawlAccumulator::default(), CrawlAccumulator::absorb_rundle);

    info!(
        "Crawl finished: {} pages, {} responses, {} questions, {} invalid rundles, {} failures",
        acc.report.pages_extracted,
        acc.responses.len(),
        acc.questions.len(),
        acc.report.skipped_rundles.len(),
        acc.report.failures.len()
    );
    acc
}
