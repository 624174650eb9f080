//! Player-level pipeline: one profile row and per-category stats rows per player

use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::crawl::Failure;
use crate::extract::{extract_profile, extract_stats};
use crate::fetch::{PageFetcher, PageRequest};
use crate::layout::SiteLayout;
use crate::types::{PlayerProfileRecord, PlayerStatRecord, PlayerTables};

/// Tables for a batch of players, plus the players that degraded to id-only rows
#[derive(Debug, Clone, Default)]
pub struct PlayerRun {
    pub tables: PlayerTables,
    pub failures: Vec<Failure>,
}

/// Drop repeated ids, keeping the first appearance of each
pub fn unique_players<I>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

struct Resolved {
    profile: PlayerProfileRecord,
    stats: Vec<PlayerStatRecord>,
    failures: Vec<Failure>,
}

async fn resolve_player(fetcher: &dyn PageFetcher, player: String, layout: &SiteLayout) -> Resolved {
    let mut failures = Vec::new();
    let mut record_failure = |section: &str, error: String| {
        warn!("{} for {} degraded to id only: {}", section, player, error);
        failures.push(Failure { target: format!("{section} {player}"), error });
    };

    let profile = match fetcher.fetch(&PageRequest::Profile(player.clone())).await {
        Ok(html) => extract_profile(&html, &player, &layout.profile),
        Err(e) => Err(e),
    }
    .unwrap_or_else(|e| {
        record_failure("profile", e.to_string());
        PlayerProfileRecord::partial(&player)
    });

    let stats = match fetcher.fetch(&PageRequest::Stats(player.clone())).await {
        Ok(html) => extract_stats(&html, &player, &layout.stats),
        Err(e) => Err(e),
    }
    .unwrap_or_else(|e| {
        record_failure("stats", e.to_string());
        vec![PlayerStatRecord::partial(&player)]
    });

    debug!("Resolved {}: {} stat categories", player, stats.len());
    Resolved { profile, stats, failures }
}

/// Fetch and read every player's profile and stats pages; output keeps input order
pub async fn scrape_players(
    fetcher: &dyn PageFetcher,
    players: &[String],
    concurrency: usize,
    layout: &SiteLayout,
) -> PlayerRun {
    info!("Scraping {} players, {} in flight", players.len(), concurrency);

    let resolved: Vec<Resolved> = stream::iter(players.iter().cloned())
        .map(|player| resolve_player(fetcher, player, layout))
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let mut run = PlayerRun::default();
    for player in resolved {
        run.tables.players.push(player.profile);
        run.tables.player_stats.extend(player.stats);
        run.failures.extend(player.failures);
    }

    info!(
        "Scraped {} players ({} stat rows, {} degraded sections)",
        run.tables.players.len(),
        run.tables.player_stats.len(),
        run.failures.len()
    );
    run
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::error::Result;
    use crate::fixtures::{profile_page, stats_page, ProfileFixture};

    /// Serves the same profile and stats markup for every player
    struct SamePages {
        profile: String,
        stats: String,
    }

    #[async_trait]
    impl PageFetcher for SamePages {
        async fn fetch(&self, request: &PageRequest) -> Result<String> {
            Ok(match request {
                PageRequest::Profile(_) => self.profile.clone(),
                _ => self.stats.clone(),
            })
        }
    }

    #[tokio::test]
    async fn test_unreadable_sections_degrade_with_reason() {
        let site = SamePages {
            profile: profile_page(&ProfileFixture::default()).replace("&nbsp;&nbsp;", " "),
            stats: stats_page(&[("Science", "35", ".600", ".550")]),
        };

        let run = scrape_players(&site, &["X".to_string()], 1, &SiteLayout::default()).await;

        assert_eq!(run.tables.players, vec![PlayerProfileRecord::partial("X")]);
        assert_eq!(run.tables.player_stats, vec![PlayerStatRecord::partial("X")]);
        let targets: Vec<&str> = run.failures.iter().map(|f| f.target.as_str()).collect();
        assert_eq!(targets, vec!["profile X", "stats X"]);
        assert!(run.failures[0].error.contains("gender delimiter"));
        assert!(run.failures[1].error.contains("malformed"));
    }

    #[test]
    fn test_unique_players_keeps_first_appearance() {
        let ids = ["b", "a", "b", "c", "a"].iter().map(|s| s.to_string());
        assert_eq!(unique_players(ids), vec!["b", "a", "c"]);
    }
}
