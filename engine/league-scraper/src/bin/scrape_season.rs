use anyhow::{Context, Result};
use clap::Parser;
use league_scraper::cli::{init_tracing, SeasonCli};
use league_scraper::output::{write_league_tables, write_manifest, RunManifest, SEASON_MANIFEST};
use league_scraper::{aggregate_crawl, crawl_season, HttpFetcher, SiteLayout};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let cli = SeasonCli::parse();
    let config = cli.load_config().context("Failed to load configuration")?;
    info!("Starting season {} scrape into {}", config.season, config.output_dir.display());

    let fetcher =
        HttpFetcher::new(&config.http, &config.urls).context("Failed to create HTTP client")?;
    let layout = SiteLayout::default();

    let crawl = crawl_season(&fetcher, &config, &layout).await;
    let report = crawl.report.clone();

    let tables = aggregate_crawl(crawl, config.join_policy).context("Aggregation failed")?;
    let counts = write_league_tables(&config.output_dir, &tables)
        .with_context(|| format!("Failed to write tables to {}", config.output_dir.display()))?;

    let mut manifest = RunManifest::new(Some(config.season))
        .with_skipped(&report.skipped_rundles)
        .with_failures(&report.failures);
    manifest.tables = counts;
    write_manifest(&config.output_dir, SEASON_MANIFEST, &manifest)
        .context("Failed to write run manifest")?;

    info!(
        "Season {} done: {} responses, {} questions, {} player seasons, {} pages skipped",
        config.season,
        tables.responses.len(),
        tables.questions.len(),
        tables.player_seasons.len(),
        report.failures.len()
    );
    Ok(())
}
