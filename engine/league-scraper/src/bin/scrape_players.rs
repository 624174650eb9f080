use anyhow::{Context, Result};
use clap::Parser;
use league_scraper::cli::{init_tracing, PlayersCli};
use league_scraper::output::{
    read_player_ids, write_manifest, write_player_tables, RunManifest, PLAYERS_MANIFEST,
};
use league_scraper::{scrape_players, Credentials, HttpFetcher, SiteLayout};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let cli = PlayersCli::parse();
    let config = cli.common.load_config().context("Failed to load configuration")?;

    let players_path = cli.players_path(&config);
    let players = read_player_ids(&players_path)
        .with_context(|| format!("Failed to read player ids from {}", players_path.display()))?;
    info!("Loaded {} distinct players from {}", players.len(), players_path.display());

    let fetcher =
        HttpFetcher::new(&config.http, &config.urls).context("Failed to create HTTP client")?;
    match Credentials::from_env() {
        Some(credentials) => fetcher.login(&credentials).await.context("Login failed")?,
        None => warn!("No site credentials set; profile pages may be incomplete"),
    }

    let run = scrape_players(&fetcher, &players, config.http.concurrency, &SiteLayout::default()).await;

    let counts = write_player_tables(&config.output_dir, &run.tables)
        .with_context(|| format!("Failed to write tables to {}", config.output_dir.display()))?;

    let mut manifest = RunManifest::new(None).with_failures(&run.failures);
    manifest.tables = counts;
    write_manifest(&config.output_dir, PLAYERS_MANIFEST, &manifest)
        .context("Failed to write run manifest")?;

    info!(
        "Players done: {} profiles, {} stat rows, {} degraded sections",
        run.tables.players.len(),
        run.tables.player_stats.len(),
        run.failures.len()
    );
    Ok(())
}
