// src/bin/report.rs
//
// Print a scouting report for one stored player, serving the cached copy
// when a fresh one exists and caching whatever gets generated.

use anyhow::{Context, Result};
use brefscout::{
    cache::{report_key, ReportCache},
    config::Config,
    fetch,
    report::ReportClient,
    store::PlayerStore,
};
use std::env;
use tracing_subscriber::{fmt, EnvFilter};

const USAGE: &str = "usage: report <player name> <birth year>";

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder().with_env_filter(env_filter).init();

    // 1) Args: the exact stored player name, then birth year
    let mut args = env::args().skip(1);
    let player_name = args.next().context(USAGE)?;
    let birth_year: i64 = args
        .next()
        .context(USAGE)?
        .parse()
        .context("birth year must be an integer")?;

    let config = Config::from_env()?;

    // 2) Cached copy first
    let cache = ReportCache::open(&config.redis_url)?;
    let key = report_key(&player_name, birth_year);
    if let Some(report) = cache.get(&key).await? {
        println!("{report}");
        return Ok(());
    }

    // 3) Pull the player's stored seasons
    let store = PlayerStore::connect(&config.database_url).await?;
    let seasons = store.seasons_for(&player_name, birth_year as f64).await?;
    if seasons.is_empty() {
        anyhow::bail!("no stored seasons for {player_name} (born {birth_year})");
    }

    // 4) Generate, cache, print
    let api_key = config.require_gemini_api_key()?;
    let client = ReportClient::new(fetch::http_client()?, api_key.to_string());
    let report = client.scouting_report(&player_name, &seasons).await?;
    cache.put(&key, &report).await?;
    println!("{report}");
    Ok(())
}
