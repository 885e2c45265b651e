// src/bin/backfill.rs
//
// Re-merge every season already downloaded to the data directory and store
// whatever the database is missing, without touching the source site.
// Useful after a schema change or a database wipe.

use anyhow::{Context, Result};
use brefscout::{
    config::Config,
    identity::PlayerDirectory,
    merge::{self, SeasonTables},
    store::PlayerStore,
    table::csv::seasons_on_disk,
};
use rayon::prelude::*;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let config = Config::from_env()?;
    let directory = PlayerDirectory::load_or_empty(&config.players_index_path());

    // 1) Seasons with a complete table set on disk
    let seasons = seasons_on_disk(&config.data_dir)
        .with_context(|| format!("scanning {}", config.data_dir.display()))?;
    if seasons.is_empty() {
        anyhow::bail!(
            "no complete seasons under '{}'; run the scraper first",
            config.data_dir.display()
        );
    }
    info!(seasons = seasons.len(), "backfilling from disk");

    // 2) Merge all seasons in parallel on the blocking pool
    let data_dir = config.data_dir.clone();
    let merged = tokio::task::spawn_blocking(move || {
        seasons
            .par_iter()
            .map(|&season| {
                let result = SeasonTables::load(&data_dir, season)
                    .and_then(|tables| merge::merge_season(season, &tables));
                (season, result)
            })
            .collect::<Vec<_>>()
    })
    .await?;

    // 3) Store season by season, skipping failures
    let store = PlayerStore::connect(&config.database_url).await?;
    store.ensure_schema().await?;

    let mut total_inserted = 0u64;
    for (season, result) in merged {
        match result {
            Ok(mut records) => {
                directory.attach(&mut records);
                let inserted = store.insert_missing(&records).await?;
                info!(season, players = records.len(), inserted, "season stored");
                total_inserted += inserted;
            }
            Err(err) => error!(season, error = %err, "merge failed"),
        }
    }

    println!("backfill complete: {} new rows", total_inserted);
    Ok(())
}
