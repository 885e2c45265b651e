use anyhow::Result;
use brefscout::{
    config::Config,
    fetch,
    identity::PlayerDirectory,
    merge::{self, SeasonTables},
    store::PlayerStore,
    table::{csv::table_path, StatCategory},
};
use std::{collections::HashSet, fs, path::PathBuf, sync::Arc};
use tokio::{
    sync::{mpsc, Semaphore},
    time::Instant,
};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,brefscout=info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {:?}", info);
    }));

    // ─── 2) load config & dirs ───────────────────────────────────────
    let config = Config::from_env()?;
    fs::create_dir_all(&config.data_dir)?;
    let client = fetch::http_client()?;

    // ─── 3) connect store & ensure schema ────────────────────────────
    let store = PlayerStore::connect(&config.database_url).await?;
    store.ensure_schema().await?;

    // ─── 4) load player directory for headshots ──────────────────────
    let directory = PlayerDirectory::load_or_empty(&config.players_index_path());

    // ─── 5) discover missing tables ──────────────────────────────────
    let mut to_download: Vec<(StatCategory, u16)> = Vec::new();
    for &season in &config.seasons {
        for &category in &StatCategory::ALL {
            if !table_path(&config.data_dir, category, season).is_file() {
                to_download.push((category, season));
            }
        }
    }
    info!(
        seasons = config.seasons.len(),
        missing = to_download.len(),
        "tables to download"
    );

    // ─── 6) spawn downloader tasks ───────────────────────────────────
    let (tx, mut rx) =
        mpsc::channel::<((StatCategory, u16), std::result::Result<PathBuf, String>)>(100);
    let dl_sem = Arc::new(Semaphore::new(3));
    let mut dl_handles = Vec::with_capacity(to_download.len());

    for (category, season) in to_download {
        let client = client.clone();
        let data_dir = config.data_dir.clone();
        let tx = tx.clone();
        let sem = dl_sem.clone();

        dl_handles.push(tokio::spawn(async move {
            let _permit = sem.acquire().await.unwrap();
            info!(category = %category, season, "downloading");
            let start = Instant::now();
            match fetch::download_season_table(&client, &data_dir, category, season).await {
                Ok(path) => {
                    info!(category = %category, season, elapsed = ?start.elapsed(), "downloaded");
                    let _ = tx.send(((category, season), Ok(path))).await;
                }
                Err(err) => {
                    error!("{}_{} failed: {}", category, season, err);
                    let _ = tx.send(((category, season), Err(err.to_string()))).await;
                }
            }
        }));
    }
    // drop the original sender so `rx.recv()` will end once all downloads complete
    drop(tx);

    // ─── 7) collect download outcomes ────────────────────────────────
    let mut failed_seasons: HashSet<u16> = HashSet::new();
    while let Some(((category, season), outcome)) = rx.recv().await {
        if let Err(err) = outcome {
            error!(category = %category, season, error = %err, "download failed");
            failed_seasons.insert(season);
        }
    }
    for h in dl_handles {
        let _ = h.await;
    }

    // ─── 8) merge each season & store records ────────────────────────
    for &season in &config.seasons {
        if failed_seasons.contains(&season) {
            error!(season, "skipping season with missing tables");
            continue;
        }

        let tables = match SeasonTables::load(&config.data_dir, season) {
            Ok(tables) => tables,
            Err(err) => {
                error!(season, error = %err, "loading season tables failed");
                continue;
            }
        };

        // offload the merge to the blocking pool
        let records =
            match tokio::task::spawn_blocking(move || merge::merge_season(season, &tables)).await? {
                Ok(records) => records,
                Err(err) => {
                    error!(season, error = %err, "merge failed");
                    continue;
                }
            };

        let mut records = records;
        directory.attach(&mut records);

        match store.insert_missing(&records).await {
            Ok(inserted) => info!(season, players = records.len(), inserted, "season stored"),
            Err(err) => error!(season, error = %err, "storing season failed"),
        }
    }

    info!("all done");
    Ok(())
}
