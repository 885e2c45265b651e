// src/bin/roster.rs
//
// List every stored player with their birth year, one per line, in the
// form the report binary expects its arguments.

use anyhow::Result;
use brefscout::{config::Config, store::PlayerStore};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let config = Config::from_env()?;
    let store = PlayerStore::connect(&config.database_url).await?;
    let roster = store.roster().await?;

    if roster.is_empty() {
        println!("no players stored yet");
        return Ok(());
    }
    for entry in roster {
        println!("{}\t{}", entry.player_name, entry.birth_year as i64);
    }
    Ok(())
}
