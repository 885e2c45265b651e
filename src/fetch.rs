// src/fetch.rs

use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::error::{Result, ScoutError};
use crate::table::csv::{table_path, write_table};
use crate::table::parse::parse_stats_table;
use crate::table::{RawTable, StatCategory};

pub const BASE_URL: &str = "https://www.basketball-reference.com";

const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// League-page URL for one category and season ending year.
pub fn season_url(category: StatCategory, season: u16) -> String {
    format!("{BASE_URL}/leagues/NBA_{season}_{}.html", category.slug())
}

pub fn http_client() -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(APP_USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    Ok(client)
}

/// Fetch and parse one category table. One attempt, no retries; callers
/// own the decision of what a failed season costs.
pub async fn fetch_table(
    client: &reqwest::Client,
    category: StatCategory,
    season: u16,
) -> Result<RawTable> {
    let url = season_url(category, season);
    let fetch_err = |source: reqwest::Error| ScoutError::Fetch {
        url: url.clone(),
        source,
    };

    let html = client
        .get(&url)
        .send()
        .await
        .map_err(fetch_err)?
        .error_for_status()
        .map_err(fetch_err)?
        .text()
        .await
        .map_err(fetch_err)?;

    parse_stats_table(&html).ok_or(ScoutError::TableNotFound { url })
}

/// Fetch one table and persist it as CSV, returning where it landed.
pub async fn download_season_table(
    client: &reqwest::Client,
    dir: &Path,
    category: StatCategory,
    season: u16,
) -> Result<PathBuf> {
    let table = fetch_table(client, category, season).await?;
    let path = table_path(dir, category, season);
    write_table(&path, &table)?;
    info!(
        category = %category,
        season,
        rows = table.rows.len(),
        path = %path.display(),
        "downloaded table"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_urls_follow_the_league_page_layout() {
        assert_eq!(
            season_url(StatCategory::PerGame, 2024),
            "https://www.basketball-reference.com/leagues/NBA_2024_per_game.html"
        );
        assert_eq!(
            season_url(StatCategory::Per100Poss, 2024),
            "https://www.basketball-reference.com/leagues/NBA_2024_per_poss.html"
        );
        assert_eq!(
            season_url(StatCategory::Advanced, 2023),
            "https://www.basketball-reference.com/leagues/NBA_2023_advanced.html"
        );
        assert_eq!(
            season_url(StatCategory::Shooting, 2022),
            "https://www.basketball-reference.com/leagues/NBA_2022_shooting.html"
        );
    }
}
