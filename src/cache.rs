// src/cache.rs

use tracing::debug;

use crate::error::Result;

/// Reports go stale as new games land, so cached copies live one hour.
pub const REPORT_TTL_SECS: u64 = 3600;

/// Cache key for one player's scouting report.
pub fn report_key(player_name: &str, birth_year: i64) -> String {
    format!("player:{player_name}:birth-year:{birth_year}")
}

/// Redis-backed write-through cache for generated scouting reports.
#[derive(Clone)]
pub struct ReportCache {
    client: redis::Client,
}

impl ReportCache {
    pub fn open(redis_url: &str) -> Result<ReportCache> {
        Ok(ReportCache {
            client: redis::Client::open(redis_url)?,
        })
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.client.get_async_connection().await?;
        let cached: Option<String> = redis::cmd("GET").arg(key).query_async(&mut conn).await?;
        debug!(key, hit = cached.is_some(), "report cache lookup");
        Ok(cached)
    }

    pub async fn put(&self, key: &str, report: &str) -> Result<()> {
        let mut conn = self.client.get_async_connection().await?;
        redis::cmd("SETEX")
            .arg(key)
            .arg(REPORT_TTL_SECS)
            .arg(report)
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }
}
