// src/store.rs

use chrono::Utc;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::collections::BTreeMap;
use tracing::info;

use crate::error::Result;
use crate::merge::columns::STAT_COLUMNS;
use crate::merge::PlayerSeasonRecord;

const TABLE: &str = "players";
const MAX_CONNECTIONS: u32 = 5;

/// One distinct player in the store.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub player_name: String,
    pub birth_year: f64,
}

/// Postgres-backed store for merged player seasons. One row per
/// (player_name, birth_year, year); replays of a season insert nothing.
#[derive(Clone)]
pub struct PlayerStore {
    pool: PgPool,
}

impl PlayerStore {
    pub async fn connect(database_url: &str) -> Result<PlayerStore> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(database_url)
            .await?;
        info!("connected to postgres");
        Ok(PlayerStore { pool })
    }

    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(&create_table_sql()).execute(&self.pool).await?;
        Ok(())
    }

    /// Insert records that are not already present. Returns how many rows
    /// actually landed; existing (player, birth_year, year) rows are left
    /// untouched.
    pub async fn insert_missing(&self, records: &[PlayerSeasonRecord]) -> Result<u64> {
        let sql = insert_sql();
        let mut inserted = 0u64;

        for record in records {
            let mut query = sqlx::query(&sql)
                .bind(&record.player_name)
                .bind(record.year)
                .bind(record.age)
                .bind(&record.position)
                .bind(record.birth_year)
                .bind(&record.headshot_url);
            for &name in STAT_COLUMNS.iter() {
                query = query.bind(record.stats.get(name).copied().flatten());
            }
            query = query.bind(Utc::now());

            inserted += query.execute(&self.pool).await?.rows_affected();
        }

        info!(
            inserted,
            skipped = records.len() as u64 - inserted,
            "stored player seasons"
        );
        Ok(inserted)
    }

    /// All stored seasons for one player, oldest first. Birth year pins
    /// down players sharing a name.
    pub async fn seasons_for(
        &self,
        player_name: &str,
        birth_year: f64,
    ) -> Result<Vec<PlayerSeasonRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT * FROM {TABLE} \
             WHERE player_name = $1 AND birth_year = $2 \
             ORDER BY year ASC"
        ))
        .bind(player_name)
        .bind(birth_year)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(record_from_row).collect()
    }

    /// Every distinct player in the store.
    pub async fn roster(&self) -> Result<Vec<RosterEntry>> {
        let rows = sqlx::query(&format!(
            "SELECT DISTINCT player_name, birth_year FROM {TABLE} \
             ORDER BY player_name, birth_year"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                Ok(RosterEntry {
                    player_name: row.try_get("player_name")?,
                    birth_year: row.try_get("birth_year")?,
                })
            })
            .collect()
    }
}

fn record_from_row(row: &PgRow) -> Result<PlayerSeasonRecord> {
    let mut stats = BTreeMap::new();
    for &name in STAT_COLUMNS.iter() {
        stats.insert(name, row.try_get::<Option<f64>, _>(name)?);
    }
    Ok(PlayerSeasonRecord {
        year: row.try_get("year")?,
        player_name: row.try_get("player_name")?,
        age: row.try_get("age")?,
        position: row.try_get("position")?,
        birth_year: row.try_get("birth_year")?,
        headshot_url: row.try_get("headshot_url")?,
        stats,
    })
}

// "position" is a reserved word in postgres, so it stays quoted in DDL and
// inserts; result rows still expose it under the plain name.
fn create_table_sql() -> String {
    let stat_columns: String = STAT_COLUMNS
        .iter()
        .map(|name| format!("{name} DOUBLE PRECISION, "))
        .collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {TABLE} (\
         id BIGSERIAL PRIMARY KEY, \
         player_name TEXT NOT NULL, \
         year DOUBLE PRECISION NOT NULL, \
         age DOUBLE PRECISION NOT NULL, \
         \"position\" TEXT NOT NULL, \
         birth_year DOUBLE PRECISION NOT NULL, \
         headshot_url TEXT, \
         {stat_columns}\
         created_at TIMESTAMPTZ NOT NULL, \
         UNIQUE (player_name, birth_year, year))"
    )
}

fn insert_sql() -> String {
    let mut columns: Vec<String> = vec![
        "player_name".into(),
        "year".into(),
        "age".into(),
        "\"position\"".into(),
        "birth_year".into(),
        "headshot_url".into(),
    ];
    columns.extend(STAT_COLUMNS.iter().map(|name| name.to_string()));
    columns.push("created_at".into());

    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("${i}")).collect();
    format!(
        "INSERT INTO {TABLE} ({}) VALUES ({}) \
         ON CONFLICT (player_name, birth_year, year) DO NOTHING",
        columns.join(", "),
        placeholders.join(", ")
    )
}
