// src/config.rs

use std::env;
use std::path::PathBuf;

use crate::error::{Result, ScoutError};

/// Seasons scraped when BREFSCOUT_SEASONS is unset, newest first.
pub const DEFAULT_SEASONS: [u16; 6] = [2025, 2024, 2023, 2022, 2021, 2020];

const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";
const DEFAULT_DATA_DIR: &str = "data";

/// Runtime settings, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub gemini_api_key: Option<String>,
    pub data_dir: PathBuf,
    pub seasons: Vec<u16>,
}

impl Config {
    pub fn from_env() -> Result<Config> {
        let database_url = required("DATABASE_URL")?;
        let redis_url = env::var("REDIS_URL").unwrap_or_else(|_| DEFAULT_REDIS_URL.to_string());
        let gemini_api_key = env::var("GEMINI_API_KEY").ok().filter(|key| !key.is_empty());
        let data_dir = env::var("BREFSCOUT_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));
        let seasons = match env::var("BREFSCOUT_SEASONS") {
            Ok(raw) => parse_seasons(&raw)?,
            Err(_) => DEFAULT_SEASONS.to_vec(),
        };

        Ok(Config {
            database_url,
            redis_url,
            gemini_api_key,
            data_dir,
            seasons,
        })
    }

    /// The local player-id index used for headshot lookups.
    pub fn players_index_path(&self) -> PathBuf {
        self.data_dir.join("players.json")
    }

    /// The API key, or a configuration error when report generation is
    /// requested without one.
    pub fn require_gemini_api_key(&self) -> Result<&str> {
        self.gemini_api_key
            .as_deref()
            .ok_or_else(|| ScoutError::Config("GEMINI_API_KEY must be set to generate reports".into()))
    }
}

fn required(name: &str) -> Result<String> {
    env::var(name).map_err(|_| ScoutError::Config(format!("{name} must be set")))
}

fn parse_seasons(raw: &str) -> Result<Vec<u16>> {
    let mut seasons = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let season = part.parse::<u16>().map_err(|_| {
            ScoutError::Config(format!("invalid season {part:?} in BREFSCOUT_SEASONS"))
        })?;
        seasons.push(season);
    }
    if seasons.is_empty() {
        return Err(ScoutError::Config(
            "BREFSCOUT_SEASONS is set but holds no seasons".into(),
        ));
    }
    Ok(seasons)
}
