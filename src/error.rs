// src/error.rs

use thiserror::Error;

use crate::table::StatCategory;

/// Error type for the scraping and merge pipeline.
#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("GET {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no stats table found at {url}")]
    TableNotFound { url: String },

    /// The source changed shape: a column the projection needs is gone.
    /// Fatal for the season being merged.
    #[error("{category} table is missing column {column:?} under group {group:?}")]
    SchemaMismatch {
        category: StatCategory,
        group: String,
        column: String,
    },

    /// A duplicate (player, age) key survived multi-team resolution.
    /// Fatal for the season being merged.
    #[error("{category} table has duplicate key ({player:?}, age {age:?}) after dedup")]
    JoinCardinality {
        category: StatCategory,
        player: String,
        age: String,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("report generation failed: {0}")]
    Report(String),
}

pub type Result<T> = std::result::Result<T, ScoutError>;
