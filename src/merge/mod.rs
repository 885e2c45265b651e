// src/merge/mod.rs
//
// The season merge pipeline: four category tables in, one canonical record
// per player out. Selection renames source columns, dedup collapses traded
// players to their combined row, the join lines the four tables up on
// (player_name, age), and record construction parses numbers and derives
// the rest.

pub mod columns;
pub mod dedup;
pub mod join;
pub mod record;
pub mod select;

use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::table::csv::read_category;
use crate::table::{RawTable, StatCategory};

pub use record::{Exclusions, PlayerSeasonRecord, LEAGUE_AVERAGE};
pub use select::{FrameRow, SelectedFrame};

/// The four raw tables for one season.
#[derive(Debug, Clone)]
pub struct SeasonTables {
    pub per_game: RawTable,
    pub per_100_poss: RawTable,
    pub advanced: RawTable,
    pub shooting: RawTable,
}

impl SeasonTables {
    /// Load all four category CSVs for a season from `dir`.
    pub fn load(dir: &Path, season: u16) -> Result<SeasonTables> {
        Ok(SeasonTables {
            per_game: read_category(dir, StatCategory::PerGame, season)?,
            per_100_poss: read_category(dir, StatCategory::Per100Poss, season)?,
            advanced: read_category(dir, StatCategory::Advanced, season)?,
            shooting: read_category(dir, StatCategory::Shooting, season)?,
        })
    }
}

/// Merge one season's tables into canonical player records.
///
/// Pure and synchronous: no I/O, no globals, so seasons can run in
/// parallel. Output order follows the deduplicated per-game table, which
/// sorts by player name.
#[tracing::instrument(level = "info", skip(tables))]
pub fn merge_season(season: u16, tables: &SeasonTables) -> Result<Vec<PlayerSeasonRecord>> {
    let per_game = dedup::collapse_multi_team(select::select(StatCategory::PerGame, &tables.per_game)?);
    let per_100 =
        dedup::collapse_multi_team(select::select(StatCategory::Per100Poss, &tables.per_100_poss)?);
    let advanced =
        dedup::collapse_multi_team(select::select(StatCategory::Advanced, &tables.advanced)?);
    let shooting =
        dedup::collapse_multi_team(select::select(StatCategory::Shooting, &tables.shooting)?);

    let joined = join::join_frames(&per_game, &per_100, &advanced, &shooting)?;
    let (records, excluded) = record::build_records(season, &joined);

    info!(
        season,
        players = records.len(),
        joined = joined.len(),
        excluded = excluded.total(),
        league_average = excluded.league_average,
        unparseable_age = excluded.unparseable_age,
        "merged season"
    );
    Ok(records)
}
