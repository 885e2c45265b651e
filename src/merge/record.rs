// src/merge/record.rs

use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

use super::columns::{specs_for, POSITION, STAT_COLUMNS};
use super::join::JoinedRow;
use crate::table::StatCategory;

/// Sentinel row the source appends below the real players.
pub const LEAGUE_AVERAGE: &str = "League Average";

/// One player's merged season line, numeric fields parsed and missing stats
/// kept as explicit nulls.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSeasonRecord {
    pub year: f64,
    pub player_name: String,
    pub age: f64,
    pub position: String,
    pub birth_year: f64,
    pub headshot_url: Option<String>,
    pub stats: BTreeMap<&'static str, Option<f64>>,
}

impl PlayerSeasonRecord {
    pub fn stat(&self, name: &str) -> Option<f64> {
        self.stats.get(name).copied().flatten()
    }

    /// The season as a whole-year string, e.g. "2024".
    pub fn season_key(&self) -> String {
        (self.year as i64).to_string()
    }

    /// The per-season object handed to report generation: every field of the
    /// record except the year, which becomes the enclosing key.
    pub fn season_stats_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("player_name".into(), json!(self.player_name));
        map.insert("age".into(), json!(self.age));
        map.insert("position".into(), json!(self.position));
        map.insert("birth_year".into(), json!(self.birth_year));
        map.insert("headshot_url".into(), json!(self.headshot_url));
        for (&name, value) in &self.stats {
            map.insert(name.into(), json!(value));
        }
        Value::Object(map)
    }
}

/// Rows dropped during record construction, by reason. These are expected
/// source artifacts, so they are counted and logged rather than raised.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Exclusions {
    pub league_average: usize,
    pub blank_name: usize,
    pub unparseable_age: usize,
    pub missing_position: usize,
}

impl Exclusions {
    pub fn total(&self) -> usize {
        self.league_average + self.blank_name + self.unparseable_age + self.missing_position
    }
}

/// Turn joined rows into records, preserving join order.
pub fn build_records(
    season: u16,
    joined: &[JoinedRow<'_>],
) -> (Vec<PlayerSeasonRecord>, Exclusions) {
    let mut records = Vec::with_capacity(joined.len());
    let mut excluded = Exclusions::default();

    for row in joined {
        if let Some(record) = build_record(season, row, &mut excluded) {
            records.push(record);
        }
    }
    (records, excluded)
}

fn build_record(
    season: u16,
    row: &JoinedRow<'_>,
    excluded: &mut Exclusions,
) -> Option<PlayerSeasonRecord> {
    let name = row.per_game.player_name.clone();
    if name.is_empty() {
        excluded.blank_name += 1;
        return None;
    }
    if name == LEAGUE_AVERAGE {
        excluded.league_average += 1;
        return None;
    }

    let Some(age) = parse_number(&row.per_game.age) else {
        excluded.unparseable_age += 1;
        return None;
    };

    let mut stats: BTreeMap<&'static str, Option<f64>> =
        STAT_COLUMNS.iter().map(|&name| (name, None)).collect();
    let mut position = None;

    let frames = [
        (StatCategory::PerGame, row.per_game),
        (StatCategory::Per100Poss, row.per_100_poss),
        (StatCategory::Advanced, row.advanced),
        (StatCategory::Shooting, row.shooting),
    ];
    for (category, frame_row) in frames {
        for (spec, cell) in specs_for(category).iter().zip(&frame_row.cells) {
            if spec.canonical == POSITION {
                position = cell.clone();
                continue;
            }
            let value = match cell {
                Some(text) => {
                    let parsed = parse_number(text);
                    if parsed.is_none() {
                        warn!(
                            player = %name,
                            column = spec.canonical,
                            value = %text,
                            "stat cell did not parse; keeping null"
                        );
                    }
                    parsed
                }
                None => None,
            };
            stats.insert(spec.canonical, value);
        }
    }

    let Some(position) = position.filter(|p| !p.is_empty()) else {
        excluded.missing_position += 1;
        return None;
    };

    let year = season as f64;
    Some(PlayerSeasonRecord {
        year,
        player_name: name,
        age,
        position,
        birth_year: year - age - 1.0,
        headshot_url: None,
        stats,
    })
}

fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}
