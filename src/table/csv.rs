// src/table/csv.rs

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{RawTable, StatCategory};
use crate::error::Result;

static SEASON_FROM_STEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"per_game_(\d{4})\.csv$").expect("season regex should compile"));

/// Where a scraped table lands on disk, e.g. `data/advanced_2024.csv`.
pub fn table_path(dir: &Path, category: StatCategory, season: u16) -> PathBuf {
    dir.join(format!("{}_{}.csv", category.file_stem(), season))
}

/// Write a table as CSV. Grouped tables get an extra leading row of group
/// labels above the header row so the grouping survives the round trip.
pub fn write_table(path: &Path, table: &RawTable) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    let width = table.headers.len();

    if table.is_grouped() {
        writer.write_record(padded(&table.groups, width))?;
    }
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(padded(row, width))?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a table back from CSV. `grouped` must match how it was written:
/// grouped files carry the group-label row first, flat files start at the
/// header row.
pub fn read_table(path: &Path, grouped: bool) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut records = reader.records();
    let mut next_row = || -> Result<Option<Vec<String>>> {
        match records.next() {
            Some(record) => Ok(Some(record?.iter().map(str::to_string).collect())),
            None => Ok(None),
        }
    };

    let groups = if grouped {
        next_row()?.unwrap_or_default()
    } else {
        Vec::new()
    };
    let headers = next_row()?.unwrap_or_default();

    let mut rows = Vec::new();
    while let Some(row) = next_row()? {
        rows.push(row);
    }

    let mut table = RawTable {
        groups,
        headers,
        rows,
    };
    if table.groups.len() != table.headers.len() {
        table.groups.resize(table.headers.len(), String::new());
    }
    Ok(table)
}

/// Load the CSV for one category and season.
pub fn read_category(dir: &Path, category: StatCategory, season: u16) -> Result<RawTable> {
    read_table(&table_path(dir, category, season), category.is_grouped())
}

/// Seasons with a complete set of four category files on disk, ascending.
///
/// Discovery is keyed off `per_game_{year}.csv`; a season only counts when
/// the other three category files are present alongside it.
pub fn seasons_on_disk(dir: &Path) -> Result<Vec<u16>> {
    let pattern = format!("{}/per_game_*.csv", dir.display());
    let mut seasons = Vec::new();

    for entry in glob::glob(&pattern).into_iter().flatten().flatten() {
        let name = entry.display().to_string();
        let Some(caps) = SEASON_FROM_STEM.captures(&name) else {
            continue;
        };
        let Ok(season) = caps[1].parse::<u16>() else {
            continue;
        };
        let complete = StatCategory::ALL
            .iter()
            .all(|&cat| table_path(dir, cat, season).is_file());
        if complete {
            seasons.push(season);
        } else {
            debug!(season, "skipping season with incomplete category files");
        }
    }

    seasons.sort_unstable();
    seasons.dedup();
    Ok(seasons)
}

fn padded(cells: &[String], width: usize) -> Vec<String> {
    let mut out: Vec<String> = cells.iter().take(width).cloned().collect();
    out.resize(width, String::new());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_fixture() -> RawTable {
        RawTable {
            groups: vec![String::new(); 3],
            headers: vec!["Player".into(), "Age".into(), "PTS".into()],
            rows: vec![
                vec!["A. Guard".into(), "25".into(), "21.4".into()],
                vec!["B. Wing".into(), "28".into(), String::new()],
            ],
        }
    }

    fn grouped_fixture() -> RawTable {
        RawTable {
            groups: vec![
                String::new(),
                "% of FGA by Distance".into(),
                "Corner 3s".into(),
            ],
            headers: vec!["Player".into(), "0-3".into(), "%3PA".into()],
            rows: vec![vec!["A. Guard".into(), ".310".into(), ".084".into()]],
        }
    }

    #[test]
    fn flat_table_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = table_path(dir.path(), StatCategory::PerGame, 2024);
        let table = flat_fixture();

        write_table(&path, &table).unwrap();
        let back = read_table(&path, false).unwrap();

        assert_eq!(back.headers, table.headers);
        assert_eq!(back.rows, table.rows);
        assert!(!back.is_grouped());
    }

    #[test]
    fn grouped_table_round_trips_with_group_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = table_path(dir.path(), StatCategory::Shooting, 2024);
        let table = grouped_fixture();

        write_table(&path, &table).unwrap();
        let back = read_table(&path, true).unwrap();

        assert_eq!(back.groups, table.groups);
        assert_eq!(back.column_index("Corner 3s", "%3PA"), Some(2));
    }

    #[test]
    fn ragged_rows_are_padded_to_header_width() {
        let dir = tempfile::tempdir().unwrap();
        let path = table_path(dir.path(), StatCategory::Advanced, 2023);
        let mut table = flat_fixture();
        table.rows.push(vec!["C. Short".into()]);

        write_table(&path, &table).unwrap();
        let back = read_table(&path, false).unwrap();

        assert_eq!(back.rows[2].len(), 3);
        assert_eq!(back.cell(2, 0), Some("C. Short"));
        assert_eq!(back.cell(2, 2), None);
    }

    #[test]
    fn seasons_on_disk_requires_all_four_files() {
        let dir = tempfile::tempdir().unwrap();
        let table = flat_fixture();

        for &cat in &StatCategory::ALL {
            write_table(&table_path(dir.path(), cat, 2024), &table).unwrap();
        }
        // 2023 only has per-game, so it must not count
        write_table(&table_path(dir.path(), StatCategory::PerGame, 2023), &table).unwrap();

        assert_eq!(seasons_on_disk(dir.path()).unwrap(), vec![2024]);
    }

    #[test]
    fn seasons_on_disk_sorted_ascending() {
        let dir = tempfile::tempdir().unwrap();
        let table = flat_fixture();
        for season in [2025, 2021, 2023] {
            for &cat in &StatCategory::ALL {
                write_table(&table_path(dir.path(), cat, season), &table).unwrap();
            }
        }
        assert_eq!(seasons_on_disk(dir.path()).unwrap(), vec![2021, 2023, 2025]);
    }
}
