// src/table/mod.rs

pub mod csv;
pub mod parse;

use std::fmt;

/// The four source table categories merged into one record per player-season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatCategory {
    PerGame,
    Per100Poss,
    Advanced,
    Shooting,
}

impl StatCategory {
    pub const ALL: [StatCategory; 4] = [
        StatCategory::PerGame,
        StatCategory::Per100Poss,
        StatCategory::Advanced,
        StatCategory::Shooting,
    ];

    /// Path segment used in the source site's league URLs.
    pub fn slug(self) -> &'static str {
        match self {
            StatCategory::PerGame => "per_game",
            StatCategory::Per100Poss => "per_poss",
            StatCategory::Advanced => "advanced",
            StatCategory::Shooting => "shooting",
        }
    }

    /// Stem of the on-disk CSV extract, e.g. `per_100_poss_2025.csv`.
    pub fn file_stem(self) -> &'static str {
        match self {
            StatCategory::PerGame => "per_game",
            StatCategory::Per100Poss => "per_100_poss",
            StatCategory::Advanced => "advanced",
            StatCategory::Shooting => "shooting",
        }
    }

    /// Whether the source table carries a two-level (grouped) header.
    pub fn is_grouped(self) -> bool {
        matches!(self, StatCategory::Shooting)
    }
}

impl fmt::Display for StatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

/// One scraped statistics table: header row(s) plus body rows.
///
/// Columns may sit under a two-level header (category label over stat name,
/// e.g. "% of FGA by Distance" over "0-3"). Rather than flattening, each
/// column keeps its group label so downstream selection can address a
/// sub-table by category name independent of column order. Ungrouped columns
/// carry an empty label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    /// Group label per column; `""` for columns outside any group.
    pub groups: Vec<String>,
    /// Leaf column names, one per column.
    pub headers: Vec<String>,
    /// Body rows, as raw cell text. A row may be shorter than the header.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn is_grouped(&self) -> bool {
        self.groups.iter().any(|g| !g.is_empty())
    }

    /// Index of column `name` under `group` (`""` for ungrouped columns).
    pub fn column_index(&self, group: &str, name: &str) -> Option<usize> {
        self.groups
            .iter()
            .zip(&self.headers)
            .position(|(g, h)| g == group && h == name)
    }

    /// Cell text at (row, col). Missing and all-whitespace cells read as None.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        let text = self.rows.get(row)?.get(col)?.trim();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}
