// src/merge/select.rs

use tracing::debug;

use super::columns::{specs_for, ColumnSpec};
use crate::error::{Result, ScoutError};
use crate::table::{RawTable, StatCategory};

/// One table row after projection. Identity fields keep the raw source text;
/// age in particular stays a string because it is a join key, and joining on
/// parsed numbers would paper over source rows that disagree textually.
#[derive(Debug, Clone)]
pub struct FrameRow {
    pub player_name: String,
    pub age: String,
    pub team: String,
    /// Stat cells aligned with `SelectedFrame::columns`; blank cells are None.
    pub cells: Vec<Option<String>>,
}

/// A category table reduced to its identity columns plus the canonical
/// stat columns, renamed.
#[derive(Debug, Clone)]
pub struct SelectedFrame {
    pub category: StatCategory,
    pub columns: Vec<&'static str>,
    pub rows: Vec<FrameRow>,
}

/// Project a raw table down to the columns its category contributes.
///
/// Every required column must be present; a table that has drifted from the
/// expected layout fails the whole season rather than producing a silently
/// misaligned merge.
pub fn select(category: StatCategory, table: &RawTable) -> Result<SelectedFrame> {
    let player_idx = identity_index(category, table, "Player")?;
    let age_idx = identity_index(category, table, "Age")?;
    let team_idx = identity_index(category, table, "Team")?;

    let specs = specs_for(category);
    let mut stat_indices = Vec::with_capacity(specs.len());
    for spec in specs {
        let idx = table
            .column_index(spec.group, spec.source)
            .ok_or_else(|| mismatch(category, spec))?;
        stat_indices.push(idx);
    }

    let rows = (0..table.rows.len())
        .map(|r| FrameRow {
            player_name: text_at(table, r, player_idx),
            age: text_at(table, r, age_idx),
            team: text_at(table, r, team_idx),
            cells: stat_indices
                .iter()
                .map(|&c| table.cell(r, c).map(str::to_string))
                .collect(),
        })
        .collect::<Vec<_>>();

    debug!(category = %category, rows = rows.len(), "selected frame");

    Ok(SelectedFrame {
        category,
        columns: specs.iter().map(|s| s.canonical).collect(),
        rows,
    })
}

fn identity_index(category: StatCategory, table: &RawTable, name: &'static str) -> Result<usize> {
    table
        .column_index("", name)
        .ok_or(ScoutError::SchemaMismatch {
            category,
            group: String::new(),
            column: name.to_string(),
        })
}

fn mismatch(category: StatCategory, spec: &ColumnSpec) -> ScoutError {
    ScoutError::SchemaMismatch {
        category,
        group: spec.group.to_string(),
        column: spec.source.to_string(),
    }
}

fn text_at(table: &RawTable, row: usize, col: usize) -> String {
    table.cell(row, col).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::fixtures::stat_table;

    #[test]
    fn per_game_projects_and_renames() {
        let table = stat_table(
            StatCategory::PerGame,
            &[("A. Guard", "25", "BOS", "21.4"), ("B. Wing", "28", "LAL", "9.9")],
        );
        let frame = select(StatCategory::PerGame, &table).unwrap();

        assert_eq!(frame.columns[0], "position");
        assert!(frame.columns.contains(&"points_per_game"));
        assert!(!frame.columns.iter().any(|c| *c == "Rk" || *c == "Awards"));
        assert_eq!(frame.rows.len(), 2);
        assert_eq!(frame.rows[0].player_name, "A. Guard");
        assert_eq!(frame.rows[0].age, "25");

        let pts = frame.columns.iter().position(|c| *c == "points_per_game").unwrap();
        assert_eq!(frame.rows[1].cells[pts].as_deref(), Some("9.9"));
    }

    #[test]
    fn missing_column_is_fatal() {
        let mut table = stat_table(StatCategory::Advanced, &[("A. Guard", "25", "BOS", "1.0")]);
        let ws = table.headers.iter().position(|h| h == "WS").unwrap();
        table.headers[ws] = "Win Sh".into();

        let err = select(StatCategory::Advanced, &table).unwrap_err();
        match err {
            ScoutError::SchemaMismatch { category, column, .. } => {
                assert_eq!(category, StatCategory::Advanced);
                assert_eq!(column, "WS");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn shooting_disambiguates_repeated_headers_by_group() {
        let mut table = stat_table(StatCategory::Shooting, &[("A. Guard", "25", "BOS", "x")]);
        // give every 3P column a value tagged with its position so a group
        // mixup is visible
        let three_p_cols: Vec<usize> = table
            .headers
            .iter()
            .enumerate()
            .filter(|(_, h)| h.as_str() == "3P")
            .map(|(i, _)| i)
            .collect();
        assert_eq!(three_p_cols.len(), 3);
        for &col in &three_p_cols {
            table.rows[0][col] = format!("v-{col}");
        }
        let att_col = table.column_index("% of FGA by Distance", "3P").unwrap();
        let ast_col = table.column_index("% of FG Ast'd", "3P").unwrap();

        let frame = select(StatCategory::Shooting, &table).unwrap();
        let att = frame
            .columns
            .iter()
            .position(|c| *c == "three_point_attempt_percentage")
            .unwrap();
        let ast = frame
            .columns
            .iter()
            .position(|c| *c == "three_point_assisted_percentage")
            .unwrap();
        assert_eq!(frame.rows[0].cells[att].as_deref(), Some(format!("v-{att_col}").as_str()));
        assert_eq!(frame.rows[0].cells[ast].as_deref(), Some(format!("v-{ast_col}").as_str()));
    }

    #[test]
    fn blank_cells_become_none() {
        let mut table = stat_table(StatCategory::Per100Poss, &[("A. Guard", "25", "BOS", "110")]);
        let drtg = table.headers.iter().position(|h| h == "DRtg").unwrap();
        table.rows[0][drtg] = "  ".into();

        let frame = select(StatCategory::Per100Poss, &table).unwrap();
        let idx = frame
            .columns
            .iter()
            .position(|c| *c == "defensive_rating")
            .unwrap();
        assert_eq!(frame.rows[0].cells[idx], None);
    }
}
