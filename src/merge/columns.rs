// src/merge/columns.rs
//
// The canonical column book: which source columns each category contributes
// and what they are called once merged. Everything downstream that needs the
// full stat list (record construction, DDL, report payloads) derives it from
// these tables, so adding a column here is the whole change.

use once_cell::sync::Lazy;

use crate::table::StatCategory;

/// One projected column: where it lives in the source table and the
/// canonical name it carries afterwards. `group` is empty for flat tables.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub group: &'static str,
    pub source: &'static str,
    pub canonical: &'static str,
}

const fn flat(source: &'static str, canonical: &'static str) -> ColumnSpec {
    ColumnSpec {
        group: "",
        source,
        canonical,
    }
}

const fn grouped(
    group: &'static str,
    source: &'static str,
    canonical: &'static str,
) -> ColumnSpec {
    ColumnSpec {
        group,
        source,
        canonical,
    }
}

/// Canonical name of the one non-numeric selected column.
pub const POSITION: &str = "position";

pub const PER_GAME: &[ColumnSpec] = &[
    flat("Pos", POSITION),
    flat("G", "games_played"),
    flat("MP", "minutes_played_per_game"),
    flat("FG", "field_goals_made_per_game"),
    flat("FGA", "field_goal_attempts_per_game"),
    flat("FG%", "field_goal_percentage"),
    flat("3P", "three_pointers_made_per_game"),
    flat("3PA", "three_point_attempts_per_game"),
    flat("3P%", "three_point_percentage"),
    flat("2P", "two_pointers_made_per_game"),
    flat("2PA", "two_point_attempts_per_game"),
    flat("2P%", "two_point_percentage"),
    flat("FT", "free_throws_made_per_game"),
    flat("FTA", "free_throw_attempts_per_game"),
    flat("FT%", "free_throw_percentage"),
    flat("ORB", "offensive_rebounds_per_game"),
    flat("DRB", "defensive_rebounds_per_game"),
    flat("TRB", "total_rebounds_per_game"),
    flat("AST", "assists_per_game"),
    flat("STL", "steals_per_game"),
    flat("BLK", "blocks_per_game"),
    flat("TOV", "turnovers_per_game"),
    flat("PF", "personal_fouls_per_game"),
    flat("PTS", "points_per_game"),
];

pub const PER_100_POSS: &[ColumnSpec] = &[
    flat("ORtg", "offensive_rating"),
    flat("DRtg", "defensive_rating"),
];

pub const ADVANCED: &[ColumnSpec] = &[
    flat("PER", "player_efficiency_rating"),
    flat("TS%", "true_shooting_percentage"),
    flat("TRB%", "total_rebound_percentage"),
    flat("AST%", "assist_percentage"),
    flat("STL%", "steal_percentage"),
    flat("BLK%", "block_percentage"),
    flat("TOV%", "turnover_percentage"),
    flat("USG%", "usage_percentage"),
    flat("WS", "win_shares"),
    flat("WS/48", "win_shares_per_48"),
    flat("BPM", "box_plus_minus"),
    flat("VORP", "value_over_replacement_player"),
];

pub const SHOOTING: &[ColumnSpec] = &[
    grouped("% of FGA by Distance", "2P", "two_point_attempt_percentage"),
    grouped("% of FGA by Distance", "0-3", "layup_dunk_attempt_percentage"),
    grouped(
        "% of FGA by Distance",
        "3-10",
        "short_midrange_attempt_percentage",
    ),
    grouped("% of FGA by Distance", "10-16", "midrange_attempt_percentage"),
    grouped(
        "% of FGA by Distance",
        "16-3P",
        "long_midrange_attempt_percentage",
    ),
    grouped("% of FGA by Distance", "3P", "three_point_attempt_percentage"),
    grouped("FG% by Distance", "0-3", "layup_dunk_made_percentage"),
    grouped("FG% by Distance", "3-10", "short_midrange_made_percentage"),
    grouped("FG% by Distance", "10-16", "midrange_made_percentage"),
    grouped("FG% by Distance", "16-3P", "long_midrange_made_percentage"),
    grouped("% of FG Ast'd", "2P", "two_point_assisted_percentage"),
    grouped("% of FG Ast'd", "3P", "three_point_assisted_percentage"),
    grouped("Corner 3s", "%3PA", "corner_three_attempt_percentage"),
    grouped("Corner 3s", "3P%", "corner_three_made_percentage"),
];

/// Columns each category projects, beyond the shared identity columns
/// (Player, Age, Team) that every table carries at group "".
pub fn specs_for(category: StatCategory) -> &'static [ColumnSpec] {
    match category {
        StatCategory::PerGame => PER_GAME,
        StatCategory::Per100Poss => PER_100_POSS,
        StatCategory::Advanced => ADVANCED,
        StatCategory::Shooting => SHOOTING,
    }
}

/// Every numeric stat column in canonical order: per-game, then per-100,
/// then advanced, then shooting. Position is excluded; it stays text.
pub static STAT_COLUMNS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    StatCategory::ALL
        .iter()
        .flat_map(|&cat| specs_for(cat).iter())
        .map(|spec| spec.canonical)
        .filter(|&name| name != POSITION)
        .collect()
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn fifty_one_numeric_stats() {
        assert_eq!(STAT_COLUMNS.len(), 51);
        assert!(!STAT_COLUMNS.contains(&POSITION));
    }

    #[test]
    fn canonical_names_are_unique() {
        let mut seen = HashSet::new();
        for &cat in &StatCategory::ALL {
            for spec in specs_for(cat) {
                assert!(seen.insert(spec.canonical), "duplicate {}", spec.canonical);
            }
        }
    }

    #[test]
    fn shooting_selects_by_group() {
        // the same source header appears under several groups; the group
        // label is what tells them apart
        let threes: Vec<_> = SHOOTING.iter().filter(|s| s.source == "3P").collect();
        assert_eq!(threes.len(), 3);
        let groups: HashSet<_> = threes.iter().map(|s| s.group).collect();
        assert_eq!(groups.len(), 3);
    }

    #[test]
    fn stat_order_starts_per_game_ends_shooting() {
        assert_eq!(STAT_COLUMNS[0], "games_played");
        assert_eq!(STAT_COLUMNS[22], "points_per_game");
        assert_eq!(STAT_COLUMNS[23], "offensive_rating");
        assert_eq!(STAT_COLUMNS[50], "corner_three_made_percentage");
    }
}
