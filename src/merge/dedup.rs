// src/merge/dedup.rs

use tracing::debug;

use super::select::SelectedFrame;

/// Team codes the source uses for a traded player's combined-season row.
pub const COMBINED_TEAM_CODES: [&str; 5] = ["2TM", "3TM", "4TM", "5TM", "6TM"];

pub fn is_combined_total(team: &str) -> bool {
    COMBINED_TEAM_CODES.contains(&team)
}

/// Collapse each player's rows to one: the combined-total row when the
/// player was traded, otherwise the first row in sorted order.
///
/// Rows are sorted by (player_name, age, team) first so the pick is
/// deterministic regardless of source order, then grouped by name alone.
/// Output rows come back sorted by player name.
pub fn collapse_multi_team(mut frame: SelectedFrame) -> SelectedFrame {
    let before = frame.rows.len();

    frame.rows.sort_by(|a, b| {
        (a.player_name.as_str(), a.age.as_str(), a.team.as_str()).cmp(&(
            b.player_name.as_str(),
            b.age.as_str(),
            b.team.as_str(),
        ))
    });

    let mut kept = Vec::new();
    let mut i = 0;
    while i < frame.rows.len() {
        let mut j = i + 1;
        while j < frame.rows.len() && frame.rows[j].player_name == frame.rows[i].player_name {
            j += 1;
        }
        let group = &frame.rows[i..j];
        let pick = group
            .iter()
            .find(|row| is_combined_total(&row.team))
            .unwrap_or(&group[0]);
        kept.push(pick.clone());
        i = j;
    }

    debug!(
        category = %frame.category,
        before,
        after = kept.len(),
        "collapsed multi-team rows"
    );
    frame.rows = kept;
    frame
}
