// src/merge/join.rs

use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::select::{FrameRow, SelectedFrame};
use crate::error::{Result, ScoutError};

/// One player-season with a matched row from every category table.
#[derive(Debug, Clone, Copy)]
pub struct JoinedRow<'a> {
    pub per_game: &'a FrameRow,
    pub per_100_poss: &'a FrameRow,
    pub advanced: &'a FrameRow,
    pub shooting: &'a FrameRow,
}

/// Inner-join the four deduplicated frames on (player_name, age).
///
/// The join must be one-to-one: any frame still holding two rows with the
/// same key after dedup fails the season outright, since matching would be
/// arbitrary. Players missing from any table are dropped. Output preserves
/// the per-game frame's row order.
pub fn join_frames<'a>(
    per_game: &'a SelectedFrame,
    per_100_poss: &'a SelectedFrame,
    advanced: &'a SelectedFrame,
    shooting: &'a SelectedFrame,
) -> Result<Vec<JoinedRow<'a>>> {
    assert_unique_keys(per_game)?;
    let per_100_idx = unique_index(per_100_poss)?;
    let advanced_idx = unique_index(advanced)?;
    let shooting_idx = unique_index(shooting)?;

    let mut joined = Vec::with_capacity(per_game.rows.len());
    let mut dropped = 0usize;

    for row in &per_game.rows {
        let key = (row.player_name.as_str(), row.age.as_str());
        match (
            per_100_idx.get(&key),
            advanced_idx.get(&key),
            shooting_idx.get(&key),
        ) {
            (Some(&p100), Some(&adv), Some(&shoot)) => joined.push(JoinedRow {
                per_game: row,
                per_100_poss: p100,
                advanced: adv,
                shooting: shoot,
            }),
            _ => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!(dropped, "players absent from at least one category table");
    }
    Ok(joined)
}

fn unique_index<'a>(
    frame: &'a SelectedFrame,
) -> Result<HashMap<(&'a str, &'a str), &'a FrameRow>> {
    let mut index = HashMap::with_capacity(frame.rows.len());
    for row in &frame.rows {
        let key = (row.player_name.as_str(), row.age.as_str());
        if index.insert(key, row).is_some() {
            return Err(duplicate_key(frame, row));
        }
    }
    Ok(index)
}

fn assert_unique_keys(frame: &SelectedFrame) -> Result<()> {
    let mut seen = HashSet::with_capacity(frame.rows.len());
    for row in &frame.rows {
        if !seen.insert((row.player_name.as_str(), row.age.as_str())) {
            return Err(duplicate_key(frame, row));
        }
    }
    Ok(())
}

fn duplicate_key(frame: &SelectedFrame, row: &FrameRow) -> ScoutError {
    ScoutError::JoinCardinality {
        category: frame.category,
        player: row.player_name.clone(),
        age: row.age.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::fixtures::frame_of;
    use crate::table::StatCategory;

    fn four_frames(
        names: [&[(&str, &str, &str, &str)]; 4],
    ) -> (SelectedFrame, SelectedFrame, SelectedFrame, SelectedFrame) {
        (
            frame_of(StatCategory::PerGame, names[0]),
            frame_of(StatCategory::Per100Poss, names[1]),
            frame_of(StatCategory::Advanced, names[2]),
            frame_of(StatCategory::Shooting, names[3]),
        )
    }

    #[test]
    fn joins_in_per_game_order() {
        let rows: &[(&str, &str, &str, &str)] = &[
            ("B. Wing", "28", "LAL", "1.0"),
            ("A. Guard", "25", "BOS", "2.0"),
        ];
        let (pg, p100, adv, shoot) = four_frames([rows, rows, rows, rows]);
        let joined = join_frames(&pg, &p100, &adv, &shoot).unwrap();
        assert_eq!(joined.len(), 2);
        assert_eq!(joined[0].per_game.player_name, "B. Wing");
        assert_eq!(joined[1].per_game.player_name, "A. Guard");
    }

    #[test]
    fn player_missing_from_one_table_is_dropped() {
        let full: &[(&str, &str, &str, &str)] = &[
            ("A. Guard", "25", "BOS", "2.0"),
            ("B. Wing", "28", "LAL", "1.0"),
        ];
        let partial: &[(&str, &str, &str, &str)] = &[("A. Guard", "25", "BOS", "2.0")];
        let (pg, p100, adv, shoot) = four_frames([full, full, partial, full]);
        let joined = join_frames(&pg, &p100, &adv, &shoot).unwrap();
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].per_game.player_name, "A. Guard");
    }

    #[test]
    fn duplicate_key_on_the_right_is_fatal() {
        let clean: &[(&str, &str, &str, &str)] = &[("A. Guard", "25", "BOS", "2.0")];
        let dup: &[(&str, &str, &str, &str)] = &[
            ("A. Guard", "25", "BOS", "2.0"),
            ("A. Guard", "25", "LAL", "3.0"),
        ];
        let (pg, p100, adv, shoot) = four_frames([clean, dup, clean, clean]);
        let err = join_frames(&pg, &p100, &adv, &shoot).unwrap_err();
        match err {
            ScoutError::JoinCardinality { category, player, .. } => {
                assert_eq!(category, StatCategory::Per100Poss);
                assert_eq!(player, "A. Guard");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicate_key_on_the_left_is_fatal() {
        let clean: &[(&str, &str, &str, &str)] = &[("A. Guard", "25", "BOS", "2.0")];
        let dup: &[(&str, &str, &str, &str)] = &[
            ("A. Guard", "25", "BOS", "2.0"),
            ("A. Guard", "25", "LAL", "3.0"),
        ];
        let (pg, p100, adv, shoot) = four_frames([dup, clean, clean, clean]);
        let err = join_frames(&pg, &p100, &adv, &shoot).unwrap_err();
        match err {
            ScoutError::JoinCardinality { category, .. } => {
                assert_eq!(category, StatCategory::PerGame);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn same_name_different_age_joins_as_two_players() {
        let rows: &[(&str, &str, &str, &str)] = &[
            ("J. Smith", "22", "DET", "6.0"),
            ("J. Smith", "35", "CLE", "2.0"),
        ];
        let (pg, p100, adv, shoot) = four_frames([rows, rows, rows, rows]);
        let joined = join_frames(&pg, &p100, &adv, &shoot).unwrap();
        assert_eq!(joined.len(), 2);
        assert_ne!(joined[0].per_game.age, joined[1].per_game.age);
    }
}
