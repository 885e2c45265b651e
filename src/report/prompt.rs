// src/report/prompt.rs

use serde_json::{json, Map, Value};

use crate::merge::PlayerSeasonRecord;

/// The payload the model sees: the player's name plus one stats object per
/// season, keyed by the year string.
pub fn seasons_payload(player_name: &str, seasons: &[PlayerSeasonRecord]) -> Value {
    let mut year_map = Map::new();
    for record in seasons {
        year_map.insert(record.season_key(), record.season_stats_json());
    }
    json!({
        "player_name": player_name,
        "seasons": year_map,
    })
}

/// Scouting-report prompt: fixed instructions followed by the stats payload.
pub fn build_scouting_prompt(payload: &Value) -> String {
    format!(
        "You are an analytical, direct, and witty AI basketball assistant with deep knowledge of the game.\n \
         Using the provided player statistics across all available seasons, write a concise, data-driven scouting report between 250-600 words.\n\
         Maintain a professional and technical tone. Structure the report into the following sections, each separated by line breaks\n\
         Overview\n\
         Strengths\n\
         Weaknesses\n\
         Playstyle and Tendencies\n\
         Scheme Fit\n\
         Guidelines:\n\
         Base every statement strictly on the supplied statistics; do not invent or infer information without statistical support.\n\
         Keep formatting simple (no bullets, asterisks, or special characters), just text and line breaks.\n\
         Be accurate, formal, and consistent in presentation.\n\
         {payload}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::fixtures::frame_of;
    use crate::merge::join::join_frames;
    use crate::merge::record::build_records;
    use crate::table::StatCategory;

    fn one_season(season: u16) -> PlayerSeasonRecord {
        let rows: &[(&str, &str, &str, &str)] = &[("A. Guard", "25", "BOS", "10.0")];
        let pg = frame_of(StatCategory::PerGame, rows);
        let p100 = frame_of(StatCategory::Per100Poss, rows);
        let adv = frame_of(StatCategory::Advanced, rows);
        let shoot = frame_of(StatCategory::Shooting, rows);
        let joined = join_frames(&pg, &p100, &adv, &shoot).unwrap();
        build_records(season, &joined).0.remove(0)
    }

    #[test]
    fn payload_keys_seasons_by_year_string() {
        let seasons = [one_season(2023), one_season(2024)];
        let payload = seasons_payload("A. Guard", &seasons);

        assert_eq!(payload["player_name"], "A. Guard");
        let seasons_obj = payload["seasons"].as_object().unwrap();
        assert_eq!(seasons_obj.len(), 2);
        assert!(seasons_obj.contains_key("2023"));
        assert!(seasons_obj.contains_key("2024"));
        // year lives in the key, not the entry
        assert!(seasons_obj["2023"].get("year").is_none());
        assert_eq!(seasons_obj["2023"]["points_per_game"], 10.0);
    }

    #[test]
    fn prompt_lists_the_five_sections_and_embeds_the_payload() {
        let payload = seasons_payload("A. Guard", &[one_season(2024)]);
        let text = build_scouting_prompt(&payload);

        for section in [
            "Overview",
            "Strengths",
            "Weaknesses",
            "Playstyle and Tendencies",
            "Scheme Fit",
        ] {
            assert!(text.contains(section), "missing section {section}");
        }
        assert!(text.contains("between 250-600 words"));
        assert!(text.contains(r#""player_name":"A. Guard""#));
        let instructions_end = text.find("consistent in presentation.").unwrap();
        let payload_start = text.find(r#"{"player_name""#).unwrap();
        assert!(payload_start > instructions_end);
    }
}
