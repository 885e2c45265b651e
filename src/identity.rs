// src/identity.rs

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

use crate::error::Result;
use crate::merge::PlayerSeasonRecord;

const HEADSHOT_CDN: &str = "https://ak-static.cms.nba.com/wp-content/uploads/headshots/nba/latest";
const HEADSHOT_SIZE: &str = "1040x760";

#[derive(Debug, Deserialize)]
struct DirectoryEntry {
    id: u64,
    full_name: String,
}

/// Local index of league player ids, keyed by lowercased full name, used to
/// point records at headshot images. Lookups are best-effort: an unknown
/// name yields no URL and never an error.
#[derive(Debug, Default)]
pub struct PlayerDirectory {
    ids_by_name: HashMap<String, u64>,
}

impl PlayerDirectory {
    pub fn load(path: &Path) -> Result<PlayerDirectory> {
        let raw = std::fs::read_to_string(path)?;
        let entries: Vec<DirectoryEntry> = serde_json::from_str(&raw)?;
        let ids_by_name = entries
            .into_iter()
            .map(|entry| (normalize(&entry.full_name), entry.id))
            .collect();
        Ok(PlayerDirectory { ids_by_name })
    }

    /// Load the directory, or run without one when the file is absent or
    /// unreadable.
    pub fn load_or_empty(path: &Path) -> PlayerDirectory {
        match Self::load(path) {
            Ok(directory) => {
                info!(
                    players = directory.len(),
                    path = %path.display(),
                    "loaded player directory"
                );
                directory
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "player directory unavailable; headshot URLs will be null"
                );
                PlayerDirectory::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.ids_by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids_by_name.is_empty()
    }

    pub fn headshot_url(&self, player_name: &str) -> Option<String> {
        let id = self.ids_by_name.get(&normalize(player_name))?;
        Some(format!("{HEADSHOT_CDN}/{HEADSHOT_SIZE}/{id}.png"))
    }

    /// Fill in headshot URLs on merged records in place.
    pub fn attach(&self, records: &mut [PlayerSeasonRecord]) {
        for record in records {
            record.headshot_url = self.headshot_url(&record.player_name);
        }
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
