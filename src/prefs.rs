//! Console display preferences.
//!
//! Which overview cards are shown is a cosmetic, per-machine choice — the
//! one piece of state that survives restarts. It lives as JSON in the
//! user's cache directory, profile-suffixed like the rest of the
//! per-profile files, and silently falls back to defaults when missing or
//! unreadable.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::ClientError;

pub const CARD_IDS: [&str; 8] = [
    "overdue",
    "due-soon-0-3",
    "due-soon-4-7",
    "due-soon-8-14",
    "due-soon-15plus",
    "banned-students",
    "top-borrowed",
    "categories",
];

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CardPrefs {
    #[serde(default)]
    visible_cards: BTreeMap<String, bool>,
}

impl CardPrefs {
    /// Cards default to visible until explicitly hidden.
    pub fn is_visible(&self, card: &str) -> bool {
        self.visible_cards.get(card).copied().unwrap_or(true)
    }

    /// Flip a card; returns the new visibility.
    pub fn toggle(&mut self, card: &str) -> bool {
        let next = !self.is_visible(card);
        self.visible_cards.insert(card.to_string(), next);
        next
    }

    pub fn load(profile: &str) -> Self {
        let path = prefs_file_path(profile);
        match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("ignoring corrupt prefs file {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self, profile: &str) -> Result<(), ClientError> {
        let path = prefs_file_path(profile);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(self)
            .map_err(|e| ClientError::Io(e.to_string()))?;
        std::fs::write(path, raw)?;
        Ok(())
    }
}

/// Path of the prefs file for a profile.
fn prefs_file_path(profile: &str) -> PathBuf {
    let filename = if profile == "default" {
        "card_prefs.json".to_string()
    } else {
        format!("card_prefs_{}.json", profile)
    };

    cache_dir().join(filename)
}

#[cfg(target_os = "macos")]
fn cache_dir() -> PathBuf {
    let home = std::env::var("HOME").expect("HOME not set");
    PathBuf::from(home)
        .join("Library")
        .join("Caches")
        .join("CircDesk")
}

#[cfg(target_os = "linux")]
fn cache_dir() -> PathBuf {
    let home = std::env::var("HOME").expect("HOME not set");
    PathBuf::from(home).join(".cache").join("circdesk")
}

#[cfg(target_os = "windows")]
fn cache_dir() -> PathBuf {
    let appdata = std::env::var("LOCALAPPDATA").expect("LOCALAPPDATA not set");
    PathBuf::from(appdata).join("CircDesk")
}
