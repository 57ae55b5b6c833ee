//! Per-map leaderboards
//!
//! Each map keeps its own top ten, since a corridor maze and an open field
//! are not comparable. Stored as one JSON blob.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::storage;

/// Entries kept per map
pub const MAX_HIGH_SCORES: usize = 10;

const STORAGE_KEY: &str = "hebi_highscores";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Longest the snake got during the game
    pub length: usize,
    /// Local players in that game
    pub players: u8,
    /// Unix timestamp (ms)
    pub timestamp: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    /// Map name to entries, best first
    tables: BTreeMap<String, Vec<HighScoreEntry>>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries for a map, best first
    pub fn table(&self, map: &str) -> &[HighScoreEntry] {
        self.tables.get(map).map_or(&[], Vec::as_slice)
    }

    /// Rank (1-based) a score would take on a map's table.
    ///
    /// Zero never ranks, and ties go below existing entries.
    pub fn rank_for(&self, map: &str, score: u64) -> Option<usize> {
        if score == 0 {
            return None;
        }
        let table = self.table(map);
        let rank = table
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(table.len())
            + 1;
        (rank <= MAX_HIGH_SCORES).then_some(rank)
    }

    pub fn qualifies(&self, map: &str, score: u64) -> bool {
        self.rank_for(map, score).is_some()
    }

    /// Insert an entry if it ranks; returns the rank it took
    pub fn record(&mut self, map: &str, entry: HighScoreEntry) -> Option<usize> {
        let rank = self.rank_for(map, entry.score)?;
        let table = self.tables.entry(map.to_string()).or_default();
        table.insert(rank - 1, entry);
        table.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn best(&self, map: &str) -> Option<u64> {
        self.table(map).first().map(|e| e.score)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.values().all(Vec::is_empty)
    }

    /// Restore ordering and size after loading a hand-edited blob
    fn normalize(&mut self) {
        for table in self.tables.values_mut() {
            table.retain(|e| e.score > 0);
            table.sort_by(|a, b| b.score.cmp(&a.score));
            table.truncate(MAX_HIGH_SCORES);
        }
        self.tables.retain(|_, table| !table.is_empty());
    }

    pub fn load() -> Self {
        let mut scores = storage::load_json::<HighScores>(STORAGE_KEY).unwrap_or_default();
        scores.normalize();
        log::info!("Loaded high scores for {} maps", scores.tables.len());
        scores
    }

    pub fn save(&self) {
        if storage::save_json(STORAGE_KEY, self) {
            log::info!("High scores saved");
        }
    }
}

/// Describe how long ago `then` was, both in Unix milliseconds
pub fn relative_age(now: f64, then: f64) -> String {
    let mins = ((now - then) / 60_000.0).max(0.0).floor() as u64;
    let hours = mins / 60;
    let days = hours / 24;
    match (days, hours, mins) {
        (0, 0, 0) => "just now".to_string(),
        (0, 0, m) => format!("{}m ago", m),
        (0, h, _) => format!("{}h ago", h),
        (1, _, _) => "yesterday".to_string(),
        (d, _, _) if d < 14 => format!("{} days ago", d),
        (d, _, _) if d < 60 => format!("{} weeks ago", d / 7),
        (d, _, _) => format!("{} months ago", d / 30),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entry(score: u64) -> HighScoreEntry {
        HighScoreEntry {
            score,
            length: 7,
            players: 1,
            timestamp: 0.0,
        }
    }

    #[test]
    fn test_zero_never_ranks() {
        let scores = HighScores::new();
        assert!(!scores.qualifies("open", 0));
        assert_eq!(scores.rank_for("open", 1), Some(1));
    }

    #[test]
    fn test_record_ranks() {
        let mut scores = HighScores::new();
        assert_eq!(scores.record("open", entry(100)), Some(1));
        assert_eq!(scores.record("open", entry(300)), Some(1));
        assert_eq!(scores.record("open", entry(200)), Some(2));
        // Ties rank below the existing entry
        assert_eq!(scores.record("open", entry(200)), Some(3));
        assert_eq!(scores.best("open"), Some(300));
    }

    #[test]
    fn test_maps_are_separate() {
        let mut scores = HighScores::new();
        scores.record("open", entry(500));
        assert_eq!(scores.record("corridors", entry(20)), Some(1));
        assert_eq!(scores.best("corridors"), Some(20));
        assert!(scores.table("arena").is_empty());
    }

    #[test]
    fn test_full_table() {
        let mut scores = HighScores::new();
        for s in 1..=10 {
            scores.record("open", entry(s * 10));
        }
        assert!(!scores.qualifies("open", 10));
        assert_eq!(scores.record("open", entry(5)), None);
        assert_eq!(scores.record("open", entry(55)), Some(6));
        assert_eq!(scores.table("open").len(), MAX_HIGH_SCORES);
        assert_eq!(scores.table("open").last().map(|e| e.score), Some(20));
    }

    #[test]
    fn test_normalize_drops_bad_entries() {
        let json = r#"{"tables": {"open": [
            {"score": 5, "length": 3, "players": 1, "timestamp": 0.0},
            {"score": 0, "length": 3, "players": 1, "timestamp": 0.0},
            {"score": 50, "length": 9, "players": 2, "timestamp": 0.0}
        ], "empty": []}}"#;
        let mut scores: HighScores = serde_json::from_str(json).unwrap();
        scores.normalize();
        let values: Vec<u64> = scores.table("open").iter().map(|e| e.score).collect();
        assert_eq!(values, vec![50, 5]);
        assert!(scores.table("empty").is_empty());
        assert!(!scores.is_empty());
    }

    #[test]
    fn test_relative_age() {
        let min = 60_000.0;
        assert_eq!(relative_age(10.0 * min, 10.0 * min), "just now");
        assert_eq!(relative_age(5.0 * min, 0.0), "5m ago");
        assert_eq!(relative_age(3.0 * 60.0 * min, 0.0), "3h ago");
        assert_eq!(relative_age(30.0 * 60.0 * min, 0.0), "yesterday");
        assert_eq!(relative_age(4.0 * 1440.0 * min, 0.0), "4 days ago");
        assert_eq!(relative_age(21.0 * 1440.0 * min, 0.0), "3 weeks ago");
        assert_eq!(relative_age(95.0 * 1440.0 * min, 0.0), "3 months ago");
        // Clock skew
        assert_eq!(relative_age(0.0, min), "just now");
    }

    proptest! {
        #[test]
        fn prop_tables_sorted_and_capped(
            values in proptest::collection::vec((0u64..1000, 0usize..3), 0..60)
        ) {
            let maps = ["open", "corridors", "arena"];
            let mut scores = HighScores::new();
            for (v, m) in values {
                scores.record(maps[m], entry(v));
            }
            for map in maps {
                let table = scores.table(map);
                prop_assert!(table.len() <= MAX_HIGH_SCORES);
                prop_assert!(table.windows(2).all(|w| w[0].score >= w[1].score));
            }
        }
    }
}
