//! High score leaderboard system
//!
//! Tracks the top 10 (name, score) pairs, sorted descending. Ties keep
//! insertion order: an earlier entry stays above a later equal score.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_NAME_LEN;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's name (at most `MAX_NAME_LEN` characters)
    pub name: String,
    /// Player's score
    pub score: u64,
}

impl HighScoreEntry {
    pub fn new(name: &str, score: u64) -> Self {
        Self {
            name: clip_name(name),
            score,
        }
    }
}

/// Truncate a name to `MAX_NAME_LEN` characters
pub fn clip_name(name: &str) -> String {
    name.chars().take(MAX_NAME_LEN).collect()
}

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a table from arbitrary entries, enforcing every table rule
    /// (no zero scores, clipped names, sorted, at most 10).
    pub fn from_entries(entries: impl IntoIterator<Item = HighScoreEntry>) -> Self {
        let mut entries: Vec<HighScoreEntry> = entries
            .into_iter()
            .filter(|e| e.score > 0)
            .map(|e| HighScoreEntry::new(&e.name, e.score))
            .collect();
        // Stable sort keeps file order among ties
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn insert(&mut self, name: &str, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry::new(name, score);

        // Below every strictly smaller score, after any equal ones
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Lowest score on a full table (the bar to beat)
    pub fn cutoff(&self) -> Option<u64> {
        if self.entries.len() < MAX_HIGH_SCORES {
            None
        } else {
            self.entries.last().map(|e| e.score)
        }
    }
}
