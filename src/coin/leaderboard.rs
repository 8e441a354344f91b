//! Local top-10 leaderboard.
//!
//! Entries are keyed by username (exact match), so two players who pick the
//! same name share one row.

use serde::{Deserialize, Serialize};

pub const LEADERBOARD_SIZE: usize = 10;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub balance: f64,
    /// 1-based position, recomputed on every write.
    pub rank: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn leader(&self) -> Option<&LeaderboardEntry> {
        self.entries.first()
    }

    /// Insert or overwrite `username`'s score, then re-sort, truncate and re-rank.
    pub fn upsert(&mut self, username: &str, balance: f64) {
        match self.entries.iter_mut().find(|e| e.username == username) {
            Some(entry) => entry.balance = balance,
            None => self.entries.push(LeaderboardEntry {
                username: username.to_string(),
                balance,
                rank: 0,
            }),
        }
        self.normalize();
    }

    /// Carry `old`'s row over to `new`. Collides like `upsert` when `new`
    /// already has a row: that row is kept and `old` is removed.
    pub fn rename(&mut self, old: &str, new: &str) {
        if old == new {
            return;
        }
        let Some(pos) = self.entries.iter().position(|e| e.username == old) else {
            return;
        };
        if self.entries.iter().any(|e| e.username == new) {
            self.entries.remove(pos);
        } else {
            self.entries[pos].username = new.to_string();
        }
        self.normalize();
    }

    /// Restore the sorted/truncated/ranked shape. Applied after loading too,
    /// since the stored record may have been edited by hand.
    pub fn normalize(&mut self) {
        // Stable sort: on a tie the earlier entry keeps the better rank.
        self.entries.sort_by(|a, b| b.balance.total_cmp(&a.balance));
        self.entries.truncate(LEADERBOARD_SIZE);
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.rank = i as u32 + 1;
        }
    }
}
