//! Suspicion leaderboard
//!
//! A point-in-time view of the scores, highest first.

use crate::color::Rgb;
use crate::roster::Roster;

/// A single leaderboard row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardRow {
    pub name: String,
    pub color: Rgb,
    pub score: u32,
}

/// Scores sorted descending; equal scores keep roster order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaderboard {
    pub rows: Vec<LeaderboardRow>,
}

impl Leaderboard {
    /// Build from roster-ordered scores
    pub(crate) fn from_scores(roster: &Roster, scores: &[u32]) -> Self {
        let mut rows: Vec<LeaderboardRow> = roster
            .entries()
            .iter()
            .zip(scores)
            .map(|(entry, &score)| LeaderboardRow {
                name: entry.name.clone(),
                color: entry.color,
                score,
            })
            .collect();

        // sort_by is stable, so ties stay in roster order between refreshes
        rows.sort_by(|a, b| b.score.cmp(&a.score));

        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LeaderboardRow> {
        self.rows.iter()
    }

    /// 1-indexed position of a player, None if not on the roster
    pub fn rank_of(&self, name: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.name == name).map(|i| i + 1)
    }

    /// Highest-scoring player, if anyone has been suspected at all
    pub fn top_suspect(&self) -> Option<&LeaderboardRow> {
        self.rows.first().filter(|r| r.score > 0)
    }
}
