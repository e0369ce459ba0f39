//! Session state
//!
//! The single owner of scores and body reports. Mutations return their result
//! and queue a [`SessionEvent`]; rendering happens elsewhere by draining the
//! queue and reading the accessors.

use chrono::{Local, NaiveTime};

use super::leaderboard::Leaderboard;
use super::report::BodyReport;
use crate::error::{NotebookError, Result};
use crate::roster::Roster;

/// Change notifications for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    BodyAdded { id: u32 },
    BodyDeleted { id: u32 },
    SuspicionChanged { player: String, score: u32 },
    SuspicionReset,
    SnapshotLoaded,
}

/// Session fields recovered from a session file; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionPatch {
    /// Raw name → score pairs as read from the file
    pub sus: Option<Vec<(String, i64)>>,
    pub bodies: Option<Vec<BodyReport>>,
    pub next_id: Option<u32>,
}

/// Players, suspicion scores and the newest-first body log
#[derive(Debug, Clone)]
pub struct SessionModel {
    roster: Roster,
    /// Parallel to `roster.entries()`
    scores: Vec<u32>,
    /// Index 0 is the newest report
    bodies: Vec<BodyReport>,
    next_id: u32,
    events: Vec<SessionEvent>,
}

impl Default for SessionModel {
    fn default() -> Self {
        Self::new(Roster::crew())
    }
}

impl SessionModel {
    /// Empty session: every score 0, no reports, ids start at 1
    pub fn new(roster: Roster) -> Self {
        let scores = vec![0; roster.len()];
        Self {
            roster,
            scores,
            bodies: Vec::new(),
            next_id: 1,
            events: Vec::new(),
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// All reports, newest first
    pub fn bodies(&self) -> &[BodyReport] {
        &self.bodies
    }

    /// Identifier the next report will receive
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    pub fn score(&self, player: &str) -> Option<u32> {
        self.roster.index_of(player).map(|i| self.scores[i])
    }

    /// `(name, score)` in roster order
    pub fn scores(&self) -> impl Iterator<Item = (&str, u32)> {
        self.roster.names().zip(self.scores.iter().copied())
    }

    /// Record a body stamped with the current local time
    pub fn add_body(
        &mut self,
        victim: &str,
        location: &str,
        nearby: Vec<String>,
        notes: &str,
    ) -> Result<BodyReport> {
        self.add_body_at(victim, location, nearby, notes, Local::now().time())
    }

    /// Record a body at an explicit time of day.
    ///
    /// Every roster name in `nearby` gains one suspicion point per occurrence;
    /// other names are kept in the report but score nothing.
    pub fn add_body_at(
        &mut self,
        victim: &str,
        location: &str,
        nearby: Vec<String>,
        notes: &str,
        time: NaiveTime,
    ) -> Result<BodyReport> {
        let victim = victim.trim();
        let location = location.trim();
        if victim.is_empty() || location.is_empty() {
            return Err(NotebookError::validation("victim and location"));
        }

        let id = self.allocate_id()?;
        let report = BodyReport::new(id, victim, location, nearby, notes, time);

        for name in &report.nearby {
            if let Some(i) = self.roster.index_of(name) {
                self.scores[i] = self.scores[i].saturating_add(1);
            }
        }

        log::debug!(
            "Body #{} added: {} in {} (nearby: {})",
            id,
            report.victim,
            report.location,
            report.nearby_text()
        );
        self.bodies.insert(0, report.clone());
        self.events.push(SessionEvent::BodyAdded { id });
        Ok(report)
    }

    /// Remove a report. Scores it raised stay raised.
    pub fn delete_body(&mut self, id: u32) -> bool {
        let Some(pos) = self.bodies.iter().position(|b| b.id == id) else {
            return false;
        };
        self.bodies.remove(pos);
        log::debug!("Body #{} deleted", id);
        self.events.push(SessionEvent::BodyDeleted { id });
        true
    }

    /// Adjust a player's score, never below zero.
    ///
    /// Returns the new score, or None (and changes nothing) for a name that
    /// is not on the roster.
    pub fn change_suspicion(&mut self, player: &str, delta: i64) -> Option<u32> {
        let i = self.roster.index_of(player)?;
        let score = (self.scores[i] as i64)
            .saturating_add(delta)
            .clamp(0, u32::MAX as i64) as u32;
        self.scores[i] = score;
        log::debug!("{} suspicion {:+} -> {}", player, delta, score);
        self.events.push(SessionEvent::SuspicionChanged {
            player: player.to_string(),
            score,
        });
        Some(score)
    }

    pub fn reset_all_suspicion(&mut self) {
        self.scores.iter_mut().for_each(|s| *s = 0);
        log::debug!("All suspicion reset");
        self.events.push(SessionEvent::SuspicionReset);
    }

    pub fn leaderboard(&self) -> Leaderboard {
        Leaderboard::from_scores(&self.roster, &self.scores)
    }

    /// The `n` newest reports (fewer if the log is shorter)
    pub fn recent_bodies(&self, n: usize) -> &[BodyReport] {
        &self.bodies[..n.min(self.bodies.len())]
    }

    /// Replace every field present in `patch`, keep the rest
    pub fn apply_patch(&mut self, patch: SessionPatch) {
        if let Some(sus) = patch.sus {
            let mut scores = vec![0; self.roster.len()];
            for (name, value) in sus {
                match self.roster.index_of(&name) {
                    Some(i) => scores[i] = value.clamp(0, u32::MAX as i64) as u32,
                    None => log::warn!("Ignoring score for unknown player '{}'", name),
                }
            }
            self.scores = scores;
        }

        if let Some(bodies) = patch.bodies {
            self.bodies = bodies;
        }

        if let Some(next_id) = patch.next_id {
            self.next_id = next_id;
        }

        // A stale counter would hand out an identifier that is still in the log
        if let Some(max_id) = self.bodies.iter().map(|b| b.id).max() {
            if self.next_id <= max_id {
                log::warn!(
                    "next_id {} would reuse report #{}, advancing to {}",
                    self.next_id,
                    max_id,
                    max_id.saturating_add(1)
                );
                self.next_id = max_id.saturating_add(1);
            }
        }

        self.events.push(SessionEvent::SnapshotLoaded);
    }

    /// Take the pending change notifications, oldest first
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// `u32::MAX` is never issued; reaching it marks the counter spent
    fn allocate_id(&mut self) -> Result<u32> {
        let id = self.next_id;
        if id == u32::MAX {
            log::warn!("Report identifiers exhausted");
            return Err(NotebookError::IdsExhausted);
        }
        self.next_id = id + 1;
        Ok(id)
    }
}
