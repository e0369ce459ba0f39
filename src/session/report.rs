//! Body report records

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Wall-clock format stamped on new reports
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// One recorded body. Immutable once created; only removal is allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyReport {
    /// Never reused, even after deletion
    pub id: u32,
    pub victim: String,
    pub location: String,
    /// Players seen near the body, in entry order (duplicates allowed)
    #[serde(default)]
    pub nearby: Vec<String>,
    #[serde(default)]
    pub notes: String,
    /// `HH:MM:SS` at creation
    #[serde(default)]
    pub time: String,
}

impl BodyReport {
    pub fn new(
        id: u32,
        victim: impl Into<String>,
        location: impl Into<String>,
        nearby: Vec<String>,
        notes: impl Into<String>,
        time: NaiveTime,
    ) -> Self {
        Self {
            id,
            victim: victim.into(),
            location: location.into(),
            nearby,
            notes: notes.into(),
            time: time.format(TIME_FORMAT).to_string(),
        }
    }

    /// `#id victim — time`
    pub fn headline(&self) -> String {
        format!("#{} {} — {}", self.id, self.victim, self.time)
    }

    /// Comma-joined nearby players, or `None`
    pub fn nearby_text(&self) -> String {
        if self.nearby.is_empty() {
            "None".to_string()
        } else {
            self.nearby.join(", ")
        }
    }
}
