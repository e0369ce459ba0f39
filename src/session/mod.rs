//! Session state and suspicion tracking
//!
//! All mutation goes through [`SessionModel`]; everything else only reads it:
//! - `model`: the authoritative state and its change notifications
//! - `report`: body report records
//! - `leaderboard`: sorted score view

pub mod leaderboard;
pub mod model;
pub mod report;

pub use leaderboard::{Leaderboard, LeaderboardRow};
pub use model::{SessionEvent, SessionModel, SessionPatch};
pub use report::{BodyReport, TIME_FORMAT};
