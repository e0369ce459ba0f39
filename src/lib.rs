//! Sus Notebook - body reports and suspicion tracking for social deduction games
//!
//! Core modules:
//! - `session`: Authoritative state (roster scores, body reports, change events)
//! - `persistence`: Session file and notebook save/load
//! - `roster`: Fixed player → colour table
//! - `appearance`: User-adjustable look, persisted with the session
//! - `color`: Luminance, readable text colour, alpha blend
//! - `overlay`: Read-only recent-bodies feed on a refresh timer
//! - `view`: Pure render helpers
//! - `app` / `console`: Presentation controller and the text front end

pub mod app;
pub mod appearance;
pub mod color;
pub mod console;
pub mod error;
pub mod overlay;
pub mod persistence;
pub mod roster;
pub mod session;
pub mod view;

pub use app::NotebookApp;
pub use appearance::Appearance;
pub use color::Rgb;
pub use error::{NotebookError, Result};
pub use persistence::PersistenceGateway;
pub use roster::Roster;
pub use session::{BodyReport, SessionEvent, SessionModel};

/// Notebook configuration constants
pub mod consts {
    /// Notes file, relative to the working directory
    pub const DEFAULT_NOTEBOOK_PATH: &str = "notebook.txt";

    /// Overlay slots (newest bodies shown)
    pub const OVERLAY_TOP_N: usize = 5;
    /// Overlay re-read period in seconds
    pub const OVERLAY_REFRESH_SECS: f32 = 1.0;

    /// Settings form font size bounds
    pub const FONT_SIZE_MIN: u32 = 6;
    pub const FONT_SIZE_MAX: u32 = 40;
    /// Smallest size the font chooser offers
    pub const FONT_CHOOSER_MIN_SIZE: u32 = 8;

    /// Backgrounds brighter than this get black text
    pub const LUMINANCE_THRESHOLD: f64 = 160.0;
}
