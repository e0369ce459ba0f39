//! Notebook controller
//!
//! Glue between a front end and the core: owns the caller-side state the
//! session itself does not track (player selection, appearance, the open
//! notebook) and turns raw form input into session operations.

use std::path::{Path, PathBuf};

use crate::appearance::{Appearance, AppearanceWarning};
use crate::color::Rgb;
use crate::consts::DEFAULT_NOTEBOOK_PATH;
use crate::error::Result;
use crate::overlay::{OverlayFeed, OverlayLine, RefreshTimer};
use crate::persistence::{NoteBuffer, PersistenceGateway};
use crate::roster::Roster;
use crate::session::{BodyReport, SessionEvent, SessionModel};

/// Split the comma-separated "nearby" field, dropping blanks
pub fn parse_nearby(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub struct NotebookApp {
    model: SessionModel,
    appearance: Appearance,
    gateway: PersistenceGateway,
    selected: Option<String>,
    notebook: Option<NoteBuffer>,
    notebook_path: PathBuf,
    overlay: OverlayFeed,
    overlay_timer: RefreshTimer,
}

impl Default for NotebookApp {
    fn default() -> Self {
        Self::new(Roster::crew())
    }
}

impl NotebookApp {
    pub fn new(roster: Roster) -> Self {
        Self {
            model: SessionModel::new(roster),
            appearance: Appearance::default(),
            gateway: PersistenceGateway::new(),
            selected: None,
            notebook: None,
            notebook_path: PathBuf::from(DEFAULT_NOTEBOOK_PATH),
            overlay: OverlayFeed::default(),
            overlay_timer: RefreshTimer::default(),
        }
    }

    /// Keep notes somewhere other than `notebook.txt` in the working directory
    pub fn with_notebook_path(mut self, path: impl AsRef<Path>) -> Self {
        self.notebook_path = path.as_ref().to_path_buf();
        self
    }

    pub fn model(&self) -> &SessionModel {
        &self.model
    }

    pub fn appearance(&self) -> &Appearance {
        &self.appearance
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Select a roster player; unknown names leave the selection alone
    pub fn select_player(&mut self, name: &str) -> bool {
        if !self.model.roster().contains(name) {
            return false;
        }
        self.selected = Some(name.to_string());
        true
    }

    /// Colour the player-tinted buttons should use
    pub fn accent_color(&self) -> Option<Rgb> {
        self.selected
            .as_deref()
            .and_then(|name| self.model.roster().color_of(name))
    }

    /// +/- SUS buttons. Does nothing without a selection.
    pub fn change_selected_suspicion(&mut self, delta: i64) -> Option<u32> {
        let player = self.selected.clone()?;
        self.model.change_suspicion(&player, delta)
    }

    /// "Add Body" form: nearby is comma-separated, notes are trimmed
    pub fn submit_body_form(
        &mut self,
        victim: &str,
        location: &str,
        nearby: &str,
        notes: &str,
    ) -> Result<BodyReport> {
        self.model
            .add_body(victim, location, parse_nearby(nearby), notes.trim())
    }

    /// Delete a report (after the user confirmed)
    pub fn delete_body(&mut self, id: u32) -> bool {
        self.model.delete_body(id)
    }

    /// Zero every score (after the user confirmed)
    pub fn reset_suspicion(&mut self) {
        self.model.reset_all_suspicion();
    }

    pub fn apply_settings_form(
        &mut self,
        bg: &str,
        font: &str,
        size: &str,
    ) -> Vec<AppearanceWarning> {
        self.appearance.apply_form(bg, font, size)
    }

    pub fn apply_font_choice(&mut self, family: &str, size: u32, alpha: u8, text_color: Rgb) {
        self.appearance
            .apply_font_choice(family, size, alpha, text_color);
    }

    pub fn set_background(&mut self, color: Rgb) {
        self.appearance.bg_color = color;
    }

    pub fn save_session(&self, path: impl AsRef<Path>) -> Result<()> {
        self.gateway
            .save_snapshot(&self.model, &self.appearance, path)
    }

    /// Merge a session file into the current state.
    ///
    /// On error nothing changes.
    pub fn load_session(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let loaded = self.gateway.load_snapshot(path)?;
        self.model.apply_patch(loaded.session);
        self.appearance.merge(&loaded.settings);
        Ok(())
    }

    /// Open the notebook, loading it from disk. Already open: returns it as is.
    pub fn open_notebook(&mut self) -> Result<&mut NoteBuffer> {
        let notes = match self.notebook.take() {
            Some(notes) => notes,
            None => {
                let notes = NoteBuffer::open(&self.gateway, &self.notebook_path)?;
                log::info!("Notebook opened ({} bytes)", notes.text.len());
                notes
            }
        };
        Ok(self.notebook.insert(notes))
    }

    pub fn notebook(&self) -> Option<&NoteBuffer> {
        self.notebook.as_ref()
    }

    pub fn notebook_mut(&mut self) -> Option<&mut NoteBuffer> {
        self.notebook.as_mut()
    }

    /// Save and close the notebook; false if it was not open.
    ///
    /// A failed save keeps the notebook open so nothing is lost.
    pub fn close_notebook(&mut self) -> Result<bool> {
        let Some(notes) = self.notebook.as_ref() else {
            return Ok(false);
        };
        notes.save(&self.gateway)?;
        self.notebook = None;
        log::info!("Notebook saved to {}", self.notebook_path.display());
        Ok(true)
    }

    pub fn overlay_lines(&self) -> Vec<OverlayLine> {
        self.overlay.lines(&self.model)
    }

    /// Advance the overlay clock; fresh lines when a refresh is due
    pub fn tick_overlay(&mut self, dt: f32) -> Option<Vec<OverlayLine>> {
        self.overlay_timer
            .advance(dt)
            .then(|| self.overlay.lines(&self.model))
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.model.drain_events()
    }
}
