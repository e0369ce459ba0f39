//! Save/load persistence
//!
//! Features:
//! - Session snapshots as pretty JSON
//! - Field-tolerant loading (bad fields keep their current value)
//! - Write to a temp file, then rename over the target
//! - Per-path locking so a save and a load never interleave

pub mod lock;
pub mod notes;
pub mod snapshot;

pub use lock::PathLocks;
pub use notes::NoteBuffer;
pub use snapshot::{LoadedSnapshot, SessionSnapshot};

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use crate::appearance::Appearance;
use crate::error::{NotebookError, Result};
use crate::session::SessionModel;

/// Moves session state and notes between memory and disk.
///
/// Holds no session data of its own, only the lock table.
#[derive(Debug, Default)]
pub struct PersistenceGateway {
    locks: PathLocks,
}

impl PersistenceGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `model` and `appearance` to `path`
    pub fn save_snapshot(
        &self,
        model: &SessionModel,
        appearance: &Appearance,
        path: impl AsRef<Path>,
    ) -> Result<()> {
        let path = path.as_ref();
        let json = SessionSnapshot::capture(model, appearance)
            .to_json_pretty()
            .map_err(|e| encode_error(path, e))?;

        let lock = self.locks.lock_for(path);
        lock::with_lock(&lock, || write_replace(path, json.as_bytes()))?;
        log::info!(
            "Session saved to {} ({} bodies)",
            path.display(),
            model.bodies().len()
        );
        Ok(())
    }

    /// Read a session file.
    ///
    /// Fails only when the file cannot be read or is not a JSON object; the
    /// caller's state is untouched in that case.
    pub fn load_snapshot(&self, path: impl AsRef<Path>) -> Result<LoadedSnapshot> {
        let path = path.as_ref();
        let lock = self.locks.lock_for(path);
        let text = lock::with_lock(&lock, || fs::read_to_string(path))
            .map_err(|e| NotebookError::io(path, e))?;
        let loaded = LoadedSnapshot::from_json(&text).map_err(|e| NotebookError::parse(path, e))?;
        log::info!("Session loaded from {}", path.display());
        Ok(loaded)
    }

    /// Overwrite the notes file with `text`
    pub fn save_notes(&self, text: &str, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let lock = self.locks.lock_for(path);
        lock::with_lock(&lock, || write_replace(path, text.as_bytes()))?;
        log::debug!("Notes saved to {} ({} bytes)", path.display(), text.len());
        Ok(())
    }

    /// Whole notes file, or an empty buffer if it does not exist yet
    pub fn load_notes(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        let lock = self.locks.lock_for(path);
        match lock::with_lock(&lock, || fs::read_to_string(path)) {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No notes at {}, starting empty", path.display());
                Ok(String::new())
            }
            Err(e) => Err(NotebookError::io(path, e)),
        }
    }
}

/// A snapshot that cannot be encoded is a failed write, not a malformed file
fn encode_error(path: &Path, source: serde_json::Error) -> NotebookError {
    NotebookError::io(path, io::Error::other(source))
}

/// Sibling temp file used while writing `path`
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write to a temp file and rename it over `path`, so a failed write leaves
/// the previous contents intact
fn write_replace(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = temp_path(path);
    fs::write(&tmp, bytes).map_err(|e| NotebookError::io(&tmp, e))?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(NotebookError::io(path, e));
    }
    Ok(())
}
