//! Free-text notebook
//!
//! A single unstructured text buffer, loaded when the notebook opens and
//! written back wholesale when it closes. Not part of the session file.

use std::path::{Path, PathBuf};

use super::PersistenceGateway;
use crate::error::Result;

/// An open notebook and the file it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteBuffer {
    path: PathBuf,
    pub text: String,
}

impl NoteBuffer {
    /// Load the notebook at `path`; a missing file opens an empty buffer
    pub fn open(gateway: &PersistenceGateway, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let text = gateway.load_notes(&path)?;
        Ok(Self { path, text })
    }

    /// An empty buffer that will be written to `path` on close
    pub fn empty(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            text: String::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append_line(&mut self, line: &str) {
        if !self.text.is_empty() && !self.text.ends_with('\n') {
            self.text.push('\n');
        }
        self.text.push_str(line);
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Write the buffer back
    pub fn save(&self, gateway: &PersistenceGateway) -> Result<()> {
        gateway.save_notes(&self.text, &self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = PersistenceGateway::new();
        let notes = NoteBuffer::open(&gateway, dir.path().join("notebook.txt")).unwrap();
        assert!(notes.text.is_empty());
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notebook.txt");
        let gateway = PersistenceGateway::new();

        let mut notes = NoteBuffer::empty(&path);
        notes.append_line("Blue was weird in comms");
        notes.append_line("Lime hard clear");
        notes.save(&gateway).unwrap();

        let reopened = NoteBuffer::open(&gateway, &path).unwrap();
        assert_eq!(reopened.text, "Blue was weird in comms\nLime hard clear");
    }
}
