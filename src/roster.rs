//! Player roster
//!
//! The fixed name → display colour table. Built once at startup and never
//! changed afterwards; its order is the leaderboard tie-break.

use crate::color::Rgb;

/// One roster slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub name: String,
    pub color: Rgb,
}

/// Immutable, ordered player table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

/// The standard 18-colour crew
const CREW: [(&str, Rgb); 18] = [
    ("Red", Rgb::new(0xff, 0x3b, 0x30)),
    ("Blue", Rgb::new(0x00, 0x7a, 0xff)),
    ("Green", Rgb::new(0x34, 0xc7, 0x59)),
    ("Yellow", Rgb::new(0xff, 0xcc, 0x00)),
    ("Pink", Rgb::new(0xff, 0x69, 0xb4)),
    ("Black", Rgb::new(0x1c, 0x1c, 0x1e)),
    ("White", Rgb::new(0xf2, 0xf2, 0xf2)),
    ("Cyan", Rgb::new(0x00, 0xff, 0xff)),
    ("Orange", Rgb::new(0xff, 0x95, 0x00)),
    ("Purple", Rgb::new(0xaf, 0x52, 0xde)),
    ("Brown", Rgb::new(0xa0, 0x52, 0x2d)),
    ("Lime", Rgb::new(0xa8, 0xe7, 0x2e)),
    ("Maroon", Rgb::new(0x80, 0x00, 0x00)),
    ("Rose", Rgb::new(0xff, 0xb6, 0xc1)),
    ("Banana", Rgb::new(0xfc, 0xe5, 0x70)),
    ("Gray", Rgb::new(0x80, 0x80, 0x80)),
    ("Tan", Rgb::new(0xd2, 0xb4, 0x8c)),
    ("Coral", Rgb::new(0xff, 0x7f, 0x50)),
];

impl Roster {
    /// Build a roster from `(name, colour)` pairs.
    ///
    /// Later duplicates of a name are dropped so lookups stay unambiguous.
    pub fn new<I, S>(players: I) -> Self
    where
        I: IntoIterator<Item = (S, Rgb)>,
        S: Into<String>,
    {
        let mut entries: Vec<RosterEntry> = Vec::new();
        for (name, color) in players {
            let name = name.into();
            if entries.iter().any(|e| e.name == name) {
                log::warn!("Duplicate roster name '{}' ignored", name);
                continue;
            }
            entries.push(RosterEntry { name, color });
        }
        Self { entries }
    }

    /// The standard crew colours
    pub fn crew() -> Self {
        Self::new(CREW)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Position of an exact (case-sensitive) name match
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    pub fn color_of(&self, name: &str) -> Option<Rgb> {
        self.index_of(name).map(|i| self.entries[i].color)
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::crew()
    }
}
