//! Appearance settings
//!
//! Persisted inside the session snapshot under `"settings"`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::{self, Rgb};
use crate::consts::{FONT_CHOOSER_MIN_SIZE, FONT_SIZE_MAX, FONT_SIZE_MIN};

/// Font families offered by the font chooser (free text is accepted too)
pub const AVAILABLE_FONTS: [&str; 10] = [
    "Arial",
    "Calibri",
    "Helvetica",
    "Times New Roman",
    "Courier New",
    "Verdana",
    "Trebuchet MS",
    "Georgia",
    "Impact",
    "Comic Sans MS",
];

/// User-adjustable look of the notebook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
    /// Window background
    pub bg_color: Rgb,
    pub font_family: String,
    /// Body text size; headers and details are derived from it
    pub base_font_size: u32,
    /// Body text colour
    pub text_color: Rgb,
    /// Text opacity (0 - 255), preview only
    pub font_alpha: u8,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            bg_color: Rgb::WHITE,
            font_family: "Arial".to_string(),
            base_font_size: 12,
            text_color: Rgb::WHITE,
            font_alpha: 255,
        }
    }
}

/// Settings fields recovered from a session file; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppearancePatch {
    pub bg_color: Option<Rgb>,
    pub font_family: Option<String>,
    pub base_font_size: Option<u32>,
    pub text_color: Option<Rgb>,
    pub font_alpha: Option<u8>,
}

impl AppearancePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Non-fatal problems with a settings form submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppearanceWarning {
    InvalidBackground(String),
    InvalidFontSize(String),
}

impl fmt::Display for AppearanceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppearanceWarning::InvalidBackground(value) => write!(
                f,
                "Invalid background color value '{}'. Use a valid hex like #ffffff.",
                value
            ),
            AppearanceWarning::InvalidFontSize(value) => {
                write!(f, "Font size must be an integer (got '{}').", value)
            }
        }
    }
}

impl Appearance {
    /// Apply the sidebar settings form.
    ///
    /// Empty fields are left alone; bad values produce a warning and the
    /// remaining fields still apply.
    pub fn apply_form(&mut self, bg: &str, font: &str, size: &str) -> Vec<AppearanceWarning> {
        let mut warnings = Vec::new();

        let bg = bg.trim();
        if !bg.is_empty() {
            match Rgb::parse(bg) {
                Some(color) => self.bg_color = color,
                None => warnings.push(AppearanceWarning::InvalidBackground(bg.to_string())),
            }
        }

        let font = font.trim();
        if !font.is_empty() {
            self.font_family = font.to_string();
        }

        let size = size.trim();
        if !size.is_empty() {
            match size.parse::<i64>() {
                Ok(fs) => {
                    self.base_font_size =
                        fs.clamp(FONT_SIZE_MIN as i64, FONT_SIZE_MAX as i64) as u32
                }
                Err(_) => warnings.push(AppearanceWarning::InvalidFontSize(size.to_string())),
            }
        }

        for warning in &warnings {
            log::warn!("{}", warning);
        }
        warnings
    }

    /// Apply the font chooser dialog (family, size, ARGB text colour)
    pub fn apply_font_choice(&mut self, family: &str, size: u32, alpha: u8, text_color: Rgb) {
        self.font_family = family.to_string();
        self.base_font_size = size.clamp(FONT_CHOOSER_MIN_SIZE, FONT_SIZE_MAX);
        self.text_color = text_color;
        self.font_alpha = alpha;
    }

    /// Merge fields recovered from a session file
    pub fn merge(&mut self, patch: &AppearancePatch) {
        if let Some(bg) = patch.bg_color {
            self.bg_color = bg;
        }
        if let Some(family) = &patch.font_family {
            self.font_family = family.clone();
        }
        if let Some(size) = patch.base_font_size {
            self.base_font_size = size;
        }
        if let Some(text) = patch.text_color {
            self.text_color = text;
        }
        if let Some(alpha) = patch.font_alpha {
            self.font_alpha = alpha;
        }
    }

    /// Text colour as it appears at `font_alpha` over the background
    pub fn text_preview(&self) -> Rgb {
        color::blend(self.text_color, self.font_alpha, self.bg_color)
    }

    /// Whether the family is one the font chooser offers
    pub fn is_known_font(&self) -> bool {
        AVAILABLE_FONTS.contains(&self.font_family.as_str())
    }

    pub fn title_font_size(&self) -> u32 {
        (self.base_font_size + 6).max(12)
    }

    pub fn header_font_size(&self) -> u32 {
        (self.base_font_size + 2).max(12)
    }

    /// Secondary lines (overlay details)
    pub fn detail_font_size(&self) -> u32 {
        self.base_font_size.saturating_sub(1).max(9)
    }
}
