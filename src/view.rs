//! Render helpers
//!
//! Pure functions turning session state into display values. A front end
//! calls these after draining [`SessionEvent`](crate::session::SessionEvent)s;
//! nothing here touches the model mutably.

use crate::appearance::Appearance;
use crate::color::{self, Rgb, TextShade};
use crate::session::{BodyReport, Leaderboard, SessionModel};

/// A log entry card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogCard {
    pub id: u32,
    pub header: String,
    pub header_color: Rgb,
    /// Location / nearby line, then the notes line
    pub details: String,
}

impl LogCard {
    pub fn from_report(model: &SessionModel, report: &BodyReport) -> Self {
        Self {
            id: report.id,
            header: report.headline(),
            header_color: model.roster().color_of(&report.victim).unwrap_or(Rgb::WHITE),
            details: format!(
                "Location: {}  |  Nearby: {}\nNotes: {}",
                report.location,
                report.nearby_text(),
                report.notes
            ),
        }
    }
}

/// Every report as a card, newest first
pub fn log_cards(model: &SessionModel) -> Vec<LogCard> {
    model
        .bodies()
        .iter()
        .map(|report| LogCard::from_report(model, report))
        .collect()
}

/// A leaderboard line ready to draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRow {
    pub name: String,
    /// Swatch colour
    pub color: Rgb,
    /// Readable text on the swatch
    pub swatch_text: TextShade,
    pub score: u32,
}

pub fn score_rows(board: &Leaderboard) -> Vec<ScoreRow> {
    board
        .iter()
        .map(|row| ScoreRow {
            name: row.name.clone(),
            color: row.color,
            swatch_text: color::readable_text_color(row.color),
            score: row.score,
        })
        .collect()
}

/// Label under the player picker
pub fn selection_label(model: &SessionModel, selected: Option<&str>) -> (String, Rgb) {
    match selected {
        Some(name) => (
            format!("Selected: {}", name),
            model.roster().color_of(name).unwrap_or(Rgb::BLACK),
        ),
        None => ("No player selected".to_string(), Rgb::WHITE),
    }
}

/// Button face and label colours that follow the selected player
pub fn accent_colors(color: Rgb) -> (Rgb, Rgb) {
    (color, color::readable_text_color(color).rgb())
}

/// Plain-text leaderboard table
pub fn format_leaderboard(board: &Leaderboard) -> String {
    let mut out = String::from("Player     SUS\n");
    for row in board.iter() {
        out.push_str(&format!("{:<10} {:>3}\n", row.name, row.score));
    }
    out
}

/// Plain-text log, one card per block
pub fn format_log(cards: &[LogCard]) -> String {
    if cards.is_empty() {
        return "No bodies recorded.\n".to_string();
    }
    cards
        .iter()
        .map(|card| format!("{}\n{}\n", card.header, card.details))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One-line summary of the appearance settings
pub fn describe_appearance(appearance: &Appearance) -> String {
    let custom = if appearance.is_known_font() { "" } else { " (custom)" };
    format!(
        "bg {} | font {}{} {}pt (title {}pt, header {}pt) | text {} @ {} (preview {})",
        appearance.bg_color,
        appearance.font_family,
        custom,
        appearance.base_font_size,
        appearance.title_font_size(),
        appearance.header_font_size(),
        appearance.text_color,
        appearance.font_alpha,
        appearance.text_preview()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn model() -> SessionModel {
        let mut model = SessionModel::default();
        let t = NaiveTime::from_hms_opt(8, 30, 0).unwrap();
        model
            .add_body_at("Yellow", "Lower Engine", vec!["Black".into()], "self report?", t)
            .unwrap();
        model
    }

    #[test]
    fn test_log_card() {
        let model = model();
        let cards = log_cards(&model);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].header, "#1 Yellow — 08:30:00");
        assert_eq!(cards[0].header_color, Rgb::new(0xff, 0xcc, 0x00));
        assert_eq!(
            cards[0].details,
            "Location: Lower Engine  |  Nearby: Black\nNotes: self report?"
        );
    }

    #[test]
    fn test_score_rows_pick_readable_text() {
        let model = model();
        let rows = score_rows(&model.leaderboard());
        assert_eq!(rows[0].name, "Black");
        assert_eq!(rows[0].score, 1);
        assert_eq!(rows[0].swatch_text, TextShade::White);
        let white = rows.iter().find(|r| r.name == "White").unwrap();
        assert_eq!(white.swatch_text, TextShade::Black);
    }

    #[test]
    fn test_selection_label() {
        let model = model();
        assert_eq!(
            selection_label(&model, None),
            ("No player selected".to_string(), Rgb::WHITE)
        );
        let (text, color) = selection_label(&model, Some("Cyan"));
        assert_eq!(text, "Selected: Cyan");
        assert_eq!(color, Rgb::new(0, 255, 255));
        assert_eq!(accent_colors(color), (color, Rgb::BLACK));
    }

    #[test]
    fn test_format_leaderboard_rows() {
        let model = model();
        let text = format_leaderboard(&model.leaderboard());
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Player     SUS"));
        assert_eq!(lines.next(), Some("Black        1"));
        assert_eq!(text.lines().count(), 19);
    }

    #[test]
    fn test_describe_appearance() {
        let mut look = Appearance::default();
        assert_eq!(
            describe_appearance(&look),
            "bg #ffffff | font Arial 12pt (title 18pt, header 14pt) | text #ffffff @ 255 (preview #ffffff)"
        );
        look.font_family = "Papyrus".into();
        assert!(describe_appearance(&look).contains("font Papyrus (custom) 12pt"));
    }

    #[test]
    fn test_format_empty_log() {
        assert_eq!(format_log(&[]), "No bodies recorded.\n");
    }
}
