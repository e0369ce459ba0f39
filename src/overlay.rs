//! Recent-bodies overlay
//!
//! A small always-on-top view refreshed on a fixed period. It only ever sees
//! `&SessionModel`, so it can never mutate the session.

use crate::color::Rgb;
use crate::consts::{OVERLAY_REFRESH_SECS, OVERLAY_TOP_N};
use crate::session::{BodyReport, SessionModel};

/// Fixed-period refresh clock driven by frame/tick deltas
#[derive(Debug, Clone)]
pub struct RefreshTimer {
    period: f32,
    accumulator: f32,
}

impl Default for RefreshTimer {
    fn default() -> Self {
        Self::new(OVERLAY_REFRESH_SECS)
    }
}

impl RefreshTimer {
    pub fn new(period: f32) -> Self {
        Self {
            period: period.max(f32::EPSILON),
            accumulator: 0.0,
        }
    }

    /// Advance by `dt` seconds; true when a refresh is due.
    ///
    /// Missed periods are not replayed: re-reading the list once is enough.
    pub fn advance(&mut self, dt: f32) -> bool {
        if dt.is_nan() {
            return false;
        }
        self.accumulator += dt.max(0.0);
        if self.accumulator < self.period {
            return false;
        }
        self.accumulator = if self.accumulator.is_finite() {
            self.accumulator % self.period
        } else {
            0.0
        };
        true
    }
}

/// One overlay slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayLine {
    Empty,
    Body {
        /// `#id victim — time`
        headline: String,
        victim_color: Rgb,
        /// `Location: L  |  Nearby: a, b`
        details: String,
    },
}

impl OverlayLine {
    /// Filled slot for one report
    pub fn for_report(model: &SessionModel, body: &BodyReport) -> Self {
        OverlayLine::Body {
            headline: body.headline(),
            victim_color: model.roster().color_of(&body.victim).unwrap_or(Rgb::BLACK),
            details: format!(
                "Location: {}  |  Nearby: {}",
                body.location,
                body.nearby_text()
            ),
        }
    }
}

/// Read-only projection of the newest reports
#[derive(Debug, Clone)]
pub struct OverlayFeed {
    top_n: usize,
}

impl Default for OverlayFeed {
    fn default() -> Self {
        Self::new(OVERLAY_TOP_N)
    }
}

impl OverlayFeed {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Always `top_n` slots; unused ones are `Empty`
    pub fn lines(&self, model: &SessionModel) -> Vec<OverlayLine> {
        let recent = model.recent_bodies(self.top_n);
        let mut lines: Vec<OverlayLine> = recent
            .iter()
            .map(|body| OverlayLine::for_report(model, body))
            .collect();
        lines.resize(self.top_n, OverlayLine::Empty);
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_timer_fires_once_per_period() {
        let mut timer = RefreshTimer::new(1.0);
        assert!(!timer.advance(0.25));
        assert!(!timer.advance(0.5));
        assert!(timer.advance(0.5));
        // 0.25 carried over
        assert!(!timer.advance(0.5));
        assert!(timer.advance(0.25));
    }

    #[test]
    fn test_timer_drops_backlog() {
        let mut timer = RefreshTimer::new(1.0);
        assert!(timer.advance(3.5));
        assert!(!timer.advance(0.25));
        assert!(timer.advance(0.25));
    }

    #[test]
    fn test_timer_survives_non_finite_deltas() {
        let mut timer = RefreshTimer::new(1.0);
        assert!(timer.advance(f32::INFINITY));
        assert!(!timer.advance(0.5));
        assert!(!timer.advance(f32::NAN));
        assert!(timer.advance(0.5));
        assert!(!timer.advance(0.25));
    }

    #[test]
    fn test_feed_pads_to_top_n() {
        let model = SessionModel::default();
        let lines = OverlayFeed::default().lines(&model);
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|l| *l == OverlayLine::Empty));
    }

    #[test]
    fn test_feed_newest_first() {
        let mut model = SessionModel::default();
        let t = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        model
            .add_body_at("Purple", "Shields", vec!["Rose".into()], "", t)
            .unwrap();
        model.add_body_at("Nobody", "Weapons", Vec::new(), "", t).unwrap();

        let lines = OverlayFeed::new(3).lines(&model);
        assert_eq!(
            lines[0],
            OverlayLine::Body {
                headline: "#2 Nobody — 10:00:00".into(),
                victim_color: Rgb::BLACK,
                details: "Location: Weapons  |  Nearby: None".into(),
            }
        );
        assert_eq!(
            lines[1],
            OverlayLine::Body {
                headline: "#1 Purple — 10:00:00".into(),
                victim_color: Rgb::new(0xaf, 0x52, 0xde),
                details: "Location: Shields  |  Nearby: Rose".into(),
            }
        );
        assert_eq!(lines[2], OverlayLine::Empty);
    }
}
