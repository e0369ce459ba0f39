//! Session file format
//!
//! Writing is a plain serde projection of the live state. Reading is
//! field-tolerant: every top-level field (and every settings field) is
//! extracted on its own, and anything absent or of the wrong shape is left as
//! `None` so the caller keeps its current value.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::appearance::{Appearance, AppearancePatch};
use crate::color::Rgb;
use crate::consts::{FONT_SIZE_MAX, FONT_SIZE_MIN};
use crate::session::{BodyReport, SessionModel, SessionPatch};

/// Serializable projection of a session plus its appearance settings
#[derive(Debug, serde::Serialize)]
pub struct SessionSnapshot<'a> {
    pub sus: ScoreMap<'a>,
    pub bodies: &'a [BodyReport],
    pub next_id: u32,
    pub settings: &'a Appearance,
}

impl<'a> SessionSnapshot<'a> {
    pub fn capture(model: &'a SessionModel, appearance: &'a Appearance) -> Self {
        Self {
            sus: ScoreMap(model),
            bodies: model.bodies(),
            next_id: model.next_id(),
            settings: appearance,
        }
    }

    /// Two-space indented JSON, non-ASCII left as UTF-8
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Scores written as a JSON object in roster order
#[derive(Debug)]
pub struct ScoreMap<'a>(&'a SessionModel);

impl Serialize for ScoreMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.roster().len()))?;
        for (name, score) in self.0.scores() {
            map.serialize_entry(name, &score)?;
        }
        map.end()
    }
}

/// Whatever could be recovered from a session file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedSnapshot {
    pub session: SessionPatch,
    pub settings: AppearancePatch,
}

impl LoadedSnapshot {
    /// Parse session JSON.
    ///
    /// Only invalid JSON or a non-object document is an error; individual
    /// fields that do not fit are skipped with a warning.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        let Value::Object(root) = value else {
            return Err(serde::de::Error::custom(
                "session file must contain a JSON object",
            ));
        };
        Ok(Self::from_object(&root))
    }

    fn from_object(root: &Map<String, Value>) -> Self {
        let session = SessionPatch {
            sus: field(root, "sus", extract_scores),
            bodies: field(root, "bodies", extract_bodies),
            next_id: field(root, "next_id", |v| {
                as_integer(v)
                    .and_then(|n| u32::try_from(n).ok())
                    .filter(|&n| (1..u32::MAX).contains(&n))
            }),
        };

        let settings = match root.get("settings") {
            Some(Value::Object(settings)) => extract_settings(settings),
            Some(_) => {
                log::warn!("Skipping 'settings': expected an object");
                AppearancePatch::default()
            }
            None => AppearancePatch::default(),
        };

        Self { session, settings }
    }
}

/// Look up `key` and run `extract`, warning when it is present but unusable
fn field<T>(
    obj: &Map<String, Value>,
    key: &str,
    extract: impl FnOnce(&Value) -> Option<T>,
) -> Option<T> {
    let value = obj.get(key)?;
    let extracted = extract(value);
    if extracted.is_none() {
        log::warn!("Skipping '{}': unexpected value {}", key, value);
    }
    extracted
}

/// Integers, integral-looking floats (truncated) and numeric strings
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|u| i64::try_from(u).unwrap_or(i64::MAX)))
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn extract_scores(value: &Value) -> Option<Vec<(String, i64)>> {
    value
        .as_object()?
        .iter()
        .map(|(name, v)| as_integer(v).map(|score| (name.clone(), score)))
        .collect()
}

fn extract_bodies(value: &Value) -> Option<Vec<BodyReport>> {
    if !value.is_array() {
        return None;
    }
    match serde_json::from_value(value.clone()) {
        Ok(bodies) => Some(bodies),
        Err(e) => {
            log::warn!("Malformed body report list: {}", e);
            None
        }
    }
}

fn extract_settings(settings: &Map<String, Value>) -> AppearancePatch {
    let color = |v: &Value| v.as_str().and_then(Rgb::parse);
    AppearancePatch {
        bg_color: field(settings, "bg_color", color),
        font_family: field(settings, "font_family", |v| {
            v.as_str().filter(|s| !s.trim().is_empty()).map(str::to_string)
        }),
        base_font_size: field(settings, "base_font_size", |v| {
            as_integer(v).map(|n| n.clamp(FONT_SIZE_MIN as i64, FONT_SIZE_MAX as i64) as u32)
        }),
        text_color: field(settings, "text_color", color),
        font_alpha: field(settings, "font_alpha", |v| {
            as_integer(v).and_then(|n| u8::try_from(n).ok())
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn model_with_bodies() -> SessionModel {
        let mut model = SessionModel::default();
        let t = NaiveTime::from_hms_opt(20, 15, 0).unwrap();
        model
            .add_body_at("Red", "Cafeteria", vec!["Blue".into(), "Ghost".into()], "", t)
            .unwrap();
        model
            .add_body_at("Lime", "Électrique", Vec::new(), "saw vent", t)
            .unwrap();
        model
    }

    #[test]
    fn test_snapshot_layout() {
        let model = model_with_bodies();
        let appearance = Appearance::default();
        let json = SessionSnapshot::capture(&model, &appearance)
            .to_json_pretty()
            .unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["sus"]["Blue"], 1);
        assert_eq!(value["sus"].as_object().unwrap().len(), 18);
        assert_eq!(value["bodies"][0]["victim"], "Lime");
        assert_eq!(value["bodies"][1]["nearby"][1], "Ghost");
        assert_eq!(value["next_id"], 3);
        assert_eq!(value["settings"]["bg_color"], "#ffffff");
        assert_eq!(value["settings"]["font_alpha"], 255);
        // Non-ASCII is written as-is and indentation is two spaces
        assert!(json.contains("Électrique"));
        assert!(json.contains("\n  \"sus\""));
    }

    #[test]
    fn test_scores_written_in_roster_order() {
        let model = SessionModel::default();
        let appearance = Appearance::default();
        let json = SessionSnapshot::capture(&model, &appearance)
            .to_json_pretty()
            .unwrap();
        let red = json.find("\"Red\"").unwrap();
        let blue = json.find("\"Blue\"").unwrap();
        let coral = json.find("\"Coral\"").unwrap();
        assert!(red < blue && blue < coral);
    }

    #[test]
    fn test_parse_full_document() {
        let model = model_with_bodies();
        let appearance = Appearance::default();
        let json = SessionSnapshot::capture(&model, &appearance)
            .to_json_pretty()
            .unwrap();
        let loaded = LoadedSnapshot::from_json(&json).unwrap();

        assert_eq!(loaded.session.bodies.as_deref(), Some(model.bodies()));
        assert_eq!(loaded.session.next_id, Some(3));
        assert_eq!(loaded.session.sus.as_ref().map(|s| s.len()), Some(18));
        assert_eq!(loaded.settings.font_family.as_deref(), Some("Arial"));
        assert_eq!(loaded.settings.bg_color, Some(Rgb::WHITE));
    }

    #[test]
    fn test_non_object_is_parse_error() {
        assert!(LoadedSnapshot::from_json("[1, 2, 3]").is_err());
        assert!(LoadedSnapshot::from_json("{\"sus\": ").is_err());
    }

    #[test]
    fn test_missing_fields_are_none() {
        let loaded = LoadedSnapshot::from_json("{}").unwrap();
        assert_eq!(loaded, LoadedSnapshot::default());
        assert!(loaded.settings.is_empty());
    }

    #[test]
    fn test_wrong_shapes_skipped_individually() {
        let json = r##"{
            "sus": ["Red", 3],
            "bodies": {"id": 1},
            "next_id": "7",
            "settings": {
                "bg_color": "blue",
                "font_family": "Georgia",
                "base_font_size": 14,
                "text_color": "#000000",
                "font_alpha": 300
            }
        }"##;
        let loaded = LoadedSnapshot::from_json(json).unwrap();
        assert_eq!(loaded.session.sus, None);
        assert_eq!(loaded.session.bodies, None);
        assert_eq!(loaded.session.next_id, Some(7));
        assert_eq!(loaded.settings.bg_color, None);
        assert_eq!(loaded.settings.font_family.as_deref(), Some("Georgia"));
        assert_eq!(loaded.settings.base_font_size, Some(14));
        assert_eq!(loaded.settings.text_color, Some(Rgb::BLACK));
        assert_eq!(loaded.settings.font_alpha, None);
    }

    #[test]
    fn test_score_values_coerced() {
        let json = r#"{"sus": {"Red": 2, "Blue": "4", "Tan": 3.9}}"#;
        let loaded = LoadedSnapshot::from_json(json).unwrap();
        let mut sus = loaded.session.sus.unwrap();
        sus.sort();
        assert_eq!(
            sus,
            vec![
                ("Blue".to_string(), 4),
                ("Red".to_string(), 2),
                ("Tan".to_string(), 3)
            ]
        );

        let bad = LoadedSnapshot::from_json(r#"{"sus": {"Red": 2, "Blue": null}}"#).unwrap();
        assert_eq!(bad.session.sus, None);
    }

    #[test]
    fn test_malformed_body_rejects_list() {
        let json = r#"{"bodies": [{"id": 1, "victim": "Red", "location": "A"}, {"id": "x"}]}"#;
        let loaded = LoadedSnapshot::from_json(json).unwrap();
        assert_eq!(loaded.session.bodies, None);
    }

    #[test]
    fn test_next_id_out_of_range_skipped() {
        let loaded = LoadedSnapshot::from_json(r#"{"next_id": 4294967295}"#).unwrap();
        assert_eq!(loaded.session.next_id, None);
        let loaded = LoadedSnapshot::from_json(r#"{"next_id": 4294967294}"#).unwrap();
        assert_eq!(loaded.session.next_id, Some(u32::MAX - 1));
    }

    #[test]
    fn test_next_id_must_be_positive() {
        let loaded = LoadedSnapshot::from_json(r#"{"next_id": 0}"#).unwrap();
        assert_eq!(loaded.session.next_id, None);
        let loaded = LoadedSnapshot::from_json(r#"{"next_id": -3}"#).unwrap();
        assert_eq!(loaded.session.next_id, None);
    }
}
