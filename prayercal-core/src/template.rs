//! User-authored interval event templates.

use serde::{Deserialize, Deserializer, Serialize};

use crate::groups::EventGroup;
use crate::offset::Offset;
use crate::prayer::Prayer;

/// A recurring event anchored to two prayers, e.g. "Fajr +30min until Sunrise".
///
/// Stored in the same camelCase shape the event editor produces. Anchor names
/// and offsets stay loosely typed here; [`UserIntervalEvent::anchors`] and the
/// offset accessors convert them at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIntervalEvent {
    pub id: String,
    pub name: String,
    /// Start anchor prayer name
    pub start: String,
    /// End anchor prayer name
    pub end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_adjustment_type: Option<String>,
    #[serde(default, deserialize_with = "string_or_number", skip_serializing_if = "Option::is_none")]
    pub start_offset_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_adjustment_type: Option<String>,
    #[serde(default, deserialize_with = "string_or_number", skip_serializing_if = "Option::is_none")]
    pub end_offset_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<EventGroup>,
}

impl UserIntervalEvent {
    /// New template between two prayers with zero offsets and a fresh id.
    pub fn new(name: &str, start: Prayer, end: Prayer) -> Self {
        UserIntervalEvent {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            start: start.to_string(),
            end: end.to_string(),
            start_adjustment_type: Some("+duration".to_string()),
            start_offset_value: Some("0".to_string()),
            end_adjustment_type: Some("-duration".to_string()),
            end_offset_value: Some("0".to_string()),
            group: None,
        }
    }

    /// Both anchor prayers, or `None` if either name is not a known prayer.
    pub fn anchors(&self) -> Option<(Prayer, Prayer)> {
        Some((self.start.parse().ok()?, self.end.parse().ok()?))
    }

    pub fn start_offset(&self) -> Offset {
        Offset::parse(
            self.start_adjustment_type.as_deref(),
            self.start_offset_value.as_deref(),
        )
    }

    pub fn end_offset(&self) -> Offset {
        Offset::parse(
            self.end_adjustment_type.as_deref(),
            self.end_offset_value.as_deref(),
        )
    }

    /// Human-readable rule, e.g. `Fajr +30min → Sunrise -0min`.
    pub fn describe(&self) -> String {
        format!(
            "{} {} → {} {}",
            self.start,
            self.start_offset(),
            self.end,
            self.end_offset()
        )
    }
}

/// Offsets saved by older editors may be JSON numbers instead of strings.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offset::Sign;

    #[test]
    fn test_deserialize_editor_shape() {
        let json = r##"{
            "id": "1717000000000",
            "name": "Workout",
            "start": "Fajr",
            "end": "Sunrise",
            "startAdjustmentType": "+duration",
            "startOffsetValue": "30",
            "endAdjustmentType": "-duration",
            "endOffsetValue": 0,
            "group": { "id": 1717000000001, "name": "Training", "color": "#00b400" }
        }"##;

        let template: UserIntervalEvent = serde_json::from_str(json).unwrap();
        assert_eq!(template.anchors(), Some((Prayer::Fajr, Prayer::Sunrise)));
        assert_eq!(
            template.start_offset(),
            Offset::Duration { minutes: 30, sign: Sign::Add }
        );
        assert_eq!(template.end_offset_value.as_deref(), Some("0"));
        assert_eq!(template.group.unwrap().name, "Training");
    }

    #[test]
    fn test_missing_offsets_default_to_zero() {
        let json = r#"{ "id": "a", "name": "n", "start": "Dhuhr", "end": "Asr" }"#;
        let template: UserIntervalEvent = serde_json::from_str(json).unwrap();
        assert!(template.start_offset().is_zero());
        assert!(template.end_offset().is_zero());
    }

    #[test]
    fn test_unknown_anchor() {
        let mut template = UserIntervalEvent::new("x", Prayer::Asr, Prayer::Maghrib);
        template.end = "Sunset".to_string();
        assert_eq!(template.anchors(), None);
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let template = UserIntervalEvent::new("Read", Prayer::Maghrib, Prayer::Isha);
        let json = serde_json::to_value(&template).unwrap();
        assert_eq!(json["startAdjustmentType"], "+duration");
        assert_eq!(json["endOffsetValue"], "0");
        assert!(json.get("group").is_none());
    }

    #[test]
    fn test_describe() {
        let mut template = UserIntervalEvent::new("Workout", Prayer::Fajr, Prayer::Sunrise);
        template.start_offset_value = Some("30".to_string());
        assert_eq!(template.describe(), "Fajr +30min → Sunrise -0min");
    }
}
