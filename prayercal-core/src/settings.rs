//! Per-prayer display settings (color, duration, enabled).

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PRAYER_COLOR, FALLBACK_PRAYER_DURATION_MINUTES};
use crate::prayer::Prayer;

/// How a single prayer is shown on the calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrayerSetting {
    pub color: String,
    /// Minutes the prayer event occupies after its start time
    pub duration: u32,
    pub enabled: bool,
}

/// Partial override for a prayer setting, as written in the config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrayerSettingOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrayerSettings {
    settings: BTreeMap<Prayer, PrayerSetting>,
}

impl Default for PrayerSettings {
    fn default() -> Self {
        let settings = Prayer::ALL
            .into_iter()
            .map(|prayer| {
                let (duration, enabled) = match prayer {
                    Prayer::Fajr
                    | Prayer::Dhuhr
                    | Prayer::Asr
                    | Prayer::Maghrib
                    | Prayer::Isha => (30, true),
                    Prayer::Sunrise => (5, true),
                    Prayer::Firstthird | Prayer::Midnight | Prayer::Lastthird => (5, false),
                };
                let setting = PrayerSetting {
                    color: DEFAULT_PRAYER_COLOR.to_string(),
                    duration,
                    enabled,
                };
                (prayer, setting)
            })
            .collect();

        PrayerSettings { settings }
    }
}

impl PrayerSettings {
    /// Defaults with user overrides merged on top, field by field.
    ///
    /// Override keys are matched against prayer names case-insensitively;
    /// keys that name no known prayer are ignored.
    pub fn with_overrides(overrides: &HashMap<String, PrayerSettingOverride>) -> Self {
        let mut merged = Self::default();

        for (key, over) in overrides {
            let Some(prayer) = Prayer::ALL
                .into_iter()
                .find(|p| p.name().eq_ignore_ascii_case(key))
            else {
                tracing::warn!(key = %key, "ignoring settings for unknown prayer");
                continue;
            };

            let Some(setting) = merged.settings.get_mut(&prayer) else {
                continue;
            };
            if let Some(ref color) = over.color {
                setting.color = color.clone();
            }
            if let Some(duration) = over.duration {
                setting.duration = duration;
            }
            if let Some(enabled) = over.enabled {
                setting.enabled = enabled;
            }
        }

        merged
    }

    pub fn get(&self, prayer: Prayer) -> &PrayerSetting {
        // Every prayer is populated by Default and never removed
        &self.settings[&prayer]
    }

    pub fn is_enabled(&self, prayer: Prayer) -> bool {
        self.get(prayer).enabled
    }

    /// Display duration in minutes; a zero duration falls back to the default.
    pub fn duration_minutes(&self, prayer: Prayer) -> i64 {
        match self.get(prayer).duration {
            0 => FALLBACK_PRAYER_DURATION_MINUTES,
            d => i64::from(d),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Prayer, &PrayerSetting)> {
        self.settings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = PrayerSettings::default();
        assert_eq!(settings.get(Prayer::Fajr).duration, 30);
        assert_eq!(settings.get(Prayer::Sunrise).duration, 5);
        assert!(settings.is_enabled(Prayer::Isha));
        assert!(!settings.is_enabled(Prayer::Midnight));
        assert_eq!(settings.get(Prayer::Asr).color, "#4A6FA5");
    }

    #[test]
    fn test_overrides_merge_field_by_field() {
        let mut overrides = HashMap::new();
        overrides.insert(
            "fajr".to_string(),
            PrayerSettingOverride {
                duration: Some(45),
                ..Default::default()
            },
        );
        overrides.insert(
            "Midnight".to_string(),
            PrayerSettingOverride {
                enabled: Some(true),
                color: Some("#112233".to_string()),
                ..Default::default()
            },
        );

        let settings = PrayerSettings::with_overrides(&overrides);

        let fajr = settings.get(Prayer::Fajr);
        assert_eq!(fajr.duration, 45);
        assert!(fajr.enabled, "untouched fields keep their defaults");
        assert_eq!(fajr.color, "#4A6FA5");

        let midnight = settings.get(Prayer::Midnight);
        assert!(midnight.enabled);
        assert_eq!(midnight.color, "#112233");
        assert_eq!(midnight.duration, 5);
    }

    #[test]
    fn test_unknown_override_key_is_ignored() {
        let mut overrides = HashMap::new();
        overrides.insert("Imsak".to_string(), PrayerSettingOverride::default());
        assert_eq!(PrayerSettings::with_overrides(&overrides), PrayerSettings::default());
    }

    #[test]
    fn test_zero_duration_falls_back() {
        let mut overrides = HashMap::new();
        overrides.insert(
            "Dhuhr".to_string(),
            PrayerSettingOverride {
                duration: Some(0),
                ..Default::default()
            },
        );
        let settings = PrayerSettings::with_overrides(&overrides);
        assert_eq!(settings.duration_minutes(Prayer::Dhuhr), 30);
    }
}
