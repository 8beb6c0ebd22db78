//! The fixed set of prayer times that can appear on a calendar.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PrayerCalError;

/// A named daily prayer time, or one of the auxiliary night markers.
///
/// Ordered by when they occur in a day, so a `BTreeMap<Prayer, _>` iterates
/// chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
    Firstthird,
    Midnight,
    Lastthird,
}

impl Prayer {
    pub const ALL: [Prayer; 9] = [
        Prayer::Fajr,
        Prayer::Sunrise,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
        Prayer::Firstthird,
        Prayer::Midnight,
        Prayer::Lastthird,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Prayer::Fajr => "Fajr",
            Prayer::Sunrise => "Sunrise",
            Prayer::Dhuhr => "Dhuhr",
            Prayer::Asr => "Asr",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isha => "Isha",
            Prayer::Firstthird => "Firstthird",
            Prayer::Midnight => "Midnight",
            Prayer::Lastthird => "Lastthird",
        }
    }

    /// Bilingual title used when exporting prayer events in Arabic.
    /// Night markers have no Arabic form and keep their plain name.
    pub fn arabic_title(&self) -> String {
        let arabic = match self {
            Prayer::Fajr => "صَلاة الفَجر",
            Prayer::Sunrise => "الشُّروق",
            Prayer::Dhuhr => "صَلاة الظُّهر",
            Prayer::Asr => "صَلاة العَصر",
            Prayer::Maghrib => "صَلاة المَغرِب",
            Prayer::Isha => "صَلاة العِشاء",
            Prayer::Firstthird | Prayer::Midnight | Prayer::Lastthird => {
                return self.name().to_string();
            }
        };
        format!("{} - {}", self.name(), arabic)
    }

    /// Parse an API timing key such as `"Isha"` or `"Isha (CET)"`.
    pub fn from_timing_key(key: &str) -> Option<Prayer> {
        let clean = key.split('(').next().unwrap_or(key).trim();
        clean.parse().ok()
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Prayer {
    type Err = PrayerCalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Prayer::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| PrayerCalError::UnknownPrayer(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_key_strips_timezone_suffix() {
        assert_eq!(Prayer::from_timing_key("Isha (CET)"), Some(Prayer::Isha));
        assert_eq!(Prayer::from_timing_key("Fajr"), Some(Prayer::Fajr));
    }

    #[test]
    fn test_timing_key_ignores_unsupported_markers() {
        assert_eq!(Prayer::from_timing_key("Imsak"), None);
        assert_eq!(Prayer::from_timing_key("Sunset (CET)"), None);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("fajr".parse::<Prayer>().is_err());
        assert_eq!("Maghrib".parse::<Prayer>().unwrap(), Prayer::Maghrib);
    }

    #[test]
    fn test_arabic_title() {
        assert_eq!(Prayer::Fajr.arabic_title(), "Fajr - صَلاة الفَجر");
        assert_eq!(Prayer::Midnight.arabic_title(), "Midnight");
    }
}
