//! Concrete calendar events produced from templates and prayer data.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A dated event derived from one template on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedEvent {
    /// `<template id>-<YYYY-MM-DD>`
    pub id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub color: String,
    pub extended_props: ExtendedProps,
}

/// Metadata describing where a resolved event came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedProps {
    pub is_prayer_interval: bool,
    pub start_prayer: String,
    pub end_prayer: String,
    pub date: NaiveDate,
    pub group: Option<String>,
    pub start_adjustment: Option<String>,
    pub start_offset: Option<String>,
    pub end_adjustment: Option<String>,
    pub end_offset: Option<String>,
}

impl ResolvedEvent {
    pub fn date(&self) -> NaiveDate {
        self.extended_props.date
    }

    pub fn group_name(&self) -> Option<&str> {
        self.extended_props.group.as_deref()
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_calendar_view_shape() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let event = ResolvedEvent {
            id: "abc-2024-01-01".to_string(),
            title: "Workout".to_string(),
            start: date.and_hms_opt(5, 30, 0).unwrap(),
            end: date.and_hms_opt(6, 30, 0).unwrap(),
            color: "green".to_string(),
            extended_props: ExtendedProps {
                is_prayer_interval: true,
                start_prayer: "Fajr".to_string(),
                end_prayer: "Sunrise".to_string(),
                date,
                group: None,
                start_adjustment: Some("+duration".to_string()),
                start_offset: Some("0".to_string()),
                end_adjustment: Some("-duration".to_string()),
                end_offset: Some("0".to_string()),
            },
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["extendedProps"]["isPrayerInterval"], true);
        assert_eq!(json["extendedProps"]["startPrayer"], "Fajr");
        assert_eq!(json["extendedProps"]["date"], "2024-01-01");
        assert!(json["extendedProps"]["group"].is_null());
        assert_eq!(event.duration_minutes(), 60);
    }
}
