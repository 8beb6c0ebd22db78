//! Dated prayer instants, grouped by local calendar day.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::prayer::Prayer;

/// One prayer's displayed interval on one calendar day.
///
/// Times are local wall-clock times at the schedule's location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerInstant {
    pub prayer: Prayer,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl PrayerInstant {
    pub fn new(prayer: Prayer, start: NaiveDateTime, duration_minutes: i64) -> Self {
        PrayerInstant {
            prayer,
            start,
            end: start + Duration::minutes(duration_minutes.max(0)),
        }
    }

    /// Calendar day this instant belongs to (the day it starts on).
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }
}

/// All known prayer instants, keyed by (date, prayer).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<PrayerInstant>", into = "Vec<PrayerInstant>")]
pub struct PrayerSchedule {
    days: BTreeMap<NaiveDate, BTreeMap<Prayer, PrayerInstant>>,
}

impl PrayerSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an instant, replacing any instant for the same prayer on the same day.
    pub fn insert(&mut self, instant: PrayerInstant) {
        self.days
            .entry(instant.date())
            .or_default()
            .insert(instant.prayer, instant);
    }

    /// Replace every day present in `other` wholesale; days only in `self` are kept.
    pub fn merge(&mut self, other: PrayerSchedule) {
        for (date, prayers) in other.days {
            self.days.insert(date, prayers);
        }
    }

    pub fn by_day(&self) -> &BTreeMap<NaiveDate, BTreeMap<Prayer, PrayerInstant>> {
        &self.days
    }

    pub fn day(&self, date: NaiveDate) -> Option<&BTreeMap<Prayer, PrayerInstant>> {
        self.days.get(&date)
    }

    pub fn get(&self, date: NaiveDate, prayer: Prayer) -> Option<&PrayerInstant> {
        self.days.get(&date)?.get(&prayer)
    }

    /// All instants in chronological day order.
    pub fn instants(&self) -> impl Iterator<Item = &PrayerInstant> {
        self.days.values().flat_map(|prayers| prayers.values())
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        self.days.keys().next().copied()
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        self.days.keys().next_back().copied()
    }
}

impl From<Vec<PrayerInstant>> for PrayerSchedule {
    fn from(instants: Vec<PrayerInstant>) -> Self {
        let mut schedule = PrayerSchedule::new();
        for instant in instants {
            schedule.insert(instant);
        }
        schedule
    }
}

impl From<PrayerSchedule> for Vec<PrayerInstant> {
    fn from(schedule: PrayerSchedule) -> Self {
        schedule
            .days
            .into_values()
            .flat_map(|prayers| prayers.into_values())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_instant_end_is_start_plus_duration() {
        let instant = PrayerInstant::new(Prayer::Fajr, at(2024, 1, 1, 5, 0), 30);
        assert_eq!(instant.end, at(2024, 1, 1, 5, 30));
    }

    #[test]
    fn test_negative_duration_is_clamped() {
        let instant = PrayerInstant::new(Prayer::Fajr, at(2024, 1, 1, 5, 0), -10);
        assert_eq!(instant.end, instant.start);
    }

    #[test]
    fn test_insert_groups_by_start_date() {
        let mut schedule = PrayerSchedule::new();
        schedule.insert(PrayerInstant::new(Prayer::Fajr, at(2024, 1, 1, 5, 0), 30));
        schedule.insert(PrayerInstant::new(Prayer::Fajr, at(2024, 1, 2, 5, 1), 30));
        // Late Midnight instant that ends on the next day still belongs to its start day
        schedule.insert(PrayerInstant::new(Prayer::Midnight, at(2024, 1, 1, 23, 58), 5));

        assert_eq!(schedule.day_count(), 2);
        let jan1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(schedule.day(jan1).unwrap().len(), 2);
        assert!(schedule.get(jan1, Prayer::Midnight).is_some());
    }

    #[test]
    fn test_merge_replaces_overlapping_days_wholesale() {
        let jan1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let jan2 = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        let mut existing = PrayerSchedule::new();
        existing.insert(PrayerInstant::new(Prayer::Fajr, at(2024, 1, 1, 5, 0), 30));
        existing.insert(PrayerInstant::new(Prayer::Isha, at(2024, 1, 1, 19, 0), 30));
        existing.insert(PrayerInstant::new(Prayer::Fajr, at(2024, 1, 2, 5, 0), 30));

        let mut fresh = PrayerSchedule::new();
        fresh.insert(PrayerInstant::new(Prayer::Fajr, at(2024, 1, 1, 5, 10), 30));

        existing.merge(fresh);

        assert_eq!(
            existing.get(jan1, Prayer::Fajr).unwrap().start,
            at(2024, 1, 1, 5, 10)
        );
        assert!(
            existing.get(jan1, Prayer::Isha).is_none(),
            "stale instants on a refreshed day are dropped"
        );
        assert!(existing.get(jan2, Prayer::Fajr).is_some());
    }

    #[test]
    fn test_serializes_as_flat_list() {
        let mut schedule = PrayerSchedule::new();
        schedule.insert(PrayerInstant::new(Prayer::Asr, at(2024, 3, 5, 15, 20), 30));

        let json = serde_json::to_value(&schedule).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["prayer"], "Asr");
        assert_eq!(json[0]["start"], "2024-03-05T15:20:00");

        let back: PrayerSchedule = serde_json::from_value(json).unwrap();
        assert_eq!(back, schedule);
    }
}
