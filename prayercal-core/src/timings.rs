//! Parsing of Aladhan prayer-time API responses into a [`PrayerSchedule`].
//!
//! Both the `calendar/from/{start}/to/{end}` response (a flat list of days)
//! and the yearly calendar response (days grouped by month number) are
//! accepted.

use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use crate::error::{PrayerCalError, PrayerCalResult};
use crate::prayer::Prayer;
use crate::schedule::{PrayerInstant, PrayerSchedule};
use crate::settings::PrayerSettings;

#[derive(Debug, Deserialize)]
pub struct AladhanResponse {
    pub code: Option<u16>,
    pub status: Option<String>,
    pub data: AladhanData,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AladhanData {
    Days(Vec<AladhanDay>),
    Months(BTreeMap<String, Vec<AladhanDay>>),
    /// Error responses carry a message string in `data`
    Message(String),
}

#[derive(Debug, Default, Deserialize)]
pub struct AladhanDay {
    #[serde(default)]
    pub timings: Option<HashMap<String, String>>,
    #[serde(default)]
    pub date: Option<AladhanDate>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AladhanDate {
    /// e.g. "01 Jan 2024"
    pub readable: Option<String>,
    pub gregorian: Option<AladhanGregorian>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AladhanGregorian {
    /// e.g. "01-01-2024"
    pub date: Option<String>,
}

/// Parse a raw Aladhan JSON document.
pub fn parse_timings(json: &str, settings: &PrayerSettings) -> PrayerCalResult<PrayerSchedule> {
    let response: AladhanResponse = serde_json::from_str(json)
        .map_err(|e| PrayerCalError::InvalidTimings(e.to_string()))?;
    schedule_from_response(response, settings)
}

/// Turn a decoded response into prayer instants, honoring enabled flags and durations.
pub fn schedule_from_response(
    response: AladhanResponse,
    settings: &PrayerSettings,
) -> PrayerCalResult<PrayerSchedule> {
    if let Some(code) = response.code
        && code != 200
    {
        let detail = match response.data {
            AladhanData::Message(msg) => msg,
            _ => response.status.unwrap_or_default(),
        };
        return Err(PrayerCalError::Api(format!("HTTP {}: {}", code, detail)));
    }

    let days: Vec<AladhanDay> = match response.data {
        AladhanData::Days(days) => days,
        AladhanData::Months(months) => months.into_values().flatten().collect(),
        AladhanData::Message(msg) => return Err(PrayerCalError::InvalidTimings(msg)),
    };

    let mut schedule = PrayerSchedule::new();

    for day in days {
        let (Some(timings), Some(date)) = (day.timings, day.date.as_ref().and_then(day_date)) else {
            tracing::warn!("skipping day with missing timings or date");
            continue;
        };

        for (key, time_str) in &timings {
            let Some(prayer) = Prayer::from_timing_key(key) else {
                continue;
            };
            if !settings.is_enabled(prayer) {
                continue;
            }
            let Some(time) = parse_clock(time_str) else {
                tracing::debug!(%prayer, %date, value = %time_str, "unparseable prayer time");
                continue;
            };

            schedule.insert(PrayerInstant::new(
                prayer,
                date.and_time(time),
                settings.duration_minutes(prayer),
            ));
        }
    }

    tracing::info!(days = schedule.day_count(), "parsed prayer schedule");
    Ok(schedule)
}

fn day_date(date: &AladhanDate) -> Option<NaiveDate> {
    if let Some(ref readable) = date.readable
        && let Ok(d) = NaiveDate::parse_from_str(readable.trim(), "%d %b %Y")
    {
        return Some(d);
    }
    let gregorian = date.gregorian.as_ref()?.date.as_ref()?;
    NaiveDate::parse_from_str(gregorian.trim(), "%d-%m-%Y").ok()
}

/// Read the leading `H:MM` / `HH:MM` of a timing value such as `"05:12 (CET)"`.
fn parse_clock(s: &str) -> Option<NaiveTime> {
    let s = s.trim_start();
    let (hours, rest) = s.split_once(':')?;
    if hours.is_empty() || hours.len() > 2 || !hours.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let minutes = rest.get(..2)?;
    if !minutes.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveTime::from_hms_opt(hours.parse().ok()?, minutes.parse().ok()?, 0)
}
