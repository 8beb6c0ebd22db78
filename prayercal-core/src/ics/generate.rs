//! ICS calendar generation.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use icalendar::{Calendar, Component, EventLike};

/// One VEVENT worth of data. Times are floating local times.
#[derive(Debug, Clone, PartialEq)]
pub struct IcsEntry {
    pub uid: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl IcsEntry {
    fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Generate a whole VCALENDAR named `name` holding `entries`, sorted by start.
///
/// Each DESCRIPTION carries the event duration and, when the previous entry
/// has the same title and started the day before, how much longer or shorter
/// this one is.
pub fn generate_calendar(name: &str, entries: &[IcsEntry], generated_at: DateTime<Utc>) -> String {
    let mut sorted: Vec<&IcsEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.start);

    let dtstamp = generated_at.format("%Y%m%dT%H%M%SZ").to_string();
    let mut cal = Calendar::new();

    for (index, entry) in sorted.iter().enumerate() {
        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&format!("{}@prayercal", entry.uid));
        ics_event.summary(&entry.title);
        ics_event.add_property("DTSTAMP", &dtstamp);

        // Floating datetimes (no Z, no TZID): prayer times are wall-clock at the location
        ics_event.add_property("DTSTART", entry.start.format("%Y%m%dT%H%M%S").to_string());
        ics_event.add_property("DTEND", entry.end.format("%Y%m%dT%H%M%S").to_string());

        let previous = index.checked_sub(1).map(|i| sorted[i]);
        let description = describe(entry, previous);
        if !description.is_empty() {
            ics_event.description(&description);
        }

        cal.push(ics_event.done());
    }

    let cal = cal.done();
    normalize_ics(&cal.to_string(), name)
}

fn describe(entry: &IcsEntry, previous: Option<&IcsEntry>) -> String {
    let mut lines = Vec::new();

    let duration = format_duration(entry.duration_minutes());
    if !duration.is_empty() {
        lines.push(duration);
    }

    if let Some(prev) = previous
        && prev.title == entry.title
        && is_previous_day(prev.start.date(), entry.start.date())
    {
        let change = entry.duration_minutes() - prev.duration_minutes();
        if change != 0 {
            let direction = if change > 0 { '+' } else { '-' };
            let unit = if change.abs() == 1 { "min" } else { "mins" };
            lines.push(format!("{}{}{}", direction, change.abs(), unit));
        }
    }

    // Space-separated: keeps DESCRIPTION free of characters that need TEXT escaping
    lines.join(" ")
}

fn is_previous_day(previous: NaiveDate, current: NaiveDate) -> bool {
    previous.succ_opt() == Some(current)
}

/// `1hr`, `2hrs30mins`, `45mins`, `1min`; empty for zero or negative durations.
pub fn format_duration(minutes: i64) -> String {
    if minutes <= 0 {
        return String::new();
    }
    let hours = minutes / 60;
    let mins = minutes % 60;

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{}hr{}", hours, if hours == 1 { "" } else { "s" }));
    }
    if mins > 0 {
        out.push_str(&format!("{}min{}", mins, if mins == 1 { "" } else { "s" }));
    }
    out
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with PRAYERCAL and name the calendar (X-WR-CALNAME)
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn normalize_ics(ics: &str, name: &str) -> String {
    let mut result = String::with_capacity(ics.len() + name.len() + 32);

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:PRAYERCAL\r\n");
            result.push_str(&format!("X-WR-CALNAME:{}\r\n", escape_text(name)));
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

/// RFC 5545 TEXT escaping for values we write by hand
fn escape_text(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
}
