use anyhow::Result;
use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use owo_colors::OwoColorize;
use prayercal_core::config::PrayerCalConfig;
use prayercal_core::store::Store;

use super::parse_date;
use crate::render::{PrayerLine, Render};

pub fn run(
    config: &PrayerCalConfig,
    store: &Store,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<()> {
    let from = match from {
        Some(s) => parse_date(s)?,
        None => Local::now().date_naive(),
    };
    let to = match to {
        Some(s) => parse_date(s)?,
        None => from + Duration::days(2),
    };

    let schedule = store.schedule()?;
    let resolved = store.resolved()?;
    let settings = config.prayer_settings();

    // (start, is interval, rendered line)
    let mut lines: Vec<(NaiveDateTime, bool, String)> = Vec::new();

    for instant in schedule.instants() {
        let date = instant.date();
        if date >= from && date <= to {
            let line = PrayerLine {
                instant,
                setting: settings.get(instant.prayer),
            };
            lines.push((instant.start, false, line.render()));
        }
    }
    for event in &resolved {
        let date = event.date();
        if date >= from && date <= to {
            lines.push((event.start, true, event.render()));
        }
    }

    if lines.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    // Prayers before interval events starting at the same minute
    lines.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));

    let mut current_date: Option<NaiveDate> = None;

    for (start, _, line) in &lines {
        let date = start.date();
        if current_date != Some(date) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", format_date_label(date).bold());
            current_date = Some(date);
        }
        println!("  {}", line);
    }

    Ok(())
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25")
fn format_date_label(date: NaiveDate) -> String {
    let today = Local::now().date_naive();

    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}
