use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use prayercal_core::config::PrayerCalConfig;
use prayercal_core::store::Store;
use prayercal_core::timings::parse_timings;

pub fn run(config: &PrayerCalConfig, store: &Store, file: &Path) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let schedule = parse_timings(&json, &config.prayer_settings())
        .with_context(|| format!("Failed to parse prayer times from {}", file.display()))?;

    if schedule.is_empty() {
        println!("{}", "No prayer days found".dimmed());
        return Ok(());
    }

    let days = schedule.day_count();
    let range = match (schedule.first_day(), schedule.last_day()) {
        (Some(first), Some(last)) if first != last => format!("{} → {}", first, last),
        (Some(first), _) => first.to_string(),
        _ => String::new(),
    };

    let events = store.merge_schedule(schedule)?;

    println!(
        "{} Imported {} {} {}",
        "✓".green(),
        days,
        if days == 1 { "day" } else { "days" },
        range.dimmed()
    );
    println!("   {} interval events", events.len());

    Ok(())
}
