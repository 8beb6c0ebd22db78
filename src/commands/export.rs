use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use prayercal_core::ics::{ExportOptions, build_exports};
use prayercal_core::store::Store;

/// Write every calendar file to `out`. `arabic` is asked for when not given.
pub fn run(store: &Store, out: &Path, arabic: Option<bool>) -> Result<()> {
    let schedule = store.schedule()?;
    let events = store.resolved()?;

    if schedule.is_empty() && events.is_empty() {
        println!("{}", "Nothing to export".dimmed());
        return Ok(());
    }

    let arabic = match arabic {
        Some(a) => a,
        None => Confirm::new()
            .with_prompt("Use Arabic prayer names?")
            .default(false)
            .interact()?,
    };

    let files = build_exports(&schedule, &events, &ExportOptions { arabic }, Utc::now());

    for file in &files {
        let path = file
            .write_to(out)
            .with_context(|| format!("Failed to write {}", file.file_name))?;
        println!(
            "{} {} {}",
            "✓".green(),
            path.display(),
            format!(
                "({} {})",
                file.event_count,
                if file.event_count == 1 { "event" } else { "events" }
            )
            .dimmed()
        );
    }

    println!(
        "\nExported {} {}",
        files.len(),
        if files.len() == 1 { "calendar" } else { "calendars" }
    );

    Ok(())
}
