use anyhow::Result;
use owo_colors::OwoColorize;
use prayercal_core::store::Store;

pub fn run(store: &Store) -> Result<()> {
    let schedule = store.schedule()?;
    if schedule.is_empty() {
        println!(
            "{}",
            "No prayer times stored yet. Run `prayercal fetch` first.".dimmed()
        );
    }

    let events = store.regenerate()?;
    println!(
        "Resolved {} interval {} over {} {}",
        events.len(),
        if events.len() == 1 { "event" } else { "events" },
        schedule.day_count(),
        if schedule.day_count() == 1 { "day" } else { "days" }
    );

    Ok(())
}
