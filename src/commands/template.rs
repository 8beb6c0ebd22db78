use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use prayercal_core::prayer::Prayer;
use prayercal_core::store::Store;
use prayercal_core::template::UserIntervalEvent;

use crate::TemplateCommands;
use crate::render::Render;

pub fn run(store: &Store, command: TemplateCommands) -> Result<()> {
    match command {
        TemplateCommands::Add {
            name,
            start,
            end,
            start_offset,
            end_offset,
            group,
        } => add(store, &name, &start, &end, &start_offset, &end_offset, group.as_deref()),
        TemplateCommands::List => list(store),
        TemplateCommands::Remove { id } => {
            let removed = store.remove_template(&id)?;
            println!("Removed {}", removed.name.bold());
            Ok(())
        }
    }
}

fn add(
    store: &Store,
    name: &str,
    start: &str,
    end: &str,
    start_offset: &str,
    end_offset: &str,
    group: Option<&str>,
) -> Result<()> {
    let start: Prayer = start.parse()?;
    let end: Prayer = end.parse()?;

    let mut template = UserIntervalEvent::new(name, start, end);

    let (kind, value) = parse_offset_arg(start_offset).context("Invalid --start-offset")?;
    template.start_adjustment_type = Some(kind);
    template.start_offset_value = Some(value);

    let (kind, value) = parse_offset_arg(end_offset).context("Invalid --end-offset")?;
    template.end_adjustment_type = Some(kind);
    template.end_offset_value = Some(value);

    if let Some(group) = group {
        let groups = store.groups()?;
        let found = groups.find(group).cloned().with_context(|| {
            let available: Vec<_> = groups.all().iter().map(|g| g.name.clone()).collect();
            format!(
                "Group '{}' not found. Available: {}",
                group,
                available.join(", ")
            )
        })?;
        template.group = Some(found);
    }

    println!("{}", template.render());
    let events = store.add_template(template)?;
    println!(
        "\n{} {} interval events",
        "✓".green(),
        events.len()
    );

    Ok(())
}

fn list(store: &Store) -> Result<()> {
    let templates = store.templates()?;

    if templates.is_empty() {
        println!("{}", "No templates".dimmed());
        return Ok(());
    }

    for template in &templates {
        println!("{}", template.render());
    }

    Ok(())
}

/// Turn a command-line offset into the stored adjustment type and value.
///
/// `+30` / `-15` / `45` are minutes (unsigned means `+`); `+1/3` is a fraction
/// stored by its denominator.
fn parse_offset_arg(input: &str) -> Result<(String, String)> {
    let input = input.trim();
    let (sign, rest) = match input.chars().next() {
        Some(c @ ('+' | '-')) => (c, &input[1..]),
        _ => ('+', input),
    };

    if let Some((numerator, denominator)) = rest.split_once('/') {
        if numerator.trim() != "1" {
            anyhow::bail!("fractions must have the form 1/N, got '{}'", input);
        }
        let denominator: u32 = denominator
            .trim()
            .parse()
            .with_context(|| format!("invalid fraction '{}'", input))?;
        if denominator == 0 {
            anyhow::bail!("fraction denominator cannot be zero");
        }
        return Ok((format!("{}fraction", sign), denominator.to_string()));
    }

    let minutes: u32 = rest
        .trim()
        .parse()
        .with_context(|| format!("expected minutes like +30 or -15, got '{}'", input))?;
    Ok((format!("{}duration", sign), minutes.to_string()))
}
