use anyhow::Result;
use owo_colors::OwoColorize;
use prayercal_core::groups::GroupRegistry;
use prayercal_core::store::Store;

use crate::GroupCommands;
use crate::render::Render;

pub fn run(store: &Store, command: GroupCommands) -> Result<()> {
    let mut groups = store.groups()?;

    match command {
        GroupCommands::Add { name } => {
            let group = groups.add(name.as_deref());
            store.save_groups(&groups)?;
            println!("{} {}", "Added".green(), group.render());
        }
        GroupCommands::List => {
            for group in groups.all() {
                println!("{}", group.render());
            }
        }
        GroupCommands::Color { group, color } => {
            let id = lookup(&groups, &group)?;
            let updated = groups.update_color(&id, &color)?.clone();
            store.save_groups(&groups)?;
            println!("{}", updated.render());
        }
        GroupCommands::Rename { group, name } => {
            let id = lookup(&groups, &group)?;
            let updated = groups.rename(&id, &name)?.clone();
            store.save_groups(&groups)?;
            println!("{}", updated.render());
        }
        GroupCommands::Remove { group } => {
            let id = lookup(&groups, &group)?;
            let removed = groups.delete(&id)?;
            store.save_groups(&groups)?;
            println!("Removed {}", removed.name.bold());
        }
    }

    Ok(())
}

/// Resolve a group id or name to its id.
fn lookup(groups: &GroupRegistry, id_or_name: &str) -> Result<String> {
    match groups.find(id_or_name) {
        Some(group) => Ok(group.id.clone()),
        None => {
            let available: Vec<_> = groups.all().iter().map(|g| g.name.clone()).collect();
            anyhow::bail!(
                "Group '{}' not found. Available: {}",
                id_or_name,
                available.join(", ")
            );
        }
    }
}
