use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use prayercal_core::config::PrayerCalConfig;
use prayercal_core::store::Store;

use crate::utils::tui::color_swatch;

pub fn run(latitude: Option<f64>, longitude: Option<f64>, method: Option<String>) -> Result<()> {
    let config_path = PrayerCalConfig::config_path()?;
    let mut config = PrayerCalConfig::load()?;

    if latitude.is_some() || longitude.is_some() || method.is_some() {
        apply_changes(&mut config, latitude, longitude, method)?;
        config
            .save_to(&config_path)
            .context("Failed to save config")?;
        println!("{} Saved {}\n", "✓".green(), config_path.display());
    }

    let store = Store::open(config.data_path());

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Data:    {}", store.dir().display());

    println!("\n{}", "Location".bold());
    match config.coordinates() {
        Some((lat, lon)) => println!("  {:.4}, {:.4}", lat, lon),
        None => println!("  {}", "not set".dimmed()),
    }
    println!("  Method:  {}", config.method);
    println!("  Fetch:   {} days", config.fetch_days);

    println!("\n{}", "Prayers".bold());
    for (prayer, setting) in config.prayer_settings().iter() {
        let state = if setting.enabled {
            format!("{} min", setting.duration)
        } else {
            "disabled".dimmed().to_string()
        };
        println!(
            "  {} {:<11} {}",
            color_swatch(&setting.color),
            prayer.to_string(),
            state
        );
    }

    Ok(())
}

fn apply_changes(
    config: &mut PrayerCalConfig,
    latitude: Option<f64>,
    longitude: Option<f64>,
    method: Option<String>,
) -> Result<()> {
    if let Some(lat) = latitude {
        if !(-90.0..=90.0).contains(&lat) {
            anyhow::bail!("Invalid latitude {}", lat);
        }
        config.latitude = Some(lat);
    }
    if let Some(lon) = longitude {
        if !(-180.0..=180.0).contains(&lon) {
            anyhow::bail!("Invalid longitude {}", lon);
        }
        config.longitude = Some(lon);
    }
    if let Some(method) = method {
        let method = method.trim();
        if method.is_empty() {
            anyhow::bail!("Method cannot be empty");
        }
        config.method = method.to_string();
    }
    Ok(())
}
