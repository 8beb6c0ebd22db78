use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate};
use owo_colors::OwoColorize;
use prayercal_core::config::PrayerCalConfig;
use prayercal_core::store::Store;
use prayercal_core::timings::parse_timings;

use super::parse_date;
use crate::utils::tui;

const ALADHAN_CALENDAR_URL: &str = "https://api.aladhan.com/v1/calendar";

/// A resolved request for a range of prayer days at one location.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// `None` lets the API choose a method for the location
    pub method: Option<String>,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl FetchRequest {
    /// Combine command-line arguments with config defaults.
    pub fn from_args(
        config: &PrayerCalConfig,
        latitude: Option<f64>,
        longitude: Option<f64>,
        method: Option<String>,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Self> {
        let configured = config.coordinates();
        let (latitude, longitude) = match (
            latitude.or(configured.map(|c| c.0)),
            longitude.or(configured.map(|c| c.1)),
        ) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => anyhow::bail!(
                "No location configured.\n\n\
                Pass one with:\n  \
                prayercal fetch --latitude 36.75 --longitude 3.06\n\n\
                or set latitude and longitude in the config file."
            ),
        };

        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            anyhow::bail!("Invalid coordinates {}, {}", latitude, longitude);
        }

        let method = method.unwrap_or_else(|| config.method.clone());
        let method = if method.eq_ignore_ascii_case("auto") {
            None
        } else {
            Some(method)
        };

        let from = match from {
            Some(s) => parse_date(s)?,
            None => Local::now().date_naive(),
        };
        let to = match to {
            Some(s) => parse_date(s)?,
            None => from + Duration::days(config.fetch_days - 1),
        };

        if to < from {
            anyhow::bail!("--to ({}) is before --from ({})", to, from);
        }

        Ok(FetchRequest {
            latitude,
            longitude,
            method,
            from,
            to,
        })
    }

    pub fn url(&self) -> String {
        let mut url = format!(
            "{}/from/{}/to/{}?latitude={}&longitude={}",
            ALADHAN_CALENDAR_URL,
            self.from.format("%d-%m-%Y"),
            self.to.format("%d-%m-%Y"),
            self.latitude,
            self.longitude
        );
        if let Some(method) = &self.method {
            url.push_str(&format!("&method={}", method));
        }
        url
    }
}

pub async fn run(config: &PrayerCalConfig, store: &Store, request: FetchRequest) -> Result<()> {
    let url = request.url();
    tracing::debug!(%url, "fetching prayer times");

    let spinner = tui::create_spinner(format!(
        "Fetching prayer times {} → {}",
        request.from, request.to
    ));
    let result = fetch_body(&url).await;
    spinner.finish_and_clear();
    let body = result?;

    let schedule = parse_timings(&body, &config.prayer_settings())
        .context("Failed to parse prayer times from Aladhan")?;
    let days = schedule.day_count();

    let events = store.merge_schedule(schedule)?;

    println!(
        "{} {} {} ({:.4}, {:.4})",
        "✓".green(),
        days,
        if days == 1 { "day" } else { "days" },
        request.latitude,
        request.longitude
    );
    println!("   {} interval events", events.len());

    Ok(())
}

async fn fetch_body(url: &str) -> Result<String> {
    let client = reqwest::Client::new();

    let response = client
        .get(url)
        .send()
        .await
        .context("Failed to send request to api.aladhan.com")?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        anyhow::bail!("Aladhan returned {}: {}", status, error_text);
    }

    response
        .text()
        .await
        .context("Failed to read response from api.aladhan.com")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PrayerCalConfig {
        PrayerCalConfig {
            latitude: Some(36.75),
            longitude: Some(3.06),
            ..Default::default()
        }
    }

    #[test]
    fn test_request_uses_config_defaults() {
        let request =
            FetchRequest::from_args(&config(), None, None, None, Some("2024-01-01"), None).unwrap();

        assert_eq!(request.method.as_deref(), Some("3"));
        assert_eq!(request.to, NaiveDate::from_ymd_opt(2024, 1, 30).unwrap());
        assert_eq!(
            request.url(),
            "https://api.aladhan.com/v1/calendar/from/01-01-2024/to/30-01-2024?latitude=36.75&longitude=3.06&method=3"
        );
    }

    #[test]
    fn test_auto_method_is_omitted() {
        let request = FetchRequest::from_args(
            &config(),
            Some(21.42),
            Some(39.82),
            Some("auto".to_string()),
            Some("2024-01-01"),
            Some("2024-01-01"),
        )
        .unwrap();

        assert!(request.method.is_none());
        assert!(!request.url().contains("method="), "url: {}", request.url());
    }

    #[test]
    fn test_missing_location_is_an_error() {
        let result = FetchRequest::from_args(
            &PrayerCalConfig::default(),
            Some(36.75),
            None,
            None,
            None,
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_reversed_range_is_an_error() {
        let result = FetchRequest::from_args(
            &config(),
            None,
            None,
            None,
            Some("2024-02-01"),
            Some("2024-01-01"),
        );
        assert!(result.is_err());
    }
}
