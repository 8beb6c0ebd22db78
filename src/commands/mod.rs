pub mod config;
pub mod events;
pub mod export;
pub mod fetch;
pub mod group;
pub mod import;
pub mod resolve;
pub mod template;

use anyhow::{Context, Result};
use chrono::NaiveDate;

/// Parse a `YYYY-MM-DD` command-line date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", input))
}
