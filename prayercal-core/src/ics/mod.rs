//! ICS file generation and export.
//!
//! This module handles writing .ics files according to RFC 5545.

mod export;
mod generate;

pub use export::{ExportFile, ExportOptions, build_exports, sanitize_filename};
pub use generate::{IcsEntry, format_duration, generate_calendar};
