//! Core types for prayercal.
//!
//! This crate provides everything except the terminal and the network:
//! - `timings` turns Aladhan prayer-time responses into a `PrayerSchedule`
//! - `template` and `groups` describe user-defined interval events
//! - `resolver` expands templates against the schedule into `ResolvedEvent`s
//! - `store` persists all of it; `ics` exports it to calendar files

pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod groups;
pub mod ics;
pub mod offset;
pub mod prayer;
pub mod resolver;
pub mod schedule;
pub mod settings;
pub mod store;
pub mod template;
pub mod timings;

pub use error::{PrayerCalError, PrayerCalResult};
pub use event::{ExtendedProps, ResolvedEvent};
pub use prayer::Prayer;
pub use resolver::resolve;
pub use schedule::{PrayerInstant, PrayerSchedule};
pub use template::UserIntervalEvent;
