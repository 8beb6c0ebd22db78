//! Splitting events into ICS files.
//!
//! Prayer events all go to one file. Resolved interval events are grouped by
//! their group name, falling back to the event title, one file per group.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::constants::PRAYER_EXPORT_NAME;
use crate::error::PrayerCalResult;
use crate::event::ResolvedEvent;
use crate::ics::generate::{IcsEntry, generate_calendar};
use crate::schedule::PrayerSchedule;

#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Title prayer events with their bilingual Arabic names
    pub arabic: bool,
}

/// One generated calendar file, not yet written.
#[derive(Debug, Clone)]
pub struct ExportFile {
    /// Group (or prayer calendar) name
    pub name: String,
    pub file_name: String,
    pub event_count: usize,
    pub contents: String,
}

impl ExportFile {
    pub fn write_to(&self, dir: &Path) -> PrayerCalResult<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.contents)?;
        Ok(path)
    }
}

/// Build every export file for the given prayer data and resolved events.
/// Calendars with no events produce no file.
pub fn build_exports(
    schedule: &PrayerSchedule,
    events: &[ResolvedEvent],
    options: &ExportOptions,
    generated_at: DateTime<Utc>,
) -> Vec<ExportFile> {
    let mut files = Vec::new();
    let mut used_stems = HashSet::new();

    let prayer_entries: Vec<IcsEntry> = schedule
        .instants()
        .map(|instant| IcsEntry {
            uid: format!("{}-{}", instant.prayer, instant.date().format("%Y-%m-%d")),
            title: if options.arabic {
                instant.prayer.arabic_title()
            } else {
                instant.prayer.to_string()
            },
            start: instant.start,
            end: instant.end,
        })
        .collect();

    if !prayer_entries.is_empty() {
        files.push(export_file(
            PRAYER_EXPORT_NAME,
            &prayer_entries,
            generated_at,
            &mut used_stems,
        ));
    }

    for (name, entries) in group_events(events) {
        files.push(export_file(&name, &entries, generated_at, &mut used_stems));
    }

    tracing::debug!(files = files.len(), "built ICS exports");
    files
}

fn export_file(
    name: &str,
    entries: &[IcsEntry],
    generated_at: DateTime<Utc>,
    used_stems: &mut HashSet<String>,
) -> ExportFile {
    let base = match sanitize_filename(name) {
        s if s.is_empty() => "calendar".to_string(),
        s => s,
    };

    // Distinct names can sanitize to the same stem; number the later ones
    let mut stem = base.clone();
    let mut n = 2;
    while !used_stems.insert(stem.to_lowercase()) {
        stem = format!("{}-{}", base, n);
        n += 1;
    }
    if stem != base {
        tracing::warn!(group = %name, file = %stem, "file name already taken, numbering it");
    }

    ExportFile {
        name: name.to_string(),
        file_name: format!("{}.ics", stem),
        event_count: entries.len(),
        contents: generate_calendar(name, entries, generated_at),
    }
}

/// Group name → entries, ordered by group name.
fn group_events(events: &[ResolvedEvent]) -> BTreeMap<String, Vec<IcsEntry>> {
    let mut groups: BTreeMap<String, Vec<IcsEntry>> = BTreeMap::new();

    for event in events {
        let name = match event.group_name() {
            Some(g) if !g.is_empty() => g.to_string(),
            _ if !event.title.is_empty() => event.title.clone(),
            _ => "ungrouped".to_string(),
        };
        groups.entry(name).or_default().push(IcsEntry {
            uid: event.id.clone(),
            title: event.title.clone(),
            start: event.start,
            end: event.end,
        });
    }

    groups
}

/// Make a group name safe to use as a file name.
///
/// Keeps ASCII letters, digits, Arabic letters and `-_. `; everything else
/// becomes `-`, runs of `-` collapse and leading/trailing `-` are trimmed.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());

    for c in name.chars() {
        let keep = c.is_ascii_alphanumeric()
            || matches!(c, '-' | '_' | '.' | ' ')
            || ('\u{0600}'..='\u{06FF}').contains(&c);
        let c = if keep { c } else { '-' };
        if c == '-' && out.ends_with('-') {
            continue;
        }
        out.push(c);
    }

    out.trim_matches('-').trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ExtendedProps;
    use crate::prayer::Prayer;
    use crate::schedule::PrayerInstant;
    use chrono::{NaiveDate, NaiveDateTime, TimeZone};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn resolved(id: &str, title: &str, group: Option<&str>) -> ResolvedEvent {
        ResolvedEvent {
            id: id.to_string(),
            title: title.to_string(),
            start: at(5, 30),
            end: at(6, 30),
            color: "green".to_string(),
            extended_props: ExtendedProps {
                is_prayer_interval: true,
                start_prayer: "Fajr".to_string(),
                end_prayer: "Sunrise".to_string(),
                date: at(0, 0).date(),
                group: group.map(str::to_string),
                start_adjustment: None,
                start_offset: None,
                end_adjustment: None,
                end_offset: None,
            },
        }
    }

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Training / Gym"), "Training - Gym");
        assert_eq!(sanitize_filename("a:::b"), "a-b");
        assert_eq!(sanitize_filename("**Quran**"), "Quran");
        assert_eq!(sanitize_filename("طلب العلم"), "طلب العلم");
        assert_eq!(sanitize_filename("prayer-events"), "prayer-events");
    }

    #[test]
    fn test_build_exports_groups_by_group_then_title() {
        let mut schedule = PrayerSchedule::new();
        schedule.insert(PrayerInstant::new(Prayer::Fajr, at(5, 0), 30));

        let events = vec![
            resolved("a-2024-01-01", "Workout", Some("Training")),
            resolved("b-2024-01-01", "Stretch", Some("Training")),
            resolved("c-2024-01-01", "Reading", None),
        ];

        let files = build_exports(&schedule, &events, &ExportOptions::default(), stamp());
        let names: Vec<_> = files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, vec!["prayer-events.ics", "Reading.ics", "Training.ics"]);

        let training = files.iter().find(|f| f.name == "Training").unwrap();
        assert_eq!(training.event_count, 2);
    }

    #[test]
    fn test_colliding_file_names_are_numbered() {
        let dir = tempfile::tempdir().unwrap();
        let events = vec![
            resolved("a-2024-01-01", "Workout", Some("A/B")),
            resolved("b-2024-01-01", "Reading", Some("A:B")),
            resolved("c-2024-01-01", "Walk", Some("prayer events")),
            resolved("d-2024-01-01", "Run", Some("prayer-events")),
        ];
        let mut schedule = PrayerSchedule::new();
        schedule.insert(PrayerInstant::new(Prayer::Fajr, at(5, 0), 30));

        let files = build_exports(&schedule, &events, &ExportOptions::default(), stamp());
        let names: Vec<_> = files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "prayer-events.ics",
                "A-B.ics",
                "A-B-2.ics",
                "prayer events.ics",
                "prayer-events-2.ics",
            ]
        );

        for file in &files {
            file.write_to(dir.path()).unwrap();
        }
        let written = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(written, files.len(), "no file overwrites another");
    }

    #[test]
    fn test_arabic_prayer_titles() {
        let mut schedule = PrayerSchedule::new();
        schedule.insert(PrayerInstant::new(Prayer::Fajr, at(5, 0), 30));

        let files = build_exports(&schedule, &[], &ExportOptions { arabic: true }, stamp());
        assert_eq!(files.len(), 1);
        assert!(files[0].contents.contains("الفَجر"), "ICS:\n{}", files[0].contents);
    }

    #[test]
    fn test_nothing_to_export() {
        let files = build_exports(&PrayerSchedule::new(), &[], &ExportOptions::default(), stamp());
        assert!(files.is_empty());
    }

    #[test]
    fn test_write_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let files = build_exports(
            &PrayerSchedule::new(),
            &[resolved("a-2024-01-01", "Workout", None)],
            &ExportOptions::default(),
            stamp(),
        );
        let path = files[0].write_to(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("Workout.ics"));
        assert!(std::fs::read_to_string(path).unwrap().contains("BEGIN:VEVENT"));
    }
}
