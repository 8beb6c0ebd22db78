//! Prayer-anchored event resolution.
//!
//! Expands every interval template against every day of prayer data. A
//! template yields an event on a day only when both of its anchor prayers
//! have an instant on that day; otherwise the day is skipped silently.
//!
//! Base times:
//! - start: the start anchor's *end*, unless the start offset is a non-zero
//!   subtractive duration, in which case its *start*.
//! - end: the end anchor's *start*, unless the end offset is a non-zero
//!   additive duration, in which case its *end*.
//!
//! So "Fajr +0" begins once Fajr's displayed duration has elapsed, while
//! "Fajr -15" counts back from the moment Fajr begins.

use std::collections::HashSet;

use crate::constants::DEFAULT_EVENT_COLOR;
use crate::event::{ExtendedProps, ResolvedEvent};
use crate::offset::Offset;
use crate::schedule::{PrayerInstant, PrayerSchedule};
use crate::template::UserIntervalEvent;

/// Resolve all templates against all days. Result order is unspecified.
pub fn resolve(schedule: &PrayerSchedule, templates: &[UserIntervalEvent]) -> Vec<ResolvedEvent> {
    let mut events = Vec::new();
    let mut fraction_noted = HashSet::new();

    for template in templates {
        let Some((start_prayer, end_prayer)) = template.anchors() else {
            tracing::debug!(
                template = %template.name,
                start = %template.start,
                end = %template.end,
                "template anchors are not known prayers, skipping"
            );
            continue;
        };

        let start_offset = template.start_offset();
        let end_offset = template.end_offset();

        if (matches!(start_offset, Offset::Fraction { .. })
            || matches!(end_offset, Offset::Fraction { .. }))
            && fraction_noted.insert(template.id.as_str())
        {
            tracing::debug!(template = %template.name, "fraction offsets apply no shift");
        }

        for date in schedule.by_day().keys().copied() {
            let (Some(start_anchor), Some(end_anchor)) = (
                schedule.get(date, start_prayer),
                schedule.get(date, end_prayer),
            ) else {
                tracing::trace!(template = %template.name, %date, "anchor missing, skipping day");
                continue;
            };

            let (Some(start), Some(end)) = (
                start_offset.apply(start_base(start_anchor, &start_offset)),
                end_offset.apply(end_base(end_anchor, &end_offset)),
            ) else {
                tracing::debug!(
                    template = %template.name,
                    %date,
                    "offset out of range, skipping day"
                );
                continue;
            };

            events.push(ResolvedEvent {
                id: format!("{}-{}", template.id, date.format("%Y-%m-%d")),
                title: template.name.clone(),
                start,
                end,
                color: template
                    .group
                    .as_ref()
                    .map(|g| g.color.clone())
                    .unwrap_or_else(|| DEFAULT_EVENT_COLOR.to_string()),
                extended_props: ExtendedProps {
                    is_prayer_interval: true,
                    start_prayer: template.start.clone(),
                    end_prayer: template.end.clone(),
                    date,
                    group: template.group.as_ref().map(|g| g.name.clone()),
                    start_adjustment: template.start_adjustment_type.clone(),
                    start_offset: template.start_offset_value.clone(),
                    end_adjustment: template.end_adjustment_type.clone(),
                    end_offset: template.end_offset_value.clone(),
                },
            });
        }
    }

    tracing::debug!(
        templates = templates.len(),
        days = schedule.day_count(),
        events = events.len(),
        "resolved interval events"
    );
    events
}

fn start_base(anchor: &PrayerInstant, offset: &Offset) -> chrono::NaiveDateTime {
    if offset.is_zero() || !offset.is_subtractive_duration() {
        anchor.end
    } else {
        anchor.start
    }
}

fn end_base(anchor: &PrayerInstant, offset: &Offset) -> chrono::NaiveDateTime {
    if !offset.is_zero() && offset.is_additive_duration() {
        anchor.end
    } else {
        anchor.start
    }
}
