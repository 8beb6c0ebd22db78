//! TUI rendering traits for prayercal types.
//!
//! Extension traits that add colored terminal rendering to prayercal-core
//! types using owo_colors.

use owo_colors::OwoColorize;
use prayercal_core::event::ResolvedEvent;
use prayercal_core::groups::EventGroup;
use prayercal_core::ics::format_duration;
use prayercal_core::schedule::PrayerInstant;
use prayercal_core::settings::PrayerSetting;
use prayercal_core::template::UserIntervalEvent;

use crate::utils::tui::color_swatch;

pub trait Render {
    fn render(&self) -> String;
}

/// A prayer instant drawn with its configured color.
pub struct PrayerLine<'a> {
    pub instant: &'a PrayerInstant,
    pub setting: &'a PrayerSetting,
}

impl Render for PrayerLine<'_> {
    fn render(&self) -> String {
        format!(
            "{:>7} {} {}",
            self.instant.start.format("%H:%M").to_string().dimmed(),
            color_swatch(&self.setting.color),
            self.instant.prayer.bold()
        )
    }
}

impl Render for ResolvedEvent {
    fn render(&self) -> String {
        let span = format!(
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        );
        let mut line = format!(
            "{:>7} {} {} {}",
            self.start.format("%H:%M"),
            color_swatch(&self.color),
            self.title,
            format!("({}, {})", span, format_duration(self.duration_minutes())).dimmed()
        );
        if let Some(group) = self.group_name() {
            line.push_str(&format!(" {}", format!("[{}]", group).dimmed()));
        }
        line
    }
}

impl Render for EventGroup {
    fn render(&self) -> String {
        format!(
            "{} {} {}",
            color_swatch(&self.color),
            self.name.bold(),
            format!("{} {}", self.color, self.id).dimmed()
        )
    }
}

impl Render for UserIntervalEvent {
    fn render(&self) -> String {
        let group = match &self.group {
            Some(g) => format!(" {}", format!("[{}]", g.name).dimmed()),
            None => String::new(),
        };
        format!(
            "{} {}{}\n   {}",
            self.name.bold(),
            self.describe(),
            group,
            self.id.dimmed()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use prayercal_core::prayer::Prayer;

    #[test]
    fn test_prayer_line_uses_configured_color() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(5, 0, 0)
            .unwrap();
        let instant = PrayerInstant::new(Prayer::Fajr, start, 30);
        let setting = PrayerSetting {
            color: "#ff0000".to_string(),
            duration: 30,
            enabled: true,
        };

        let line = PrayerLine {
            instant: &instant,
            setting: &setting,
        }
        .render();
        assert!(line.contains("05:00"), "line: {:?}", line);
        assert!(line.contains("Fajr"), "line: {:?}", line);
        assert!(line.contains("\x1b[38;2;255;0;0m"), "swatch in #ff0000: {:?}", line);
    }
}
