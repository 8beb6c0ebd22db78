//! JSON file storage for prayer data, templates, groups and resolved events.
//!
//! Each collection lives in its own file in the data directory and is always
//! written whole. Resolved events are never edited in place: any change to the
//! schedule or the templates regenerates them from scratch.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{PrayerCalError, PrayerCalResult};
use crate::event::ResolvedEvent;
use crate::groups::{EventGroup, GroupRegistry};
use crate::resolver::resolve;
use crate::schedule::PrayerSchedule;
use crate::template::UserIntervalEvent;

const SCHEDULE_FILE: &str = "schedule.json";
const TEMPLATES_FILE: &str = "templates.json";
const GROUPS_FILE: &str = "groups.json";
const RESOLVED_FILE: &str = "resolved.json";

#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Store { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    // SCHEDULE:

    pub fn schedule(&self) -> PrayerCalResult<PrayerSchedule> {
        self.read(SCHEDULE_FILE)
    }

    /// Merge freshly fetched prayer data (replacing overlapping days) and regenerate.
    pub fn merge_schedule(&self, fresh: PrayerSchedule) -> PrayerCalResult<Vec<ResolvedEvent>> {
        let mut schedule = self.schedule()?;
        schedule.merge(fresh);
        self.write(SCHEDULE_FILE, &schedule)?;
        self.regenerate()
    }

    // TEMPLATES:

    pub fn templates(&self) -> PrayerCalResult<Vec<UserIntervalEvent>> {
        self.read(TEMPLATES_FILE)
    }

    /// Replace all templates and regenerate.
    pub fn save_templates(
        &self,
        templates: &[UserIntervalEvent],
    ) -> PrayerCalResult<Vec<ResolvedEvent>> {
        self.write(TEMPLATES_FILE, templates)?;
        self.regenerate()
    }

    pub fn add_template(&self, template: UserIntervalEvent) -> PrayerCalResult<Vec<ResolvedEvent>> {
        let mut templates = self.templates()?;
        templates.push(template);
        self.save_templates(&templates)
    }

    pub fn remove_template(&self, id: &str) -> PrayerCalResult<UserIntervalEvent> {
        let mut templates = self.templates()?;
        let index = templates
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| PrayerCalError::TemplateNotFound(id.to_string()))?;
        let removed = templates.remove(index);
        self.save_templates(&templates)?;
        Ok(removed)
    }

    // GROUPS:

    /// Load groups. An empty registry gets a default group, saved right away
    /// so its id stays stable across loads.
    pub fn groups(&self) -> PrayerCalResult<GroupRegistry> {
        let groups: Vec<EventGroup> = self.read(GROUPS_FILE)?;
        let created_default = groups.is_empty();

        let registry = GroupRegistry::new(groups);
        if created_default {
            self.write(GROUPS_FILE, &registry)?;
            tracing::debug!("created default group");
        }
        Ok(registry)
    }

    /// Save groups and refresh the group copies embedded in templates.
    ///
    /// Templates whose group no longer exists lose their group.
    pub fn save_groups(&self, registry: &GroupRegistry) -> PrayerCalResult<()> {
        self.write(GROUPS_FILE, registry)?;

        let mut templates = self.templates()?;
        let mut changed = false;
        for template in &mut templates {
            let Some(ref current) = template.group else {
                continue;
            };
            let updated = registry.get(&current.id).cloned();
            if updated.as_ref() != Some(current) {
                template.group = updated;
                changed = true;
            }
        }

        if changed {
            self.save_templates(&templates)?;
        }
        Ok(())
    }

    // RESOLVED EVENTS:

    pub fn resolved(&self) -> PrayerCalResult<Vec<ResolvedEvent>> {
        self.read(RESOLVED_FILE)
    }

    /// Rebuild all resolved events from the stored schedule and templates.
    pub fn regenerate(&self) -> PrayerCalResult<Vec<ResolvedEvent>> {
        let schedule = self.schedule()?;
        let templates = self.templates()?;

        let events = resolve(&schedule, &templates);
        self.write(RESOLVED_FILE, &events)?;

        tracing::info!(events = events.len(), "regenerated interval events");
        Ok(events)
    }

    // IO:

    fn read<T: DeserializeOwned + Default>(&self, file: &str) -> PrayerCalResult<T> {
        let path = self.dir.join(file);
        if !path.exists() {
            return Ok(T::default());
        }
        let content = std::fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|e| {
            PrayerCalError::Serialization(format!("{}: {}", path.display(), e))
        })
    }

    /// Write via a temp file and rename so readers never see a partial file.
    fn write<T: Serialize + ?Sized>(&self, file: &str, value: &T) -> PrayerCalResult<()> {
        std::fs::create_dir_all(&self.dir)?;

        let path = self.dir.join(file);
        let tmp = self.dir.join(format!("{}.tmp", file));
        let content = serde_json::to_string_pretty(value)?;

        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}
