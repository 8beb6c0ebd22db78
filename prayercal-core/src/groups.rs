//! Event groups: named, colored buckets for interval templates.
//!
//! A group's color is inherited by every event resolved from its templates,
//! and groups decide which ICS file an event is exported to.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{PrayerCalError, PrayerCalResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventGroup {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    pub color: String,
}

/// Colors handed out to new groups. Each is one channel off, one at 180 and
/// one in between, so neighbouring groups stay visually distinct.
const GROUP_PALETTE: [[u8; 3]; 8] = [
    [0, 180, 90],
    [180, 0, 120],
    [60, 0, 180],
    [0, 150, 180],
    [180, 120, 0],
    [120, 180, 0],
    [180, 0, 30],
    [0, 45, 180],
];

/// Minimum per-channel distance from the previous group's color
const MIN_CHANNEL_DIFF: i16 = 75;

/// The ordered set of groups. Never empty once loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupRegistry {
    groups: Vec<EventGroup>,
}

impl GroupRegistry {
    pub fn new(groups: Vec<EventGroup>) -> Self {
        let mut registry = GroupRegistry { groups };
        registry.ensure_default();
        registry
    }

    /// Add a default group if there are none.
    pub fn ensure_default(&mut self) {
        if self.groups.is_empty() {
            self.add(None);
        }
    }

    /// Create a group named `name` (or `Group N`) with the next palette color.
    pub fn add(&mut self, name: Option<&str>) -> EventGroup {
        let name = match name.map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => format!("Group {}", self.groups.len() + 1),
        };

        let group = EventGroup {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            color: self.next_color(),
        };
        self.groups.push(group.clone());
        group
    }

    pub fn update_color(&mut self, id: &str, color: &str) -> PrayerCalResult<&EventGroup> {
        validate_color(color)?;
        let group = self.get_mut(id)?;
        group.color = color.to_string();
        Ok(group)
    }

    pub fn rename(&mut self, id: &str, name: &str) -> PrayerCalResult<&EventGroup> {
        let group = self.get_mut(id)?;
        group.name = name.trim().to_string();
        Ok(group)
    }

    /// Remove a group. Removing the last group leaves a fresh default in its place.
    pub fn delete(&mut self, id: &str) -> PrayerCalResult<EventGroup> {
        let index = self
            .groups
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| PrayerCalError::GroupNotFound(id.to_string()))?;
        let removed = self.groups.remove(index);
        self.ensure_default();
        Ok(removed)
    }

    pub fn get(&self, id: &str) -> Option<&EventGroup> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Look a group up by id, falling back to an exact name match.
    pub fn find(&self, id_or_name: &str) -> Option<&EventGroup> {
        self.get(id_or_name)
            .or_else(|| self.groups.iter().find(|g| g.name == id_or_name))
    }

    pub fn all(&self) -> &[EventGroup] {
        &self.groups
    }

    fn get_mut(&mut self, id: &str) -> PrayerCalResult<&mut EventGroup> {
        self.groups
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| PrayerCalError::GroupNotFound(id.to_string()))
    }

    fn next_color(&self) -> String {
        let last = self
            .groups
            .last()
            .and_then(|g| parse_hex(&g.color))
            .unwrap_or([0, 0, 0]);

        let start = self.groups.len() % GROUP_PALETTE.len();
        let rgb = (0..GROUP_PALETTE.len())
            .map(|i| GROUP_PALETTE[(start + i) % GROUP_PALETTE.len()])
            .find(|candidate| is_distinct(candidate, &last))
            .unwrap_or(GROUP_PALETTE[start]);

        format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
    }
}

/// At least one channel differs from `previous` by the minimum distance.
fn is_distinct(candidate: &[u8; 3], previous: &[u8; 3]) -> bool {
    candidate
        .iter()
        .zip(previous)
        .any(|(a, b)| (i16::from(*a) - i16::from(*b)).abs() >= MIN_CHANNEL_DIFF)
}

fn parse_hex(color: &str) -> Option<[u8; 3]> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// Accept `#rrggbb` or a bare color word such as `green`.
pub fn validate_color(color: &str) -> PrayerCalResult<()> {
    let valid = parse_hex(color).is_some()
        || (!color.is_empty() && color.chars().all(|c| c.is_ascii_alphabetic()));
    if valid {
        Ok(())
    } else {
        Err(PrayerCalError::InvalidColor(color.to_string()))
    }
}

/// Group ids created by the web editor are millisecond timestamps (numbers).
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}
