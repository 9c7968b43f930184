// Entity module
// Calendar item model shared by events and tasks

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod raw;

pub use raw::{
    normalize_collection, normalize_values, parse_timestamp, EntityCollection, RawEntity,
};

/// Whether a calendar item came from the events or the tasks table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    #[default]
    Event,
    Task,
}

impl EntityKind {
    /// Normalize a loosely typed kind string. Anything but "task" is an event.
    pub fn normalize(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()) {
            Some(kind) if kind == "task" || kind == "tasks" => EntityKind::Task,
            _ => EntityKind::Event,
        }
    }

    /// Collection segment used by the mutation endpoint.
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Event => "events",
            EntityKind::Task => "tasks",
        }
    }
}

/// Priority class, ordered from most to least urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Map a raw priority label onto the closed set.
    ///
    /// Accepts `high/medium/low` and the letter grades `A/B/C` in any case.
    /// Missing or unrecognized labels become `Medium`; this never fails.
    pub fn normalize(raw: Option<&str>) -> Self {
        let Some(label) = raw else {
            return Priority::Medium;
        };

        match label.trim().to_ascii_lowercase().as_str() {
            "high" | "a" => Priority::High,
            "medium" | "b" => Priority::Medium,
            "low" | "c" => Priority::Low,
            other => {
                if !other.is_empty() {
                    log::debug!("Unknown priority {:?}, treating as medium", label);
                }
                Priority::Medium
            }
        }
    }

    /// Numeric urgency, higher is more urgent.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

/// Reasons an entity cannot take part in layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    #[error("Entity id is required")]
    MissingId,
    #[error("Entity title is required")]
    MissingTitle,
    #[error("Entity {0} start time is required")]
    MissingStart(String),
    #[error("Entity {0} end time is required")]
    MissingEnd(String),
    #[error("Entity {id} has an unreadable {field} timestamp {value:?}")]
    InvalidTimestamp {
        id: String,
        field: &'static str,
        value: String,
    },
    #[error("Entity {id} ends ({end}) before it starts ({start})")]
    EndBeforeStart {
        id: String,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    #[error("Duplicate entity id {0}")]
    DuplicateId(String),
}

/// A calendar item (event or task) as seen by the layout engines.
///
/// `start` and `end` are wall-clock times in the user's time zone. When
/// `all_day` is set only their dates matter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    pub id: String,
    pub title: String,
    pub kind: EntityKind,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub all_day: bool,
    pub priority: Priority,
    pub completed: bool,
    pub color: Option<String>,
}

impl Entity {
    /// Create a timed, medium-priority event.
    ///
    /// # Examples
    /// ```
    /// use rust_planner::models::entity::Entity;
    /// use chrono::NaiveDate;
    ///
    /// let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    /// let start = day.and_hms_opt(9, 0, 0).unwrap();
    /// let end = day.and_hms_opt(10, 30, 0).unwrap();
    /// let entity = Entity::new("e-1", "Standup", start, end).unwrap();
    /// assert_eq!(entity.duration(), chrono::Duration::minutes(90));
    /// ```
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, EntityError> {
        let entity = Self {
            id: id.into(),
            title: title.into(),
            kind: EntityKind::Event,
            start,
            end,
            all_day: false,
            priority: Priority::Medium,
            completed: false,
            color: None,
        };
        entity.validate()?;
        Ok(entity)
    }

    /// Create a builder for constructing entities with optional fields
    pub fn builder() -> EntityBuilder {
        EntityBuilder::new()
    }

    /// Check the structural invariants every engine relies on.
    pub fn validate(&self) -> Result<(), EntityError> {
        if self.id.trim().is_empty() {
            return Err(EntityError::MissingId);
        }

        if self.end < self.start {
            return Err(EntityError::EndBeforeStart {
                id: self.id.clone(),
                start: self.start,
                end: self.end,
            });
        }

        Ok(())
    }

    pub fn is_well_formed(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date()
    }

    /// True when the start falls on `date` (calendar-day match).
    pub fn starts_on(&self, date: NaiveDate) -> bool {
        self.start.date() == date
    }

    /// True when `date` lies within `[start, end]` compared as dates.
    pub fn covers_date(&self, date: NaiveDate) -> bool {
        self.start.date() <= date && date <= self.end.date()
    }

    /// True when the entity's dates differ, i.e. it needs a span in month view.
    pub fn is_multi_day(&self) -> bool {
        self.start.date() != self.end.date()
    }
}

/// Builder for creating entities with optional fields
pub struct EntityBuilder {
    id: Option<String>,
    title: Option<String>,
    kind: EntityKind,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    all_day: bool,
    priority: Priority,
    completed: bool,
    color: Option<String>,
}

impl EntityBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            title: None,
            kind: EntityKind::Event,
            start: None,
            end: None,
            all_day: false,
            priority: Priority::Medium,
            completed: false,
            color: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn kind(mut self, kind: EntityKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    /// Set as all-day entity
    pub fn all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Set the display colour. Passed through untouched.
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Build the entity
    pub fn build(self) -> Result<Entity, EntityError> {
        let id = self.id.ok_or(EntityError::MissingId)?;
        let title = self.title.ok_or(EntityError::MissingTitle)?;
        let start = self.start.ok_or_else(|| EntityError::MissingStart(id.clone()))?;
        let end = self.end.ok_or_else(|| EntityError::MissingEnd(id.clone()))?;

        let entity = Entity {
            id,
            title,
            kind: self.kind,
            start,
            end,
            all_day: self.all_day,
            priority: self.priority,
            completed: self.completed,
            color: self.color,
        };

        entity.validate()?;
        Ok(entity)
    }
}

impl Default for EntityBuilder {
    fn default() -> Self {
        Self::new()
    }
}
