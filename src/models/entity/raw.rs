//! Boundary between loosely typed store records and [`Entity`].
//!
//! Records arrive with string timestamps, optional fields and free-form
//! priority labels. Everything is normalized here once so the layout engines
//! only ever see the closed types.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::{Entity, EntityError, EntityKind, Priority};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// An entity record as delivered by the remote store.
///
/// Every field is optional and string fields also accept numbers, so a
/// sloppy record still deserializes and is rejected later by
/// [`RawEntity::into_entity`] with a proper [`EntityError`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEntity {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub start: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub end: Option<String>,
    #[serde(default, alias = "allDay", deserialize_with = "lenient_bool")]
    pub all_day: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub completed: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub color: Option<String>,
}

impl RawEntity {
    /// Convert into a validated entity, resolving offsets into `tz`.
    pub fn into_entity(self, tz: Tz) -> Result<Entity, EntityError> {
        let id = match self.id {
            Some(id) if !id.trim().is_empty() => id,
            _ => return Err(EntityError::MissingId),
        };
        let start = match self.start.as_deref() {
            Some(value) => parse_field(&id, "start", value, tz)?,
            None => return Err(EntityError::MissingStart(id)),
        };
        let end = match self.end.as_deref() {
            Some(value) => parse_field(&id, "end", value, tz)?,
            None => return Err(EntityError::MissingEnd(id)),
        };

        let entity = Entity {
            id,
            title: self.title.unwrap_or_default(),
            kind: EntityKind::normalize(self.kind.as_deref()),
            start,
            end,
            all_day: self.all_day,
            priority: Priority::normalize(self.priority.as_deref()),
            completed: self.completed,
            color: self.color,
        };

        entity.validate()?;
        Ok(entity)
    }
}

/// Strings pass through, numbers and booleans are stringified, anything
/// else (null, arrays, objects) reads as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(Value::Bool(flag)) => Some(flag.to_string()),
        _ => None,
    })
}

/// `true`, `1` and `"true"` are true; everything else is false.
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(flag)) => flag,
        Some(Value::Number(number)) => number.as_i64() == Some(1),
        Some(Value::String(text)) => text.trim().eq_ignore_ascii_case("true"),
        _ => false,
    })
}

fn parse_field(
    id: &str,
    field: &'static str,
    value: &str,
    tz: Tz,
) -> Result<NaiveDateTime, EntityError> {
    parse_timestamp(value, tz).ok_or_else(|| EntityError::InvalidTimestamp {
        id: id.to_string(),
        field,
        value: value.to_string(),
    })
}

/// Parse a store timestamp into wall-clock time in `tz`.
///
/// Accepts RFC 3339 with an offset, naive date-times and bare dates
/// (midnight). Returns `None` for anything else.
pub fn parse_timestamp(value: &str, tz: Tz) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Some(with_offset.with_timezone(&tz).naive_local());
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}

/// Entities that survived normalization plus a count of dropped records.
#[derive(Debug, Clone, Default)]
pub struct EntityCollection {
    pub entities: Vec<Entity>,
    pub skipped: usize,
}

/// Normalize a batch of store records, keeping the first record per id.
pub fn normalize_collection(records: Vec<RawEntity>, tz: Tz) -> EntityCollection {
    let mut seen = HashSet::new();
    let mut collection = EntityCollection::default();

    for record in records {
        let result = record.into_entity(tz).and_then(|entity| {
            if seen.insert(entity.id.clone()) {
                Ok(entity)
            } else {
                Err(EntityError::DuplicateId(entity.id))
            }
        });

        match result {
            Ok(entity) => collection.entities.push(entity),
            Err(err) => {
                log::warn!("Skipping entity: {}", err);
                collection.skipped += 1;
            }
        }
    }

    collection
}

/// Normalize a batch of untyped JSON records. Records that do not even
/// deserialize into a [`RawEntity`] (not an object, say) count as skipped.
pub fn normalize_values(values: Vec<Value>, tz: Tz) -> EntityCollection {
    let mut rejected = 0;
    let records: Vec<RawEntity> = values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<RawEntity>(value) {
            Ok(record) => Some(record),
            Err(err) => {
                log::warn!("Skipping unreadable entity record: {}", err);
                rejected += 1;
                None
            }
        })
        .collect();

    let mut collection = normalize_collection(records, tz);
    collection.skipped += rejected;
    collection
}
