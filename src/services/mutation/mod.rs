//! Mutation commands and the seam that carries them to the store.
//!
//! Layout and drag code never talk to the network. They emit a
//! [`MutationCommand`]; the [`MutationDispatcher`] hands it to a
//! [`MutationSink`] and reports the outcome back to the view layer, which
//! owns any optimistic state and reverts it on failure.

use std::time::Duration;

use chrono::{LocalResult, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::models::entity::{Entity, EntityKind};

pub mod dispatcher;
pub mod http;

pub use dispatcher::{MutationDispatcher, MutationReport};
pub use http::HttpMutationSink;

/// A PATCH-style update keyed by entity id. Applying one twice is harmless.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MutationCommand {
    Reschedule {
        entity_id: String,
        kind: EntityKind,
        new_start: NaiveDateTime,
        new_end: NaiveDateTime,
    },
    SetCompleted {
        entity_id: String,
        kind: EntityKind,
        completed: bool,
    },
}

impl MutationCommand {
    pub fn entity_id(&self) -> &str {
        match self {
            MutationCommand::Reschedule { entity_id, .. } => entity_id,
            MutationCommand::SetCompleted { entity_id, .. } => entity_id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            MutationCommand::Reschedule { kind, .. } => *kind,
            MutationCommand::SetCompleted { kind, .. } => *kind,
        }
    }

    /// Fields sent to the store for this update.
    ///
    /// Entity times are wall-clock times in `tz`; they go out as RFC 3339
    /// with that zone's offset. A local time that is skipped or repeated by
    /// a daylight-saving change has no single instant and is an error.
    pub fn patch_body(&self, tz: Tz) -> Result<serde_json::Value, MutationError> {
        match self {
            MutationCommand::Reschedule {
                entity_id,
                new_start,
                new_end,
                ..
            } => {
                let start = to_rfc3339(entity_id, *new_start, tz)?;
                let end = to_rfc3339(entity_id, *new_end, tz)?;
                Ok(json!({ "start": start, "end": end }))
            }
            MutationCommand::SetCompleted { completed, .. } => {
                Ok(json!({ "completed": completed }))
            }
        }
    }

    /// Copy of `entity` with this command applied, for optimistic display.
    /// `None` when the command targets another entity.
    pub fn apply_to(&self, entity: &Entity) -> Option<Entity> {
        if entity.id != self.entity_id() {
            return None;
        }

        let mut updated = entity.clone();
        match self {
            MutationCommand::Reschedule {
                new_start, new_end, ..
            } => {
                updated.start = *new_start;
                updated.end = *new_end;
            }
            MutationCommand::SetCompleted { completed, .. } => {
                updated.completed = *completed;
            }
        }
        Some(updated)
    }

    pub fn describe(&self) -> String {
        match self {
            MutationCommand::Reschedule {
                entity_id,
                new_start,
                ..
            } => format!("Reschedule {} to {}", entity_id, new_start),
            MutationCommand::SetCompleted {
                entity_id,
                completed,
                ..
            } => format!("Mark {} {}", entity_id, if *completed { "done" } else { "not done" }),
        }
    }
}

fn to_rfc3339(entity_id: &str, local: NaiveDateTime, tz: Tz) -> Result<String, MutationError> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(instant) => Ok(instant.to_rfc3339()),
        _ => Err(MutationError::UnresolvableLocalTime {
            entity_id: entity_id.to_string(),
            local,
            zone: tz.name().to_string(),
        }),
    }
}

/// Flip an entity's completion flag.
pub fn toggle_completion(entity: &Entity) -> MutationCommand {
    MutationCommand::SetCompleted {
        entity_id: entity.id.clone(),
        kind: entity.kind,
        completed: !entity.completed,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Store rejected update for {entity_id} with HTTP status {status}")]
    Rejected { entity_id: String, status: u16 },
    #[error("Update for {entity_id} timed out after {timeout:?}")]
    TimedOut { entity_id: String, timeout: Duration },
    #[error("Mutation worker failed: {0}")]
    Worker(String),
    #[error("Local time {local} for {entity_id} does not exist exactly once in {zone}")]
    UnresolvableLocalTime {
        entity_id: String,
        local: NaiveDateTime,
        zone: String,
    },
}

/// Something that can apply a mutation to the backing store.
#[cfg_attr(test, mockall::automock)]
pub trait MutationSink: Send + Sync {
    fn apply(&self, command: &MutationCommand) -> Result<(), MutationError>;
}
