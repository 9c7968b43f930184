//! Duration-preserving drag reschedule.
//!
//! Turns a drop gesture into new start/end times and a mutation command.
//! Nothing here performs I/O; the command goes to the mutation dispatcher.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use thiserror::Error;

use crate::models::entity::{Entity, EntityError, EntityKind};
use crate::services::mutation::MutationCommand;

mod drag;

pub use drag::{DragContext, DragView};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RescheduleError {
    #[error("No date could be resolved from the drop location")]
    NoTarget,
    #[error("Cannot reschedule malformed entity: {0}")]
    MalformedEntity(#[from] EntityError),
    #[error("Rescheduled time for entity {0} is out of range")]
    OutOfRange(String),
}

/// New placement computed for a dropped entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reschedule {
    pub entity_id: String,
    pub kind: EntityKind,
    pub new_start: NaiveDateTime,
    pub new_end: NaiveDateTime,
}

impl Reschedule {
    pub fn duration(&self) -> Duration {
        self.new_end - self.new_start
    }

    pub fn into_command(self) -> MutationCommand {
        MutationCommand::Reschedule {
            entity_id: self.entity_id,
            kind: self.kind,
            new_start: self.new_start,
            new_end: self.new_end,
        }
    }
}

pub struct DragRescheduler;

impl DragRescheduler {
    /// Move an entity to `target_date`, keeping its time of day and duration.
    pub fn on_drop(
        entity: &Entity,
        target_date: Option<NaiveDate>,
    ) -> Result<Reschedule, RescheduleError> {
        entity.validate()?;
        let date = target_date.ok_or(RescheduleError::NoTarget)?;
        Self::reschedule(entity, date.and_time(entity.start.time()))
    }

    /// Move an entity onto a time slot, keeping its duration.
    pub fn on_drop_at_slot(
        entity: &Entity,
        target_date: Option<NaiveDate>,
        slot_time: NaiveTime,
    ) -> Result<Reschedule, RescheduleError> {
        entity.validate()?;
        let date = target_date.ok_or(RescheduleError::NoTarget)?;
        Self::reschedule(entity, date.and_time(slot_time))
    }

    fn reschedule(
        entity: &Entity,
        new_start: NaiveDateTime,
    ) -> Result<Reschedule, RescheduleError> {
        let new_end = new_start
            .checked_add_signed(entity.duration())
            .ok_or_else(|| RescheduleError::OutOfRange(entity.id.clone()))?;

        log::debug!(
            "Rescheduling {} from {} to {} (duration {} min)",
            entity.id,
            entity.start,
            new_start,
            entity.duration().num_minutes()
        );

        Ok(Reschedule {
            entity_id: entity.id.clone(),
            kind: entity.kind,
            new_start,
            new_end,
        })
    }
}
