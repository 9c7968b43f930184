//! Calendar layout engines.
//!
//! Each engine is a pure function from an entity snapshot and a view window
//! to placement structures that borrow the snapshot. Malformed entities are
//! dropped and counted in the result's `skipped` field; nothing here panics
//! or returns an error on bad data.

use crate::models::entity::Entity;

pub mod day;
pub mod month;
pub mod priority;
pub mod week;

pub use day::{DayLayoutConfig, DayLayoutEngine};
pub use month::MonthSpanEngine;
pub use priority::PriorityOrdering;
pub use week::WeekLayoutEngine;

/// Split a snapshot into entities the engines can place and a skip count.
pub(crate) fn well_formed(entities: &[Entity]) -> (Vec<&Entity>, usize) {
    let mut valid = Vec::with_capacity(entities.len());
    let mut skipped = 0;

    for entity in entities {
        match entity.validate() {
            Ok(()) => valid.push(entity),
            Err(err) => {
                log::warn!("Excluding entity from layout: {}", err);
                skipped += 1;
            }
        }
    }

    (valid, skipped)
}
