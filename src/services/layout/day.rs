//! Day view placement on a 24-hour vertical axis.
//!
//! Timed entities become [`LayoutBlock`]s that may overlap; the renderer
//! draws them translucent and relies on `stack_order` for legibility.
//! All-day entities are listed separately for the all-day strip.
//!
//! An entity that crosses midnight is only placed on its start day, and its
//! height is computed from time-of-day components, so it collapses to the
//! minimum block height.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{well_formed, PriorityOrdering};
use crate::models::entity::Entity;
use crate::models::layout::{DayLayout, LayoutBlock};
use crate::utils::date::hours_since_midnight;

/// Pixel geometry of the hour axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayLayoutConfig {
    pub hour_height: f32,
    pub min_block_height: f32,
}

impl Default for DayLayoutConfig {
    fn default() -> Self {
        Self {
            hour_height: 60.0,
            min_block_height: 20.0,
        }
    }
}

pub struct DayLayoutEngine;

impl DayLayoutEngine {
    pub fn layout<'a>(
        entities: &'a [Entity],
        date: NaiveDate,
        config: &DayLayoutConfig,
    ) -> DayLayout<'a> {
        let (valid, skipped) = well_formed(entities);

        let mut all_day: Vec<&Entity> = valid
            .iter()
            .copied()
            .filter(|entity| entity.all_day && entity.covers_date(date))
            .collect();
        PriorityOrdering::sort(&mut all_day);

        let mut timed: Vec<&Entity> = valid
            .into_iter()
            .filter(|entity| !entity.all_day && entity.starts_on(date))
            .collect();
        PriorityOrdering::sort(&mut timed);

        let count = timed.len();
        let blocks: Vec<LayoutBlock<'a>> = timed
            .into_iter()
            .enumerate()
            .map(|(position, entity)| Self::place(entity, position, count, config))
            .collect();

        log::debug!(
            "Day layout for {}: {} blocks, {} all-day, {} skipped",
            date,
            blocks.len(),
            all_day.len(),
            skipped
        );

        DayLayout {
            date,
            all_day,
            blocks,
            skipped,
        }
    }

    /// Position one entity that sits at `position` of `count` sorted blocks.
    pub fn place<'a>(
        entity: &'a Entity,
        position: usize,
        count: usize,
        config: &DayLayoutConfig,
    ) -> LayoutBlock<'a> {
        let start_hours = hours_since_midnight(entity.start);
        let end_hours = hours_since_midnight(entity.end);
        let duration = (end_hours - start_hours).max(0.0);

        LayoutBlock {
            entity,
            top_offset: start_hours * config.hour_height,
            height: (duration * config.hour_height).max(config.min_block_height),
            stack_order: Self::priority_weight(entity, count) + position,
        }
    }

    /// Base stacking weight. Every position index is below `count`, so a
    /// higher rank always lands above a lower one.
    fn priority_weight(entity: &Entity, count: usize) -> usize {
        PriorityOrdering::rank(entity) as usize * count.max(1)
    }
}
