//! Week view bucketing into a 7-day by hour-slot grid.
//!
//! Every entity is single-cell here: timed entities sit in the hour cell of
//! their start, multi-day ones only on their start day. All-day entities get
//! a lane on every day they cover and never enter the hour cells or the
//! capped summary.

use chrono::{NaiveDate, Timelike};

use super::{well_formed, PriorityOrdering};
use crate::models::entity::Entity;
use crate::models::layout::{CappedList, HourCell, WeekDay, WeekLayout};
use crate::utils::date::{get_week_start, week_dates};

pub struct WeekLayoutEngine;

impl WeekLayoutEngine {
    /// Lay out the seven days beginning at `week_start`.
    pub fn layout<'a>(
        entities: &'a [Entity],
        week_start: NaiveDate,
        hour_slots: &[u32],
        visible_cap: usize,
    ) -> WeekLayout<'a> {
        let (valid, skipped) = well_formed(entities);

        let days: Vec<WeekDay<'a>> = week_dates(week_start)
            .into_iter()
            .map(|date| Self::layout_day(&valid, date, hour_slots, visible_cap))
            .collect();

        log::debug!(
            "Week layout from {}: {} entities placed, {} skipped",
            week_start,
            valid.len(),
            skipped
        );

        WeekLayout { days, skipped }
    }

    /// Lay out the week that contains `date`.
    pub fn layout_for_date<'a>(
        entities: &'a [Entity],
        date: NaiveDate,
        first_day_of_week: u8,
        hour_slots: &[u32],
        visible_cap: usize,
    ) -> WeekLayout<'a> {
        Self::layout(
            entities,
            get_week_start(date, first_day_of_week),
            hour_slots,
            visible_cap,
        )
    }

    fn layout_day<'a>(
        valid: &[&'a Entity],
        date: NaiveDate,
        hour_slots: &[u32],
        visible_cap: usize,
    ) -> WeekDay<'a> {
        let mut timed: Vec<&'a Entity> = valid
            .iter()
            .copied()
            .filter(|entity| !entity.all_day && entity.starts_on(date))
            .collect();
        PriorityOrdering::sort(&mut timed);

        let mut all_day: Vec<&'a Entity> = valid
            .iter()
            .copied()
            .filter(|entity| entity.all_day && entity.covers_date(date))
            .collect();
        PriorityOrdering::sort(&mut all_day);

        let cells = hour_slots
            .iter()
            .map(|&hour| HourCell {
                hour,
                entities: timed
                    .iter()
                    .copied()
                    .filter(|entity| entity.start.hour() == hour)
                    .collect(),
            })
            .collect();

        WeekDay {
            date,
            all_day,
            summary: CappedList::from_sorted(timed, visible_cap),
            cells,
        }
    }
}
