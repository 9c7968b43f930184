//! Month view: continuous bars for multi-day entities, chips for the rest.
//!
//! A multi-day entity is clipped to the grid window and cut at week-row
//! boundaries, producing one [`SpanEntry`] per row it touches. Bars sharing
//! a row stack in collection order (`slot`); no packing is attempted.

use chrono::Duration;

use super::{well_formed, PriorityOrdering};
use crate::models::entity::Entity;
use crate::models::layout::{CappedList, GridWindow, MonthCell, MonthLayout, SpanEntry};
use crate::utils::date::days_between;

pub struct MonthSpanEngine;

impl MonthSpanEngine {
    pub fn layout<'a>(
        entities: &'a [Entity],
        window: &GridWindow,
        visible_cap: usize,
    ) -> MonthLayout<'a> {
        let (valid, skipped) = well_formed(entities);

        let spans = Self::spans(&valid, window);

        let cells = window
            .dates()
            .map(|date| {
                let mut chips: Vec<&'a Entity> = valid
                    .iter()
                    .copied()
                    .filter(|entity| !entity.is_multi_day() && entity.starts_on(date))
                    .collect();
                PriorityOrdering::sort(&mut chips);

                MonthCell {
                    date,
                    in_month: window.in_month(date),
                    chips: CappedList::from_sorted(chips, visible_cap),
                }
            })
            .collect();

        log::debug!(
            "Month layout {}..{}: {} span entries, {} skipped",
            window.start,
            window.end,
            spans.len(),
            skipped
        );

        MonthLayout {
            grid_start: window.start,
            grid_end: window.end,
            rows: window.rows(),
            spans,
            cells,
            skipped,
        }
    }

    /// Span entries for every multi-day entity, in collection order.
    pub fn spans<'a>(entities: &[&'a Entity], window: &GridWindow) -> Vec<SpanEntry<'a>> {
        let mut row_fill: Vec<usize> = vec![0; window.rows()];
        let mut entries = Vec::new();

        for entity in entities.iter().copied().filter(|entity| entity.is_multi_day()) {
            for (row, col, span) in Self::segments(entity, window) {
                let slot = row_fill[row];
                row_fill[row] += 1;
                entries.push(SpanEntry {
                    entity,
                    row,
                    col,
                    span,
                    slot,
                });
            }
        }

        entries
    }

    /// `(row, col, span)` for each week row the entity's clipped dates touch.
    pub fn segments(entity: &Entity, window: &GridWindow) -> Vec<(usize, usize, usize)> {
        let effective_start = entity.start_date().max(window.start);
        let effective_end = entity.end_date().min(window.end);

        let mut segments = Vec::new();
        let mut cursor = effective_start;

        while cursor <= effective_end {
            let days_from_start = days_between(window.start, cursor);
            let row = (days_from_start / 7) as usize;
            let col = (days_from_start % 7) as usize;

            let week_start = window.start + Duration::days(row as i64 * 7);
            let week_end = week_start + Duration::days(6);

            let sub_start = cursor.max(week_start);
            let sub_end = effective_end.min(week_end);
            let span = (days_between(sub_start, sub_end) + 1) as usize;

            segments.push((row, col, span));

            cursor = match week_end.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }

        segments
    }
}
