// Layout models
// Derived placement structures produced by the layout engines.
// They borrow the entity snapshot and are rebuilt on every layout pass.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::entity::Entity;
use crate::utils::date::{days_between, month_bounds, month_grid_window};

/// The whole calendar weeks drawn for one month, including spill-over days
/// from the neighbouring months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub month_first: NaiveDate,
    pub month_last: NaiveDate,
}

impl GridWindow {
    /// Window for a month, or `None` when year/month is not a real month.
    pub fn for_month(year: i32, month: u32, first_day_of_week: u8) -> Option<Self> {
        let (month_first, month_last) = month_bounds(year, month)?;
        let (start, end) = month_grid_window(year, month, first_day_of_week)?;
        Some(Self {
            start,
            end,
            month_first,
            month_last,
        })
    }

    /// Window for the month containing `date`.
    pub fn containing(date: NaiveDate, first_day_of_week: u8) -> Option<Self> {
        Self::for_month(date.year(), date.month(), first_day_of_week)
    }

    pub fn rows(&self) -> usize {
        ((days_between(self.start, self.end) + 1).max(0) as usize).div_ceil(7)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn in_month(&self, date: NaiveDate) -> bool {
        self.month_first <= date && date <= self.month_last
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |date| *date <= self.end)
    }
}

/// One entity positioned on a day's 24-hour axis. Offsets are in pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutBlock<'a> {
    pub entity: &'a Entity,
    pub top_offset: f32,
    pub height: f32,
    pub stack_order: usize,
}

/// One week-row segment of a multi-day entity in the month grid.
///
/// `col + span <= 7` always holds. `slot` counts the entries placed earlier
/// in the same row, giving first-come vertical stacking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpanEntry<'a> {
    pub entity: &'a Entity,
    pub row: usize,
    pub col: usize,
    pub span: usize,
    pub slot: usize,
}

impl SpanEntry<'_> {
    /// First and last grid day covered by this segment.
    pub fn day_range(&self, grid_start: NaiveDate) -> (NaiveDate, NaiveDate) {
        let offset = (self.row * 7 + self.col) as i64;
        let first = grid_start + chrono::Duration::days(offset);
        (first, first + chrono::Duration::days(self.span as i64 - 1))
    }
}

/// A priority-sorted list cut to a visible count, with the remainder counted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CappedList<'a> {
    pub visible: Vec<&'a Entity>,
    pub hidden_count: usize,
}

impl<'a> CappedList<'a> {
    /// Keep the first `cap` entries of an already sorted list.
    pub fn from_sorted(mut entities: Vec<&'a Entity>, cap: usize) -> Self {
        let hidden_count = entities.len().saturating_sub(cap);
        entities.truncate(cap);
        Self {
            visible: entities,
            hidden_count,
        }
    }

    pub fn total(&self) -> usize {
        self.visible.len() + self.hidden_count
    }

    pub fn has_overflow(&self) -> bool {
        self.hidden_count > 0
    }

    /// Label for the overflow affordance, e.g. "+2 more".
    pub fn overflow_label(&self) -> Option<String> {
        self.has_overflow()
            .then(|| format!("+{} more", self.hidden_count))
    }
}

/// Output of the day view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayLayout<'a> {
    pub date: NaiveDate,
    pub all_day: Vec<&'a Entity>,
    pub blocks: Vec<LayoutBlock<'a>>,
    pub skipped: usize,
}

/// Entities starting in one (day, hour) cell of the week grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourCell<'a> {
    pub hour: u32,
    pub entities: Vec<&'a Entity>,
}

/// One column of the week grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekDay<'a> {
    pub date: NaiveDate,
    pub all_day: Vec<&'a Entity>,
    pub summary: CappedList<'a>,
    pub cells: Vec<HourCell<'a>>,
}

/// Output of the week view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekLayout<'a> {
    pub days: Vec<WeekDay<'a>>,
    pub skipped: usize,
}

/// Single-day chips for one month grid cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthCell<'a> {
    pub date: NaiveDate,
    pub in_month: bool,
    pub chips: CappedList<'a>,
}

/// Output of the month view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthLayout<'a> {
    pub grid_start: NaiveDate,
    pub grid_end: NaiveDate,
    pub rows: usize,
    pub spans: Vec<SpanEntry<'a>>,
    pub cells: Vec<MonthCell<'a>>,
    pub skipped: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: &str) -> Entity {
        let day = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        Entity::new(id, id, day.and_hms_opt(9, 0, 0).unwrap(), day.and_hms_opt(10, 0, 0).unwrap())
            .unwrap()
    }

    #[test]
    fn test_grid_window_for_month() {
        // February 2026 starts on a Sunday and has exactly four weeks.
        let window = GridWindow::for_month(2026, 2, 0).unwrap();
        assert_eq!(window.start, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
        assert_eq!(window.end, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
        assert_eq!(window.rows(), 4);
        assert_eq!(window.dates().count(), 28);

        let march = GridWindow::for_month(2026, 3, 0).unwrap();
        assert_eq!(march.rows(), 5);
        assert!(march.contains(NaiveDate::from_ymd_opt(2026, 4, 4).unwrap()));
        assert!(!march.in_month(NaiveDate::from_ymd_opt(2026, 4, 4).unwrap()));
    }

    #[test]
    fn test_capped_list_overflow() {
        let entities: Vec<Entity> = (0..5).map(|i| sample(&i.to_string())).collect();
        let list = CappedList::from_sorted(entities.iter().collect(), 3);

        assert_eq!(list.visible.len(), 3);
        assert_eq!(list.hidden_count, 2);
        assert_eq!(list.total(), 5);
        assert_eq!(list.overflow_label().as_deref(), Some("+2 more"));
    }

    #[test]
    fn test_capped_list_under_cap() {
        let entities = [sample("a")];
        let list = CappedList::from_sorted(entities.iter().collect(), 3);

        assert_eq!(list.hidden_count, 0);
        assert!(!list.has_overflow());
        assert!(list.overflow_label().is_none());
    }

    #[test]
    fn test_span_entry_day_range() {
        let entity = sample("a");
        let grid_start = NaiveDate::from_ymd_opt(2024, 12, 29).unwrap();
        let entry = SpanEntry {
            entity: &entity,
            row: 1,
            col: 2,
            span: 3,
            slot: 0,
        };

        let (first, last) = entry.day_range(grid_start);
        assert_eq!(first, NaiveDate::from_ymd_opt(2025, 1, 7).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2025, 1, 9).unwrap());
    }
}
